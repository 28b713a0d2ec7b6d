use embedded_io::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// No `OK` was seen before the deadline elapsed.
    Timeout,
    /// The response window filled up before `OK` was seen.
    ResponseOverflow,
    /// The serialized command does not fit the outgoing command buffer.
    CommandTooLong,

    // Transport errors
    Io(ErrorKind),
}

impl Error {
    pub(crate) fn io<E: embedded_io::Error>(e: E) -> Self {
        Self::Io(e.kind())
    }
}

impl From<ErrorKind> for Error {
    fn from(e: ErrorKind) -> Self {
        Self::Io(e)
    }
}
