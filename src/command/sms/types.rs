use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageFormat {
    Pdu = 0,
    Text = 1,
}

/// Status filter of a message listing, text mode only. Serialized as its
/// quoted literal, see `impl_.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageStatus {
    ReceivedUnread,
    ReceivedRead,
    StoredUnsent,
    StoredSent,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeleteFlag {
    /// Only the message at the given index
    Index = 0,
    /// All read messages
    Read = 1,
    /// All read and sent messages
    ReadAndSent = 2,
    /// All read, sent and unsent messages
    ReadSentAndUnsent = 3,
    All = 4,
}
