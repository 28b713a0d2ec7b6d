//! Command/response correlation over a shared byte stream.
//!
//! The modem interleaves unsolicited notifications with command responses.
//! While a command is pending every received byte is fed both to the
//! notification ingress and to a bounded response window, which is scanned for
//! the final `OK`.

use atat::helpers::LossyStr;
use atat::AtatCmd;
use embassy_futures::yield_now;
use embassy_time::{Duration, Instant};
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};
use heapless::Vec;

use crate::error::Error;
use crate::urc::{EventHandler, Ingress};

/// Default size of the response window.
pub const RESPONSE_WINDOW: usize = 150;

/// Largest serialized command accepted by [`Client::send`].
pub const COMMAND_BUFFER: usize = 512;

const READ_CHUNK: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    Pending,
    Satisfied,
    /// The window would have taken one byte more than it holds.
    Overflow,
}

/// A command waiting for its acknowledgement.
pub struct PendingCommand<const W: usize = RESPONSE_WINDOW> {
    deadline: Instant,
    window: Vec<u8, W>,
    satisfied: bool,
}

impl<const W: usize> PendingCommand<W> {
    pub fn new(deadline: Instant) -> Self {
        Self {
            deadline,
            window: Vec::new(),
            satisfied: false,
        }
    }

    pub fn observe(&mut self, byte: u8) -> Progress {
        if self.satisfied {
            return Progress::Satisfied;
        }

        if self.window.push(byte).is_err() {
            return Progress::Overflow;
        }

        if self.window.ends_with(b"OK") {
            self.satisfied = true;
            return Progress::Satisfied;
        }

        Progress::Pending
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn response(&self) -> &[u8] {
        &self.window
    }
}

/// Owns the serial port and the notification ingress. Only one command can be
/// in flight, enforced by `&mut self`.
pub struct Client<IO, H, const W: usize = RESPONSE_WINDOW> {
    io: IO,
    ingress: Ingress<H>,
}

impl<IO, H, const W: usize> Client<IO, H, W>
where
    IO: Read + Write + ReadReady,
    H: EventHandler,
{
    pub fn new(io: IO, handler: H) -> Self {
        Self {
            io,
            ingress: Ingress::new(handler),
        }
    }

    /// Write `command` verbatim and wait for `OK`.
    ///
    /// Notifications arriving before the verdict, and any bytes read together
    /// with the verdict, are dispatched to the handler.
    pub async fn execute(&mut self, command: &[u8], timeout: Duration) -> Result<(), Error> {
        debug!("Sending command: {:?}", LossyStr(command));
        self.write(command).await?;

        let mut pending = PendingCommand::<W>::new(Instant::now() + timeout);
        let mut buf = [0u8; READ_CHUNK];

        loop {
            if pending.expired(Instant::now()) {
                warn!(
                    "Command timed out, response so far: {:?}",
                    LossyStr(pending.response())
                );
                return Err(Error::Timeout);
            }

            if !self.io.read_ready().map_err(Error::io)? {
                yield_now().await;
                continue;
            }

            let n = self.io.read(&mut buf).await.map_err(Error::io)?;
            if n == 0 {
                yield_now().await;
                continue;
            }

            let mut verdict = None;
            for &b in &buf[..n] {
                self.ingress.feed(b);
                if verdict.is_none() {
                    match pending.observe(b) {
                        Progress::Pending => {}
                        Progress::Satisfied => verdict = Some(Ok(())),
                        Progress::Overflow => {
                            warn!("Response exceeded {} bytes", W);
                            verdict = Some(Err(Error::ResponseOverflow));
                        }
                    }
                }
            }

            if let Some(verdict) = verdict {
                return verdict;
            }
        }
    }

    /// Write `bytes` without waiting for a response.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.io.write_all(bytes).await.map_err(Error::io)?;
        self.io.flush().await.map_err(Error::io)
    }

    /// Boolean form of [`Client::execute`].
    pub async fn execute_ok(&mut self, command: &[u8], timeout_ms: u64) -> bool {
        self.execute(command, Duration::from_millis(timeout_ms))
            .await
            .is_ok()
    }

    /// Serialize `cmd` and execute it with its own timeout.
    pub async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<(), Error> {
        let mut buf = [0u8; COMMAND_BUFFER];
        let len = serialize(cmd, &mut buf)?;
        self.execute(&buf[..len], timeout::<Cmd>()).await
    }

    /// Serialize and write `cmd` without waiting, for commands answered by a
    /// prompt rather than `OK`.
    pub async fn send_no_wait<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<(), Error> {
        let mut buf = [0u8; COMMAND_BUFFER];
        let len = serialize(cmd, &mut buf)?;
        debug!("Sending command: {:?}", LossyStr(&buf[..len]));
        self.write(&buf[..len]).await
    }

    /// Wait for a line containing `needle`, dispatching everything else.
    pub async fn wait_for(&mut self, needle: &[u8], timeout: Duration) -> Result<(), Error> {
        let deadline = Instant::now() + timeout;
        let mut line = Vec::<u8, W>::new();
        let mut buf = [0u8; 1];

        loop {
            if Instant::now() >= deadline {
                return Err(Error::Timeout);
            }

            if !self.io.read_ready().map_err(Error::io)? {
                yield_now().await;
                continue;
            }

            if self.io.read(&mut buf).await.map_err(Error::io)? == 0 {
                yield_now().await;
                continue;
            }

            let b = buf[0];
            self.ingress.feed(b);

            if b == b'\n' {
                line.clear();
                continue;
            }

            // Overlong lines are scanned from their tail
            if line.push(b).is_err() {
                line.clear();
                line.push(b).ok();
            }

            if !needle.is_empty() && line.ends_with(needle) {
                return Ok(());
            }
        }
    }

    /// Dispatch whatever is already buffered, without waiting. Returns the
    /// number of bytes consumed.
    pub async fn poll(&mut self) -> Result<usize, Error> {
        let mut buf = [0u8; READ_CHUNK];
        let mut total = 0;

        while self.io.read_ready().map_err(Error::io)? {
            let n = self.io.read(&mut buf).await.map_err(Error::io)?;
            if n == 0 {
                break;
            }
            self.ingress.ingest(&buf[..n]);
            total += n;
        }

        Ok(total)
    }

    pub fn handler(&self) -> &H {
        self.ingress.handler()
    }

    pub fn handler_mut(&mut self) -> &mut H {
        self.ingress.handler_mut()
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    pub fn release(self) -> (IO, H) {
        (self.io, self.ingress.into_handler())
    }
}

pub(crate) fn timeout<Cmd: AtatCmd>() -> Duration {
    Duration::from_millis(Cmd::MAX_TIMEOUT_MS.into())
}

fn serialize<Cmd: AtatCmd>(cmd: &Cmd, buf: &mut [u8; COMMAND_BUFFER]) -> Result<usize, Error> {
    if Cmd::MAX_LEN > buf.len() {
        error!("Command needs {} bytes, buffer holds {}", Cmd::MAX_LEN, COMMAND_BUFFER);
        return Err(Error::CommandTooLong);
    }
    Ok(cmd.write(buf))
}
