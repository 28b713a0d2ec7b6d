//! Scripted serial port for driving the client in tests.

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_io::ErrorKind;

/// Serial mock. Bytes queued with [`MockSerial::push_rx`] are available
/// immediately; each reply queued with [`MockSerial::reply`] becomes
/// available once the next write ending in `\n`, `\r` or Ctrl-Z is done.
#[derive(Default)]
pub struct MockSerial {
    rx: VecDeque<u8>,
    replies: VecDeque<Vec<u8>>,
    pub tx: Vec<u8>,
    /// Upper bound on the bytes handed out per read.
    pub chunk: Option<usize>,
    /// Error returned by the next read.
    pub read_error: Option<ErrorKind>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn reply(mut self, bytes: &[u8]) -> Self {
        self.replies.push_back(bytes.to_vec());
        self
    }

    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = Some(chunk);
        self
    }

    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl embedded_io::ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty() || self.read_error.is_some())
    }
}

impl embedded_io_async::Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if let Some(e) = self.read_error.take() {
            return Err(e);
        }

        let limit = self.chunk.unwrap_or(usize::MAX).min(buf.len());
        let mut n = 0;
        while n < limit {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io_async::Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.extend_from_slice(buf);
        if matches!(buf.last(), Some(b'\n' | b'\r' | 0x1a)) {
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply);
            }
        }
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
