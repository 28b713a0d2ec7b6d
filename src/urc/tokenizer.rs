//! Byte-at-a-time segmentation of the modem output into notification units.
//!
//! A unit starts with `+`, followed by a prefix terminated by `:` or `=`, and
//! a payload running up to the next carriage return. Message read and list
//! responses carry a second line: their payload is the header line, a single
//! `\n`, and the body line.
//!
//! A `+` that directly follows `AT` belongs to a command echo such as
//! `AT+CMGR=1`. Its prefix is discarded at the terminator.
//!
//! The tokenizer never looks back. Every byte causes exactly one transition
//! and at most one buffer append.

use core::mem;

use heapless::Vec;

use super::vocabulary::{classify, NotificationKind};

/// Longest prefix accepted before the candidate is discarded.
pub const PREFIX_CAPACITY: usize = 100;

/// Default payload capacity. Longer payloads are truncated.
pub const PAYLOAD_CAPACITY: usize = 256;

/// A recognized unit, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit<const N: usize = PAYLOAD_CAPACITY> {
    pub kind: NotificationKind,
    pub payload: Vec<u8, N>,
    /// Set when trailing payload bytes were dropped.
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerAction<const N: usize = PAYLOAD_CAPACITY> {
    Continue,
    Emit(RawUnit<N>),
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    CapturingPrefix,
    CapturingPayload,
    /// Header line plus body line of a multi-line kind.
    CapturingBody,
}

pub struct Tokenizer<const N: usize = PAYLOAD_CAPACITY> {
    phase: Phase,
    kind: NotificationKind,
    prefix: Vec<u8, PREFIX_CAPACITY>,
    payload: Vec<u8, N>,
    truncated: bool,
    /// Last two bytes seen, in any phase.
    recent: [u8; 2],
    echo: bool,
    in_body: bool,
}

impl<const N: usize> Default for Tokenizer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Tokenizer<N> {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            kind: NotificationKind::None,
            prefix: Vec::new(),
            payload: Vec::new(),
            truncated: false,
            recent: [0; 2],
            echo: false,
            in_body: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn feed(&mut self, byte: u8) -> TokenizerAction<N> {
        let recent = self.recent;
        self.recent = [recent[1], byte];

        match self.phase {
            Phase::Idle => {
                if byte == b'+' {
                    self.phase = Phase::CapturingPrefix;
                    self.echo = recent.eq_ignore_ascii_case(b"AT");
                }
                TokenizerAction::Continue
            }
            Phase::CapturingPrefix => self.capture_prefix(byte),
            Phase::CapturingPayload => {
                if byte == b'\r' {
                    return self.emit();
                }
                self.append(byte);
                TokenizerAction::Continue
            }
            Phase::CapturingBody => self.capture_body(byte, recent[1]),
        }
    }

    fn capture_prefix(&mut self, byte: u8) -> TokenizerAction<N> {
        match byte {
            b':' | b'=' if self.echo => {
                trace!("Ignoring echo of {:?}", atat::helpers::LossyStr(&self.prefix));
                self.discard()
            }
            b':' | b'=' => {
                self.kind = classify(&self.prefix);
                match self.kind {
                    NotificationKind::None => {
                        trace!("Ignoring unknown prefix {:?}", atat::helpers::LossyStr(&self.prefix));
                        self.discard()
                    }
                    kind if kind.is_multi_line() => {
                        self.phase = Phase::CapturingBody;
                        TokenizerAction::Continue
                    }
                    _ => {
                        self.phase = Phase::CapturingPayload;
                        TokenizerAction::Continue
                    }
                }
            }
            // Line ended without a terminator, e.g. the echo of `AT+CSQ`
            b'\r' | b'\n' => self.discard(),
            _ => {
                if self.prefix.push(byte).is_err() {
                    warn!("Prefix exceeded {} bytes, discarding", PREFIX_CAPACITY);
                    return self.discard();
                }
                TokenizerAction::Continue
            }
        }
    }

    fn capture_body(&mut self, byte: u8, prev: u8) -> TokenizerAction<N> {
        if self.in_body {
            if byte == b'\r' {
                return self.emit();
            }
            self.append(byte);
            return TokenizerAction::Continue;
        }

        match byte {
            b'\r' => {}
            b'\n' if prev == b'\r' => {
                self.in_body = true;
                self.append(b'\n');
            }
            _ => self.append(byte),
        }
        TokenizerAction::Continue
    }

    fn append(&mut self, byte: u8) {
        if self.payload.push(byte).is_err() && !self.truncated {
            warn!(
                "Payload of {:?} exceeded {} bytes, truncating",
                self.kind,
                N
            );
            self.truncated = true;
        }
    }

    fn emit(&mut self) -> TokenizerAction<N> {
        let unit = RawUnit {
            kind: self.kind,
            payload: mem::take(&mut self.payload),
            truncated: self.truncated,
        };
        self.reset();
        TokenizerAction::Emit(unit)
    }

    fn discard(&mut self) -> TokenizerAction<N> {
        self.payload.clear();
        self.reset();
        TokenizerAction::Discard
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.kind = NotificationKind::None;
        self.prefix.clear();
        self.truncated = false;
        self.echo = false;
        self.in_body = false;
    }
}
