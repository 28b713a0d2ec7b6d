//! AT Commands for the Ai-Thinker A9/A9G module family
//!
//! Commands are only serialized through `atat`. Their information responses
//! (`+CSQ`, `+CCID`, `+CMGR`, ...) arrive through the notification ingress
//! as [`crate::urc::Event`]s, and the final `OK` is matched by
//! [`crate::client::Client`].

pub mod general;
#[cfg(feature = "gps")]
pub mod gps;
pub mod mqtt;
pub mod psn;
pub mod sms;

use atat::atat_derive::{AtatCmd, AtatResp};

#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse, timeout_ms = 2000)]
pub struct AT;
