use embassy_time::Duration;

use crate::command::mqtt::types::CleanSession;
use crate::command::psn::types::ContextId;
use crate::module_timing::{command_timeout, ready_timeout};

pub trait ModemConfig<'a> {
    const CONTEXT_ID: ContextId = ContextId(1);

    const APN: Apn<'a> = Apn::None;

    /// Used for commands sent through [`crate::Modem::execute`]. Typed
    /// commands carry their own timeout.
    const COMMAND_TIMEOUT: Duration = command_timeout();
    const READY_TIMEOUT: Duration = ready_timeout();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Apn<'a> {
    /// Use whatever context the network provides, no `+CGDCONT` is sent
    #[default]
    None,
    Given {
        name: &'a str,
        /// `"IP"` unless the operator says otherwise
        pdp_type: &'a str,
    },
}

impl<'a> Apn<'a> {
    pub const fn ip(name: &'a str) -> Self {
        Self::Given {
            name,
            pdp_type: "IP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Broker<'a> {
    pub host: &'a str,
    pub port: u16,
    pub client_id: &'a str,
    /// Seconds
    pub keep_alive: u16,
    pub clean_session: CleanSession,
}

impl<'a> Broker<'a> {
    pub const fn new(host: &'a str, port: u16, client_id: &'a str) -> Self {
        Self {
            host,
            port,
            client_id,
            keep_alive: 120,
            clean_session: CleanSession::Resume,
        }
    }
}

/// Defaults for everything.
pub struct DefaultConfig;

impl ModemConfig<'_> for DefaultConfig {}
