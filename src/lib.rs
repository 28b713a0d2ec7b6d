#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod client;
pub mod command;
pub mod config;
pub mod error;
mod modem;
mod module_timing;
pub mod urc;

#[cfg(test)]
mod test_helpers;

pub use client::Client;
pub use config::{Apn, Broker, ModemConfig};
pub use error::Error;
pub use modem::{Modem, OperationState};
pub use urc::{Event, EventHandler, EventSender, Ingress};
