//! Packet switched data services
//!
//! Bringing up a data connection on the A9G takes three steps: attach to
//! GPRS, define the PDP context with the operator APN, and activate it.

pub mod types;

use atat::atat_derive::AtatCmd;
use types::{ContextId, GprsAttachedState, PdpContextStatus};

use super::NoResponse;

/// GPRS attach or detach +CGATT
///
/// The attach state is also reported unsolicited as `+CGATT: <state>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGATT", NoResponse, timeout_ms = 2000)]
pub struct SetGprsAttached {
    #[at_arg(position = 0)]
    pub state: GprsAttachedState,
}

/// PDP context definition +CGDCONT
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGDCONT", NoResponse, timeout_ms = 2000)]
pub struct SetPdpContextDefinition<'a> {
    #[at_arg(position = 0)]
    pub cid: ContextId,
    #[at_arg(position = 1, len = 6)]
    pub pdp_type: &'a str,
    #[at_arg(position = 2, len = 99)]
    pub apn: &'a str,
}

/// PDP context activate or deactivate +CGACT
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGACT", NoResponse, timeout_ms = 2000)]
pub struct SetPdpContextState {
    #[at_arg(position = 0)]
    pub status: PdpContextStatus,
    #[at_arg(position = 1)]
    pub cid: ContextId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tests::serialize;

    #[test]
    fn attach() {
        assert_eq!(
            serialize(&SetGprsAttached {
                state: GprsAttachedState::Attached
            }),
            b"AT+CGATT=1\r\n"
        );
    }

    #[test]
    fn define_and_activate_context() {
        assert_eq!(
            serialize(&SetPdpContextDefinition {
                cid: ContextId(1),
                pdp_type: "IP",
                apn: "internet",
            }),
            b"AT+CGDCONT=1,\"IP\",\"internet\"\r\n"
        );
        assert_eq!(
            serialize(&SetPdpContextState {
                status: PdpContextStatus::Activated,
                cid: ContextId(1),
            }),
            b"AT+CGACT=1,1\r\n"
        );
    }
}
