//! Short Messages Service
//!
//! Read and list responses (`+CMGR`, `+CMGL`) span a header line and a body
//! line. They are decoded by the notification ingress, so text mode must be
//! selected with [`SetMessageFormat`] first.

mod impl_;
pub mod types;

use atat::atat_derive::AtatCmd;
use types::{DeleteFlag, MessageFormat, MessageStatus};

use super::NoResponse;

/// Message format +CMGF
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGF", NoResponse, timeout_ms = 2000)]
pub struct SetMessageFormat {
    #[at_arg(position = 0)]
    pub format: MessageFormat,
}

/// Read message +CMGR
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGR", NoResponse, timeout_ms = 2000)]
pub struct ReadMessage {
    #[at_arg(position = 0)]
    pub index: u16,
}

/// List messages +CMGL
///
/// Each entry is reported as a separate `+CMGL` unit.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGL", NoResponse, timeout_ms = 2000)]
pub struct ListMessages {
    #[at_arg(position = 0)]
    pub status: MessageStatus,
}

/// Send message +CMGS
///
/// Terminated by a bare carriage return. The module answers with a `> `
/// prompt; the text follows, ended by Ctrl-Z, and completion is reported as
/// `+CMGS: <mr>` before the final `OK`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGS", NoResponse, timeout_ms = 2000, termination = "\r")]
pub struct SendMessage<'a> {
    #[at_arg(position = 0, len = 20)]
    pub number: &'a str,
}

/// Delete message +CMGD
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGD", NoResponse, timeout_ms = 2000)]
pub struct DeleteMessage {
    #[at_arg(position = 0)]
    pub index: u16,
    #[at_arg(position = 1)]
    pub flag: DeleteFlag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tests::serialize;

    #[test]
    fn text_mode_and_read() {
        assert_eq!(
            serialize(&SetMessageFormat {
                format: MessageFormat::Text
            }),
            b"AT+CMGF=1\r\n"
        );
        assert_eq!(serialize(&ReadMessage { index: 3 }), b"AT+CMGR=3\r\n");
    }

    #[test]
    fn send_is_terminated_by_carriage_return() {
        assert_eq!(
            serialize(&SendMessage {
                number: "+8613800000000"
            }),
            b"AT+CMGS=\"+8613800000000\"\r"
        );
    }

    #[test]
    fn list_and_delete() {
        assert_eq!(
            serialize(&ListMessages {
                status: MessageStatus::All
            }),
            b"AT+CMGL=\"ALL\"\r\n"
        );
        assert_eq!(
            serialize(&DeleteMessage {
                index: 1,
                flag: DeleteFlag::Index,
            }),
            b"AT+CMGD=1,0\r\n"
        );
    }
}
