//! General commands

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// Signal quality +CSQ
///
/// Reported as `+CSQ: <rssi>,<ber>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", NoResponse, timeout_ms = 2000)]
pub struct GetSignalQuality;

/// Card identification +CCID
///
/// Returns the ICCID (Integrated Circuit Card ID) of the SIM-card.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CCID", NoResponse, timeout_ms = 2000)]
pub struct GetCcid;

/// IMEI read +EGMR
///
/// Mode 2 reads, parameter 7 selects the IMEI.
#[derive(Clone, AtatCmd)]
#[at_cmd("+EGMR=2,7", NoResponse, timeout_ms = 2000)]
pub struct GetImei;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tests::serialize;

    #[test]
    fn identity_queries() {
        assert_eq!(serialize(&GetSignalQuality), b"AT+CSQ\r\n");
        assert_eq!(serialize(&GetCcid), b"AT+CCID\r\n");
        assert_eq!(serialize(&GetImei), b"AT+EGMR=2,7\r\n");
    }
}
