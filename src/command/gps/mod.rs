//! GNSS receiver of the A9G

pub mod types;

use atat::atat_derive::AtatCmd;
use types::{LocationSource, PowerState};

use super::NoResponse;

/// Power the GNSS receiver +GPS
#[derive(Clone, AtatCmd)]
#[at_cmd("+GPS", NoResponse, timeout_ms = 2000)]
pub struct SetGpsPower {
    #[at_arg(position = 0)]
    pub state: PowerState,
}

/// Periodic NMEA report +GPSRD
///
/// Reports arrive as `+GPSRD` notifications every `interval` seconds, 0
/// stops them.
#[derive(Clone, AtatCmd)]
#[at_cmd("+GPSRD", NoResponse, timeout_ms = 2000)]
pub struct SetGpsReadInterval {
    #[at_arg(position = 0)]
    pub interval: u16,
}

/// Assisted GPS +AGPS
#[derive(Clone, AtatCmd)]
#[at_cmd("+AGPS", NoResponse, timeout_ms = 2000)]
pub struct SetAssistedGps {
    #[at_arg(position = 0)]
    pub state: PowerState,
}

/// Location query +LOCATION
#[derive(Clone, AtatCmd)]
#[at_cmd("+LOCATION", NoResponse, timeout_ms = 2000)]
pub struct GetLocation {
    #[at_arg(position = 0)]
    pub source: LocationSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tests::serialize;

    #[test]
    fn receiver_control() {
        assert_eq!(
            serialize(&SetGpsPower {
                state: PowerState::On
            }),
            b"AT+GPS=1\r\n"
        );
        assert_eq!(serialize(&SetGpsReadInterval { interval: 5 }), b"AT+GPSRD=5\r\n");
        assert_eq!(
            serialize(&GetLocation {
                source: LocationSource::Cell
            }),
            b"AT+LOCATION=1\r\n"
        );
    }
}
