//! Embedded MQTT client
//!
//! Messages on subscribed topics arrive as `+MQTTPUBLISH` notifications, a
//! lost broker connection as `+MQTTDISCONNECTED`.

pub mod types;

use atat::atat_derive::AtatCmd;
use types::{CleanSession, Qos, SubscriptionAction};

use super::NoResponse;

/// Connect to broker +MQTTCONN
#[derive(Clone, AtatCmd)]
#[at_cmd("+MQTTCONN", NoResponse, timeout_ms = 2000)]
pub struct Connect<'a> {
    #[at_arg(position = 0, len = 64)]
    pub host: &'a str,
    #[at_arg(position = 1)]
    pub port: u16,
    #[at_arg(position = 2, len = 32)]
    pub client_id: &'a str,
    /// Keep alive interval in seconds
    #[at_arg(position = 3)]
    pub keep_alive: u16,
    #[at_arg(position = 4)]
    pub clean_session: CleanSession,
}

/// Disconnect from broker +MQTTDISCONN
#[derive(Clone, AtatCmd)]
#[at_cmd("+MQTTDISCONN", NoResponse, timeout_ms = 2000)]
pub struct Disconnect;

/// Subscribe to or unsubscribe from a topic +MQTTSUB
#[derive(Clone, AtatCmd)]
#[at_cmd("+MQTTSUB", NoResponse, timeout_ms = 2000)]
pub struct Subscribe<'a> {
    #[at_arg(position = 0, len = 64)]
    pub topic: &'a str,
    #[at_arg(position = 1)]
    pub action: SubscriptionAction,
    #[at_arg(position = 2)]
    pub qos: Qos,
}

/// Publish +MQTTPUB
#[derive(Clone, AtatCmd)]
#[at_cmd("+MQTTPUB", NoResponse, timeout_ms = 2000)]
pub struct Publish<'a> {
    #[at_arg(position = 0, len = 64)]
    pub topic: &'a str,
    #[at_arg(position = 1, len = 256)]
    pub message: &'a str,
    #[at_arg(position = 2)]
    pub qos: Qos,
    /// 0 or 1
    #[at_arg(position = 3)]
    pub dup: u8,
    /// 0 or 1
    #[at_arg(position = 4)]
    pub retain: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tests::serialize;

    #[test]
    fn connect() {
        assert_eq!(
            serialize(&Connect {
                host: "broker.hivemq.com",
                port: 1883,
                client_id: "a9g",
                keep_alive: 120,
                clean_session: CleanSession::Resume,
            }),
            b"AT+MQTTCONN=\"broker.hivemq.com\",1883,\"a9g\",120,0\r\n"
        );
        assert_eq!(serialize(&Disconnect), b"AT+MQTTDISCONN\r\n");
    }

    #[test]
    fn subscribe_and_publish() {
        assert_eq!(
            serialize(&Subscribe {
                topic: "sensors/#",
                action: SubscriptionAction::Subscribe,
                qos: Qos::AtMostOnce,
            }),
            b"AT+MQTTSUB=\"sensors/#\",1,0\r\n"
        );
        assert_eq!(
            serialize(&Publish {
                topic: "sensors/temp",
                message: "23.5",
                qos: Qos::ExactlyOnce,
                dup: 0,
                retain: 0,
            }),
            b"AT+MQTTPUB=\"sensors/temp\",\"23.5\",2,0,0\r\n"
        );
    }
}
