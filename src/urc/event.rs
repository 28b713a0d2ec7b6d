//! Decoded notifications, as handed to the event handler.

use heapless::String;

use super::vocabulary::NotificationKind;

pub const TOPIC_LEN: usize = 64;
pub const MESSAGE_LEN: usize = 128;
pub const NUMBER_LEN: usize = 16;
pub const TIMESTAMP_LEN: usize = 24;
pub const BODY_LEN: usize = 160;
pub const IDENTITY_LEN: usize = 24;
pub const INDICATOR_LEN: usize = 16;
pub const REPORT_LEN: usize = 96;

/// Message received on a subscribed MQTT topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MqttMessage {
    pub topic: String<TOPIC_LEN>,
    pub message: String<MESSAGE_LEN>,
}

/// Response to a message read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sms {
    pub number: String<NUMBER_LEN>,
    pub timestamp: String<TIMESTAMP_LEN>,
    pub body: String<BODY_LEN>,
}

/// One entry of a message listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmsListEntry {
    /// Sender number, with the country code sentinel stripped.
    pub number: String<NUMBER_LEN>,
    pub body: String<BODY_LEN>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// From the unsolicited report or from the answer to `AT+CREG?`.
    NetworkRegistration { stat: u8 },
    TimeZone(String<REPORT_LEN>),
    CallIndicator {
        indicator: String<INDICATOR_LEN>,
        value: u8,
    },
    StorageConfig(String<REPORT_LEN>),
    /// A new message was stored at `index`.
    NewSms { index: u16 },
    SmsList(SmsListEntry),
    SmsRead(Sms),
    GpsData(String<REPORT_LEN>),
    GprsAttach { attached: bool },
    AssistedGps(String<REPORT_LEN>),
    Location(String<REPORT_LEN>),
    MqttPublish(MqttMessage),
    MqttDisconnected { code: u16 },
    SmsSent { reference: u16 },
    /// `code` is 0 when the report carried no digits.
    ModemError { code: u16 },
    /// `code` is 0 when the report carried no digits.
    SmsError { code: u16 },
    SignalQuality { value: u8 },
    Iccid(String<IDENTITY_LEN>),
    Imei(String<IDENTITY_LEN>),
}

impl Event {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::NetworkRegistration { .. } => NotificationKind::NetworkRegistration,
            Self::TimeZone(_) => NotificationKind::TimeZone,
            Self::CallIndicator { .. } => NotificationKind::CallIndicator,
            Self::StorageConfig(_) => NotificationKind::StorageConfig,
            Self::NewSms { .. } => NotificationKind::NewSms,
            Self::SmsList(_) => NotificationKind::SmsList,
            Self::SmsRead(_) => NotificationKind::SmsRead,
            Self::GpsData(_) => NotificationKind::GpsData,
            Self::GprsAttach { .. } => NotificationKind::GprsAttach,
            Self::AssistedGps(_) => NotificationKind::AssistedGps,
            Self::Location(_) => NotificationKind::Location,
            Self::MqttPublish(_) => NotificationKind::MqttPublish,
            Self::MqttDisconnected { .. } => NotificationKind::MqttDisconnected,
            Self::SmsSent { .. } => NotificationKind::SmsSent,
            Self::ModemError { .. } => NotificationKind::ModemError,
            Self::SmsError { .. } => NotificationKind::SmsError,
            Self::SignalQuality { .. } => NotificationKind::SignalQuality,
            Self::Iccid(_) => NotificationKind::Iccid,
            Self::Imei(_) => NotificationKind::Imei,
        }
    }
}
