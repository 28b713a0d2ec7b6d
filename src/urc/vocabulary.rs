//! Notification prefixes understood by the tokenizer.

/// Kind of an unsolicited notification, keyed by its `+TERM:` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotificationKind {
    /// `+CREG` network registration status
    NetworkRegistration,
    /// `+CTZV` network time and time zone
    TimeZone,
    /// `+CIEV` indicator event report
    CallIndicator,
    /// `+CPMS` preferred message storage
    StorageConfig,
    /// `+CMTI` new message stored at index
    NewSms,
    /// `+CMGL` one entry of a message listing
    SmsList,
    /// `+CMGR` read message header and body
    SmsRead,
    /// `+GPSRD` periodic NMEA report
    GpsData,
    /// `+CGATT` GPRS attach state
    GprsAttach,
    /// `+AGPS` assisted GPS report
    AssistedGps,
    /// `+LOCATION` cell based location
    Location,
    /// `+MQTTPUBLISH` message received on a subscribed topic
    MqttPublish,
    /// `+MQTTDISCONNECTED` broker connection lost
    MqttDisconnected,
    /// `+CMGS` message sent, with reference
    SmsSent,
    /// `+CME ERROR` mobile equipment error
    ModemError,
    /// `+CMS ERROR` message service error
    SmsError,
    /// `+CSQ` signal quality
    SignalQuality,
    /// `+CCID` SIM card identifier
    Iccid,
    /// `+EGMR` module IMEI
    Imei,
    /// Not part of the vocabulary. Never surfaced as an event.
    None,
}

const TERMS: [(&str, NotificationKind); 19] = [
    ("CREG", NotificationKind::NetworkRegistration),
    ("CTZV", NotificationKind::TimeZone),
    ("CIEV", NotificationKind::CallIndicator),
    ("CPMS", NotificationKind::StorageConfig),
    ("CMTI", NotificationKind::NewSms),
    ("CMGL", NotificationKind::SmsList),
    ("CMGR", NotificationKind::SmsRead),
    ("GPSRD", NotificationKind::GpsData),
    ("CGATT", NotificationKind::GprsAttach),
    ("AGPS", NotificationKind::AssistedGps),
    ("LOCATION", NotificationKind::Location),
    ("MQTTPUBLISH", NotificationKind::MqttPublish),
    ("MQTTDISCONNECTED", NotificationKind::MqttDisconnected),
    ("CMGS", NotificationKind::SmsSent),
    ("CME ERROR", NotificationKind::ModemError),
    ("CMS ERROR", NotificationKind::SmsError),
    ("CSQ", NotificationKind::SignalQuality),
    ("CCID", NotificationKind::Iccid),
    ("EGMR", NotificationKind::Imei),
];

/// Exact, case sensitive lookup of a prefix (without the leading `+` and the
/// terminator).
pub fn classify(prefix: &[u8]) -> NotificationKind {
    TERMS
        .iter()
        .find(|(term, _)| term.as_bytes() == prefix)
        .map(|&(_, kind)| kind)
        .unwrap_or(NotificationKind::None)
}

impl NotificationKind {
    /// Wire literal for this kind, `None` for [`NotificationKind::None`].
    pub fn term(self) -> Option<&'static str> {
        TERMS
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map(|&(term, _)| term)
    }

    /// Kinds carrying a header line followed by a body line.
    pub fn is_multi_line(self) -> bool {
        matches!(self, Self::SmsRead | Self::SmsList)
    }
}
