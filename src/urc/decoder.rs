//! Kind specific field extraction from raw notification payloads.

use heapless::String;

use super::event::{Event, MqttMessage, Sms, SmsListEntry};
use super::tokenizer::RawUnit;
use super::vocabulary::NotificationKind;

/// Marks the start of the sender number in a listing entry. The sentinel
/// itself is not part of the number.
pub const NUMBER_SENTINEL: [u8; 2] = *b"88";

/// Decode a unit into an event. Returns `None` for units outside the
/// vocabulary and for malformed units.
pub fn decode<const N: usize>(unit: &RawUnit<N>) -> Option<Event> {
    let payload = trim_start(&unit.payload);

    let event = match unit.kind {
        NotificationKind::None => return None,
        NotificationKind::NetworkRegistration => Event::NetworkRegistration {
            stat: saturate_u8(parse_decimal(registration_stat(payload))),
        },
        NotificationKind::TimeZone => Event::TimeZone(text(payload)),
        NotificationKind::CallIndicator => {
            let (indicator, value) = split_once(payload, b',');
            Event::CallIndicator {
                indicator: text(unquote(indicator)),
                value: saturate_u8(parse_decimal(value)),
            }
        }
        NotificationKind::StorageConfig => Event::StorageConfig(text(payload)),
        NotificationKind::NewSms => Event::NewSms {
            index: saturate_u16(parse_decimal(last_field(payload))),
        },
        NotificationKind::SmsList => Event::SmsList(decode_sms_list(payload)),
        NotificationKind::SmsRead => Event::SmsRead(decode_sms_read(payload)),
        NotificationKind::GpsData => Event::GpsData(text(payload)),
        NotificationKind::GprsAttach => Event::GprsAttach {
            attached: parse_decimal(first_field(payload)) != 0,
        },
        NotificationKind::AssistedGps => Event::AssistedGps(text(payload)),
        NotificationKind::Location => Event::Location(text(payload)),
        NotificationKind::MqttPublish => match decode_mqtt_publish(payload) {
            Some(message) => Event::MqttPublish(message),
            None => {
                debug!("Dropping malformed MQTT publish notification");
                return None;
            }
        },
        NotificationKind::MqttDisconnected => Event::MqttDisconnected {
            code: saturate_u16(parse_decimal(first_field(payload))),
        },
        NotificationKind::SmsSent => Event::SmsSent {
            reference: saturate_u16(parse_decimal(first_field(payload))),
        },
        NotificationKind::ModemError => Event::ModemError {
            code: saturate_u16(parse_decimal(first_field(payload))),
        },
        NotificationKind::SmsError => Event::SmsError {
            code: saturate_u16(parse_decimal(first_field(payload))),
        },
        NotificationKind::SignalQuality => Event::SignalQuality {
            value: saturate_u8(parse_decimal(first_field(payload))),
        },
        NotificationKind::Iccid => Event::Iccid(text(payload)),
        NotificationKind::Imei => Event::Imei(text(payload)),
    };

    Some(event)
}

/// `<id>,<topic>,<len>,<message>`: the first three commas delimit fields,
/// everything after the third belongs to the message.
fn decode_mqtt_publish(payload: &[u8]) -> Option<MqttMessage> {
    let mut commas = 0u8;
    let mut topic = 0..0;

    for (i, &b) in payload.iter().enumerate() {
        if b == b',' {
            commas += 1;
            match commas {
                1 => topic = i + 1..i + 1,
                3 => {
                    return Some(MqttMessage {
                        topic: text(&payload[topic]),
                        message: text(&payload[i + 1..]),
                    })
                }
                _ => {}
            }
        } else if commas == 1 {
            topic.end = i + 1;
        }
    }

    None
}

/// Header `<index>,"<stat>","<number>",...`, body on the next line. The
/// number starts after [`NUMBER_SENTINEL`] inside the third quoted field.
fn decode_sms_list(payload: &[u8]) -> SmsListEntry {
    let (header, body) = split_once(payload, b'\n');

    let mut quotes = 0u8;
    let mut prev = 0u8;
    let mut start = None;
    let mut number = 0..0;

    for (i, &b) in header.iter().enumerate() {
        if b == b'"' {
            quotes = quotes.saturating_add(1);
            if let Some(start) = start {
                number = start..i;
                break;
            }
        } else if quotes == 3
            && start.is_none()
            && [prev, b] == NUMBER_SENTINEL
        {
            start = Some(i + 1);
            number = i + 1..header.len();
        }
        prev = b;
    }

    SmsListEntry {
        number: text(&header[number]),
        body: text(body),
    }
}

/// Header `"<stat>","<number>",[<alpha>],"<timestamp>"`, body on the next
/// line. Quote 3 opens the number, quote 5 the timestamp.
fn decode_sms_read(payload: &[u8]) -> Sms {
    let (header, body) = split_once(payload, b'\n');

    let mut quotes = 0u8;
    let mut number = 0..0;
    let mut timestamp = 0..0;

    for (i, &b) in header.iter().enumerate() {
        if b != b'"' {
            continue;
        }
        quotes += 1;
        match quotes {
            3 => number = i + 1..i + 1,
            4 => number.end = i,
            5 => timestamp = i + 1..i + 1,
            6 => {
                timestamp.end = i;
                break;
            }
            _ => {}
        }
    }

    Sms {
        number: text(&header[number]),
        timestamp: text(&header[timestamp]),
        body: text(body),
    }
}

/// `<stat>[,<lac>,<ci>]` when unsolicited, `<n>,<stat>[,<lac>,<ci>]` in
/// answer to `AT+CREG?`. The query form has an even field count.
fn registration_stat(payload: &[u8]) -> &[u8] {
    let commas = payload.iter().filter(|&&b| b == b',').count();
    if commas % 2 == 1 {
        first_field(split_once(payload, b',').1)
    } else {
        first_field(payload)
    }
}

/// Leading decimal digits, after optional spaces. No digits gives 0, which
/// cannot be told apart from a reported zero.
pub fn parse_decimal(bytes: &[u8]) -> u32 {
    trim_start(bytes)
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

/// Copy into a bounded string. Excess input is cut on a character boundary
/// and invalid UTF-8 ends the copy.
fn text<const L: usize>(bytes: &[u8]) -> String<L> {
    let valid = match core::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    };

    let mut out = String::new();
    for c in valid.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != b' ').unwrap_or(bytes.len());
    &bytes[start..]
}

fn unquote(bytes: &[u8]) -> &[u8] {
    let bytes = trim_start(bytes);
    let bytes = bytes.strip_prefix(b"\"").unwrap_or(bytes);
    bytes.strip_suffix(b"\"").unwrap_or(bytes)
}

fn split_once(bytes: &[u8], delimiter: u8) -> (&[u8], &[u8]) {
    match bytes.iter().position(|&b| b == delimiter) {
        Some(i) => (&bytes[..i], &bytes[i + 1..]),
        None => (bytes, &[]),
    }
}

fn first_field(bytes: &[u8]) -> &[u8] {
    split_once(bytes, b',').0
}

fn last_field(bytes: &[u8]) -> &[u8] {
    match bytes.iter().rposition(|&b| b == b',') {
        Some(i) => &bytes[i + 1..],
        None => bytes,
    }
}

fn saturate_u8(v: u32) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

fn saturate_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
