//! Unsolicited notifications: tokenizing, decoding and dispatching.

pub mod decoder;
pub mod dispatch;
pub mod event;
pub mod tokenizer;
pub mod vocabulary;

pub use decoder::decode;
pub use dispatch::{EventHandler, EventSender, Ingress};
pub use event::{Event, MqttMessage, Sms, SmsListEntry};
pub use tokenizer::{Phase, RawUnit, Tokenizer, TokenizerAction};
pub use vocabulary::{classify, NotificationKind};
