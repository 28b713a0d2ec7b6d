use super::types::MessageStatus;
use atat::AtatLen;
use serde::{Serialize, Serializer};

impl MessageStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReceivedUnread => "REC UNREAD",
            Self::ReceivedRead => "REC READ",
            Self::StoredUnsent => "STO UNSENT",
            Self::StoredSent => "STO SENT",
            Self::All => "ALL",
        }
    }
}

impl Serialize for MessageStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl AtatLen for MessageStatus {
    // Longest literal plus quotes
    const LEN: usize = 12;
}
