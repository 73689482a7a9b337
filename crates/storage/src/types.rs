use serde::{Deserialize, Serialize};

use super::ids::{ContactId, MessageId};

/// Presence shown next to a contact's avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    #[default]
    Offline,
}

impl Presence {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

/// Who authored a message, relative to the local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Contact,
}

/// Roster record supplied by the directory loader. Read-only for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Opaque avatar URL; never fetched here.
    pub avatar: String,
    #[serde(rename = "status")]
    pub presence: Presence,
    pub last_message: String,
    /// Pre-formatted display text such as "10:30 AM" or "Yesterday".
    pub last_message_time: String,
    #[serde(default)]
    pub unread_count: u32,
}

impl Contact {
    pub fn new(id: impl Into<ContactId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            presence: Presence::default(),
            last_message: String::new(),
            last_message_time: String::new(),
            unread_count: 0,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_last_message(
        mut self,
        preview: impl Into<String>,
        display_time: impl Into<String>,
    ) -> Self {
        self.last_message = preview.into();
        self.last_message_time = display_time.into();
        self
    }

    pub fn with_unread_count(mut self, unread_count: u32) -> Self {
        self.unread_count = unread_count;
        self
    }
}

/// One entry of a timeline. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    /// Pre-formatted display text; not parsed.
    pub timestamp: String,
    pub sender: Sender,
    /// Read receipt flag, only meaningful for `Sender::User`.
    #[serde(default)]
    pub read: bool,
}

impl Message {
    pub fn new(
        id: impl Into<MessageId>,
        sender: Sender,
        content: impl Into<String>,
        timestamp: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp: timestamp.into(),
            sender,
            read,
        }
    }

    /// Creates an outbound message that has not been read yet.
    pub fn user_unread(id: MessageId, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(id, Sender::User, content, timestamp, false)
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}
