use murmur_storage::{ContactId, MessageId};

/// Emitted when a roster row is activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactSelected {
    pub contact_id: ContactId,
}

/// Emitted by the conversation header's back affordance (narrow layouts only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackRequested;

/// Emitted when the user submits the compose field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub content: String,
}

/// Emitted on every edit of the roster search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchChanged {
    pub query: String,
}

/// Emitted by the viewport collaborator when the narrow breakpoint flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutChanged {
    pub narrow_mode: bool,
}

/// Output signal: the render surface should reveal the newest message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollToLatest {
    pub contact_id: ContactId,
    pub message_id: MessageId,
}

/// Input events accepted by [`crate::chat::ChatView::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    ContactSelected(ContactSelected),
    BackRequested(BackRequested),
    Submit(Submit),
    SearchChanged(SearchChanged),
    LayoutChanged(LayoutChanged),
}

impl ContactSelected {
    pub fn new(contact_id: impl Into<ContactId>) -> Self {
        Self {
            contact_id: contact_id.into(),
        }
    }
}

impl Submit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl SearchChanged {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl From<ContactSelected> for ChatEvent {
    fn from(event: ContactSelected) -> Self {
        Self::ContactSelected(event)
    }
}

impl From<BackRequested> for ChatEvent {
    fn from(event: BackRequested) -> Self {
        Self::BackRequested(event)
    }
}

impl From<Submit> for ChatEvent {
    fn from(event: Submit) -> Self {
        Self::Submit(event)
    }
}

impl From<SearchChanged> for ChatEvent {
    fn from(event: SearchChanged) -> Self {
        Self::SearchChanged(event)
    }
}

impl From<LayoutChanged> for ChatEvent {
    fn from(event: LayoutChanged) -> Self {
        Self::LayoutChanged(event)
    }
}
