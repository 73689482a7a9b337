use murmur_storage::{Contact, ContactDirectory, ContactId, Presence};

use super::selection::Selection;

pub const ROSTER_TITLE: &str = "Messages";
pub const SEARCH_PLACEHOLDER: &str = "Search contacts...";

/// Display data for one roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub contact_id: ContactId,
    pub name: String,
    pub avatar: String,
    pub presence: Presence,
    pub preview: String,
    pub preview_time: String,
    /// Present only when the contact has unread messages.
    pub unread_badge: Option<u32>,
    pub is_selected: bool,
}

impl RosterEntry {
    fn from_contact(contact: &Contact, selection: &Selection) -> Self {
        Self {
            contact_id: contact.id.clone(),
            name: contact.name.clone(),
            avatar: contact.avatar.clone(),
            presence: contact.presence,
            preview: contact.last_message.clone(),
            preview_time: contact.last_message_time.clone(),
            unread_badge: (contact.unread_count > 0).then_some(contact.unread_count),
            is_selected: selection.active() == Some(&contact.id),
        }
    }
}

/// Roster pane state.
///
/// The search field is kept so the render surface can echo it, but it never filters rows.
#[derive(Debug, Clone, Default)]
pub struct ChatSidebar {
    search_query: String,
}

impl ChatSidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// One entry per contact, in directory order.
    pub fn entries(&self, directory: &ContactDirectory, selection: &Selection) -> Vec<RosterEntry> {
        directory
            .iter()
            .map(|contact| RosterEntry::from_contact(contact, selection))
            .collect()
    }
}
