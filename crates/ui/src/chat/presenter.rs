use murmur_storage::{Contact, ContactId, Message, MessageId, Presence, Sender};

use super::events::ScrollToLatest;
use super::scroll_manager::ScrollManager;
use super::selection::Selection;

/// Prompt shown in the conversation pane before any contact is chosen.
pub const PLACEHOLDER_PROMPT: &str = "Select a conversation to start messaging";

/// Horizontal placement of a message bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Contact-sent messages.
    Start,
    /// User-sent messages.
    End,
}

/// Receipt icon for user-sent messages, derived from `Message::read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadMarker {
    Read,
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: MessageId,
    pub content: String,
    pub timestamp: String,
    pub sender: Sender,
    pub alignment: Alignment,
    /// `None` for contact-sent messages.
    pub read_marker: Option<ReadMarker>,
}

impl MessageRow {
    pub fn from_message(message: &Message) -> Self {
        let (alignment, read_marker) = if message.is_from_user() {
            let marker = if message.read {
                ReadMarker::Read
            } else {
                ReadMarker::Sent
            };
            (Alignment::End, Some(marker))
        } else {
            (Alignment::Start, None)
        };

        Self {
            id: message.id.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp.clone(),
            sender: message.sender,
            alignment,
            read_marker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHeader {
    pub contact_id: ContactId,
    pub name: String,
    /// `None` when the selected id is not in the directory.
    pub avatar: Option<String>,
    pub presence: Presence,
    pub show_back: bool,
}

impl ConversationHeader {
    fn resolve(contact_id: &ContactId, contact: Option<&Contact>, show_back: bool) -> Self {
        match contact {
            Some(contact) => Self {
                contact_id: contact_id.clone(),
                name: contact.name.clone(),
                avatar: Some(contact.avatar.clone()),
                presence: contact.presence,
                show_back,
            },
            None => Self {
                contact_id: contact_id.clone(),
                name: contact_id.to_string(),
                avatar: None,
                presence: Presence::Offline,
                show_back,
            },
        }
    }

    pub fn presence_label(&self) -> &'static str {
        self.presence.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConversation {
    pub header: ConversationHeader,
    pub rows: Vec<MessageRow>,
}

impl ActiveConversation {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render model for the conversation pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineView {
    /// No contact selected. Distinct from an active conversation with zero messages.
    Placeholder,
    Active(ActiveConversation),
}

impl TimelineView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn active(&self) -> Option<&ActiveConversation> {
        match self {
            Self::Active(conversation) => Some(conversation),
            Self::Placeholder => None,
        }
    }
}

/// One render pass worth of presenter output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub view: TimelineView,
    pub scroll: Option<ScrollToLatest>,
}

/// Inputs for one presenter pass.
#[derive(Debug, Clone, Copy)]
pub struct PresenterInput<'a> {
    pub selection: &'a Selection,
    pub contact: Option<&'a Contact>,
    pub timeline: &'a [Message],
    pub narrow_mode: bool,
}

/// Derives the conversation render model and the follow-to-latest signal.
#[derive(Debug, Clone, Default)]
pub struct TimelinePresenter {
    scroll_manager: ScrollManager,
}

impl TimelinePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the render model. Must be called once per render pass; the scroll signal is
    /// emitted on the first pass that observes a new timeline length or a newly selected
    /// non-empty timeline.
    pub fn present(&mut self, input: PresenterInput<'_>) -> Presentation {
        let Some(contact_id) = input.selection.active() else {
            self.scroll_manager.reset();
            return Presentation {
                view: TimelineView::Placeholder,
                scroll: None,
            };
        };

        self.scroll_manager
            .observe(contact_id, input.timeline.len());
        let scroll = if self.scroll_manager.apply_pending_scroll() {
            input.timeline.last().map(|latest| ScrollToLatest {
                contact_id: contact_id.clone(),
                message_id: latest.id.clone(),
            })
        } else {
            None
        };

        let header = ConversationHeader::resolve(contact_id, input.contact, input.narrow_mode);
        let rows = input.timeline.iter().map(MessageRow::from_message).collect();

        Presentation {
            view: TimelineView::Active(ActiveConversation { header, rows }),
            scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Vec<Message> {
        vec![
            Message::new("1", Sender::Contact, "hi", "10:00 AM", true),
            Message::new("2", Sender::User, "hello", "10:01 AM", true),
            Message::new("3", Sender::User, "there?", "10:02 AM", false),
        ]
    }

    fn input<'a>(
        selection: &'a Selection,
        contact: Option<&'a Contact>,
        timeline: &'a [Message],
    ) -> PresenterInput<'a> {
        PresenterInput {
            selection,
            contact,
            timeline,
            narrow_mode: false,
        }
    }

    #[test]
    fn unselected_state_renders_placeholder() {
        let mut presenter = TimelinePresenter::new();
        let messages = timeline();

        let presentation = presenter.present(input(&Selection::Unselected, None, &messages));
        assert!(presentation.view.is_placeholder());
        assert!(presentation.scroll.is_none());
    }

    #[test]
    fn selected_empty_timeline_is_active_not_placeholder() {
        let mut presenter = TimelinePresenter::new();
        let contact = Contact::new("b", "Ben");
        let selection = Selection::Selected("b".into());

        let presentation = presenter.present(input(&selection, Some(&contact), &[]));
        let active = presentation.view.active().expect("active conversation");
        assert!(active.is_empty());
        assert_eq!(active.header.name, "Ben");
        assert!(presentation.scroll.is_none());
    }

    #[test]
    fn rows_carry_alignment_and_receipts() {
        let mut presenter = TimelinePresenter::new();
        let contact = Contact::new("a", "Ann");
        let selection = Selection::Selected("a".into());
        let messages = timeline();

        let presentation = presenter.present(input(&selection, Some(&contact), &messages));
        let rows = &presentation.view.active().expect("active").rows;

        assert_eq!(rows[0].alignment, Alignment::Start);
        assert_eq!(rows[0].read_marker, None);
        assert_eq!(rows[1].alignment, Alignment::End);
        assert_eq!(rows[1].read_marker, Some(ReadMarker::Read));
        assert_eq!(rows[2].read_marker, Some(ReadMarker::Sent));
        let ids = rows.iter().map(|row| row.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn scroll_signal_targets_latest_message_once() {
        let mut presenter = TimelinePresenter::new();
        let selection = Selection::Selected("a".into());
        let messages = timeline();

        let first = presenter.present(input(&selection, None, &messages));
        assert_eq!(
            first.scroll,
            Some(ScrollToLatest {
                contact_id: "a".into(),
                message_id: "3".into(),
            })
        );

        let second = presenter.present(input(&selection, None, &messages));
        assert!(second.scroll.is_none());
        assert_eq!(first.view, second.view);
    }

    #[test]
    fn unknown_contact_gets_fallback_header() {
        let mut presenter = TimelinePresenter::new();
        let selection = Selection::Selected("ghost".into());

        let presentation = presenter.present(PresenterInput {
            narrow_mode: true,
            ..input(&selection, None, &[])
        });
        let header = &presentation.view.active().expect("active").header;
        assert_eq!(header.name, "ghost");
        assert_eq!(header.avatar, None);
        assert_eq!(header.presence_label(), "Offline");
        assert!(header.show_back);
    }
}
