use chrono::{Local, NaiveTime};
use murmur_storage::{ContactId, ConversationStore, Message, MessageId};
use serde::{Deserialize, Serialize};

use super::selection::Selection;

/// Hour:minute rendering used for locally composed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFormat {
    /// "09:05 AM", matching the seeded history.
    #[default]
    TwelveHour,
    /// "21:05".
    TwentyFourHour,
}

impl ClockFormat {
    pub fn format(self, time: NaiveTime) -> String {
        let pattern = match self {
            Self::TwelveHour => "%I:%M %p",
            Self::TwentyFourHour => "%H:%M",
        };
        time.format(pattern).to_string()
    }
}

/// Wall-clock source for message timestamps.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Result of one `send` call.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// No contact was selected; nothing changed.
    Ignored,
    Appended {
        contact_id: ContactId,
        message: Message,
        store: ConversationStore,
    },
}

/// Turns outbound text into a user message on the active timeline.
pub struct ComposeGateway {
    clock: Box<dyn Clock>,
    clock_format: ClockFormat,
}

impl ComposeGateway {
    pub fn new(clock_format: ClockFormat) -> Self {
        Self::with_clock(SystemClock, clock_format)
    }

    pub fn with_clock(clock: impl Clock + 'static, clock_format: ClockFormat) -> Self {
        Self {
            clock: Box::new(clock),
            clock_format,
        }
    }

    /// Builds an unread user message stamped with the current time. Text is kept verbatim.
    pub fn compose(&self, text: impl Into<String>) -> Message {
        let timestamp = self.clock_format.format(self.clock.now());
        Message::user_unread(MessageId::generate(), text, timestamp)
    }

    /// Appends `text` to the selected contact's timeline.
    ///
    /// Without a selection this is a silent no-op. Blank and whitespace-only text is accepted.
    pub fn send(
        &self,
        selection: &Selection,
        store: &ConversationStore,
        text: impl Into<String>,
    ) -> SendOutcome {
        let Some(contact_id) = selection.active() else {
            tracing::debug!("send ignored without an active contact");
            return SendOutcome::Ignored;
        };

        let message = self.compose(text);
        let store = store.append(contact_id, message.clone());
        tracing::debug!(contact = %contact_id, message = %message.id, "message sent");
        SendOutcome::Appended {
            contact_id: contact_id.clone(),
            message,
            store,
        }
    }
}

impl Default for ComposeGateway {
    fn default() -> Self {
        Self::new(ClockFormat::default())
    }
}
