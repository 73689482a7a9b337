use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::error::{DuplicateMessageIdSnafu, StorageResult};
use super::ids::{ContactId, MessageId};
use super::types::Message;

/// Ordered message history for one contact. Insertion order is display order.
pub type Timeline = Arc<[Message]>;

/// Immutable mapping from contact to timeline.
///
/// Every mutation returns a new store. Untouched timelines are shared with the previous
/// store, so holders of an older snapshot keep observing a complete state.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    timelines: HashMap<ContactId, Timeline>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from preloaded histories without checking message identifiers.
    pub fn from_timelines(timelines: impl IntoIterator<Item = (ContactId, Vec<Message>)>) -> Self {
        let timelines = timelines
            .into_iter()
            .map(|(contact_id, messages)| {
                debug_assert!(
                    first_duplicate_id(&messages).is_none(),
                    "timeline {contact_id} contains duplicate message identifiers"
                );
                (contact_id, Timeline::from(messages))
            })
            .collect();
        Self { timelines }
    }

    /// Builds a store from preloaded histories, rejecting duplicate message ids per timeline.
    pub fn try_from_timelines(
        timelines: impl IntoIterator<Item = (ContactId, Vec<Message>)>,
    ) -> StorageResult<Self> {
        let mut checked = HashMap::new();
        for (contact_id, messages) in timelines {
            if let Some(duplicate) = first_duplicate_id(&messages) {
                return DuplicateMessageIdSnafu {
                    stage: "load-conversation-timelines",
                    contact_id: contact_id.to_string(),
                    message_id: duplicate.to_string(),
                }
                .fail();
            }
            checked.insert(contact_id, Timeline::from(messages));
        }
        Ok(Self { timelines: checked })
    }

    /// Returns the timeline for `contact_id`, or an empty slice when nothing was recorded.
    pub fn timeline_for(&self, contact_id: &ContactId) -> &[Message] {
        self.timelines
            .get(contact_id)
            .map(|timeline| &timeline[..])
            .unwrap_or(&[])
    }

    /// Returns the shared timeline handle, if any message was ever recorded.
    pub fn timeline(&self, contact_id: &ContactId) -> Option<&Timeline> {
        self.timelines.get(contact_id)
    }

    /// Returns a new store where only `contact_id` gains `message` at its tail.
    #[must_use = "append returns a new store and leaves this one untouched"]
    pub fn append(&self, contact_id: &ContactId, message: Message) -> Self {
        let current = self.timeline_for(contact_id);
        debug_assert!(
            current.iter().all(|existing| existing.id != message.id),
            "message id {} already present in timeline {contact_id}",
            message.id
        );

        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend_from_slice(current);
        next.push(message);

        let mut timelines = self.timelines.clone();
        timelines.insert(contact_id.clone(), Timeline::from(next));
        tracing::trace!(contact = %contact_id, "appended message to timeline");
        Self { timelines }
    }

    pub fn len_for(&self, contact_id: &ContactId) -> usize {
        self.timeline_for(contact_id).len()
    }

    /// Contacts that have at least one recorded timeline, in no particular order.
    pub fn contact_ids(&self) -> impl Iterator<Item = &ContactId> {
        self.timelines.keys()
    }

    pub fn total_messages(&self) -> usize {
        self.timelines.values().map(|timeline| timeline.len()).sum()
    }
}

fn first_duplicate_id(messages: &[Message]) -> Option<&MessageId> {
    let mut seen = HashSet::with_capacity(messages.len());
    messages
        .iter()
        .map(|message| &message.id)
        .find(|id| !seen.insert(*id))
}
