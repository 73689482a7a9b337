use murmur_storage::ContactId;

/// Tracks which timeline the render surface last showed and decides when to follow the tail.
///
/// A scroll is requested whenever the observed timeline length changes, and whenever a
/// different contact with a non-empty timeline comes into view. Observing the same contact at
/// the same length again never requests anything.
#[derive(Debug, Clone, Default)]
pub struct ScrollManager {
    observed: Option<ObservedTimeline>,
    pending_scroll_to_bottom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ObservedTimeline {
    contact_id: ContactId,
    len: usize,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll_to_bottom
    }

    pub fn request_scroll_to_bottom(&mut self) {
        self.pending_scroll_to_bottom = true;
    }

    /// Forgets the observed timeline, e.g. when the placeholder replaces the conversation.
    pub fn reset(&mut self) {
        self.observed = None;
        self.pending_scroll_to_bottom = false;
    }

    /// Records the timeline that is about to be rendered.
    pub fn observe(&mut self, contact_id: &ContactId, len: usize) {
        let next = ObservedTimeline {
            contact_id: contact_id.clone(),
            len,
        };

        let should_follow = match self.observed.as_ref() {
            Some(previous) if previous.contact_id == next.contact_id => previous.len != len,
            // A fresh selection only needs following when there is something to reveal.
            Some(_) | None => len > 0,
        };

        if should_follow {
            self.request_scroll_to_bottom();
        }
        self.observed = Some(next);
    }

    /// Consumes the pending request. Returns true when the consumer must scroll to the tail.
    pub fn apply_pending_scroll(&mut self) -> bool {
        std::mem::take(&mut self.pending_scroll_to_bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ContactId {
        ContactId::new(raw)
    }

    #[test]
    fn first_non_empty_timeline_requests_scroll() {
        let mut manager = ScrollManager::new();
        manager.observe(&id("a"), 3);
        assert!(manager.has_pending_scroll());
        assert!(manager.apply_pending_scroll());
        assert!(!manager.has_pending_scroll());
        assert!(!manager.apply_pending_scroll());
    }

    #[test]
    fn empty_timeline_on_selection_does_not_scroll() {
        let mut manager = ScrollManager::new();
        manager.observe(&id("a"), 0);
        assert!(!manager.apply_pending_scroll());
    }

    #[test]
    fn growth_requests_scroll_but_steady_state_does_not() {
        let mut manager = ScrollManager::new();
        manager.observe(&id("a"), 0);
        manager.observe(&id("a"), 1);
        assert!(manager.apply_pending_scroll());

        manager.observe(&id("a"), 1);
        assert!(!manager.apply_pending_scroll());
    }

    #[test]
    fn switching_contacts_follows_non_empty_timelines() {
        let mut manager = ScrollManager::new();
        manager.observe(&id("a"), 2);
        manager.apply_pending_scroll();

        manager.observe(&id("b"), 2);
        assert!(manager.apply_pending_scroll());

        manager.observe(&id("c"), 0);
        assert!(!manager.apply_pending_scroll());
    }

    #[test]
    fn reset_forgets_previous_timeline() {
        let mut manager = ScrollManager::new();
        manager.observe(&id("a"), 2);
        manager.request_scroll_to_bottom();
        manager.reset();
        assert!(!manager.has_pending_scroll());

        manager.observe(&id("a"), 2);
        assert!(manager.apply_pending_scroll());
    }
}
