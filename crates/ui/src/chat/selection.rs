use murmur_storage::ContactId;

/// Which contact the conversation pane targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(ContactId),
}

impl Selection {
    /// Returns the active contact if and only if state is `Selected`.
    pub fn active(&self) -> Option<&ContactId> {
        match self {
            Self::Selected(contact_id) => Some(contact_id),
            Self::Unselected => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

/// Two-state selection machine plus the narrow-layout flag that gates `clear_selection`.
///
/// The controller never validates ids against the directory. An unknown id is a valid
/// selection whose timeline is simply empty.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: Selection,
    narrow_mode: bool,
}

impl SelectionController {
    pub fn new(narrow_mode: bool) -> Self {
        Self {
            state: Selection::Unselected,
            narrow_mode,
        }
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    pub fn active(&self) -> Option<&ContactId> {
        self.state.active()
    }

    pub fn narrow_mode(&self) -> bool {
        self.narrow_mode
    }

    /// Viewport input. Leaving narrow mode keeps the current selection.
    pub fn set_narrow_mode(&mut self, narrow_mode: bool) {
        if self.narrow_mode != narrow_mode {
            tracing::debug!(narrow_mode, "layout mode changed");
        }
        self.narrow_mode = narrow_mode;
    }

    /// Moves to `Selected(contact_id)` from either state. Returns whether the state changed.
    pub fn select_contact(&mut self, contact_id: ContactId) -> bool {
        if self.state.active() == Some(&contact_id) {
            return false;
        }

        tracing::debug!(contact = %contact_id, "contact selected");
        self.state = Selection::Selected(contact_id);
        true
    }

    /// Returns to `Unselected`. Only reachable in narrow mode, where the back affordance exists.
    pub fn clear_selection(&mut self) -> bool {
        if !self.narrow_mode {
            tracing::warn!("ignoring clear selection outside narrow mode");
            return false;
        }

        if !self.state.is_selected() {
            return false;
        }

        tracing::debug!("selection cleared");
        self.state = Selection::Unselected;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unselected() {
        let controller = SelectionController::new(false);
        assert_eq!(controller.state(), &Selection::Unselected);
        assert!(controller.active().is_none());
    }

    #[test]
    fn reselecting_moves_directly_between_contacts() {
        let mut controller = SelectionController::new(false);

        assert!(controller.select_contact("1".into()));
        assert!(controller.select_contact("2".into()));
        assert_eq!(controller.state(), &Selection::Selected("2".into()));
    }

    #[test]
    fn selecting_the_same_contact_twice_is_a_no_op() {
        let mut controller = SelectionController::new(false);

        assert!(controller.select_contact("1".into()));
        assert!(!controller.select_contact("1".into()));
        assert_eq!(controller.active(), Some(&ContactId::new("1")));
    }

    #[test]
    fn unknown_ids_are_still_selectable() {
        let mut controller = SelectionController::new(true);
        assert!(controller.select_contact("ghost".into()));
        assert!(controller.state().is_selected());
    }

    #[test]
    fn clear_selection_requires_narrow_mode() {
        let mut controller = SelectionController::new(false);
        controller.select_contact("1".into());

        assert!(!controller.clear_selection());
        assert!(controller.state().is_selected());

        controller.set_narrow_mode(true);
        assert!(controller.clear_selection());
        assert_eq!(controller.state(), &Selection::Unselected);
        assert!(!controller.clear_selection());
    }

    #[test]
    fn leaving_narrow_mode_keeps_selection() {
        let mut controller = SelectionController::new(true);
        controller.select_contact("3".into());
        controller.set_narrow_mode(false);

        assert_eq!(controller.active(), Some(&ContactId::new("3")));
    }
}
