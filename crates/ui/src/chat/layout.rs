use super::selection::Selection;

/// Which panes the render surface should show for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneLayout {
    pub roster_visible: bool,
    pub conversation_visible: bool,
    /// Back affordance in the conversation header.
    pub back_available: bool,
    pub compose_visible: bool,
}

impl PaneLayout {
    /// Resolves pane visibility from the viewport flag and the selection state.
    ///
    /// Wide layouts always show both panes. Narrow layouts show exactly one: the roster while
    /// nothing is selected, the conversation once a contact is active.
    pub fn resolve(narrow_mode: bool, selection: &Selection) -> Self {
        let selected = selection.is_selected();
        Self {
            roster_visible: !narrow_mode || !selected,
            conversation_visible: !narrow_mode || selected,
            back_available: narrow_mode && selected,
            compose_visible: selected,
        }
    }
}
