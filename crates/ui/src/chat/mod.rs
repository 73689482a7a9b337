pub mod compose;
/// Event contracts for chat module wiring.
pub mod events;
pub mod layout;
/// Conversation pane render model and follow-to-latest signal.
pub mod presenter;
pub mod scroll_manager;
/// Active-contact state machine.
pub mod selection;
pub mod sidebar;
pub mod view;

pub use compose::{ClockFormat, Clock, ComposeGateway, FixedClock, SendOutcome, SystemClock};
pub use events::{
    BackRequested, ChatEvent, ContactSelected, LayoutChanged, ScrollToLatest, SearchChanged,
    Submit,
};
pub use layout::PaneLayout;
pub use presenter::{
    ActiveConversation, Alignment, ConversationHeader, MessageRow, PLACEHOLDER_PROMPT,
    Presentation, PresenterInput, ReadMarker, TimelinePresenter, TimelineView,
};
pub use scroll_manager::ScrollManager;
pub use selection::{Selection, SelectionController};
pub use sidebar::{ChatSidebar, ROSTER_TITLE, RosterEntry, SEARCH_PLACEHOLDER};
pub use view::{ChatFrame, ChatView};
