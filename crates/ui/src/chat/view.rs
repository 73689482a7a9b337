use std::sync::Arc;

use arc_swap::ArcSwap;
use murmur_storage::{Contact, ContactDirectory, ContactId, ConversationStore, Message, Seed};

use crate::chat::compose::{ComposeGateway, SendOutcome};
use crate::chat::events::{
    BackRequested, ChatEvent, ContactSelected, LayoutChanged, ScrollToLatest, SearchChanged,
    Submit,
};
use crate::chat::layout::PaneLayout;
use crate::chat::presenter::{PresenterInput, TimelinePresenter, TimelineView};
use crate::chat::selection::{Selection, SelectionController};
use crate::chat::sidebar::{ChatSidebar, RosterEntry};

/// Everything the render surface needs for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFrame {
    pub layout: PaneLayout,
    /// `None` when the roster pane is hidden.
    pub roster: Option<Vec<RosterEntry>>,
    pub search_query: String,
    /// `None` when the conversation pane is hidden.
    pub conversation: Option<TimelineView>,
    pub compose_enabled: bool,
    pub scroll: Option<ScrollToLatest>,
}

/// Parent coordinator for roster, selection, compose and timeline presentation.
///
/// All mutations run on the caller's event loop and complete before returning. The
/// conversation store is swapped wholesale, so a snapshot taken from
/// [`ChatView::store_snapshot`] never observes a partial update.
pub struct ChatView {
    directory: ContactDirectory,
    store: ArcSwap<ConversationStore>,
    selection: SelectionController,
    compose: ComposeGateway,
    presenter: TimelinePresenter,
    sidebar: ChatSidebar,
}

impl ChatView {
    pub fn new(seed: Seed, narrow_mode: bool, compose: ComposeGateway) -> Self {
        tracing::debug!(
            contacts = seed.directory.len(),
            messages = seed.store.total_messages(),
            narrow_mode,
            "chat view initialized"
        );
        Self {
            directory: seed.directory,
            store: ArcSwap::from_pointee(seed.store),
            selection: SelectionController::new(narrow_mode),
            compose,
            presenter: TimelinePresenter::new(),
            sidebar: ChatSidebar::new(),
        }
    }

    pub fn directory(&self) -> &ContactDirectory {
        &self.directory
    }

    pub fn selection(&self) -> &Selection {
        self.selection.state()
    }

    pub fn narrow_mode(&self) -> bool {
        self.selection.narrow_mode()
    }

    pub fn active_contact(&self) -> Option<&Contact> {
        self.selection
            .active()
            .and_then(|contact_id| self.directory.get(contact_id))
    }

    /// Current store. Later mutations publish a new store and leave this one unchanged.
    pub fn store_snapshot(&self) -> Arc<ConversationStore> {
        self.store.load_full()
    }

    pub fn timeline_for(&self, contact_id: &ContactId) -> Vec<Message> {
        self.store.load().timeline_for(contact_id).to_vec()
    }

    /// Dispatches one input event. Returns whether any state changed.
    pub fn handle(&mut self, event: impl Into<ChatEvent>) -> bool {
        match event.into() {
            ChatEvent::ContactSelected(ContactSelected { contact_id }) => {
                self.select_contact(contact_id)
            }
            ChatEvent::BackRequested(BackRequested) => self.clear_selection(),
            ChatEvent::Submit(Submit { content }) => self.send(content),
            ChatEvent::SearchChanged(SearchChanged { query }) => {
                self.sidebar.set_search_query(query);
                true
            }
            ChatEvent::LayoutChanged(LayoutChanged { narrow_mode }) => {
                let changed = self.selection.narrow_mode() != narrow_mode;
                self.selection.set_narrow_mode(narrow_mode);
                changed
            }
        }
    }

    pub fn select_contact(&mut self, contact_id: impl Into<ContactId>) -> bool {
        let contact_id = contact_id.into();
        if !self.directory.contains(&contact_id) {
            tracing::warn!(contact = %contact_id, "selected contact is not in the directory");
        }
        self.selection.select_contact(contact_id)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear_selection()
    }

    pub fn set_narrow_mode(&mut self, narrow_mode: bool) -> bool {
        self.handle(LayoutChanged { narrow_mode })
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.sidebar.set_search_query(query);
    }

    /// Sends `text` to the active contact. Returns false when nothing is selected.
    pub fn send(&mut self, text: impl Into<String>) -> bool {
        let current = self.store.load();
        match self.compose.send(self.selection.state(), &current, text) {
            SendOutcome::Ignored => false,
            SendOutcome::Appended { store, .. } => {
                self.store.store(Arc::new(store));
                true
            }
        }
    }

    /// Produces the next frame. The scroll signal is consumed by this call.
    pub fn render(&mut self) -> ChatFrame {
        let selection = self.selection.state();
        let narrow_mode = self.selection.narrow_mode();
        let layout = PaneLayout::resolve(narrow_mode, selection);
        let store = self.store.load();

        let timeline = selection
            .active()
            .map(|contact_id| store.timeline_for(contact_id))
            .unwrap_or(&[]);
        let contact = selection
            .active()
            .and_then(|contact_id| self.directory.get(contact_id));

        let presentation = self.presenter.present(PresenterInput {
            selection,
            contact,
            timeline,
            narrow_mode,
        });

        ChatFrame {
            layout,
            roster: layout
                .roster_visible
                .then(|| self.sidebar.entries(&self.directory, selection)),
            search_query: self.sidebar.search_query().to_string(),
            conversation: layout.conversation_visible.then_some(presentation.view),
            compose_enabled: layout.compose_visible,
            scroll: presentation.scroll,
        }
    }
}
