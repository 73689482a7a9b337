#![deny(unsafe_code)]

/// Conversation view state model.
///
/// Rendering, avatar loading and breakpoint detection belong to the host. This crate owns
/// the roster/timeline/compose state, its synchronization rules and a plain-text shell.
pub mod app;
/// Chat domain contracts shared across view modules.
pub mod chat;
/// Stderr tracing with a reloadable filter.
pub mod logging;
/// Settings persistence.
pub mod settings;
