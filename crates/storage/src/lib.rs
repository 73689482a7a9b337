pub mod conversation;
pub mod directory;
pub mod error;
pub mod ids;
pub mod seed;
pub mod types;

pub use conversation::{ConversationStore, Timeline};
pub use directory::ContactDirectory;
pub use error::{StorageError, StorageResult};
pub use ids::{ContactId, MessageId};
pub use seed::{Seed, demo, load_seed_file, parse_seed};
pub use types::{Contact, Message, Presence, Sender};
