use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use snafu::ResultExt;

use super::conversation::ConversationStore;
use super::directory::ContactDirectory;
use super::error::{ParseSeedFileSnafu, ReadSeedFileSnafu, StorageResult};
use super::ids::ContactId;
use super::types::{Contact, Message, Presence, Sender};

/// Session starting point handed over by the directory loader.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub directory: ContactDirectory,
    pub store: ConversationStore,
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    contacts: Vec<Contact>,
    #[serde(default)]
    timelines: BTreeMap<ContactId, Vec<Message>>,
}

/// Parses a seed document.
///
/// Timelines keyed by an id absent from `contacts` are kept; the store never validates ids
/// against the directory.
pub fn parse_seed(raw: &str, origin: &str) -> StorageResult<Seed> {
    let document: SeedDocument = serde_json::from_str(raw).context(ParseSeedFileSnafu {
        stage: "parse-seed-json",
        path: origin.to_string(),
    })?;

    let directory = ContactDirectory::try_new(document.contacts)?;
    let store = ConversationStore::try_from_timelines(document.timelines)?;
    tracing::debug!(
        contacts = directory.len(),
        messages = store.total_messages(),
        "parsed seed document from {origin}"
    );
    Ok(Seed { directory, store })
}

pub fn load_seed_file(path: &Path) -> StorageResult<Seed> {
    let raw = std::fs::read_to_string(path).context(ReadSeedFileSnafu {
        stage: "read-seed-file",
        path: path.display().to_string(),
    })?;
    parse_seed(&raw, &path.display().to_string())
}

/// Built-in roster and history used when no seed file is configured.
pub fn demo() -> Seed {
    let contacts = vec![
        Contact::new("1", "Jane Smith")
            .with_avatar("https://i.pravatar.cc/150?img=1")
            .with_presence(Presence::Online)
            .with_last_message("Hey, how are you doing?", "10:30 AM")
            .with_unread_count(2),
        Contact::new("2", "John Doe")
            .with_avatar("https://i.pravatar.cc/150?img=2")
            .with_presence(Presence::Offline)
            .with_last_message("Can you send me that document?", "Yesterday"),
        Contact::new("3", "Sarah Johnson")
            .with_avatar("https://i.pravatar.cc/150?img=3")
            .with_presence(Presence::Online)
            .with_last_message("The meeting is at 2 PM", "Yesterday"),
        Contact::new("4", "Mike Williams")
            .with_avatar("https://i.pravatar.cc/150?img=4")
            .with_presence(Presence::Offline)
            .with_last_message("Thanks for your help!", "Monday"),
        Contact::new("5", "Lisa Taylor")
            .with_avatar("https://i.pravatar.cc/150?img=5")
            .with_presence(Presence::Online)
            .with_last_message("Looking forward to seeing you", "Monday"),
    ];

    use Sender::{Contact as Them, User as Me};

    let jane = vec![
        Message::new("1", Them, "Hey there! How are you?", "10:00 AM", true),
        Message::new("2", Me, "I'm good, thanks! How about you?", "10:05 AM", true),
        Message::new(
            "3",
            Them,
            "I'm doing well. Did you get a chance to look at the project proposal I sent over?",
            "10:10 AM",
            true,
        ),
        Message::new(
            "4",
            Me,
            "Yes, I did. It looks great! I have a few comments though.",
            "10:15 AM",
            true,
        ),
        Message::new("5", Them, "Great! What are your thoughts?", "10:20 AM", true),
        Message::new(
            "6",
            Me,
            "I think we should focus more on the mobile experience. More and more users are accessing our app from their phones.",
            "10:25 AM",
            false,
        ),
    ];
    let john = history(
        &[
            ("1", Them, "Hey, can you send me that document we discussed in the meeting?", true),
            ("2", Me, "Sure, I'll send it over right away.", true),
            ("3", Them, "Thanks!", true),
        ],
        "Yesterday",
    );
    let sarah = history(
        &[
            ("1", Them, "Just a reminder that we have a meeting tomorrow at 2 PM", true),
            ("2", Me, "Thanks for the reminder! I'll be there.", true),
        ],
        "Yesterday",
    );
    let mike = history(
        &[
            ("1", Them, "Thanks for helping me out with that problem.", true),
            ("2", Me, "No problem at all! Happy to help anytime.", true),
        ],
        "Monday",
    );
    let lisa = history(
        &[
            ("1", Them, "Are we still on for lunch next week?", true),
            ("2", Me, "Absolutely! I'm looking forward to it.", true),
            ("3", Them, "Great! See you then.", true),
        ],
        "Monday",
    );

    Seed {
        directory: ContactDirectory::new(contacts),
        store: ConversationStore::from_timelines([
            (ContactId::new("1"), jane),
            (ContactId::new("2"), john),
            (ContactId::new("3"), sarah),
            (ContactId::new("4"), mike),
            (ContactId::new("5"), lisa),
        ]),
    }
}

/// Expands `(id, sender, content, read)` rows sharing one display timestamp.
fn history(rows: &[(&str, Sender, &str, bool)], when: &str) -> Vec<Message> {
    rows.iter()
        .map(|(id, sender, content, read)| Message::new(*id, *sender, *content, when, *read))
        .collect()
}
