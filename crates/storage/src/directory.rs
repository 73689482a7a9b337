use std::collections::HashMap;

use snafu::ensure;

use super::error::{DuplicateContactIdSnafu, StorageResult};
use super::ids::ContactId;
use super::types::Contact;

/// Ordered, read-only contact roster for one session.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
    index: HashMap<ContactId, usize>,
}

impl ContactDirectory {
    /// Builds a directory from loader output, keeping its order.
    ///
    /// Identifier uniqueness is the loader's precondition; it is only asserted in debug builds.
    /// Use [`ContactDirectory::try_new`] when the input is untrusted.
    pub fn new(contacts: Vec<Contact>) -> Self {
        let index = build_index(&contacts);
        debug_assert_eq!(
            index.len(),
            contacts.len(),
            "contact directory contains duplicate identifiers"
        );
        Self { contacts, index }
    }

    /// Builds a directory, rejecting duplicate contact identifiers.
    pub fn try_new(contacts: Vec<Contact>) -> StorageResult<Self> {
        let mut index = HashMap::with_capacity(contacts.len());
        for (position, contact) in contacts.iter().enumerate() {
            let previous = index.insert(contact.id.clone(), position);
            ensure!(
                previous.is_none(),
                DuplicateContactIdSnafu {
                    stage: "build-contact-directory",
                    id: contact.id.to_string(),
                }
            );
        }
        Ok(Self { contacts, index })
    }

    pub fn get(&self, contact_id: &ContactId) -> Option<&Contact> {
        self.index
            .get(contact_id)
            .and_then(|position| self.contacts.get(*position))
    }

    pub fn contains(&self, contact_id: &ContactId) -> bool {
        self.index.contains_key(contact_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

fn build_index(contacts: &[Contact]) -> HashMap<ContactId, usize> {
    contacts
        .iter()
        .enumerate()
        .map(|(position, contact)| (contact.id.clone(), position))
        .collect()
}
