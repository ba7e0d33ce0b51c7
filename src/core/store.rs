//! Authoritative contact archive.

use hashbrown::HashMap;

use crate::contact::{ArchiveEntry, Contact};

/// Contact → entry mapping that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: HashMap<Contact, ArchiveEntry>,
    order: Vec<Contact>,
}

impl Archive {
    /// Empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no contact is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `contact` is a key.
    pub fn contains(&self, contact: &Contact) -> bool {
        self.entries.contains_key(contact)
    }

    /// Entry stored under `contact`.
    pub fn get(&self, contact: &Contact) -> Option<&ArchiveEntry> {
        self.entries.get(contact)
    }

    /// Stores `entry` under `contact`, returning the entry it replaced.
    pub fn set(&mut self, contact: Contact, entry: ArchiveEntry) -> Option<ArchiveEntry> {
        if let Some(slot) = self.entries.get_mut(&contact) {
            return Some(std::mem::replace(slot, entry));
        }

        self.order.push(contact.clone());
        self.entries.insert(contact, entry);
        None
    }

    pub(crate) fn get_mut(&mut self, contact: &Contact) -> Option<&mut ArchiveEntry> {
        self.entries.get_mut(contact)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Contact, &ArchiveEntry)> {
        self.order
            .iter()
            .filter_map(|c| self.entries.get_key_value(c))
    }

    /// Contacts in ascending `(callsign, locator, exchange)` order.
    pub fn sorted_contacts(&self) -> Vec<&Contact> {
        let mut keys: Vec<&Contact> = self.order.iter().collect();
        keys.sort();
        keys
    }
}

impl PartialEq for Archive {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Archive {}

impl<'a> IntoIterator for &'a Archive {
    type Item = (&'a Contact, &'a ArchiveEntry);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<(Contact, ArchiveEntry)> for Archive {
    fn from_iter<I: IntoIterator<Item = (Contact, ArchiveEntry)>>(iter: I) -> Self {
        let mut archive = Self::new();
        for (contact, entry) in iter {
            archive.set(contact, entry);
        }
        archive
    }
}
