// In-memory contact log
//
// Keeps every session's contacts in one map and remembers which ids were
// written or removed since the last `take_changes`, so a caller can flush
// exactly those rows to durable storage.

use std::collections::HashMap;

use uuid::Uuid;

use super::{ContactLogStore, ContactQuery};
use crate::contact::Contact;
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Persisted(Uuid),
    Deleted(Uuid),
}

#[derive(Debug, Default)]
pub struct MemoryLogStore {
    contacts: HashMap<Uuid, Contact>,
    changes: Vec<StoreChange>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from rows loaded elsewhere; seeding is not recorded as a change
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        MemoryLogStore {
            contacts: contacts.into_iter().map(|c| (c.id, c)).collect(),
            changes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Changes since the last call, oldest first. Repeated writes to the
    /// same id collapse into the last one.
    pub fn take_changes(&mut self) -> Vec<StoreChange> {
        let mut changes = std::mem::take(&mut self.changes);
        let mut seen = std::collections::HashSet::new();
        changes.reverse();
        changes.retain(|change| {
            let id = match change {
                StoreChange::Persisted(id) | StoreChange::Deleted(id) => *id,
            };
            seen.insert(id)
        });
        changes.reverse();
        changes
    }
}

impl ContactLogStore for MemoryLogStore {
    fn fetch_all_ordered(&self, session: i64) -> Result<Vec<Contact>, StoreError> {
        let mut contacts: Vec<Contact> = self
            .contacts
            .values()
            .filter(|c| c.session_id == session)
            .cloned()
            .collect();
        contacts.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(contacts)
    }

    fn count_matching(&self, query: &ContactQuery) -> Result<usize, StoreError> {
        Ok(self.contacts.values().filter(|c| query.matches(c)).count())
    }

    fn get(&self, id: Uuid) -> Result<Option<Contact>, StoreError> {
        Ok(self.contacts.get(&id).cloned())
    }

    fn persist(&mut self, contact: &Contact) -> Result<(), StoreError> {
        self.contacts.insert(contact.id, contact.clone());
        self.changes.push(StoreChange::Persisted(contact.id));
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        if self.contacts.remove(&id).is_none() {
            return Err(StoreError::Missing(id));
        }
        self.changes.push(StoreChange::Deleted(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::fixtures::contact;
    use crate::store::{ContactField, Predicate};

    #[test]
    fn test_fetch_is_time_ordered() {
        let late = contact("W1AW", "20", "CW", 30);
        let early = contact("K1ABC", "20", "CW", 5);
        let mut store = MemoryLogStore::new();
        store.persist(&late).unwrap();
        store.persist(&early).unwrap();

        let all = store.fetch_all_ordered(1).unwrap();
        assert_eq!(all[0].call, "K1ABC");
        assert_eq!(all[1].call, "W1AW");
        assert!(store.fetch_all_ordered(2).unwrap().is_empty());
    }

    #[test]
    fn test_count_matching() {
        let mut store = MemoryLogStore::from_contacts(vec![
            contact("W1AW", "20", "CW", 0),
            contact("W1AW", "40", "CW", 1),
            contact("K1ABC", "20", "CW", 2),
        ]);
        let query = ContactQuery::session(1).with(Predicate::equal(ContactField::Call, "w1aw"));
        assert_eq!(store.count_matching(&query).unwrap(), 2);
        let query = query.with(Predicate::equal(ContactField::Band, "40"));
        assert_eq!(store.count_matching(&query).unwrap(), 1);
        assert!(store.take_changes().is_empty());
    }

    #[test]
    fn test_changes_collapse() {
        let mut c = contact("W1AW", "20", "CW", 0);
        let mut store = MemoryLogStore::new();
        store.persist(&c).unwrap();
        c.points = 3;
        store.persist(&c).unwrap();
        let other = contact("K1ABC", "20", "CW", 1);
        store.persist(&other).unwrap();
        store.delete(other.id).unwrap();

        let changes = store.take_changes();
        assert_eq!(
            changes,
            vec![StoreChange::Persisted(c.id), StoreChange::Deleted(other.id)]
        );
        assert!(store.take_changes().is_empty());
    }

    #[test]
    fn test_delete_missing() {
        let mut store = MemoryLogStore::new();
        assert!(matches!(store.delete(Uuid::new_v4()), Err(StoreError::Missing(_))));
    }
}
