// Contact log store
//
// The scoring core only talks to this trait. `MemoryLogStore` is the
// in-process implementation; the `db` module loads and flushes it to SQLite.

pub mod memory;
pub mod query;

use uuid::Uuid;

use crate::contact::Contact;
use crate::error::StoreError;

pub use memory::{MemoryLogStore, StoreChange};
pub use query::{Comparator, ContactField, ContactQuery, Predicate, Scope};

pub trait ContactLogStore {
    /// Every contact of a session, ascending by timestamp. Contacts sharing
    /// a timestamp come back in id order so repeated reads agree.
    fn fetch_all_ordered(&self, session: i64) -> Result<Vec<Contact>, StoreError>;

    fn count_matching(&self, query: &ContactQuery) -> Result<usize, StoreError>;

    fn get(&self, id: Uuid) -> Result<Option<Contact>, StoreError>;

    /// Insert or replace by id
    fn persist(&mut self, contact: &Contact) -> Result<(), StoreError>;

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError>;
}
