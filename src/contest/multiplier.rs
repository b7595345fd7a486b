// Multiplier evaluation
//
// A profile proposes candidates ("zone 14 on this band would set flag 1");
// a candidate counts when no earlier claimed contact in the same scope
// already holds that flag for the same value.

use std::collections::HashSet;

use crate::contact::{Contact, MultFlag, MultiplierFlags};
use crate::error::StoreError;
use crate::store::{Comparator, ContactField, ContactLogStore, ContactQuery, Predicate, Scope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplierCandidate {
    pub flag: MultFlag,
    /// The multiplier value, e.g. `Zone == "14"`
    pub matcher: Predicate,
    pub scope: Scope,
}

impl MultiplierCandidate {
    pub fn new(flag: MultFlag, field: ContactField, value: &str, scope: Scope) -> Self {
        MultiplierCandidate {
            flag,
            matcher: Predicate::equal(field, value),
            scope,
        }
    }

    pub fn prefixed(flag: MultFlag, field: ContactField, prefix: &str, scope: Scope) -> Self {
        MultiplierCandidate {
            flag,
            matcher: Predicate::starts_with(field, prefix),
            scope,
        }
    }

    /// Earlier contacts already holding this multiplier
    pub fn query(&self, contact: &Contact) -> ContactQuery {
        ContactQuery::session(contact.session_id)
            .with(self.matcher.clone())
            .with_all(self.scope.predicates(&contact.band, &contact.mode))
            .with(Predicate::equal(ContactField::multiplier(self.flag), "1"))
            .with(Predicate::equal(ContactField::Claimed, "1"))
            .before(contact.timestamp)
            .excluding(contact.id)
    }

    pub fn key(&self, contact: &Contact) -> MultKey {
        MultKey {
            flag: self.flag,
            scope: self.scope.key(&contact.band, &contact.mode),
            field: self.matcher.field,
            comparator: self.matcher.comparator,
            value: self.matcher.value.clone(),
        }
    }

    fn is_usable(&self) -> bool {
        !self.matcher.value.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultKey {
    flag: MultFlag,
    scope: String,
    field: ContactField,
    comparator: Comparator,
    value: String,
}

/// Flags a contact earns against what the store holds before it
pub fn evaluate_multipliers<S: ContactLogStore + ?Sized>(
    store: &S,
    contact: &Contact,
    candidates: &[MultiplierCandidate],
) -> Result<MultiplierFlags, StoreError> {
    let mut flags = MultiplierFlags::default();
    for candidate in candidates.iter().filter(|c| c.is_usable()) {
        if store.count_matching(&candidate.query(contact))? == 0 {
            flags.set(candidate.flag, true);
        }
    }
    Ok(flags)
}

/// Multipliers already held, for the in-memory replay of a whole log
#[derive(Debug, Default)]
pub struct MultiplierLedger {
    held: HashSet<MultKey>,
}

impl MultiplierLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags earned plus the keys to claim once the contact's timestamp group
    /// is finished
    pub fn evaluate(
        &self,
        contact: &Contact,
        candidates: &[MultiplierCandidate],
    ) -> (MultiplierFlags, Vec<MultKey>) {
        let mut flags = MultiplierFlags::default();
        let mut claims = Vec::new();
        for candidate in candidates.iter().filter(|c| c.is_usable()) {
            let key = candidate.key(contact);
            if !self.held.contains(&key) {
                flags.set(candidate.flag, true);
                claims.push(key);
            }
        }
        (flags, claims)
    }

    pub fn claim(&mut self, keys: impl IntoIterator<Item = MultKey>) {
        self.held.extend(keys);
    }
}
