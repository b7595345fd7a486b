// Dupe checking
//
// A contact is a dupe when the same call already appears, strictly earlier
// in time, inside the uniqueness scope of the contest's dupe policy.
// Unclaimed contacts never count as history.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contact::Contact;
use crate::contest::{ContestRules, ScoringContext};
use crate::error::StoreError;
use crate::reference::GeoInfo;
use crate::store::{ContactField, ContactLogStore, ContactQuery, Predicate, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DupePolicy {
    OncePerContest,
    PerBand,
    PerBandAndMode,
    NoDupeChecking,
    /// Decided by the profile's `CustomDupeCheck`
    ContestSpecific,
}

impl DupePolicy {
    pub fn scope(self) -> Option<Scope> {
        match self {
            DupePolicy::OncePerContest => Some(Scope::Contest),
            DupePolicy::PerBand => Some(Scope::Band),
            DupePolicy::PerBandAndMode => Some(Scope::BandMode),
            DupePolicy::NoDupeChecking | DupePolicy::ContestSpecific => None,
        }
    }
}

/// Profile-supplied dupe rule for `DupePolicy::ContestSpecific`
pub trait CustomDupeCheck {
    /// The ordinary policy applied before `blocks`
    fn base_policy(&self) -> DupePolicy;

    /// Contacts the contest refuses to score whatever the log holds
    fn blocks(&self, contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> bool;
}

/// The (call, band, mode) being checked and the slice of history to check it
/// against
#[derive(Debug, Clone)]
pub struct DupeProbe<'a> {
    pub session: i64,
    pub call: &'a str,
    pub band: &'a str,
    pub mode: &'a str,
    /// Only contacts strictly earlier than this; `None` checks the whole log
    pub before: Option<DateTime<Utc>>,
    pub excluding: Option<Uuid>,
}

impl<'a> DupeProbe<'a> {
    pub fn of(contact: &'a Contact) -> Self {
        DupeProbe {
            session: contact.session_id,
            call: &contact.call,
            band: &contact.band,
            mode: &contact.mode,
            before: Some(contact.timestamp),
            excluding: Some(contact.id),
        }
    }

    pub fn query(&self, scope: Scope) -> ContactQuery {
        let mut query = ContactQuery::session(self.session)
            .with(Predicate::equal(ContactField::Call, self.call))
            .with_all(scope.predicates(self.band, self.mode))
            .with(Predicate::equal(ContactField::Claimed, "1"));
        query.before = self.before;
        query.excluding = self.excluding;
        query
    }
}

/// Policy applied against the log; `ContestSpecific` resolves through
/// `effective_policy` first
pub fn check_dupe<S: ContactLogStore + ?Sized>(
    store: &S,
    probe: &DupeProbe,
    policy: DupePolicy,
) -> Result<bool, StoreError> {
    match policy.scope() {
        Some(scope) => Ok(store.count_matching(&probe.query(scope))? > 0),
        None => Ok(false),
    }
}

pub fn effective_policy(rules: &dyn ContestRules) -> DupePolicy {
    match rules.dupe_policy() {
        DupePolicy::ContestSpecific => rules
            .custom_dupe()
            .map(|custom| custom.base_policy())
            .unwrap_or(DupePolicy::NoDupeChecking),
        policy => policy,
    }
}

/// Full dupe decision for a contact: scope history plus any custom block
pub fn is_dupe<S: ContactLogStore + ?Sized>(
    store: &S,
    rules: &dyn ContestRules,
    contact: &Contact,
    worked: Option<&GeoInfo>,
    ctx: &ScoringContext,
) -> Result<bool, StoreError> {
    if check_dupe(store, &DupeProbe::of(contact), effective_policy(rules))? {
        return Ok(true);
    }
    Ok(is_blocked(rules, contact, worked, ctx))
}

pub fn is_blocked(
    rules: &dyn ContestRules,
    contact: &Contact,
    worked: Option<&GeoInfo>,
    ctx: &ScoringContext,
) -> bool {
    rules.dupe_policy() == DupePolicy::ContestSpecific
        && rules
            .custom_dupe()
            .map_or(false, |custom| custom.blocks(contact, worked, ctx))
}

/// Calls already worked, for the in-memory replay of a whole log
#[derive(Debug)]
pub struct DupeLedger {
    scope: Option<Scope>,
    seen: HashSet<(String, String)>,
}

impl DupeLedger {
    pub fn new(policy: DupePolicy) -> Self {
        DupeLedger {
            scope: policy.scope(),
            seen: HashSet::new(),
        }
    }

    fn key(&self, contact: &Contact) -> Option<(String, String)> {
        let scope = self.scope?;
        Some((
            contact.call.trim().to_uppercase(),
            scope.key(&contact.band, &contact.mode),
        ))
    }

    pub fn is_dupe(&self, contact: &Contact) -> bool {
        self.key(contact).map_or(false, |key| self.seen.contains(&key))
    }

    pub fn record(&mut self, contact: &Contact) {
        if let Some(key) = self.key(contact) {
            self.seen.insert(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::fixtures::contact;
    use crate::store::MemoryLogStore;

    fn store_with(contacts: Vec<Contact>) -> MemoryLogStore {
        MemoryLogStore::from_contacts(contacts)
    }

    fn probe<'a>(call: &'a str, band: &'a str, mode: &'a str) -> DupeProbe<'a> {
        DupeProbe {
            session: 1,
            call,
            band,
            mode,
            before: None,
            excluding: None,
        }
    }

    #[test]
    fn test_once_per_contest() {
        let store = store_with(vec![contact("W1AW", "20", "CW", 0)]);
        let policy = DupePolicy::OncePerContest;
        assert!(check_dupe(&store, &probe("W1AW", "20", "CW"), policy).unwrap());
        assert!(check_dupe(&store, &probe("w1aw", "40", "USB"), policy).unwrap());
        assert!(!check_dupe(&store, &probe("K1ABC", "20", "CW"), policy).unwrap());
    }

    #[test]
    fn test_per_band() {
        let store = store_with(vec![contact("W1AW", "20", "CW", 0)]);
        let policy = DupePolicy::PerBand;
        assert!(check_dupe(&store, &probe("W1AW", "20", "USB"), policy).unwrap());
        assert!(!check_dupe(&store, &probe("W1AW", "40", "CW"), policy).unwrap());
    }

    #[test]
    fn test_per_band_and_mode() {
        let store = store_with(vec![contact("W1AW", "20", "USB", 0)]);
        let policy = DupePolicy::PerBandAndMode;
        assert!(check_dupe(&store, &probe("W1AW", "20", "LSB"), policy).unwrap());
        assert!(!check_dupe(&store, &probe("W1AW", "20", "CW"), policy).unwrap());
    }

    #[test]
    fn test_no_dupe_checking() {
        let store = store_with(vec![contact("W1AW", "20", "CW", 0)]);
        assert!(!check_dupe(&store, &probe("W1AW", "20", "CW"), DupePolicy::NoDupeChecking).unwrap());
    }

    #[test]
    fn test_only_earlier_contacts_count() {
        let first = contact("W1AW", "20", "CW", 0);
        let second = contact("W1AW", "20", "CW", 5);
        let store = store_with(vec![first.clone(), second.clone()]);
        let policy = DupePolicy::PerBand;
        assert!(!check_dupe(&store, &DupeProbe::of(&first), policy).unwrap());
        assert!(check_dupe(&store, &DupeProbe::of(&second), policy).unwrap());
    }

    #[test]
    fn test_same_timestamp_is_not_history() {
        let a = contact("W1AW", "20", "CW", 3);
        let mut b = contact("W1AW", "20", "CW", 3);
        b.timestamp = a.timestamp;
        let store = store_with(vec![a.clone(), b.clone()]);
        assert!(!check_dupe(&store, &DupeProbe::of(&a), DupePolicy::PerBand).unwrap());
        assert!(!check_dupe(&store, &DupeProbe::of(&b), DupePolicy::PerBand).unwrap());
    }

    #[test]
    fn test_unclaimed_contacts_are_ignored() {
        let mut old = contact("W1AW", "20", "CW", 0);
        old.claimed = false;
        let store = store_with(vec![old]);
        assert!(!check_dupe(&store, &probe("W1AW", "20", "CW"), DupePolicy::PerBand).unwrap());
    }

    #[test]
    fn test_ledger_matches_store() {
        let first = contact("W1AW", "20", "USB", 0);
        let mut ledger = DupeLedger::new(DupePolicy::PerBandAndMode);
        assert!(!ledger.is_dupe(&first));
        ledger.record(&first);
        assert!(ledger.is_dupe(&contact("w1aw", "20", "LSB", 1)));
        assert!(!ledger.is_dupe(&contact("W1AW", "20", "CW", 1)));

        let none = DupeLedger::new(DupePolicy::NoDupeChecking);
        assert!(!none.is_dupe(&first));
    }
}
