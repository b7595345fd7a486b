// Typed contact queries
//
// Historical counts ("has this zone been worked on this band before T?") are
// expressed as values, never as query-language strings. Every store backend
// evaluates the same `ContactQuery`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adif::modes::get_mode_group;
use crate::contact::{Contact, MultFlag};

/// A queryable contact attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContactField {
    Call,
    Band,
    Mode,
    /// Computed from `Mode`: CW, PHONE, DATA or IMAGE
    ModeGroup,
    RstSent,
    RstRcvd,
    SentNr,
    RcvNr,
    Exchange1,
    Sect,
    Name,
    Prec,
    Ck,
    Zone,
    WpxPrefix,
    CountryPrefix,
    Continent,
    IsMultiplier1,
    IsMultiplier2,
    IsMultiplier3,
    Dupe,
    Claimed,
}

impl ContactField {
    pub fn multiplier(flag: MultFlag) -> ContactField {
        match flag {
            MultFlag::First => ContactField::IsMultiplier1,
            MultFlag::Second => ContactField::IsMultiplier2,
            MultFlag::Third => ContactField::IsMultiplier3,
        }
    }

    /// The attribute as text; booleans read "1" or "0"
    pub fn read(self, contact: &Contact) -> String {
        let flag = |b: bool| if b { "1" } else { "0" }.to_string();
        match self {
            ContactField::Call => contact.call.clone(),
            ContactField::Band => contact.band.clone(),
            ContactField::Mode => contact.mode.clone(),
            ContactField::ModeGroup => contact.mode_group().as_str().to_string(),
            ContactField::RstSent => contact.rst_sent.clone(),
            ContactField::RstRcvd => contact.rst_rcvd.clone(),
            ContactField::SentNr => contact.sent_nr.clone(),
            ContactField::RcvNr => contact.rcv_nr.clone(),
            ContactField::Exchange1 => contact.exchange1.clone(),
            ContactField::Sect => contact.sect.clone(),
            ContactField::Name => contact.name.clone(),
            ContactField::Prec => contact.prec.clone(),
            ContactField::Ck => contact.ck.clone(),
            ContactField::Zone => contact.zone.clone(),
            ContactField::WpxPrefix => contact.wpx_prefix.clone(),
            ContactField::CountryPrefix => contact.country_prefix.clone(),
            ContactField::Continent => contact.continent.clone(),
            ContactField::IsMultiplier1 => flag(contact.mults.m1),
            ContactField::IsMultiplier2 => flag(contact.mults.m2),
            ContactField::IsMultiplier3 => flag(contact.mults.m3),
            ContactField::Dupe => flag(contact.dupe),
            ContactField::Claimed => flag(contact.claimed),
        }
    }
}

/// Comparisons are case-insensitive and ignore surrounding whitespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Comparator {
    Equal,
    NotEqual,
    StartsWith,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub field: ContactField,
    pub comparator: Comparator,
    /// Stored uppercased and trimmed
    pub value: String,
}

impl Predicate {
    pub fn new(field: ContactField, comparator: Comparator, value: &str) -> Self {
        Predicate {
            field,
            comparator,
            value: value.trim().to_uppercase(),
        }
    }

    pub fn equal(field: ContactField, value: &str) -> Self {
        Predicate::new(field, Comparator::Equal, value)
    }

    pub fn starts_with(field: ContactField, value: &str) -> Self {
        Predicate::new(field, Comparator::StartsWith, value)
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        let actual = self.field.read(contact).trim().to_uppercase();
        match self.comparator {
            Comparator::Equal => actual == self.value,
            Comparator::NotEqual => actual != self.value,
            Comparator::StartsWith => actual.starts_with(&self.value),
        }
    }
}

/// Contacts of one session matching every predicate, optionally limited to
/// those strictly earlier than `before` and excluding one contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactQuery {
    pub session: i64,
    pub predicates: Vec<Predicate>,
    pub before: Option<DateTime<Utc>>,
    pub excluding: Option<Uuid>,
}

impl ContactQuery {
    pub fn session(session: i64) -> Self {
        ContactQuery {
            session,
            predicates: Vec::new(),
            before: None,
            excluding: None,
        }
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn with_all(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn before(mut self, timestamp: DateTime<Utc>) -> Self {
        self.before = Some(timestamp);
        self
    }

    pub fn excluding(mut self, id: Uuid) -> Self {
        self.excluding = Some(id);
        self
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        contact.session_id == self.session
            && self.before.map_or(true, |t| contact.timestamp < t)
            && self.excluding.map_or(true, |id| contact.id != id)
            && self.predicates.iter().all(|p| p.matches(contact))
    }
}

/// How far a uniqueness rule reaches: the whole contest, one band, or one
/// band and mode group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Contest,
    Band,
    BandMode,
}

impl Scope {
    pub fn predicates(self, band: &str, mode: &str) -> Vec<Predicate> {
        let group = get_mode_group(mode);
        match self {
            Scope::Contest => Vec::new(),
            Scope::Band => vec![Predicate::equal(ContactField::Band, band)],
            Scope::BandMode => vec![
                Predicate::equal(ContactField::Band, band),
                Predicate::equal(ContactField::ModeGroup, group.as_str()),
            ],
        }
    }

    /// In-memory equivalent of `predicates`
    pub fn key(self, band: &str, mode: &str) -> String {
        match self {
            Scope::Contest => String::new(),
            Scope::Band => band.trim().to_uppercase(),
            Scope::BandMode => format!(
                "{}|{}",
                band.trim().to_uppercase(),
                get_mode_group(mode).as_str()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::fixtures::contact;

    #[test]
    fn test_predicates_ignore_case() {
        let mut c = contact("w1aw", "20", "USB", 0);
        c.sect = "ct".to_string();
        assert!(Predicate::equal(ContactField::Call, "W1AW").matches(&c));
        assert!(Predicate::equal(ContactField::Sect, " CT ").matches(&c));
        assert!(Predicate::equal(ContactField::ModeGroup, "phone").matches(&c));
        assert!(Predicate::new(ContactField::Band, Comparator::NotEqual, "40").matches(&c));
        assert!(!Predicate::equal(ContactField::Call, "W1A").matches(&c));
    }

    #[test]
    fn test_starts_with() {
        let mut c = contact("DL1ABC", "40", "CW", 0);
        c.exchange1 = "F12".to_string();
        assert!(Predicate::starts_with(ContactField::Exchange1, "f").matches(&c));
        assert!(!Predicate::starts_with(ContactField::Exchange1, "B").matches(&c));
    }

    #[test]
    fn test_flag_fields() {
        let mut c = contact("W1AW", "20", "CW", 0);
        c.mults.m2 = true;
        assert!(Predicate::equal(ContactField::IsMultiplier2, "1").matches(&c));
        assert!(Predicate::equal(ContactField::IsMultiplier1, "0").matches(&c));
        assert!(Predicate::equal(ContactField::Claimed, "1").matches(&c));
    }

    #[test]
    fn test_before_is_strict() {
        let c = contact("W1AW", "20", "CW", 10);
        let at = c.timestamp;
        assert!(!ContactQuery::session(1).before(at).matches(&c));
        assert!(ContactQuery::session(1)
            .before(at + chrono::Duration::seconds(1))
            .matches(&c));
        assert!(!ContactQuery::session(2).matches(&c));
        assert!(!ContactQuery::session(1).excluding(c.id).matches(&c));
    }

    #[test]
    fn test_scope_keys() {
        assert_eq!(Scope::Contest.key("20", "CW"), "");
        assert_eq!(Scope::Band.key("20", "CW"), "20");
        assert_eq!(Scope::BandMode.key("20", "USB"), Scope::BandMode.key("20", "LSB"));
        assert_ne!(Scope::BandMode.key("20", "USB"), Scope::BandMode.key("20", "CW"));
        assert_eq!(Scope::BandMode.predicates("40", "CW").len(), 2);
    }
}
