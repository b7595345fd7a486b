//! Contest rule profiles
//!
//! Every supported contest implements [`ContestRules`]. Profiles hold no
//! mutable state; the only cached values are flags derived from the
//! operator's own station (e.g. "is this a German station" for WAG), and
//! those are rebuilt through the registry whenever the station changes.

pub mod arrl_dx;
pub mod arrl_ss;
pub mod cq_wpx;
pub mod cq_ww;
pub mod cwt;
pub mod iaru_hf;
pub mod jidx;
pub mod multiplier;
pub mod naqp;
pub mod registry;
pub mod wag;

use serde::Serialize;

use crate::contact::{Contact, ContactDraft};
use crate::dupe::{CustomDupeCheck, DupePolicy};
use crate::reference::{wpx_prefix, GeoInfo};
use crate::session::{ContestSession, StationProfile};
use crate::store::ContactField;

pub use multiplier::{MultiplierCandidate, MultiplierLedger};
pub use registry::{lookup, ContestKind};

/// Everything a profile may look at besides the contact itself
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub session: &'a ContestSession,
    pub station: &'a StationProfile,
    /// Own station geography; `None` when the own call does not resolve
    pub own: Option<&'a GeoInfo>,
}

impl<'a> ScoringContext<'a> {
    /// Own and worked geography, or `None` on any lookup miss
    pub fn geo_pair<'g>(&self, worked: Option<&'g GeoInfo>) -> Option<(&'a GeoInfo, &'g GeoInfo)> {
        Some((self.own?, worked?))
    }

    pub fn own_cq_zone(&self) -> String {
        self.own.map(|g| g.cq_zone.to_string()).unwrap_or_default()
    }

    pub fn own_itu_zone(&self) -> String {
        self.own.map(|g| g.itu_zone.to_string()).unwrap_or_default()
    }
}

// ============================================================================
// Exchange layout
// ============================================================================

/// One visible input slot of the entry window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeField {
    pub slot: ContactField,
    pub label: &'static str,
    pub tab_order: u8,
}

/// Which input slots a contest shows, and how Tab moves between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeLayout {
    fields: Vec<ExchangeField>,
}

impl ExchangeLayout {
    /// Slots in tab order; the callsign field is always first
    pub fn new(slots: &[(ContactField, &'static str)]) -> Self {
        let mut fields = vec![ExchangeField {
            slot: ContactField::Call,
            label: "Call",
            tab_order: 0,
        }];
        for (i, (slot, label)) in slots.iter().enumerate() {
            fields.push(ExchangeField {
                slot: *slot,
                label: *label,
                tab_order: (i + 1) as u8,
            });
        }
        ExchangeLayout { fields }
    }

    pub fn fields(&self) -> &[ExchangeField] {
        &self.fields
    }

    pub fn next_after(&self, slot: ContactField) -> Option<&ExchangeField> {
        let i = self.fields.iter().position(|f| f.slot == slot)?;
        self.fields.get((i + 1) % self.fields.len())
    }

    pub fn prev_before(&self, slot: ContactField) -> Option<&ExchangeField> {
        let i = self.fields.iter().position(|f| f.slot == slot)?;
        let n = self.fields.len();
        self.fields.get((i + n - 1) % n)
    }
}

// ============================================================================
// Cabrillo exchange columns
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub value: String,
    pub width: usize,
    /// Signal report columns are left out of the ADIF exchange strings
    pub report: bool,
}

impl Column {
    pub fn report(value: &str) -> Self {
        Column {
            value: value.trim().to_uppercase(),
            width: 3,
            report: true,
        }
    }

    pub fn field(value: &str, width: usize) -> Self {
        Column {
            value: value.trim().to_uppercase(),
            width,
            report: false,
        }
    }
}

/// Sent and received exchange columns of one QSO line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabrilloExchange {
    pub sent: Vec<Column>,
    pub rcvd: Vec<Column>,
}

fn exchange_text(columns: &[Column]) -> String {
    columns
        .iter()
        .filter(|c| !c.report && !c.value.is_empty())
        .map(|c| c.value.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// The profile interface
// ============================================================================

pub trait ContestRules {
    /// Registry name, e.g. "CQ WW CW"
    fn name(&self) -> &'static str;

    /// Cabrillo CONTEST: value
    fn cabrillo_name(&self) -> &'static str;

    fn exchange_layout(&self) -> ExchangeLayout;

    fn dupe_policy(&self) -> DupePolicy;

    /// Present when `dupe_policy` is `ContestSpecific`
    fn custom_dupe(&self) -> Option<&dyn CustomDupeCheck> {
        None
    }

    /// The station sends a serial number; the engine numbers contacts when
    /// the operator leaves it blank
    fn sends_serial(&self, _ctx: &ScoringContext) -> bool {
        false
    }

    /// Contest-specific normalisation after `annotate`
    fn prepare(&self, _contact: &mut Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) {}

    /// Points for a contact that is not a dupe
    fn points(&self, contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32;

    /// Multipliers this contact could set, already gated by contest rules
    fn multiplier_candidates(
        &self,
        contact: &Contact,
        worked: Option<&GeoInfo>,
        ctx: &ScoringContext,
    ) -> Vec<MultiplierCandidate>;

    /// Display names of the multiplier flags in use
    fn multiplier_names(&self) -> &'static [&'static str];

    /// Final score; default is points times the sum of all multipliers
    fn aggregate_score(&self, points: u64, mults: [u32; 3]) -> u64 {
        points * mults.iter().map(|m| *m as u64).sum::<u64>()
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange;

    /// ADIF STX_STRING and SRX_STRING
    fn adif_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> (String, String) {
        let columns = self.cabrillo_exchange(contact, ctx);
        (exchange_text(&columns.sent), exchange_text(&columns.rcvd))
    }

    /// Inverse of the received half of `adif_exchange`, used on import
    fn apply_received_exchange(&self, text: &str, draft: &mut ContactDraft) {
        draft.exchange1 = text.trim().to_uppercase();
    }
}

/// Geography fields every profile relies on: WPX prefix, country prefix and
/// continent
pub fn annotate(contact: &mut Contact, worked: Option<&GeoInfo>) {
    contact.call = contact.call.trim().to_uppercase();
    contact.wpx_prefix = wpx_prefix(&contact.call).unwrap_or_default();
    match worked {
        Some(geo) => {
            contact.country_prefix = geo.primary_prefix.clone();
            contact.continent = geo.continent.as_str().to_string();
        }
        None => {
            log::debug!("No geography for {}", contact.call);
            contact.country_prefix.clear();
            contact.continent.clear();
        }
    }
}

/// "05" -> "5"; non-numeric text is returned trimmed and uppercased
pub fn normalize_zone(zone: &str) -> String {
    let zone = zone.trim();
    match zone.parse::<u32>() {
        Ok(n) => n.to_string(),
        Err(_) => zone.to_uppercase(),
    }
}

pub fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_traversal_wraps() {
        let layout = ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::Zone, "Zone"),
        ]);
        assert_eq!(layout.fields().len(), 4);
        assert_eq!(layout.next_after(ContactField::Call).unwrap().slot, ContactField::RstSent);
        assert_eq!(layout.next_after(ContactField::Zone).unwrap().slot, ContactField::Call);
        assert_eq!(layout.prev_before(ContactField::Call).unwrap().slot, ContactField::Zone);
        assert!(layout.next_after(ContactField::Sect).is_none());
    }

    #[test]
    fn test_normalize_zone() {
        assert_eq!(normalize_zone("05"), "5");
        assert_eq!(normalize_zone(" 14 "), "14");
        assert_eq!(normalize_zone("darc"), "DARC");
    }

    #[test]
    fn test_exchange_text_skips_reports() {
        let columns = vec![Column::report("599"), Column::field("05", 6), Column::field("", 3)];
        assert_eq!(exchange_text(&columns), "05");
    }
}
