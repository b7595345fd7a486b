// ARRL International DX Contest
// Rules: https://www.arrl.org/arrl-dx
//
// W/VE stations work DX and count DXCC entities per band; DX stations work
// W/VE and count states and provinces per band. Contacts inside either
// group score nothing.

use super::registry::ContestMode;
use super::{CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate, ScoringContext};
use crate::contact::{Contact, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::sections::is_state_or_province;
use crate::reference::GeoInfo;
use crate::store::{ContactField, Scope};

const DX_POINTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrlDx {
    pub mode: ContestMode,
    /// Own station is in the United States or Canada
    pub domestic: bool,
}

/// United States (lower 48 and DC) or Canada
pub fn is_domestic(geo: &GeoInfo) -> bool {
    geo.is_country("K") || geo.is_country("VE")
}

impl ContestRules for ArrlDx {
    fn name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "ARRL DX SSB",
            _ => "ARRL DX CW",
        }
    }

    fn cabrillo_name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "ARRL-DX-SSB",
            _ => "ARRL-DX-CW",
        }
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        let label = if self.domestic { "Power" } else { "State" };
        ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::Exchange1, label),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::PerBand
    }

    fn prepare(&self, contact: &mut Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        contact.exchange1 = contact.exchange1.trim().to_uppercase();
    }

    fn points(&self, _contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32 {
        match ctx.geo_pair(worked) {
            Some((_, worked)) if is_domestic(worked) != self.domestic => DX_POINTS,
            _ => 0,
        }
    }

    fn multiplier_candidates(
        &self,
        contact: &Contact,
        worked: Option<&GeoInfo>,
        ctx: &ScoringContext,
    ) -> Vec<MultiplierCandidate> {
        let Some((_, worked)) = ctx.geo_pair(worked) else {
            return Vec::new();
        };
        match (self.domestic, is_domestic(worked)) {
            (true, false) => vec![MultiplierCandidate::new(
                MultFlag::First,
                ContactField::CountryPrefix,
                &contact.country_prefix,
                Scope::Band,
            )],
            (false, true) if is_state_or_province(&contact.exchange1) => {
                vec![MultiplierCandidate::new(
                    MultFlag::First,
                    ContactField::Exchange1,
                    &contact.exchange1,
                    Scope::Band,
                )]
            }
            _ => Vec::new(),
        }
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        if self.domestic {
            &["Countries"]
        } else {
            &["States/provinces"]
        }
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        CabrilloExchange {
            sent: vec![
                Column::report(&contact.rst_sent),
                Column::field(ctx.session.sent_token(0), 6),
            ],
            rcvd: vec![Column::report(&contact.rst_rcvd), Column::field(&contact.exchange1, 6)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::testing::{worked, Fixture};

    fn points_for(rules: &ArrlDx, fx: &Fixture, call: &str) -> u32 {
        let (c, geo) = worked(rules, fx, call, "20", "CW");
        rules.points(&c, geo.as_ref(), &fx.ctx())
    }

    #[test]
    fn test_only_cross_contacts_score() {
        let w = ArrlDx { mode: ContestMode::Cw, domestic: true };
        let fx = Fixture::new("K6GTE", "ARRL DX CW", "100");
        assert_eq!(points_for(&w, &fx, "JA1ABC"), 3);
        assert_eq!(points_for(&w, &fx, "VE3ABC"), 0);
        assert_eq!(points_for(&w, &fx, "W1AW"), 0);

        let dx = ArrlDx { mode: ContestMode::Cw, domestic: false };
        let fx = Fixture::new("DL1ABC", "ARRL DX CW", "100");
        assert_eq!(points_for(&dx, &fx, "W1AW"), 3);
        assert_eq!(points_for(&dx, &fx, "G4ABC"), 0);
    }

    #[test]
    fn test_multipliers_by_side() {
        let w = ArrlDx { mode: ContestMode::Cw, domestic: true };
        let fx = Fixture::new("K6GTE", "ARRL DX CW", "CA");
        let (c, geo) = worked(&w, &fx, "JA1ABC", "20", "CW");
        assert_eq!(w.multiplier_candidates(&c, geo.as_ref(), &fx.ctx())[0].matcher.value, "JA");

        let dx = ArrlDx { mode: ContestMode::Cw, domestic: false };
        let fx = Fixture::new("DL1ABC", "ARRL DX CW", "100");
        let (mut c, geo) = worked(&dx, &fx, "W1AW", "20", "CW");
        c.exchange1 = "CT".to_string();
        assert_eq!(dx.multiplier_candidates(&c, geo.as_ref(), &fx.ctx())[0].matcher.value, "CT");
        c.exchange1 = "100".to_string();
        assert!(dx.multiplier_candidates(&c, geo.as_ref(), &fx.ctx()).is_empty());
    }

    #[test]
    fn test_alaska_is_dx() {
        let w = ArrlDx { mode: ContestMode::Cw, domestic: true };
        let fx = Fixture::new("K6GTE", "ARRL DX CW", "CA");
        assert_eq!(points_for(&w, &fx, "KL7ABC"), 3);
    }
}
