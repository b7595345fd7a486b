// DARC Worked All Germany Contest
// Rules: https://www.darc.de/der-club/referate/conteste/wag-contest/en/
//
// German stations send RST + DOK, everyone else sends RST + serial number.
// Stations outside Germany may only work German stations.

use super::{CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate, ScoringContext};
use crate::contact::{Contact, MultFlag};
use crate::dupe::{CustomDupeCheck, DupePolicy};
use crate::reference::{Continent, GeoInfo};
use crate::store::{ContactField, Scope};

pub const GERMANY: &str = "DL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wag {
    /// Own station is in Germany
    pub domestic: bool,
}

pub fn is_german(geo: &GeoInfo) -> bool {
    geo.is_country(GERMANY)
}

/// District letter of a DOK ("B01" -> "B")
pub fn dok_district(dok: &str) -> Option<String> {
    dok.trim()
        .chars()
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}

impl CustomDupeCheck for Wag {
    fn base_policy(&self) -> DupePolicy {
        DupePolicy::PerBand
    }

    fn blocks(&self, _contact: &Contact, worked: Option<&GeoInfo>, _ctx: &ScoringContext) -> bool {
        !self.domestic && worked.map_or(false, |geo| !is_german(geo))
    }
}

impl ContestRules for Wag {
    fn name(&self) -> &'static str {
        "DARC WAG"
    }

    fn cabrillo_name(&self) -> &'static str {
        "WAG"
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        let label = if self.domestic { "DOK/Nr" } else { "DOK" };
        ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::Exchange1, label),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::ContestSpecific
    }

    fn custom_dupe(&self) -> Option<&dyn CustomDupeCheck> {
        Some(self)
    }

    fn sends_serial(&self, _ctx: &ScoringContext) -> bool {
        !self.domestic
    }

    fn prepare(&self, contact: &mut Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        contact.exchange1 = contact.exchange1.trim().to_uppercase();
    }

    fn points(&self, _contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32 {
        let Some((_, worked)) = ctx.geo_pair(worked) else {
            return 0;
        };
        match (self.domestic, is_german(worked)) {
            (true, true) => 1,
            (true, false) if worked.continent == Continent::EU => 3,
            (true, false) => 5,
            (false, true) => 1,
            (false, false) => 0,
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
        let german = is_german(worked);
        let mut candidates = Vec::new();
        if self.domestic != german {
            candidates.push(MultiplierCandidate::new(
                MultFlag::First,
                ContactField::CountryPrefix,
                &contact.country_prefix,
                Scope::Band,
            ));
        }
        if !self.domestic && german {
            if let Some(district) = dok_district(&contact.exchange1) {
                candidates.push(MultiplierCandidate::prefixed(
                    MultFlag::Second,
                    ContactField::Exchange1,
                    &district,
                    Scope::Band,
                ));
            }
        }
        candidates
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        if self.domestic {
            &["Countries"]
        } else {
            &["Countries", "DOK districts"]
        }
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        let sent = if self.domestic {
            ctx.session.sent_token(0)
        } else {
            contact.sent_nr.as_str()
        };
        CabrilloExchange {
            sent: vec![Column::report(&contact.rst_sent), Column::field(sent, 6)],
            rcvd: vec![Column::report(&contact.rst_rcvd), Column::field(&contact.exchange1, 6)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::testing::{worked, Fixture};
    use crate::dupe::is_blocked;

    fn points_for(rules: &Wag, fx: &Fixture, call: &str) -> u32 {
        let (c, geo) = worked(rules, fx, call, "20", "CW");
        rules.points(&c, geo.as_ref(), &fx.ctx())
    }

    #[test]
    fn test_asymmetric_points() {
        let dl = Wag { domestic: true };
        let fx = Fixture::new("DL1ABC", "DARC WAG", "B01");
        assert_eq!(points_for(&dl, &fx, "DK2XY"), 1);
        assert_eq!(points_for(&dl, &fx, "G4ABC"), 3);
        assert_eq!(points_for(&dl, &fx, "W1AW"), 5);

        let dx = Wag { domestic: false };
        let fx = Fixture::new("W1AW", "DARC WAG", "");
        assert_eq!(points_for(&dx, &fx, "DL1ABC"), 1);
        assert_eq!(points_for(&dx, &fx, "G4ABC"), 0);
    }

    #[test]
    fn test_non_german_pair_is_blocked() {
        let dx = Wag { domestic: false };
        let fx = Fixture::new("W1AW", "DARC WAG", "");
        let (c, geo) = worked(&dx, &fx, "G4ABC", "20", "CW");
        assert!(is_blocked(&dx, &c, geo.as_ref(), &fx.ctx()));
        let (c, geo) = worked(&dx, &fx, "DL1ABC", "20", "CW");
        assert!(!is_blocked(&dx, &c, geo.as_ref(), &fx.ctx()));

        let dl = Wag { domestic: true };
        let fx = Fixture::new("DL1ABC", "DARC WAG", "B01");
        let (c, geo) = worked(&dl, &fx, "W1AW", "20", "CW");
        assert!(!is_blocked(&dl, &c, geo.as_ref(), &fx.ctx()));
    }

    #[test]
    fn test_german_pairs_set_no_multiplier() {
        let dl = Wag { domestic: true };
        let fx = Fixture::new("DL1ABC", "DARC WAG", "B01");
        let (c, geo) = worked(&dl, &fx, "DK2XY", "20", "CW");
        assert!(dl.multiplier_candidates(&c, geo.as_ref(), &fx.ctx()).is_empty());
        let (c, geo) = worked(&dl, &fx, "JA1ABC", "20", "CW");
        assert_eq!(dl.multiplier_candidates(&c, geo.as_ref(), &fx.ctx())[0].matcher.value, "JA");
    }

    #[test]
    fn test_dok_district_multiplier() {
        let dx = Wag { domestic: false };
        let fx = Fixture::new("W1AW", "DARC WAG", "");
        let (mut c, geo) = worked(&dx, &fx, "DL1ABC", "20", "CW");
        c.exchange1 = "b01".to_string();
        dx.prepare(&mut c, geo.as_ref(), &fx.ctx());
        let candidates = dx.multiplier_candidates(&c, geo.as_ref(), &fx.ctx());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].flag, MultFlag::Second);
        assert_eq!(candidates[1].matcher.value, "B");
        assert!(candidates[1].matcher.matches(&c));
    }

    #[test]
    fn test_dok_district() {
        assert_eq!(dok_district("B01").as_deref(), Some("B"));
        assert_eq!(dok_district(" z55 ").as_deref(), Some("Z"));
        assert_eq!(dok_district("123"), None);
        assert_eq!(dok_district(""), None);
    }
}
