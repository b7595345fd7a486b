// CQ World Wide DX Contest
// Rules: https://cqww.com/rules.htm
//
// Exchange: RST + CQ zone. Points by relative geography; multipliers are
// zones and countries, each counted once per band.

use super::registry::ContestMode;
use super::{
    normalize_zone, CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate,
    ScoringContext,
};
use crate::contact::{Contact, ContactDraft, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::{Continent, GeoInfo};
use crate::store::{ContactField, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CqWw {
    pub mode: ContestMode,
}

/// 0 same country, 2 for two different North American countries,
/// 1 same continent otherwise, 3 between continents
pub fn geography_points(own: &GeoInfo, worked: &GeoInfo) -> u32 {
    if own.same_country(worked) {
        0
    } else if own.continent == Continent::NA && worked.continent == Continent::NA {
        2
    } else if own.continent == worked.continent {
        1
    } else {
        3
    }
}

impl ContestRules for CqWw {
    fn name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "CQ WW SSB",
            _ => "CQ WW CW",
        }
    }

    fn cabrillo_name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "CQ-WW-SSB",
            _ => "CQ-WW-CW",
        }
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::Zone, "Zone"),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::PerBand
    }

    fn prepare(&self, contact: &mut Contact, worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        if contact.zone.trim().is_empty() {
            if let Some(geo) = worked {
                contact.zone = geo.cq_zone.to_string();
            }
        } else {
            contact.zone = normalize_zone(&contact.zone);
        }
    }

    fn points(&self, _contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32 {
        match ctx.geo_pair(worked) {
            Some((own, worked)) => geography_points(own, worked),
            None => 0,
        }
    }

    fn multiplier_candidates(
        &self,
        contact: &Contact,
        worked: Option<&GeoInfo>,
        ctx: &ScoringContext,
    ) -> Vec<MultiplierCandidate> {
        if ctx.geo_pair(worked).is_none() {
            return Vec::new();
        }
        vec![
            MultiplierCandidate::new(MultFlag::First, ContactField::Zone, &contact.zone, Scope::Band),
            MultiplierCandidate::new(
                MultFlag::Second,
                ContactField::CountryPrefix,
                &contact.country_prefix,
                Scope::Band,
            ),
        ]
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        &["Zones", "Countries"]
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        CabrilloExchange {
            sent: vec![Column::report(&contact.rst_sent), Column::field(&ctx.own_cq_zone(), 6)],
            rcvd: vec![Column::report(&contact.rst_rcvd), Column::field(&contact.zone, 6)],
        }
    }

    fn apply_received_exchange(&self, text: &str, draft: &mut ContactDraft) {
        draft.zone = normalize_zone(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::testing::{worked, Fixture};

    fn rules() -> CqWw {
        CqWw { mode: ContestMode::Cw }
    }

    fn points_for(fx: &Fixture, call: &str) -> u32 {
        let (c, geo) = worked(&rules(), fx, call, "20", "CW");
        rules().points(&c, geo.as_ref(), &fx.ctx())
    }

    #[test]
    fn test_k6gte_scenarios() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        assert_eq!(points_for(&fx, "JA1ABC"), 3);
        assert_eq!(points_for(&fx, "W1AW"), 0);
        assert_eq!(points_for(&fx, "VE3ABC"), 2);
    }

    #[test]
    fn test_same_continent_outside_na() {
        let fx = Fixture::new("DL1ABC", "CQ WW CW", "");
        assert_eq!(points_for(&fx, "G4ABC"), 1);
        assert_eq!(points_for(&fx, "DK2XY"), 0);
        assert_eq!(points_for(&fx, "W1AW"), 3);
    }

    #[test]
    fn test_lookup_miss_scores_nothing() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let (c, geo) = worked(&rules(), &fx, "QQ1ABC", "20", "CW");
        assert!(geo.is_none());
        assert_eq!(rules().points(&c, None, &fx.ctx()), 0);
        assert!(rules().multiplier_candidates(&c, None, &fx.ctx()).is_empty());
    }

    #[test]
    fn test_zone_filled_and_normalized() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let (c, _) = worked(&rules(), &fx, "JA1ABC", "20", "CW");
        assert_eq!(c.zone, "25");
        assert_eq!(c.country_prefix, "JA");

        let mut typed = crate::contact::fixtures::contact("W1AW", "20", "CW", 0);
        typed.zone = "05".to_string();
        rules().prepare(&mut typed, None, &fx.ctx());
        assert_eq!(typed.zone, "5");
    }

    #[test]
    fn test_cabrillo_columns() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let (c, _) = worked(&rules(), &fx, "JA1ABC", "20", "CW");
        let exchange = rules().cabrillo_exchange(&c, &fx.ctx());
        assert_eq!(exchange.sent[1].value, "5");
        assert_eq!(exchange.rcvd[1].value, "25");
        assert_eq!(rules().adif_exchange(&c, &fx.ctx()), ("5".to_string(), "25".to_string()));
    }

    #[test]
    fn test_score_sums_zones_and_countries() {
        assert_eq!(rules().aggregate_score(100, [10, 20, 0]), 3000);
    }
}
