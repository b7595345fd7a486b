// Japan International DX Contest (CW)
// Rules: https://www.jidx.org/jidxrule-e.html
//
// Japanese stations send RST + prefecture, everyone else sends RST + CQ
// zone. Points come from a fixed band table; the contest allows working
// stations again, so there is no dupe checking.

use super::{
    normalize_zone, CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate,
    ScoringContext,
};
use crate::contact::{Contact, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::GeoInfo;
use crate::store::{ContactField, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JidxCw {
    /// Own station is in Japan
    pub japanese: bool,
}

pub fn band_points(band: &str) -> u32 {
    match band.trim() {
        "160" => 4,
        "80" => 2,
        "40" | "20" | "15" => 1,
        "10" => 2,
        _ => 0,
    }
}

impl ContestRules for JidxCw {
    fn name(&self) -> &'static str {
        "JIDX CW"
    }

    fn cabrillo_name(&self) -> &'static str {
        "JIDX-CW"
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        let label = if self.japanese { "Zone" } else { "Pref" };
        ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::Exchange1, label),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::NoDupeChecking
    }

    fn prepare(&self, contact: &mut Contact, worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        contact.exchange1 = normalize_zone(&contact.exchange1);
        if self.japanese {
            contact.zone = if contact.exchange1.is_empty() {
                worked.map(|g| g.cq_zone.to_string()).unwrap_or_default()
            } else {
                contact.exchange1.clone()
            };
        }
    }

    fn points(&self, contact: &Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) -> u32 {
        band_points(&contact.band)
    }

    fn multiplier_candidates(
        &self,
        contact: &Contact,
        _worked: Option<&GeoInfo>,
        _ctx: &ScoringContext,
    ) -> Vec<MultiplierCandidate> {
        if self.japanese {
            vec![
                MultiplierCandidate::new(
                    MultFlag::First,
                    ContactField::CountryPrefix,
                    &contact.country_prefix,
                    Scope::Band,
                ),
                MultiplierCandidate::new(MultFlag::Second, ContactField::Zone, &contact.zone, Scope::Band),
            ]
        } else {
            vec![MultiplierCandidate::new(
                MultFlag::First,
                ContactField::Exchange1,
                &contact.exchange1,
                Scope::Band,
            )]
        }
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        if self.japanese {
            &["Countries", "Zones"]
        } else {
            &["Prefectures"]
        }
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        let sent = if self.japanese {
            ctx.session.sent_token(0).to_string()
        } else {
            ctx.own_cq_zone()
        };
        CabrilloExchange {
            sent: vec![Column::report(&contact.rst_sent), Column::field(&sent, 6)],
            rcvd: vec![Column::report(&contact.rst_rcvd), Column::field(&contact.exchange1, 6)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::testing::{worked, Fixture};

    #[test]
    fn test_band_table() {
        let fx = Fixture::new("K6GTE", "JIDX CW", "");
        let rules = JidxCw { japanese: false };
        let points = |call: &str, band: &str| {
            let (c, geo) = worked(&rules, &fx, call, band, "CW");
            rules.points(&c, geo.as_ref(), &fx.ctx())
        };
        assert_eq!(points("JA1ABC", "40"), 1);
        assert_eq!(points("JA1ABC", "160"), 4);
        assert_eq!(points("JA1ABC", "10"), 2);
        // independent of the worked station, even an unknown one
        assert_eq!(points("QQ1ABC", "10"), 2);
        assert_eq!(points("JA1ABC", "17"), 0);
    }

    #[test]
    fn test_no_dupe_checking() {
        assert_eq!(JidxCw { japanese: false }.dupe_policy(), DupePolicy::NoDupeChecking);
    }

    #[test]
    fn test_dx_station_counts_prefectures() {
        let fx = Fixture::new("K6GTE", "JIDX CW", "");
        let rules = JidxCw { japanese: false };
        let (mut c, geo) = worked(&rules, &fx, "JA1ABC", "20", "CW");
        c.exchange1 = "10".to_string();
        let candidates = rules.multiplier_candidates(&c, geo.as_ref(), &fx.ctx());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].matcher.field, ContactField::Exchange1);
    }

    #[test]
    fn test_japanese_station_counts_countries_and_zones() {
        let fx = Fixture::new("JA1XYZ", "JIDX CW", "10");
        let rules = JidxCw { japanese: true };
        let (c, geo) = worked(&rules, &fx, "W1AW", "20", "CW");
        assert_eq!(c.zone, "5");
        let candidates = rules.multiplier_candidates(&c, geo.as_ref(), &fx.ctx());
        assert_eq!(candidates[0].matcher.value, "K");
        assert_eq!(candidates[1].matcher.value, "5");
        let exchange = rules.cabrillo_exchange(&c, &fx.ctx());
        assert_eq!(exchange.sent[1].value, "10");
    }
}
