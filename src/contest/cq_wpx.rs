// CQ WPX Contest
// Rules: https://cqwpx.com/rules.htm
//
// Exchange: RST + serial number. Contacts off the high bands (20/15/10)
// count double; each WPX prefix is a multiplier once per contest.

use super::registry::ContestMode;
use super::{CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate, ScoringContext};
use crate::adif::bands::is_high_band;
use crate::contact::{Contact, ContactDraft, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::{Continent, GeoInfo};
use crate::store::{ContactField, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CqWpx {
    pub mode: ContestMode,
}

pub fn wpx_points(own: &GeoInfo, worked: &GeoInfo, band: &str) -> u32 {
    let high = is_high_band(band);
    let (high_band, low_band) = if own.same_country(worked) {
        (1, 1)
    } else if own.continent == worked.continent {
        if own.continent == Continent::NA {
            (2, 4)
        } else {
            (1, 2)
        }
    } else {
        (3, 6)
    };
    if high {
        high_band
    } else {
        low_band
    }
}

impl ContestRules for CqWpx {
    fn name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "CQ WPX SSB",
            _ => "CQ WPX CW",
        }
    }

    fn cabrillo_name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "CQ-WPX-SSB",
            _ => "CQ-WPX-CW",
        }
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::SentNr, "SentNr"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::RcvNr, "RcvNr"),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::PerBand
    }

    fn sends_serial(&self, _ctx: &ScoringContext) -> bool {
        true
    }

    fn points(&self, contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32 {
        match ctx.geo_pair(worked) {
            Some((own, worked)) => wpx_points(own, worked, &contact.band),
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
        vec![MultiplierCandidate::new(
            MultFlag::First,
            ContactField::WpxPrefix,
            &contact.wpx_prefix,
            Scope::Contest,
        )]
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        &["Prefixes"]
    }

    fn cabrillo_exchange(&self, contact: &Contact, _ctx: &ScoringContext) -> CabrilloExchange {
        CabrilloExchange {
            sent: vec![Column::report(&contact.rst_sent), Column::field(&contact.sent_nr, 6)],
            rcvd: vec![Column::report(&contact.rst_rcvd), Column::field(&contact.rcv_nr, 6)],
        }
    }

    fn apply_received_exchange(&self, text: &str, draft: &mut ContactDraft) {
        draft.rcv_nr = text.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::testing::{worked, Fixture};

    fn rules() -> CqWpx {
        CqWpx { mode: ContestMode::Cw }
    }

    fn points_for(fx: &Fixture, call: &str, band: &str) -> u32 {
        let (c, geo) = worked(&rules(), fx, call, band, "CW");
        rules().points(&c, geo.as_ref(), &fx.ctx())
    }

    #[test]
    fn test_points_by_band() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        assert_eq!(points_for(&fx, "W1AW", "20"), 1);
        assert_eq!(points_for(&fx, "W1AW", "40"), 1);
        assert_eq!(points_for(&fx, "VE3ABC", "20"), 2);
        assert_eq!(points_for(&fx, "VE3ABC", "80"), 4);
        assert_eq!(points_for(&fx, "JA1ABC", "15"), 3);
        assert_eq!(points_for(&fx, "JA1ABC", "160"), 6);

        let eu = Fixture::new("DL1ABC", "CQ WPX CW", "");
        assert_eq!(points_for(&eu, "G4ABC", "10"), 1);
        assert_eq!(points_for(&eu, "G4ABC", "40"), 2);
    }

    #[test]
    fn test_prefix_candidate_is_contest_wide() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        let (c, geo) = worked(&rules(), &fx, "JA1ABC", "20", "CW");
        let candidates = rules().multiplier_candidates(&c, geo.as_ref(), &fx.ctx());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].matcher.value, "JA1");
        assert_eq!(candidates[0].scope, Scope::Contest);
    }

    #[test]
    fn test_received_serial_roundtrip() {
        let mut draft = ContactDraft::default();
        rules().apply_received_exchange(" 123 ", &mut draft);
        assert_eq!(draft.rcv_nr, "123");
    }
}
