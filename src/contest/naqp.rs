// North American QSO Party (CW, SSB and RTTY)
// Rules: https://ncjweb.com/naqp/
//
// Exchange: name + location. North American stations send their
// state/province (or DXCC prefix), everyone else sends nothing after
// the name. Multipliers per band: US states, Canadian provinces and other
// North American countries.

use super::registry::ContestMode;
use super::{CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate, ScoringContext};
use crate::contact::{Contact, ContactDraft, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::sections::is_state_or_province;
use crate::reference::{Continent, GeoInfo};
use crate::store::{ContactField, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Naqp {
    pub mode: ContestMode,
}

fn is_us_or_canada(geo: &GeoInfo) -> bool {
    geo.is_country("K") || geo.is_country("VE")
}

/// "NAME LOC" into name and location; a lone token is the name
pub fn parse_received(text: &str, draft: &mut ContactDraft) {
    let mut tokens = text.split_whitespace().map(str::to_uppercase);
    if let Some(name) = tokens.next() {
        draft.name = name;
    }
    if let Some(location) = tokens.next() {
        draft.sect = location;
    }
}

impl ContestRules for Naqp {
    fn name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "NAQP SSB",
            ContestMode::Rtty => "NAQP RTTY",
            ContestMode::Cw => "NAQP CW",
        }
    }

    fn cabrillo_name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "NAQP-SSB",
            ContestMode::Rtty => "NAQP-RTTY",
            ContestMode::Cw => "NAQP-CW",
        }
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        ExchangeLayout::new(&[(ContactField::Name, "Name"), (ContactField::Sect, "Loc")])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::PerBand
    }

    fn prepare(&self, contact: &mut Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        contact.name = contact.name.trim().to_uppercase();
        contact.sect = contact.sect.trim().to_uppercase();
    }

    fn points(&self, _contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32 {
        if ctx.geo_pair(worked).is_some() {
            1
        } else {
            0
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
        if is_us_or_canada(worked) {
            if !is_state_or_province(&contact.sect) {
                return Vec::new();
            }
            return vec![MultiplierCandidate::new(
                MultFlag::First,
                ContactField::Sect,
                &contact.sect,
                Scope::Band,
            )];
        }
        if worked.continent == Continent::NA {
            return vec![MultiplierCandidate::new(
                MultFlag::First,
                ContactField::CountryPrefix,
                &contact.country_prefix,
                Scope::Band,
            )];
        }
        Vec::new()
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        &["States/provinces/NA countries"]
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        CabrilloExchange {
            sent: vec![
                Column::field(ctx.session.sent_token(0), 10),
                Column::field(ctx.session.sent_token(1), 3),
            ],
            rcvd: vec![Column::field(&contact.name, 10), Column::field(&contact.sect, 3)],
        }
    }

    fn apply_received_exchange(&self, text: &str, draft: &mut ContactDraft) {
        parse_received(text, draft);
    }
}
