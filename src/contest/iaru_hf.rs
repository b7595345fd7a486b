// IARU HF World Championship
// Rules: https://www.arrl.org/iaru-hf-championship
//
// Exchange: RST + ITU zone, or the society abbreviation for IARU member
// society HQ stations and officials.

use super::{
    is_numeric, normalize_zone, CabrilloExchange, Column, ContestRules, ExchangeLayout,
    MultiplierCandidate, ScoringContext,
};
use crate::contact::{Contact, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::GeoInfo;
use crate::store::{ContactField, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IaruHf;

/// Received exchange is a society abbreviation rather than a zone
pub fn is_hq(contact: &Contact) -> bool {
    let exchange = contact.exchange1.trim();
    !exchange.is_empty() && !is_numeric(exchange)
}

impl ContestRules for IaruHf {
    fn name(&self) -> &'static str {
        "IARU HF"
    }

    fn cabrillo_name(&self) -> &'static str {
        "IARU-HF"
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        ExchangeLayout::new(&[
            (ContactField::RstSent, "Snt"),
            (ContactField::RstRcvd, "Rcv"),
            (ContactField::Exchange1, "Zone/HQ"),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::PerBandAndMode
    }

    fn prepare(&self, contact: &mut Contact, worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        if contact.exchange1.trim().is_empty() {
            if let Some(geo) = worked {
                contact.exchange1 = geo.itu_zone.to_string();
            }
        }
        contact.exchange1 = normalize_zone(&contact.exchange1);
        contact.zone = if is_numeric(&contact.exchange1) {
            contact.exchange1.clone()
        } else {
            String::new()
        };
    }

    fn points(&self, contact: &Contact, worked: Option<&GeoInfo>, ctx: &ScoringContext) -> u32 {
        let Some((own, worked)) = ctx.geo_pair(worked) else {
            return 0;
        };
        if is_hq(contact) || contact.zone == own.itu_zone.to_string() {
            1
        } else if own.continent == worked.continent {
            3
        } else {
            5
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
        if is_hq(contact) {
            vec![MultiplierCandidate::new(
                MultFlag::Second,
                ContactField::Exchange1,
                &contact.exchange1,
                Scope::BandMode,
            )]
        } else {
            vec![MultiplierCandidate::new(
                MultFlag::First,
                ContactField::Zone,
                &contact.zone,
                Scope::BandMode,
            )]
        }
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        &["ITU zones", "HQ stations"]
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        let sent = match ctx.session.sent_token(0) {
            "" => ctx.own_itu_zone(),
            token => token.to_string(),
        };
        CabrilloExchange {
            sent: vec![Column::report(&contact.rst_sent), Column::field(&sent, 6)],
            rcvd: vec![Column::report(&contact.rst_rcvd), Column::field(&contact.exchange1, 6)],
        }
    }
}
