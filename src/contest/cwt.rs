// CWops CW Test (CWT)
// Rules: https://cwops.org/cwops-tests/
//
// One-hour weekly sprint. Exchange: name + member number, or name +
// state/province/country for non-members. Each callsign is a multiplier
// once.

use super::{CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate, ScoringContext};
use crate::contact::{Contact, ContactDraft, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::GeoInfo;
use crate::store::{ContactField, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cwt;

impl ContestRules for Cwt {
    fn name(&self) -> &'static str {
        "CWT"
    }

    fn cabrillo_name(&self) -> &'static str {
        "CW-OPS"
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        ExchangeLayout::new(&[(ContactField::Name, "Name"), (ContactField::Exchange1, "Nr/SPC")])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::PerBand
    }

    fn prepare(&self, contact: &mut Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        contact.name = contact.name.trim().to_uppercase();
        contact.exchange1 = contact.exchange1.trim().to_uppercase();
    }

    fn points(&self, _contact: &Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) -> u32 {
        1
    }

    fn multiplier_candidates(
        &self,
        contact: &Contact,
        _worked: Option<&GeoInfo>,
        _ctx: &ScoringContext,
    ) -> Vec<MultiplierCandidate> {
        vec![MultiplierCandidate::new(
            MultFlag::First,
            ContactField::Call,
            &contact.call,
            Scope::Contest,
        )]
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        &["Calls"]
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        CabrilloExchange {
            sent: vec![
                Column::field(ctx.session.sent_token(0), 10),
                Column::field(ctx.session.sent_token(1), 5),
            ],
            rcvd: vec![Column::field(&contact.name, 10), Column::field(&contact.exchange1, 5)],
        }
    }

    fn apply_received_exchange(&self, text: &str, draft: &mut ContactDraft) {
        let mut tokens = text.split_whitespace().map(str::to_uppercase);
        if let Some(name) = tokens.next() {
            draft.name = name;
        }
        if let Some(exchange) = tokens.next() {
            draft.exchange1 = exchange;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::fixtures::contact;
    use crate::contest::multiplier::evaluate_multipliers;
    use crate::contest::testing::{worked, Fixture};
    use crate::store::MemoryLogStore;

    #[test]
    fn test_callsign_multiplier_once_per_contest() {
        let fx = Fixture::new("K6GTE", "CWT", "MIKE 1234");
        let mut first = contact("W1AW", "20", "CW", 0);
        first.mults.m1 = true;
        let store = MemoryLogStore::from_contacts(vec![first]);

        let later = contact("W1AW", "40", "CW", 5);
        let flags = evaluate_multipliers(&store, &later, &Cwt.multiplier_candidates(&later, None, &fx.ctx()))
            .unwrap();
        assert!(!flags.m1);

        let other = contact("K1ABC", "40", "CW", 5);
        let flags = evaluate_multipliers(&store, &other, &Cwt.multiplier_candidates(&other, None, &fx.ctx()))
            .unwrap();
        assert!(flags.m1);
    }

    #[test]
    fn test_points_ignore_geography() {
        let fx = Fixture::new("K6GTE", "CWT", "MIKE 1234");
        let (c, _) = worked(&Cwt, &fx, "QQ1ABC", "20", "CW");
        assert_eq!(Cwt.points(&c, None, &fx.ctx()), 1);
    }

    #[test]
    fn test_cabrillo_columns() {
        let fx = Fixture::new("K6GTE", "CWT", "mike 1234");
        let mut c = contact("W1AW", "20", "CW", 0);
        let mut draft = ContactDraft::default();
        Cwt.apply_received_exchange("hiram ct", &mut draft);
        c.name = draft.name;
        c.exchange1 = draft.exchange1;
        let exchange = Cwt.cabrillo_exchange(&c, &fx.ctx());
        assert_eq!(exchange.sent[0].value, "MIKE");
        assert_eq!(exchange.rcvd[1].value, "CT");
    }
}
