// ARRL November Sweepstakes
// Rules: https://www.arrl.org/sweepstakes
//
// Exchange: serial number, precedence, call, check (two-digit year first
// licensed) and ARRL/RAC section. Each station may be worked once; each
// section is a multiplier once.

use super::registry::ContestMode;
use super::{is_numeric, CabrilloExchange, Column, ContestRules, ExchangeLayout, MultiplierCandidate, ScoringContext};
use crate::contact::{Contact, ContactDraft, MultFlag};
use crate::dupe::DupePolicy;
use crate::reference::sections::is_valid_section;
use crate::reference::GeoInfo;
use crate::store::{ContactField, Scope};

const QSO_POINTS: u32 = 2;

/// Single-letter power/entry class
const PRECEDENCES: &[&str] = &["Q", "A", "B", "U", "M", "S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrlSs {
    pub mode: ContestMode,
}

fn is_precedence(token: &str) -> bool {
    PRECEDENCES.contains(&token)
}

/// Split "123A" into ("123", "A")
fn split_serial_precedence(token: &str) -> Option<(&str, &str)> {
    let split = token.find(|c: char| !c.is_ascii_digit())?;
    let (nr, prec) = token.split_at(split);
    (!nr.is_empty() && is_precedence(prec)).then_some((nr, prec))
}

/// Fill serial, precedence, check and section from received exchange text,
/// e.g. "123 A 99 ORG" or "123A 99 ORG"
pub fn parse_received(text: &str, draft: &mut ContactDraft) {
    for token in text.split_whitespace().map(str::to_uppercase) {
        if is_numeric(&token) {
            if draft.rcv_nr.is_empty() {
                draft.rcv_nr = token;
            } else {
                draft.ck = token;
            }
        } else if is_precedence(&token) && draft.prec.is_empty() {
            draft.prec = token;
        } else if let Some((nr, prec)) = split_serial_precedence(&token) {
            draft.rcv_nr = nr.to_string();
            draft.prec = prec.to_string();
        } else {
            draft.sect = token;
        }
    }
}

impl ContestRules for ArrlSs {
    fn name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "ARRL SS SSB",
            _ => "ARRL SS CW",
        }
    }

    fn cabrillo_name(&self) -> &'static str {
        match self.mode {
            ContestMode::Ssb => "ARRL-SS-SSB",
            _ => "ARRL-SS-CW",
        }
    }

    fn exchange_layout(&self) -> ExchangeLayout {
        ExchangeLayout::new(&[
            (ContactField::RcvNr, "Nr"),
            (ContactField::Prec, "Prec"),
            (ContactField::Ck, "Ck"),
            (ContactField::Sect, "Sec"),
        ])
    }

    fn dupe_policy(&self) -> DupePolicy {
        DupePolicy::OncePerContest
    }

    fn sends_serial(&self, _ctx: &ScoringContext) -> bool {
        true
    }

    fn prepare(&self, contact: &mut Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) {
        contact.prec = contact.prec.trim().to_uppercase();
        contact.sect = contact.sect.trim().to_uppercase();
        contact.ck = contact.ck.trim().to_string();
    }

    fn points(&self, _contact: &Contact, _worked: Option<&GeoInfo>, _ctx: &ScoringContext) -> u32 {
        QSO_POINTS
    }

    fn multiplier_candidates(
        &self,
        contact: &Contact,
        _worked: Option<&GeoInfo>,
        _ctx: &ScoringContext,
    ) -> Vec<MultiplierCandidate> {
        if !is_valid_section(&contact.sect) {
            return Vec::new();
        }
        vec![MultiplierCandidate::new(
            MultFlag::First,
            ContactField::Sect,
            &contact.sect,
            Scope::Contest,
        )]
    }

    fn multiplier_names(&self) -> &'static [&'static str] {
        &["Sections"]
    }

    fn cabrillo_exchange(&self, contact: &Contact, ctx: &ScoringContext) -> CabrilloExchange {
        CabrilloExchange {
            sent: vec![
                Column::field(&contact.sent_nr, 4),
                Column::field(ctx.session.sent_token(0), 1),
                Column::field(ctx.session.sent_token(1), 2),
                Column::field(ctx.session.sent_token(2), 3),
            ],
            rcvd: vec![
                Column::field(&contact.rcv_nr, 4),
                Column::field(&contact.prec, 1),
                Column::field(&contact.ck, 2),
                Column::field(&contact.sect, 3),
            ],
        }
    }

    fn apply_received_exchange(&self, text: &str, draft: &mut ContactDraft) {
        parse_received(text, draft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::testing::{worked, Fixture};

    fn rules() -> ArrlSs {
        ArrlSs { mode: ContestMode::Cw }
    }

    #[test]
    fn test_flat_points_without_geography() {
        let fx = Fixture::new("K6GTE", "ARRL SS CW", "A 99 ORG");
        let (c, _) = worked(&rules(), &fx, "QQ1ABC", "20", "CW");
        assert_eq!(rules().points(&c, None, &fx.ctx()), 2);
        assert_eq!(rules().dupe_policy(), DupePolicy::OncePerContest);
    }

    #[test]
    fn test_section_multiplier_needs_valid_section() {
        let fx = Fixture::new("K6GTE", "ARRL SS CW", "A 99 ORG");
        let (mut c, geo) = worked(&rules(), &fx, "W1AW", "20", "CW");
        c.sect = "ct".to_string();
        rules().prepare(&mut c, geo.as_ref(), &fx.ctx());
        let candidates = rules().multiplier_candidates(&c, geo.as_ref(), &fx.ctx());
        assert_eq!(candidates[0].matcher.value, "CT");
        assert_eq!(candidates[0].scope, Scope::Contest);

        c.sect = "XYZ".to_string();
        assert!(rules().multiplier_candidates(&c, geo.as_ref(), &fx.ctx()).is_empty());
    }

    #[test]
    fn test_parse_received() {
        let mut draft = ContactDraft::default();
        parse_received("123 a 72 ct", &mut draft);
        assert_eq!(draft.rcv_nr, "123");
        assert_eq!(draft.prec, "A");
        assert_eq!(draft.ck, "72");
        assert_eq!(draft.sect, "CT");

        let mut draft = ContactDraft::default();
        parse_received("5B 01 ORG", &mut draft);
        assert_eq!(draft.rcv_nr, "5");
        assert_eq!(draft.prec, "B");
        assert_eq!(draft.ck, "01");
        assert_eq!(draft.sect, "ORG");
    }

    #[test]
    fn test_cabrillo_columns() {
        let fx = Fixture::new("K6GTE", "ARRL SS CW", "A 99 ORG");
        let (mut c, _) = worked(&rules(), &fx, "W1AW", "20", "CW");
        c.sent_nr = "1".to_string();
        c.rcv_nr = "123".to_string();
        c.prec = "A".to_string();
        c.ck = "72".to_string();
        c.sect = "CT".to_string();
        let exchange = rules().cabrillo_exchange(&c, &fx.ctx());
        let sent: Vec<&str> = exchange.sent.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(sent, vec!["1", "A", "99", "ORG"]);
        assert_eq!(
            rules().adif_exchange(&c, &fx.ctx()),
            ("1 A 99 ORG".to_string(), "123 A 72 CT".to_string())
        );
    }
}
