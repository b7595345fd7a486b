// Multiplier recalculation
//
// Replays the whole log in time order and re-derives dupe status, points
// and multiplier flags for every contact. Contacts sharing a timestamp are
// judged against the history before that timestamp, never against each
// other, which is the same strictly-earlier rule the live path uses.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::contact::{Contact, SkippedContact};
use crate::contest::multiplier::MultKey;
use crate::contest::{annotate, ContestRules, MultiplierLedger, ScoringContext};
use crate::dupe::{effective_policy, is_blocked, DupeLedger};
use crate::error::StoreError;
use crate::reference::GeographyResolver;
use crate::store::ContactLogStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecalcReport {
    /// Contacts looked at, skipped ones included
    pub processed: usize,
    /// Contacts whose stored record changed
    pub changed: usize,
    pub skipped: Vec<SkippedContact>,
    /// The pass stopped early; contacts already persisted keep their new values
    pub cancelled: bool,
}

/// Score one contact against the ledgers, without touching them
fn rescore(
    contact: &mut Contact,
    resolver: &dyn GeographyResolver,
    rules: &dyn ContestRules,
    ctx: &ScoringContext,
    dupes: &DupeLedger,
    mults: &MultiplierLedger,
) -> Vec<MultKey> {
    let geo = resolver.resolve(&contact.call);
    annotate(contact, geo.as_ref());
    rules.prepare(contact, geo.as_ref(), ctx);

    contact.dupe = dupes.is_dupe(contact) || is_blocked(rules, contact, geo.as_ref(), ctx);
    contact.mults.clear();
    if !contact.claimed || contact.dupe {
        contact.points = 0;
        return Vec::new();
    }
    contact.points = rules.points(contact, geo.as_ref(), ctx);
    let candidates = rules.multiplier_candidates(contact, geo.as_ref(), ctx);
    let (flags, keys) = mults.evaluate(contact, &candidates);
    contact.mults = flags;
    keys
}

pub fn recalculate<S: ContactLogStore + ?Sized>(
    store: &mut S,
    resolver: &dyn GeographyResolver,
    rules: &dyn ContestRules,
    ctx: &ScoringContext,
    cancel: &AtomicBool,
) -> Result<RecalcReport, StoreError> {
    let contacts = store.fetch_all_ordered(ctx.session.id)?;
    let mut report = RecalcReport::default();
    let mut dupes = DupeLedger::new(effective_policy(rules));
    let mut mults = MultiplierLedger::new();

    let mut start = 0;
    'groups: while start < contacts.len() {
        let timestamp = contacts[start].timestamp;
        let end = contacts[start..]
            .iter()
            .position(|c| c.timestamp != timestamp)
            .map_or(contacts.len(), |offset| start + offset);

        let mut worked_calls = Vec::new();
        let mut claims = Vec::new();
        for original in &contacts[start..end] {
            if cancel.load(Ordering::Relaxed) {
                report.cancelled = true;
                break 'groups;
            }
            report.processed += 1;

            if let Err(reason) = original.check_fields() {
                log::warn!("Recalculation skipped {} ({}): {}", original.call, original.id, reason);
                report.skipped.push(SkippedContact::new(original, reason));
                continue;
            }

            let mut contact = original.clone();
            claims.extend(rescore(&mut contact, resolver, rules, ctx, &dupes, &mults));
            if contact.claimed {
                worked_calls.push(contact.clone());
            }
            if contact != *original {
                store.persist(&contact)?;
                report.changed += 1;
            }
        }

        for contact in &worked_calls {
            dupes.record(contact);
        }
        mults.claim(claims);
        start = end;
    }

    log::info!(
        "Recalculated session {}: {} processed, {} changed, {} skipped{}",
        ctx.session.id,
        report.processed,
        report.changed,
        report.skipped.len(),
        if report.cancelled { " (cancelled)" } else { "" }
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::fixtures::contact;
    use crate::contest::cq_wpx::CqWpx;
    use crate::contest::cq_ww::CqWw;
    use crate::contest::registry::ContestMode;
    use crate::contest::testing::Fixture;
    use crate::reference::BuiltinResolver;
    use crate::store::MemoryLogStore;

    fn wpx() -> CqWpx {
        CqWpx { mode: ContestMode::Cw }
    }

    fn run(store: &mut MemoryLogStore, rules: &dyn ContestRules, fx: &Fixture) -> RecalcReport {
        recalculate(store, &BuiltinResolver, rules, &fx.ctx(), &AtomicBool::new(false)).unwrap()
    }

    fn by_call<'a>(contacts: &'a [Contact], call: &str) -> &'a Contact {
        contacts.iter().find(|c| c.call == call).unwrap()
    }

    #[test]
    fn test_out_of_order_insert_moves_multiplier() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        // JA1XYZ logged first at 00:10 and flagged as the JA1 multiplier
        let mut later = contact("JA1XYZ", "20", "CW", 10);
        later.mults.m1 = true;
        later.wpx_prefix = "JA1".to_string();
        // JA1ABC inserted afterwards with an earlier timestamp
        let earlier = contact("JA1ABC", "15", "CW", 5);
        let mut store = MemoryLogStore::from_contacts(vec![later, earlier]);

        let report = run(&mut store, &wpx(), &fx);
        assert_eq!(report.processed, 2);

        let contacts = store.fetch_all_ordered(1).unwrap();
        assert!(contacts[0].mults.m1);
        assert_eq!(contacts[0].call, "JA1ABC");
        assert!(!contacts[1].mults.m1);
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let rules = CqWw { mode: ContestMode::Cw };
        let mut store = MemoryLogStore::from_contacts(vec![
            contact("JA1ABC", "20", "CW", 1),
            contact("JA2XYZ", "20", "CW", 2),
            contact("JA1ABC", "20", "CW", 3),
            contact("DL1ABC", "40", "CW", 4),
        ]);
        let first = run(&mut store, &rules, &fx);
        assert_eq!(first.changed, 4);
        let snapshot = store.fetch_all_ordered(1).unwrap();
        store.take_changes();

        let second = run(&mut store, &rules, &fx);
        assert_eq!(second.changed, 0);
        assert!(store.take_changes().is_empty());
        assert_eq!(store.fetch_all_ordered(1).unwrap(), snapshot);

        assert!(snapshot[0].mults.m1 && snapshot[0].mults.m2);
        assert!(!snapshot[1].mults.m1 && !snapshot[1].mults.m2);
        assert!(snapshot[2].dupe);
        assert_eq!(snapshot[2].points, 0);
        assert_eq!(snapshot[3].points, 3);
    }

    #[test]
    fn test_same_timestamp_contacts_both_earn() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        let mut store = MemoryLogStore::from_contacts(vec![
            contact("JA1ABC", "20", "CW", 5),
            contact("JA1XYZ", "40", "CW", 5),
        ]);
        run(&mut store, &wpx(), &fx);
        let contacts = store.fetch_all_ordered(1).unwrap();
        assert!(contacts.iter().all(|c| c.mults.m1));
    }

    #[test]
    fn test_unclaimed_contacts_are_not_history() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        let mut unclaimed = contact("JA1ABC", "20", "CW", 1);
        unclaimed.claimed = false;
        let mut store = MemoryLogStore::from_contacts(vec![unclaimed, contact("JA1ABC", "20", "CW", 2)]);
        run(&mut store, &wpx(), &fx);
        let contacts = store.fetch_all_ordered(1).unwrap();
        assert_eq!(contacts[0].points, 0);
        assert!(!contacts[0].mults.m1);
        assert!(!contacts[1].dupe);
        assert!(contacts[1].mults.m1);
        assert_eq!(contacts[1].points, 3);
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        let mut broken = contact("JA1ABC", "20", "CW", 1);
        broken.freq = "14.0.3".to_string();
        let mut store = MemoryLogStore::from_contacts(vec![broken, contact("JA1XYZ", "20", "CW", 2)]);
        let report = run(&mut store, &wpx(), &fx);
        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].call, "JA1ABC");
        let contacts = store.fetch_all_ordered(1).unwrap();
        assert!(by_call(&contacts, "JA1XYZ").mults.m1);
    }

    #[test]
    fn test_cancellation_stops_before_next_contact() {
        let fx = Fixture::new("K6GTE", "CQ WPX CW", "");
        let mut store = MemoryLogStore::from_contacts(vec![contact("JA1ABC", "20", "CW", 1)]);
        let cancel = AtomicBool::new(true);
        let report = recalculate(&mut store, &BuiltinResolver, &wpx(), &fx.ctx(), &cancel).unwrap();
        assert!(report.cancelled);
        assert_eq!(report.processed, 0);
        assert!(store.take_changes().is_empty());
    }
}
