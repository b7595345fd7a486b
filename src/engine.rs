//! Logging engine
//!
//! [`Logbook`] ties one contest session to a contact store and a geography
//! resolver. It is the surface a GUI or the command line drives: log a
//! contact, ask for the running score, recalculate, render submissions.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::adif::{self, AdifOutput};
use crate::adif::bands::band_edge_khz;
use crate::adif::modes::{get_mode_group, normalize_mode, ModeGroup};
use crate::cabrillo::{self, CabrilloOutput, TextEncoding};
use crate::contact::{format_khz, parse_khz, validate_callsign, Contact, ContactDraft, MultiplierFlags};
use crate::contest::multiplier::evaluate_multipliers;
use crate::contest::{annotate, lookup, ContestKind, ContestRules, ScoringContext};
use crate::dupe::{self, check_dupe, effective_policy, DupeProbe};
use crate::error::{ContestError, Rejection};
use crate::output;
use crate::recalc::{self, RecalcReport};
use crate::reference::{GeoInfo, GeographyResolver};
use crate::session::{CategoryMode, ContestSession, SessionConfig, StationProfile};
use crate::store::{ContactLogStore, ContactQuery};

// ============================================================================
// Results
// ============================================================================

/// What happened to a draft handed to `log_contact`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogOutcome {
    pub accepted: bool,
    pub reason: Option<Rejection>,
    /// The stored contact, when accepted
    pub contact: Option<Contact>,
}

impl LogOutcome {
    fn rejected(reason: Rejection) -> Self {
        LogOutcome {
            accepted: false,
            reason: Some(reason),
            contact: None,
        }
    }

    fn accepted(contact: Contact) -> Self {
        LogOutcome {
            accepted: true,
            reason: None,
            contact: Some(contact),
        }
    }

    pub fn is_dupe(&self) -> bool {
        self.contact.as_ref().map_or(false, |c| c.dupe)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunningScore {
    pub contacts: usize,
    pub dupes: usize,
    pub points: u64,
    /// Counts of IsMultiplier1/2/3
    pub mults: [u32; 3],
    /// Labels for the multiplier counts in use, in flag order
    pub mult_names: &'static [&'static str],
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub total_records: usize,
    pub imported: usize,
    pub dupes: usize,
    pub rejected: usize,
    pub error_messages: Vec<String>,
    pub recalc: RecalcReport,
}

// ============================================================================
// Session
// ============================================================================

/// Check the contest name and build a session under its registry spelling.
/// The id is whatever the caller's storage assigns.
pub fn new_session(id: i64, contest: &str, config: SessionConfig) -> Result<ContestSession, ContestError> {
    let kind = lookup(contest, None)?;
    let session = ContestSession {
        id,
        contest: kind.rules().name().to_string(),
        config,
    };
    log::info!("Created {} session {}", session.contest, session.id);
    Ok(session)
}

/// Own geography with the station profile's zone overrides applied
pub fn own_geography<G: GeographyResolver + ?Sized>(resolver: &G, station: &StationProfile) -> Option<GeoInfo> {
    let mut geo = resolver.resolve(&station.call)?;
    if station.cq_zone > 0 {
        geo.cq_zone = station.cq_zone;
    }
    if station.itu_zone > 0 {
        geo.itu_zone = station.itu_zone;
    }
    Some(geo)
}

/// A session together with the resolved rules and own-station data
#[derive(Debug, Clone)]
pub struct Contest {
    session: ContestSession,
    station: StationProfile,
    own: Option<GeoInfo>,
    kind: ContestKind,
}

impl Contest {
    pub fn session(&self) -> &ContestSession {
        &self.session
    }

    pub fn station(&self) -> &StationProfile {
        &self.station
    }

    pub fn own(&self) -> Option<&GeoInfo> {
        self.own.as_ref()
    }

    pub fn kind(&self) -> ContestKind {
        self.kind
    }

    pub fn rules(&self) -> &dyn ContestRules {
        self.kind.rules()
    }

    pub fn ctx(&self) -> ScoringContext<'_> {
        ScoringContext {
            session: &self.session,
            station: &self.station,
            own: self.own.as_ref(),
        }
    }
}

// ============================================================================
// Logbook
// ============================================================================

pub struct Logbook<S, G> {
    store: S,
    resolver: G,
    contest: Contest,
}

impl<S: ContactLogStore, G: GeographyResolver> Logbook<S, G> {
    /// Attach to an existing session
    pub fn open(store: S, resolver: G, session: ContestSession, station: StationProfile) -> Result<Self, ContestError> {
        let own = own_geography(&resolver, &station);
        if own.is_none() {
            log::warn!("No geography for own call {}", station.call);
        }
        let kind = lookup(&session.contest, own.as_ref())?;
        Ok(Logbook {
            store,
            resolver,
            contest: Contest {
                session,
                station,
                own,
                kind,
            },
        })
    }

    pub fn contest(&self) -> &Contest {
        &self.contest
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Replace the own station and rebuild every flag derived from it
    pub fn set_station(&mut self, station: StationProfile) -> Result<(), ContestError> {
        let own = own_geography(&self.resolver, &station);
        self.contest.kind = self.contest.kind.rebuild(own.as_ref())?;
        self.contest.own = own;
        self.contest.station = station;
        Ok(())
    }

    /// Session settings other than the contest itself (categories, sent
    /// exchange, soapbox)
    pub fn set_config(&mut self, config: SessionConfig) {
        self.contest.session.config = config;
    }

    // ------------------------------------------------------------------------
    // Logging
    // ------------------------------------------------------------------------

    /// Validated contact from a draft, not yet scored
    fn build_contact(&self, draft: &ContactDraft, id: Uuid, timestamp: DateTime<Utc>) -> Result<Contact, Rejection> {
        let call = validate_callsign(&draft.call)?;
        let band = draft.resolve_band()?;
        let khz = parse_khz(&draft.freq)
            .or_else(|| band_edge_khz(band))
            .ok_or_else(|| Rejection::UnknownBand(draft.freq.clone()))?;

        let mode = match normalize_mode(&draft.mode) {
            m if m.is_empty() => default_mode(self.contest.session.config.categories.mode, khz).to_string(),
            m => m,
        };
        let report = default_report(&mode);
        let or_default = |value: &str, default: &str| {
            let value = value.trim();
            if value.is_empty() { default.to_string() } else { value.to_uppercase() }
        };

        Ok(Contact {
            id,
            session_id: self.contest.session.id,
            timestamp: timestamp.trunc_subsecs(0),
            station_call: self.contest.station.call.trim().to_uppercase(),
            call,
            band: band.to_string(),
            mode,
            freq: format_khz(khz),
            tx_freq: draft.tx_freq.trim().to_string(),
            rst_sent: or_default(&draft.rst_sent, report),
            rst_rcvd: or_default(&draft.rst_rcvd, report),
            sent_nr: draft.sent_nr.trim().to_string(),
            rcv_nr: draft.rcv_nr.trim().to_string(),
            exchange1: draft.exchange1.trim().to_uppercase(),
            sect: draft.sect.trim().to_uppercase(),
            name: draft.name.trim().to_uppercase(),
            prec: draft.prec.trim().to_uppercase(),
            ck: draft.ck.trim().to_string(),
            zone: draft.zone.trim().to_string(),
            wpx_prefix: String::new(),
            country_prefix: String::new(),
            continent: String::new(),
            grid: draft.grid.trim().to_uppercase(),
            comment: draft.comment.trim().to_string(),
            points: 0,
            mults: MultiplierFlags::default(),
            dupe: false,
            claimed: true,
        })
    }

    /// Annotate, dupe-check and score against what the store holds before
    /// the contact
    fn score(&self, contact: &mut Contact) -> Result<(), ContestError> {
        let rules = self.contest.rules();
        let ctx = self.contest.ctx();
        let geo = self.resolver.resolve(&contact.call);
        annotate(contact, geo.as_ref());
        rules.prepare(contact, geo.as_ref(), &ctx);

        contact.mults.clear();
        contact.points = 0;
        contact.dupe = contact.claimed && dupe::is_dupe(&self.store, rules, contact, geo.as_ref(), &ctx)?;
        if contact.dupe {
            log::debug!("Dupe: {} on {} {}", contact.call, contact.band, contact.mode);
            return Ok(());
        }
        if !contact.claimed {
            return Ok(());
        }
        contact.points = rules.points(contact, geo.as_ref(), &ctx);
        let candidates = rules.multiplier_candidates(contact, geo.as_ref(), &ctx);
        contact.mults = evaluate_multipliers(&self.store, contact, &candidates)?;
        Ok(())
    }

    pub fn log_contact(&mut self, draft: &ContactDraft) -> Result<LogOutcome, ContestError> {
        let timestamp = draft.timestamp.unwrap_or_else(Utc::now);
        let mut contact = match self.build_contact(draft, Uuid::new_v4(), timestamp) {
            Ok(contact) => contact,
            Err(reason) => {
                log::info!("Rejected '{}': {}", draft.call.trim(), reason);
                return Ok(LogOutcome::rejected(reason));
            }
        };

        if contact.sent_nr.is_empty() && self.contest.rules().sends_serial(&self.contest.ctx()) {
            let logged = self
                .store
                .count_matching(&ContactQuery::session(self.contest.session.id))?;
            contact.sent_nr = (logged + 1).to_string();
        }

        self.score(&mut contact)?;
        self.store.persist(&contact)?;
        Ok(LogOutcome::accepted(contact))
    }

    /// Would `call` be a dupe if logged now on `band`/`mode`
    pub fn is_dupe(&self, call: &str, band: &str, mode: &str) -> Result<bool, ContestError> {
        let call = call.trim().to_uppercase();
        let probe = DupeProbe {
            session: self.contest.session.id,
            call: &call,
            band: band.trim(),
            mode: mode.trim(),
            before: None,
            excluding: None,
        };
        let rules = self.contest.rules();
        if check_dupe(&self.store, &probe, effective_policy(rules))? {
            return Ok(true);
        }

        // Contest-specific blocks depend on who was worked, not on history
        let draft = ContactDraft {
            call: call.clone(),
            band: band.trim().to_string(),
            mode: mode.trim().to_string(),
            ..Default::default()
        };
        let mut contact = match self.build_contact(&draft, Uuid::nil(), Utc::now()) {
            Ok(contact) => contact,
            Err(_) => return Ok(false),
        };
        let ctx = self.contest.ctx();
        let geo = self.resolver.resolve(&contact.call);
        annotate(&mut contact, geo.as_ref());
        rules.prepare(&mut contact, geo.as_ref(), &ctx);
        Ok(dupe::is_blocked(rules, &contact, geo.as_ref(), &ctx))
    }

    /// Replace the entered fields of a logged contact, then recalculate
    pub fn update_contact(&mut self, id: Uuid, draft: &ContactDraft) -> Result<LogOutcome, ContestError> {
        let existing = self.store.get(id)?.ok_or(ContestError::ContactNotFound(id))?;
        let timestamp = draft.timestamp.unwrap_or(existing.timestamp);
        let mut contact = match self.build_contact(draft, id, timestamp) {
            Ok(contact) => contact,
            Err(reason) => {
                log::info!("Rejected edit of {}: {}", existing.call, reason);
                return Ok(LogOutcome::rejected(reason));
            }
        };
        contact.station_call = existing.station_call;
        contact.claimed = existing.claimed;
        if contact.sent_nr.is_empty() {
            contact.sent_nr = existing.sent_nr;
        }
        self.store.persist(&contact)?;
        self.recalculate(&AtomicBool::new(false))?;
        let stored = self.store.get(id)?.ok_or(ContestError::ContactNotFound(id))?;
        Ok(LogOutcome::accepted(stored))
    }

    /// Mark a contact claimed or not claimed, then recalculate
    pub fn set_claimed(&mut self, id: Uuid, claimed: bool) -> Result<Contact, ContestError> {
        let mut contact = self.store.get(id)?.ok_or(ContestError::ContactNotFound(id))?;
        contact.claimed = claimed;
        self.store.persist(&contact)?;
        self.recalculate(&AtomicBool::new(false))?;
        Ok(self.store.get(id)?.ok_or(ContestError::ContactNotFound(id))?)
    }

    pub fn delete_contact(&mut self, id: Uuid) -> Result<(), ContestError> {
        let contact = self.store.get(id)?.ok_or(ContestError::ContactNotFound(id))?;
        self.store.delete(id)?;
        log::info!("Deleted {} at {}", contact.call, contact.timestamp);
        self.recalculate(&AtomicBool::new(false))?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Whole-log operations
    // ------------------------------------------------------------------------

    pub fn recalculate(&mut self, cancel: &AtomicBool) -> Result<RecalcReport, ContestError> {
        let ctx = self.contest.ctx();
        Ok(recalc::recalculate(
            &mut self.store,
            &self.resolver,
            self.contest.kind.rules(),
            &ctx,
            cancel,
        )?)
    }

    pub fn contacts(&self) -> Result<Vec<Contact>, ContestError> {
        Ok(self.store.fetch_all_ordered(self.contest.session.id)?)
    }

    pub fn running_score(&self) -> Result<RunningScore, ContestError> {
        let mut score = RunningScore::default();
        for contact in self.contacts()? {
            score.contacts += 1;
            if contact.dupe {
                score.dupes += 1;
            }
            if !contact.is_scoring() {
                continue;
            }
            score.points += u64::from(contact.points);
            for (count, held) in score
                .mults
                .iter_mut()
                .zip([contact.mults.m1, contact.mults.m2, contact.mults.m3])
            {
                if held {
                    *count += 1;
                }
            }
        }
        let rules = self.contest.rules();
        score.mult_names = rules.multiplier_names();
        score.total = rules.aggregate_score(score.points, score.mults);
        Ok(score)
    }

    pub fn generate_cabrillo(&self, encoding: TextEncoding) -> Result<CabrilloOutput, ContestError> {
        let contacts = self.contacts()?;
        let claimed = self.running_score()?.total;
        Ok(cabrillo::render_cabrillo(
            &contacts,
            self.contest.rules(),
            &self.contest.ctx(),
            claimed,
            encoding,
        ))
    }

    pub fn generate_adif(&self) -> Result<AdifOutput, ContestError> {
        let contacts = self.contacts()?;
        Ok(adif::render_adif(&contacts, self.contest.rules(), &self.contest.ctx()))
    }

    fn output_name(&self, extension: &str) -> String {
        output::file_name(&self.contest.station.call, self.contest.rules().cabrillo_name(), extension)
    }

    pub fn write_cabrillo_file(&self, dir: &Path, encoding: TextEncoding) -> Result<(PathBuf, CabrilloOutput), ContestError> {
        let rendered = self.generate_cabrillo(encoding)?;
        let path = output::write_atomic(dir, &self.output_name("log"), &rendered.bytes)?;
        Ok((path, rendered))
    }

    pub fn write_adif_file(&self, dir: &Path) -> Result<(PathBuf, AdifOutput), ContestError> {
        let rendered = self.generate_adif()?;
        let path = output::write_atomic(dir, &self.output_name("adi"), rendered.text.as_bytes())?;
        Ok((path, rendered))
    }

    /// Log every record of an ADIF file through the normal path, then
    /// recalculate so out-of-order records settle
    pub fn import_adif(&mut self, content: &str) -> Result<ImportReport, ContestError> {
        let adif_file = adif::parse_adif(content);
        let mut report = ImportReport {
            total_records: adif_file.records.len(),
            ..Default::default()
        };

        for (index, record) in adif_file.records.iter().enumerate() {
            let draft = match adif::draft_from_record(record, self.contest.rules()) {
                Ok(draft) => draft,
                Err(problem) => {
                    log::warn!("ADIF record {} skipped: {}", index + 1, problem);
                    report.rejected += 1;
                    report.error_messages.push(format!("Record {}: {}", index + 1, problem));
                    continue;
                }
            };
            let outcome = self.log_contact(&draft)?;
            match outcome.reason {
                Some(reason) => {
                    report.rejected += 1;
                    report.error_messages.push(format!("Record {}: {}", index + 1, reason));
                }
                None => report.imported += 1,
            }
        }

        report.recalc = self.recalculate(&AtomicBool::new(false))?;
        report.dupes = self.contacts()?.iter().filter(|c| c.dupe).count();
        log::info!(
            "ADIF import: {} records, {} imported, {} rejected",
            report.total_records,
            report.imported,
            report.rejected
        );
        Ok(report)
    }
}

/// Mode for a draft left blank, from the session's category
fn default_mode(category: CategoryMode, khz: f64) -> &'static str {
    match category {
        CategoryMode::Ssb if khz < 10_000.0 => "LSB",
        CategoryMode::Ssb => "USB",
        CategoryMode::Fm => "FM",
        CategoryMode::Rtty => "RTTY",
        _ => "CW",
    }
}

fn default_report(mode: &str) -> &'static str {
    match get_mode_group(mode) {
        ModeGroup::Phone => "59",
        _ => "599",
    }
}
