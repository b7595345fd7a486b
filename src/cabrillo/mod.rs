//! Cabrillo 3.0 log rendering
//!
//! Reference: https://wwrof.org/cabrillo/
//!
//! Header tags and line endings are fixed here; the exchange columns of
//! each `QSO:` line come from the contest profile.

pub mod encoding;

use crate::adif::bands::cabrillo_frequency;
use crate::adif::modes::cabrillo_mode;
use crate::contact::{Contact, SkippedContact};
use crate::contest::{Column, ContestRules, ScoringContext};
use crate::time_utils::{cabrillo_date, cabrillo_time};

pub use encoding::TextEncoding;

pub const CABRILLO_VERSION: &str = "3.0";
const LINE_END: &str = "\r\n";

/// Encoded file contents plus the contacts left out of it
#[derive(Debug, Clone, Default)]
pub struct CabrilloOutput {
    pub bytes: Vec<u8>,
    pub skipped: Vec<SkippedContact>,
}

fn push_line(out: &mut String, tag: &str, value: &str) {
    out.push_str(tag);
    out.push(':');
    if !value.is_empty() {
        out.push(' ');
        out.push_str(value);
    }
    out.push_str(LINE_END);
}

fn push_optional(out: &mut String, tag: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        push_line(out, tag, value);
    }
}

fn columns_text(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| format!("{:<width$}", c.value, width = c.width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One `QSO:` line, or `X-QSO:` for a contact the operator does not claim
pub fn qso_line(contact: &Contact, rules: &dyn ContestRules, ctx: &ScoringContext) -> Result<String, SkippedContact> {
    let khz = contact
        .freq_khz()
        .map_err(|reason| SkippedContact::new(contact, reason))?;
    let exchange = rules.cabrillo_exchange(contact, ctx);
    let my_call = if contact.station_call.trim().is_empty() {
        ctx.station.call.trim().to_uppercase()
    } else {
        contact.station_call.trim().to_uppercase()
    };
    let tag = if contact.claimed { "QSO:" } else { "X-QSO:" };
    let line = format!(
        "{} {:>5} {:<2} {} {} {:<13} {} {:<13} {}",
        tag,
        cabrillo_frequency(khz),
        cabrillo_mode(&contact.mode),
        cabrillo_date(&contact.timestamp),
        cabrillo_time(&contact.timestamp),
        my_call,
        columns_text(&exchange.sent),
        contact.call.trim().to_uppercase(),
        columns_text(&exchange.rcvd),
    );
    Ok(line.trim_end().to_string())
}

/// Header block through SOAPBOX
pub fn header(rules: &dyn ContestRules, ctx: &ScoringContext, claimed_score: u64) -> String {
    let station = ctx.station;
    let config = &ctx.session.config;
    let mut out = String::new();

    push_line(&mut out, "START-OF-LOG", CABRILLO_VERSION);
    push_line(
        &mut out,
        "CREATED-BY",
        &format!("contestlog {}", env!("CARGO_PKG_VERSION")),
    );
    push_line(&mut out, "CONTEST", rules.cabrillo_name());
    push_line(&mut out, "CALLSIGN", &station.call.trim().to_uppercase());
    push_optional(&mut out, "LOCATION", &config.location.to_uppercase());
    for (tag, value) in config.categories.cabrillo_lines() {
        push_line(&mut out, tag, &value);
    }
    push_line(&mut out, "CLAIMED-SCORE", &claimed_score.to_string());
    push_optional(&mut out, "OPERATORS", &config.operators.to_uppercase());
    push_optional(&mut out, "NAME", &station.name);
    for line in &station.address {
        push_optional(&mut out, "ADDRESS", line);
    }
    push_optional(&mut out, "EMAIL", &station.email);
    push_optional(&mut out, "CLUB", &station.club);
    push_optional(&mut out, "GRID-LOCATOR", &station.grid.to_uppercase());
    for line in &config.soapbox {
        push_optional(&mut out, "SOAPBOX", line);
    }
    out
}

/// Complete file: header, QSO lines in the order given, END-OF-LOG
pub fn render_cabrillo(
    contacts: &[Contact],
    rules: &dyn ContestRules,
    ctx: &ScoringContext,
    claimed_score: u64,
    encoding: TextEncoding,
) -> CabrilloOutput {
    let mut text = header(rules, ctx, claimed_score);
    let mut skipped = Vec::new();
    for contact in contacts {
        match qso_line(contact, rules, ctx) {
            Ok(line) => {
                text.push_str(&line);
                text.push_str(LINE_END);
            }
            Err(skip) => {
                log::warn!("Cabrillo export skipped {}: {}", skip.call, skip.reason);
                skipped.push(skip);
            }
        }
    }
    push_line(&mut text, "END-OF-LOG", "");
    CabrilloOutput {
        bytes: encoding.encode(&text),
        skipped,
    }
}
