// ADIF Writer
// Reference: https://adif.org/314/ADIF_314.htm
//
// Output carries no creation timestamp so the same log always renders to
// the same bytes. Field lengths are byte lengths.

use crate::contact::{Contact, SkippedContact};
use crate::contest::{ContestRules, ScoringContext};
use crate::time_utils::{adif_date, adif_time};

use super::bands::adif_band;
use super::modes::adif_mode;

pub const ADIF_VER: &str = "3.1.4";
pub const PROGRAM_ID: &str = "contestlog";

/// Rendered ADIF text plus the contacts left out of it
#[derive(Debug, Clone, Default)]
pub struct AdifOutput {
    pub text: String,
    pub skipped: Vec<SkippedContact>,
}

/// Append `<TAG:len>value ` even when `value` is empty
pub fn push_field(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push(':');
    out.push_str(&value.len().to_string());
    out.push('>');
    out.push_str(value);
    out.push(' ');
}

/// Append the field only when `value` has content
pub fn push_optional(out: &mut String, tag: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        push_field(out, tag, value);
    }
}

pub fn header() -> String {
    let mut out = String::from("Contest log exported by contestlog\n");
    push_field(&mut out, "ADIF_VER", ADIF_VER);
    out.push('\n');
    push_field(&mut out, "PROGRAMID", PROGRAM_ID);
    out.push('\n');
    push_field(&mut out, "PROGRAMVERSION", env!("CARGO_PKG_VERSION"));
    out.push('\n');
    out.push_str("<EOH>\n\n");
    out
}

/// kHz to the MHz text ADIF expects, "14025.5" -> "14.0255"
pub fn format_mhz(khz: f64) -> String {
    let text = format!("{:.6}", khz / 1000.0);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn numeric(value: &str) -> &str {
    let value = value.trim();
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        value
    } else {
        ""
    }
}

/// One `<EOR>`-terminated record
pub fn contact_record(
    contact: &Contact,
    rules: &dyn ContestRules,
    ctx: &ScoringContext,
) -> Result<String, SkippedContact> {
    let khz = contact
        .freq_khz()
        .map_err(|reason| SkippedContact::new(contact, reason))?;
    let (mode, submode) = adif_mode(&contact.mode);
    let (stx_string, srx_string) = rules.adif_exchange(contact, ctx);

    let mut out = String::new();
    push_field(&mut out, "QSO_DATE", &adif_date(&contact.timestamp));
    push_field(&mut out, "TIME_ON", &adif_time(&contact.timestamp));
    push_field(&mut out, "CALL", &contact.call);
    push_field(&mut out, "MODE", &mode);
    if let Some(submode) = submode {
        push_field(&mut out, "SUBMODE", &submode);
    }
    if let Some(band) = adif_band(&contact.band) {
        push_field(&mut out, "BAND", band);
    }
    push_field(&mut out, "FREQ", &format_mhz(khz));
    push_field(&mut out, "RST_SENT", contact.rst_sent.trim());
    push_field(&mut out, "RST_RCVD", contact.rst_rcvd.trim());

    push_optional(&mut out, "NAME", &contact.name);
    push_optional(&mut out, "GRIDSQUARE", &contact.grid);
    push_optional(&mut out, "COMMENT", &contact.comment);
    push_optional(&mut out, "STX_STRING", &stx_string);
    push_optional(&mut out, "SRX_STRING", &srx_string);
    push_optional(&mut out, "STX", numeric(&contact.sent_nr));
    push_optional(&mut out, "SRX", numeric(&contact.rcv_nr));
    push_optional(&mut out, "STATION_CALLSIGN", &contact.station_call);
    let operators = ctx.session.config.operators.trim();
    if !operators.contains(|c: char| c.is_whitespace() || c == ',') {
        push_optional(&mut out, "OPERATOR", operators);
    }
    push_optional(&mut out, "CONTEST_ID", rules.cabrillo_name());

    out.push_str("<EOR>\n");
    Ok(out)
}

/// Header plus one record per contact in the order given
pub fn render_adif(contacts: &[Contact], rules: &dyn ContestRules, ctx: &ScoringContext) -> AdifOutput {
    let mut output = AdifOutput {
        text: header(),
        skipped: Vec::new(),
    };
    for contact in contacts {
        match contact_record(contact, rules, ctx) {
            Ok(record) => output.text.push_str(&record),
            Err(skipped) => {
                log::warn!("ADIF export skipped {}: {}", skipped.call, skipped.reason);
                output.skipped.push(skipped);
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adif::parser::parse_adif;
    use crate::contact::fixtures::contact;
    use crate::contest::cq_ww::CqWw;
    use crate::contest::registry::ContestMode;
    use crate::contest::testing::{worked, Fixture};

    #[test]
    fn test_field_length_is_bytes() {
        let mut out = String::new();
        push_field(&mut out, "NAME", "Jürgen");
        assert_eq!(out, "<NAME:7>Jürgen ");
        let mut out = String::new();
        push_optional(&mut out, "NAME", "  ");
        assert!(out.is_empty());
    }

    #[test]
    fn test_format_mhz() {
        assert_eq!(format_mhz(14_025.0), "14.025");
        assert_eq!(format_mhz(7_000.0), "7");
        assert_eq!(format_mhz(3_525.5), "3.5255");
    }

    #[test]
    fn test_record_omits_empty_optional_tags() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let rules = CqWw { mode: ContestMode::Cw };
        let (c, _) = worked(&rules, &fx, "JA1ABC", "20", "CW");
        let record = contact_record(&c, &rules, &fx.ctx()).unwrap();
        assert!(record.starts_with("<QSO_DATE:8>20261128 <TIME_ON:6>000000 <CALL:6>JA1ABC <MODE:2>CW "));
        assert!(record.contains("<BAND:3>20m <FREQ:5>14.03 <RST_SENT:3>599 <RST_RCVD:3>599 "));
        assert!(record.contains("<STX_STRING:1>5 <SRX_STRING:2>25 "));
        assert!(!record.contains("<NAME:"));
        assert!(!record.contains("<COMMENT:"));
        assert!(!record.contains("<STX:"));
        assert!(record.ends_with("<CONTEST_ID:8>CQ-WW-CW <EOR>\n"));
    }

    #[test]
    fn test_sideband_submode() {
        let fx = Fixture::new("K6GTE", "CQ WW SSB", "");
        let rules = CqWw { mode: ContestMode::Ssb };
        let (c, _) = worked(&rules, &fx, "JA1ABC", "20", "USB");
        let record = contact_record(&c, &rules, &fx.ctx()).unwrap();
        assert!(record.contains("<MODE:3>SSB <SUBMODE:3>USB "));
    }

    #[test]
    fn test_round_trip_through_parser() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let rules = CqWw { mode: ContestMode::Cw };
        let (mut c, _) = worked(&rules, &fx, "JA1ABC", "40", "CW");
        c.comment = "loud".to_string();
        let output = render_adif(&[c], &rules, &fx.ctx());
        let file = parse_adif(&output.text);
        assert_eq!(file.header.get("ADIF_VER").map(|s| s.as_str()), Some(ADIF_VER));
        let rec = &file.records[0];
        assert_eq!(rec.call(), Some("JA1ABC"));
        assert_eq!(rec.get("QSO_DATE"), Some("20261128"));
        assert_eq!(rec.get("TIME_ON"), Some("000000"));
        assert_eq!(rec.freq_mhz(), Some(7.03));
        assert_eq!(rec.get("SRX_STRING"), Some("25"));
        assert_eq!(rec.get("COMMENT"), Some("loud"));
    }

    #[test]
    fn test_malformed_frequency_is_skipped() {
        let fx = Fixture::new("K6GTE", "CQ WW CW", "");
        let rules = CqWw { mode: ContestMode::Cw };
        let mut bad = contact("W1AW", "20", "CW", 1);
        bad.freq = "abc".to_string();
        let good = contact("N1XX", "20", "CW", 2);
        let output = render_adif(&[bad, good], &rules, &fx.ctx());
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].call, "W1AW");
        assert_eq!(parse_adif(&output.text).records.len(), 1);
    }
}
