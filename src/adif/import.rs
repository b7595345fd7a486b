// ADIF import
// Turns parsed ADIF records into contact drafts for the normal logging
// path. The contest profile decides where SRX_STRING lands.

use serde::Serialize;
use thiserror::Error;

use crate::contact::{format_khz, ContactDraft};
use crate::contest::ContestRules;
use crate::time_utils::adif_timestamp;

use super::bands::{band_edge_khz, band_from_adif};
use super::modes::mode_from_adif;
use super::parser::AdifRecord;

/// A record that cannot become a contact
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum RecordProblem {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("bad QSO_DATE/TIME_ON '{0} {1}'")]
    BadTimestamp(String, String),
    #[error("no frequency or known band")]
    NoFrequency,
}

fn require<'a>(record: &'a AdifRecord, key: &'static str) -> Result<&'a str, RecordProblem> {
    record.non_empty(key).ok_or(RecordProblem::MissingField(key))
}

/// Receive frequency in kHz: FREQ when present, else the band's lower edge
fn record_khz(record: &AdifRecord) -> Result<(String, String), RecordProblem> {
    let band = record.band().and_then(band_from_adif).unwrap_or("").to_string();
    if let Some(mhz) = record.freq_mhz() {
        return Ok((format_khz(mhz * 1000.0), band));
    }
    band_edge_khz(&band)
        .map(|khz| (format_khz(khz), band.clone()))
        .ok_or(RecordProblem::NoFrequency)
}

pub fn draft_from_record(record: &AdifRecord, rules: &dyn ContestRules) -> Result<ContactDraft, RecordProblem> {
    let call = require(record, "CALL")?;
    let qso_date = require(record, "QSO_DATE")?;
    let time_on = require(record, "TIME_ON")?;
    let mode = require(record, "MODE")?;
    let timestamp = adif_timestamp(qso_date, time_on)
        .ok_or_else(|| RecordProblem::BadTimestamp(qso_date.to_string(), time_on.to_string()))?;
    let (freq, band) = record_khz(record)?;

    let mut draft = ContactDraft {
        timestamp: Some(timestamp),
        call: call.to_uppercase(),
        freq,
        band,
        mode: mode_from_adif(mode, record.submode()),
        rst_sent: record.get_or("RST_SENT", "").trim().to_string(),
        rst_rcvd: record.get_or("RST_RCVD", "").trim().to_string(),
        sent_nr: record.non_empty("STX").unwrap_or("").to_string(),
        rcv_nr: record.non_empty("SRX").unwrap_or("").to_string(),
        name: record.non_empty("NAME").unwrap_or("").to_string(),
        grid: record.gridsquare().unwrap_or("").to_uppercase(),
        comment: record.non_empty("COMMENT").unwrap_or("").to_string(),
        ..Default::default()
    };
    if let Some(cqz) = record.cqz() {
        draft.zone = cqz.to_string();
    }
    if let Some(sect) = record.arrl_sect().or_else(|| record.state()) {
        draft.sect = sect.to_uppercase();
    }
    if let Some(srx) = record.non_empty("SRX_STRING") {
        rules.apply_received_exchange(srx, &mut draft);
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adif::parser::parse_adif;
    use crate::contest::arrl_ss::ArrlSs;
    use crate::contest::cq_ww::CqWw;
    use crate::contest::registry::ContestMode;

    fn first(adif: &str) -> AdifRecord {
        parse_adif(adif).records.remove(0)
    }

    #[test]
    fn test_cq_ww_record() {
        let rec = first(
            "<CALL:6>ja1abc<QSO_DATE:8>20261128<TIME_ON:4>0102<MODE:2>CW<FREQ:6>14.025\
             <RST_SENT:3>599<RST_RCVD:3>599<SRX_STRING:2>25<EOR>",
        );
        let draft = draft_from_record(&rec, &CqWw { mode: ContestMode::Cw }).unwrap();
        assert_eq!(draft.call, "JA1ABC");
        assert_eq!(draft.freq, "14025");
        assert_eq!(draft.zone, "25");
        assert_eq!(draft.timestamp.unwrap().to_rfc3339(), "2026-11-28T01:02:00+00:00");
    }

    #[test]
    fn test_sweepstakes_exchange_and_band_fallback() {
        let rec = first(
            "<CALL:4>W1AW<QSO_DATE:8>20261128<TIME_ON:6>210000<MODE:2>CW<BAND:3>40M\
             <SRX_STRING:10>12 A 72 CT<EOR>",
        );
        let draft = draft_from_record(&rec, &ArrlSs { mode: ContestMode::Cw }).unwrap();
        assert_eq!(draft.band, "40");
        assert_eq!(draft.freq, "7000");
        assert_eq!(draft.rcv_nr, "12");
        assert_eq!(draft.sect, "CT");
    }

    #[test]
    fn test_sideband_mode() {
        let rec = first("<CALL:4>W1AW<QSO_DATE:8>20261128<TIME_ON:4>2100<MODE:3>SSB<SUBMODE:3>LSB<FREQ:5>3.800<EOR>");
        let draft = draft_from_record(&rec, &CqWw { mode: ContestMode::Ssb }).unwrap();
        assert_eq!(draft.mode, "LSB");
        assert_eq!(draft.band, "");
    }

    #[test]
    fn test_problems() {
        let rec = first("<CALL:4>W1AW<QSO_DATE:8>20261128<MODE:2>CW<FREQ:6>14.025<EOR>");
        assert_eq!(
            draft_from_record(&rec, &CqWw { mode: ContestMode::Cw }),
            Err(RecordProblem::MissingField("TIME_ON"))
        );
        let rec = first("<CALL:4>W1AW<QSO_DATE:8>20261128<TIME_ON:4>2100<MODE:2>CW<EOR>");
        assert_eq!(
            draft_from_record(&rec, &CqWw { mode: ContestMode::Cw }),
            Err(RecordProblem::NoFrequency)
        );
    }
}
