//! Contact records
//!
//! A `ContactDraft` is the raw text an operator typed; a `Contact` is what
//! lands in the log store after validation, geography annotation and scoring.
//! Band and frequency stay text so a damaged store row can still be loaded
//! and reported instead of poisoning a whole batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adif::bands;
use crate::adif::modes::{get_mode_group, ModeGroup};
use crate::error::{ContactError, Rejection};

/// Which of the three multiplier flags a candidate sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MultFlag {
    First,
    Second,
    Third,
}

impl MultFlag {
    pub const ALL: [MultFlag; 3] = [MultFlag::First, MultFlag::Second, MultFlag::Third];

    pub fn index(self) -> usize {
        match self {
            MultFlag::First => 0,
            MultFlag::Second => 1,
            MultFlag::Third => 2,
        }
    }
}

/// IsMultiplier1/2/3
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierFlags {
    pub m1: bool,
    pub m2: bool,
    pub m3: bool,
}

impl MultiplierFlags {
    pub fn get(&self, flag: MultFlag) -> bool {
        match flag {
            MultFlag::First => self.m1,
            MultFlag::Second => self.m2,
            MultFlag::Third => self.m3,
        }
    }

    pub fn set(&mut self, flag: MultFlag, value: bool) {
        match flag {
            MultFlag::First => self.m1 = value,
            MultFlag::Second => self.m2 = value,
            MultFlag::Third => self.m3 = value,
        }
    }

    pub fn any(&self) -> bool {
        self.m1 || self.m2 || self.m3
    }

    pub fn clear(&mut self) {
        *self = MultiplierFlags::default();
    }
}

/// One logged QSO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub session_id: i64,
    pub timestamp: DateTime<Utc>,
    /// Own callsign at the time of the contact
    pub station_call: String,
    pub call: String,
    /// Band label ("160", "40", "20", ...)
    pub band: String,
    pub mode: String,
    /// Receive frequency in kHz
    pub freq: String,
    /// Transmit frequency in kHz, empty when simplex
    pub tx_freq: String,
    pub rst_sent: String,
    pub rst_rcvd: String,
    pub sent_nr: String,
    pub rcv_nr: String,
    pub exchange1: String,
    pub sect: String,
    pub name: String,
    pub prec: String,
    pub ck: String,
    pub zone: String,
    pub wpx_prefix: String,
    pub country_prefix: String,
    pub continent: String,
    pub grid: String,
    pub comment: String,
    pub points: u32,
    pub mults: MultiplierFlags,
    pub dupe: bool,
    /// False for contacts the operator marked as not claimed
    pub claimed: bool,
}

impl Contact {
    pub fn freq_khz(&self) -> Result<f64, ContactError> {
        parse_khz(&self.freq).ok_or_else(|| ContactError::MalformedFrequency(self.freq.clone()))
    }

    /// Band label, checked against the band table
    pub fn band_label(&self) -> Result<&str, ContactError> {
        let band = self.band.trim();
        if bands::is_known_band(band) {
            Ok(band)
        } else {
            Err(ContactError::UnknownBand(self.band.clone()))
        }
    }

    /// Both numeric fields a scoring pass depends on
    pub fn check_fields(&self) -> Result<(), ContactError> {
        self.freq_khz()?;
        self.band_label()?;
        Ok(())
    }

    pub fn mode_group(&self) -> ModeGroup {
        get_mode_group(&self.mode)
    }

    /// Counts toward score and dupe history
    pub fn is_scoring(&self) -> bool {
        self.claimed && !self.dupe
    }
}

/// A stored contact a pass had to leave out, and why
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedContact {
    pub id: Uuid,
    pub call: String,
    pub reason: ContactError,
}

impl SkippedContact {
    pub fn new(contact: &Contact, reason: ContactError) -> Self {
        SkippedContact {
            id: contact.id,
            call: contact.call.clone(),
            reason,
        }
    }
}

/// Fields as entered, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    pub timestamp: Option<DateTime<Utc>>,
    pub call: String,
    /// kHz
    pub freq: String,
    pub tx_freq: String,
    /// Optional band label; derived from `freq` when empty
    pub band: String,
    pub mode: String,
    pub rst_sent: String,
    pub rst_rcvd: String,
    pub sent_nr: String,
    pub rcv_nr: String,
    pub exchange1: String,
    pub sect: String,
    pub name: String,
    pub prec: String,
    pub ck: String,
    pub zone: String,
    pub grid: String,
    pub comment: String,
}

impl ContactDraft {
    pub fn new(call: &str, freq_khz: f64, mode: &str) -> Self {
        ContactDraft {
            call: call.to_string(),
            freq: format_khz(freq_khz),
            mode: mode.to_string(),
            ..Default::default()
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn exchange(mut self, exchange1: &str) -> Self {
        self.exchange1 = exchange1.to_string();
        self
    }

    /// Band label for this draft: the explicit band if given, else the
    /// band containing the frequency
    pub fn resolve_band(&self) -> Result<&'static str, Rejection> {
        let explicit = self.band.trim();
        if !explicit.is_empty() {
            return bands::BANDS
                .iter()
                .find(|b| b.label == explicit)
                .map(|b| b.label)
                .or_else(|| bands::band_from_adif(explicit))
                .ok_or_else(|| Rejection::UnknownBand(self.band.clone()));
        }
        parse_khz(&self.freq)
            .and_then(bands::band_for_khz)
            .ok_or_else(|| Rejection::UnknownBand(self.freq.clone()))
    }
}

/// A callsign needs three characters, at least one digit and one letter
pub fn validate_callsign(call: &str) -> Result<String, Rejection> {
    let call = call.trim().to_uppercase();
    if call.chars().count() < 3 {
        return Err(Rejection::CallTooShort(call));
    }
    if !call.chars().any(|c| c.is_ascii_digit()) {
        return Err(Rejection::CallMissingDigit(call));
    }
    if !call.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(Rejection::CallMissingLetter(call));
    }
    Ok(call)
}

pub fn parse_khz(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// kHz with at most three decimals and no trailing zeros
pub fn format_khz(khz: f64) -> String {
    let text = format!("{:.3}", khz);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// A claimed, unscored contact at `minute` past 2026-11-28 00:00 UTC
    pub fn contact(call: &str, band: &str, mode: &str, minute: u32) -> Contact {
        let freq = match band {
            "160" => "1830",
            "80" => "3530",
            "40" => "7030",
            "15" => "21030",
            "10" => "28030",
            _ => "14030",
        };
        Contact {
            id: Uuid::new_v4(),
            session_id: 1,
            timestamp: Utc
                .with_ymd_and_hms(2026, 11, 28, minute / 60, minute % 60, 0)
                .unwrap(),
            station_call: "K6GTE".to_string(),
            call: call.to_string(),
            band: band.to_string(),
            mode: mode.to_string(),
            freq: freq.to_string(),
            tx_freq: String::new(),
            rst_sent: "599".to_string(),
            rst_rcvd: "599".to_string(),
            sent_nr: String::new(),
            rcv_nr: String::new(),
            exchange1: String::new(),
            sect: String::new(),
            name: String::new(),
            prec: String::new(),
            ck: String::new(),
            zone: String::new(),
            wpx_prefix: String::new(),
            country_prefix: String::new(),
            continent: String::new(),
            grid: String::new(),
            comment: String::new(),
            points: 0,
            mults: MultiplierFlags::default(),
            dupe: false,
            claimed: true,
        }
    }
}
