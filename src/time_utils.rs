//! Time Utilities
//!
//! Parsing and formatting of the date/time spellings used by ADIF
//! (`YYYYMMDD`, `HHMM[SS]`) and Cabrillo (`YYYY-MM-DD`, `HHMM`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Normalize time string to 6-character HHMMSS format (ADIF standard)
///
/// Accepts `HHMM`, `HHMMSS`, `HH:MM[:SS]` and `YYYY-MM-DD HH:MM:SS`.
pub fn normalize_time_to_hhmmss(time_str: &str) -> String {
    let clean = time_str.trim();

    // "YYYY-MM-DD HH:MM:SS"
    let clean = if clean.contains('-') && clean.contains(' ') {
        clean.split(' ').last().unwrap_or(clean)
    } else {
        clean
    };

    let digits: String = clean.chars().filter(|c| *c != ':').take(6).collect();
    if digits.is_empty() {
        "000000".to_string()
    } else {
        format!("{:0<6}", digits)
    }
}

/// Convert time string (HHMMSS or HHMM) to seconds since midnight
pub fn time_to_seconds(time_str: &str) -> Option<u32> {
    let clean = time_str.trim();
    if clean.len() < 4 || !clean.is_ascii() {
        return None;
    }
    let hours: u32 = clean[..2].parse().ok()?;
    let minutes: u32 = clean[2..4].parse().ok()?;
    let seconds: u32 = if clean.len() >= 6 {
        clean[4..6].parse().ok()?
    } else {
        0
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Build a UTC timestamp from ADIF QSO_DATE and TIME_ON values
pub fn adif_timestamp(qso_date: &str, time_on: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(qso_date.trim(), "%Y%m%d").ok()?;
    let seconds = time_to_seconds(&normalize_time_to_hhmmss(time_on))?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
    Some(NaiveDateTime::new(date, time).and_utc())
}

pub fn adif_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y%m%d").to_string()
}

pub fn adif_time(ts: &DateTime<Utc>) -> String {
    ts.format("%H%M%S").to_string()
}

pub fn cabrillo_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn cabrillo_time(ts: &DateTime<Utc>) -> String {
    ts.format("%H%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time_to_hhmmss("1526"), "152600");
        assert_eq!(normalize_time_to_hhmmss("152612"), "152612");
        assert_eq!(normalize_time_to_hhmmss("15:26:12"), "152612");
        assert_eq!(normalize_time_to_hhmmss("2026-01-03 15:26:12"), "152612");
        assert_eq!(normalize_time_to_hhmmss(""), "000000");
    }

    #[test]
    fn test_time_to_seconds() {
        assert_eq!(time_to_seconds("000000"), Some(0));
        assert_eq!(time_to_seconds("0101"), Some(3660));
        assert_eq!(time_to_seconds("2460"), None);
        assert_eq!(time_to_seconds("12"), None);
    }

    #[test]
    fn test_adif_timestamp() {
        let ts = adif_timestamp("20261128", "0005").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 11, 28, 0, 5, 0).unwrap());
        assert!(adif_timestamp("2026-11-28", "0005").is_none());
    }

    #[test]
    fn test_formats() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(adif_date(&ts), "20260304");
        assert_eq!(adif_time(&ts), "050607");
        assert_eq!(cabrillo_date(&ts), "2026-03-04");
        assert_eq!(cabrillo_time(&ts), "0506");
    }
}
