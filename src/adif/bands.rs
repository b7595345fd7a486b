// Amateur Radio Band Definitions
// Reference: ARRL Band Plan and ADIF 3.1.4 Specification
//
// Contacts carry the contest band label ("160", "40", "20", ...). This module
// maps frequencies to labels and labels to their ADIF/Cabrillo spellings.

/// One band: contest label, ADIF band name and edges in kHz
#[derive(Debug, Clone, Copy)]
pub struct BandDef {
    pub label: &'static str,
    pub adif: &'static str,
    pub low_khz: f64,
    pub high_khz: f64,
}

pub const BANDS: &[BandDef] = &[
    BandDef { label: "160", adif: "160m", low_khz: 1_800.0, high_khz: 2_000.0 },
    BandDef { label: "80", adif: "80m", low_khz: 3_500.0, high_khz: 4_000.0 },
    BandDef { label: "60", adif: "60m", low_khz: 5_060.0, high_khz: 5_450.0 },
    BandDef { label: "40", adif: "40m", low_khz: 7_000.0, high_khz: 7_300.0 },
    BandDef { label: "30", adif: "30m", low_khz: 10_100.0, high_khz: 10_150.0 },
    BandDef { label: "20", adif: "20m", low_khz: 14_000.0, high_khz: 14_350.0 },
    BandDef { label: "17", adif: "17m", low_khz: 18_068.0, high_khz: 18_168.0 },
    BandDef { label: "15", adif: "15m", low_khz: 21_000.0, high_khz: 21_450.0 },
    BandDef { label: "12", adif: "12m", low_khz: 24_890.0, high_khz: 24_990.0 },
    BandDef { label: "10", adif: "10m", low_khz: 28_000.0, high_khz: 29_700.0 },
    BandDef { label: "6", adif: "6m", low_khz: 50_000.0, high_khz: 54_000.0 },
    BandDef { label: "2", adif: "2m", low_khz: 144_000.0, high_khz: 148_000.0 },
    BandDef { label: "222", adif: "1.25m", low_khz: 222_000.0, high_khz: 225_000.0 },
    BandDef { label: "432", adif: "70cm", low_khz: 420_000.0, high_khz: 450_000.0 },
];

/// Contest band label for a frequency in kHz
pub fn band_for_khz(freq_khz: f64) -> Option<&'static str> {
    BANDS
        .iter()
        .find(|b| (b.low_khz..=b.high_khz).contains(&freq_khz))
        .map(|b| b.label)
}

fn band_def(label: &str) -> Option<&'static BandDef> {
    BANDS.iter().find(|b| b.label == label.trim())
}

pub fn is_known_band(label: &str) -> bool {
    band_def(label).is_some()
}

/// ADIF BAND value ("20m") for a contest band label
pub fn adif_band(label: &str) -> Option<&'static str> {
    band_def(label).map(|b| b.adif)
}

/// Contest band label for an ADIF BAND value (case-insensitive)
pub fn band_from_adif(adif: &str) -> Option<&'static str> {
    let wanted = adif.trim();
    BANDS
        .iter()
        .find(|b| b.adif.eq_ignore_ascii_case(wanted))
        .map(|b| b.label)
}

/// Lower edge of a band in kHz, used when a record has a band but no frequency
pub fn band_edge_khz(label: &str) -> Option<f64> {
    band_def(label).map(|b| b.low_khz)
}

/// 20, 15 and 10 metres
pub fn is_high_band(label: &str) -> bool {
    matches!(label.trim(), "20" | "15" | "10")
}

/// Cabrillo frequency column: kHz below 50 MHz, band designator above
pub fn cabrillo_frequency(freq_khz: f64) -> String {
    if freq_khz >= 50_000.0 {
        let designator = match band_for_khz(freq_khz) {
            Some("6") => "50",
            Some("2") => "144",
            Some("222") => "222",
            Some("432") => "432",
            _ => return format!("{}", (freq_khz / 1000.0) as i64),
        };
        return designator.to_string();
    }
    format!("{}", freq_khz as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_for_khz() {
        assert_eq!(band_for_khz(7_025.0), Some("40"));
        assert_eq!(band_for_khz(14_074.0), Some("20"));
        assert_eq!(band_for_khz(1_830.5), Some("160"));
        assert_eq!(band_for_khz(28_400.0), Some("10"));
        assert_eq!(band_for_khz(144_174.0), Some("2"));
        assert_eq!(band_for_khz(9_999.0), None);
    }

    #[test]
    fn test_adif_band_mapping() {
        assert_eq!(adif_band("20"), Some("20m"));
        assert_eq!(band_from_adif("20M"), Some("20"));
        assert_eq!(band_from_adif("70CM"), Some("432"));
        assert_eq!(adif_band("11"), None);
    }

    #[test]
    fn test_high_bands() {
        assert!(is_high_band("15"));
        assert!(!is_high_band("40"));
    }

    #[test]
    fn test_cabrillo_frequency() {
        assert_eq!(cabrillo_frequency(14_025.7), "14025");
        assert_eq!(cabrillo_frequency(1_830.0), "1830");
        assert_eq!(cabrillo_frequency(50_125.0), "50");
        assert_eq!(cabrillo_frequency(144_200.0), "144");
    }
}
