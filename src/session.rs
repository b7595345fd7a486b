//! Contest sessions and the operator's own station

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Categories (Cabrillo 3.0 CATEGORY-* values)
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CategoryOperator {
    #[default]
    SingleOp,
    MultiOp,
    Checklog,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CategoryAssisted {
    #[default]
    NonAssisted,
    Assisted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CategoryPower {
    #[default]
    High,
    Low,
    Qrp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CategoryTransmitter {
    #[default]
    One,
    Two,
    Limited,
    Unlimited,
    Swl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CategoryMode {
    Cw,
    Digi,
    Fm,
    Rtty,
    Ssb,
    #[default]
    Mixed,
}

/// Cabrillo spelling of a serde unit variant
fn cabrillo_value<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Categories {
    pub operator: CategoryOperator,
    pub assisted: CategoryAssisted,
    pub power: CategoryPower,
    pub transmitter: CategoryTransmitter,
    pub mode: CategoryMode,
    /// ALL, 160M, 80M, ...
    pub band: String,
    /// FIXED, MOBILE, PORTABLE, ...
    pub station: String,
    pub overlay: String,
    /// 6-HOURS, 12-HOURS, 24-HOURS
    pub time: String,
}

impl Categories {
    /// CATEGORY-* header lines in Cabrillo order, empty values left out
    pub fn cabrillo_lines(&self) -> Vec<(&'static str, String)> {
        let band = if self.band.trim().is_empty() {
            "ALL".to_string()
        } else {
            self.band.trim().to_uppercase()
        };
        let mut lines = vec![
            ("CATEGORY-OPERATOR", cabrillo_value(&self.operator)),
            ("CATEGORY-ASSISTED", cabrillo_value(&self.assisted)),
            ("CATEGORY-BAND", band),
            ("CATEGORY-MODE", cabrillo_value(&self.mode)),
            ("CATEGORY-POWER", cabrillo_value(&self.power)),
        ];
        for (tag, value) in [
            ("CATEGORY-STATION", &self.station),
            ("CATEGORY-TIME", &self.time),
        ] {
            if !value.trim().is_empty() {
                lines.push((tag, value.trim().to_uppercase()));
            }
        }
        lines.push(("CATEGORY-TRANSMITTER", cabrillo_value(&self.transmitter)));
        if !self.overlay.trim().is_empty() {
            lines.push(("CATEGORY-OVERLAY", self.overlay.trim().to_uppercase()));
        }
        lines
    }
}

// ============================================================================
// Station profile
// ============================================================================

/// The logging station. Zones left at 0 come from the geography resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationProfile {
    pub call: String,
    pub name: String,
    pub grid: String,
    pub cq_zone: u8,
    pub itu_zone: u8,
    /// ARRL section, or DX
    pub section: String,
    /// State or province abbreviation
    pub state: String,
    pub address: Vec<String>,
    pub email: String,
    pub club: String,
}

// ============================================================================
// Session
// ============================================================================

/// Everything the operator chooses when setting up a contest entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub start: DateTime<Utc>,
    pub categories: Categories,
    /// What the station sends after the report, e.g. "A 99 ORG" for
    /// Sweepstakes or a DOK for WAG
    pub sent_exchange: String,
    pub operators: String,
    /// Cabrillo LOCATION (ARRL section or DX)
    pub location: String,
    pub soapbox: Vec<String>,
}

/// One contest entry. `id` is stable for the life of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestSession {
    pub id: i64,
    /// Registry name of the contest rules
    pub contest: String,
    pub config: SessionConfig,
}

impl ContestSession {
    /// Whitespace-separated token `n` of the sent exchange template
    pub fn sent_token(&self, n: usize) -> &str {
        self.config.sent_exchange.split_whitespace().nth(n).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_spelling() {
        assert_eq!(cabrillo_value(&CategoryOperator::SingleOp), "SINGLE-OP");
        assert_eq!(cabrillo_value(&CategoryAssisted::NonAssisted), "NON-ASSISTED");
        assert_eq!(cabrillo_value(&CategoryPower::Qrp), "QRP");
        assert_eq!(cabrillo_value(&CategoryTransmitter::Unlimited), "UNLIMITED");
    }

    #[test]
    fn test_category_lines() {
        let mut categories = Categories::default();
        categories.overlay = "rookie".to_string();
        let lines = categories.cabrillo_lines();
        assert_eq!(lines[0], ("CATEGORY-OPERATOR", "SINGLE-OP".to_string()));
        assert_eq!(lines[2], ("CATEGORY-BAND", "ALL".to_string()));
        assert!(!lines.iter().any(|(tag, _)| *tag == "CATEGORY-STATION"));
        assert_eq!(lines.last(), Some(&("CATEGORY-OVERLAY", "ROOKIE".to_string())));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"sent_exchange":"A 99 ORG","categories":{"power":"LOW"}}"#)
                .unwrap();
        assert_eq!(config.categories.power, CategoryPower::Low);
        assert_eq!(config.categories.mode, CategoryMode::Mixed);
        let session = ContestSession { id: 1, contest: "ARRL SS CW".into(), config };
        assert_eq!(session.sent_token(2), "ORG");
        assert_eq!(session.sent_token(5), "");
    }
}
