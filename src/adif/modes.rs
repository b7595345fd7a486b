// Mode handling
// Reference: https://adif.org/314/ADIF_314.htm#Mode_Enumeration
//
// Contacts store the mode the operator picked (CW, USB, LSB, RTTY, FT8, ...).
// Dupe and multiplier scopes compare mode groups; submission formats need
// their own spellings.

use serde::{Deserialize, Serialize};

/// Mode group used for per-mode dupe and multiplier scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeGroup {
    Phone, // SSB, FM, AM
    CW,
    Data, // RTTY, FT8, PSK, ...
    Image,
}

impl ModeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeGroup::Phone => "PHONE",
            ModeGroup::CW => "CW",
            ModeGroup::Data => "DATA",
            ModeGroup::Image => "IMAGE",
        }
    }
}

/// Normalize a mode string to its uppercase form
pub fn normalize_mode(mode: &str) -> String {
    mode.trim().to_uppercase()
}

/// Get the mode group for a given mode
pub fn get_mode_group(mode: &str) -> ModeGroup {
    match normalize_mode(mode).as_str() {
        "CW" | "CW-R" => ModeGroup::CW,
        "SSB" | "LSB" | "USB" | "PH" | "PHONE" | "FM" | "AM" | "C4FM" | "DMR" | "DSTAR"
        | "FREEDV" | "DIGITALVOICE" => ModeGroup::Phone,
        "SSTV" | "FAX" | "ATV" => ModeGroup::Image,
        _ => ModeGroup::Data,
    }
}

/// Two-letter Cabrillo mode code
pub fn cabrillo_mode(mode: &str) -> &'static str {
    match normalize_mode(mode).as_str() {
        "CW" | "CW-R" => "CW",
        "FM" => "FM",
        "RTTY" | "RTTY-R" | "RY" => "RY",
        m if get_mode_group(m) == ModeGroup::Phone => "PH",
        _ => "DG",
    }
}

/// ADIF MODE and optional SUBMODE for a logged mode
pub fn adif_mode(mode: &str) -> (String, Option<String>) {
    let upper = normalize_mode(mode);
    match upper.as_str() {
        "USB" | "LSB" => ("SSB".to_string(), Some(upper)),
        "CW-R" => ("CW".to_string(), None),
        "RTTY-R" => ("RTTY".to_string(), None),
        "FT4" => ("MFSK".to_string(), Some("FT4".to_string())),
        "PSK31" | "PSK63" | "PSK125" => ("PSK".to_string(), Some(upper)),
        _ => (upper, None),
    }
}

/// Logged mode for an ADIF MODE/SUBMODE pair
pub fn mode_from_adif(mode: &str, submode: Option<&str>) -> String {
    let mode = normalize_mode(mode);
    match (mode.as_str(), submode.map(normalize_mode)) {
        ("SSB", Some(sub)) if sub == "USB" || sub == "LSB" => sub,
        ("MFSK", Some(sub)) if sub == "FT4" => sub,
        ("PSK", Some(sub)) if !sub.is_empty() => sub,
        _ => mode,
    }
}
