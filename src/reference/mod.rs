// Reference data module - DXCC entities, prefixes and contest regions
// Source: ARRL DXCC List and ITU Radio Regulations
//
// Scoring never calls these tables directly; it goes through the
// `GeographyResolver` trait so a full CTY.DAT file can replace the compact
// built-in table without touching any contest rules.

pub mod cty;
pub mod dxcc;
pub mod prefixes;
pub mod sections;
pub mod wpx;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use dxcc::{DxccEntity, DXCC_ENTITIES};
use prefixes::PREFIX_RULES;

pub use cty::CtyResolver;
pub use wpx::wpx_prefix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    NA,
    SA,
    EU,
    AF,
    AS,
    OC,
    AN,
}

impl Continent {
    pub fn parse(code: &str) -> Option<Continent> {
        match code.trim().to_ascii_uppercase().as_str() {
            "NA" => Some(Continent::NA),
            "SA" => Some(Continent::SA),
            "EU" => Some(Continent::EU),
            "AF" => Some(Continent::AF),
            "AS" => Some(Continent::AS),
            "OC" => Some(Continent::OC),
            "AN" => Some(Continent::AN),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::NA => "NA",
            Continent::SA => "SA",
            Continent::EU => "EU",
            Continent::AF => "AF",
            Continent::AS => "AS",
            Continent::OC => "OC",
            Continent::AN => "AN",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a callsign is, as far as contest scoring cares
///
/// `primary_prefix` identifies the country: two stations are in the same
/// country when their primary prefixes are equal. `dxcc` is only known when
/// the resolver carries ARRL entity numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub entity: String,
    pub primary_prefix: String,
    pub dxcc: Option<u16>,
    pub cq_zone: u8,
    pub itu_zone: u8,
    pub continent: Continent,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoInfo {
    pub fn same_country(&self, other: &GeoInfo) -> bool {
        self.primary_prefix.eq_ignore_ascii_case(&other.primary_prefix)
    }

    pub fn is_country(&self, primary_prefix: &str) -> bool {
        self.primary_prefix.eq_ignore_ascii_case(primary_prefix)
    }
}

/// Callsign to geography lookup. `None` is an expected outcome, not an error.
pub trait GeographyResolver {
    fn resolve(&self, call: &str) -> Option<GeoInfo>;
}

impl<T: GeographyResolver + ?Sized> GeographyResolver for Box<T> {
    fn resolve(&self, call: &str) -> Option<GeoInfo> {
        (**self).resolve(call)
    }
}

impl<T: GeographyResolver + ?Sized> GeographyResolver for &T {
    fn resolve(&self, call: &str) -> Option<GeoInfo> {
        (**self).resolve(call)
    }
}

// =========================================================================
// Portable callsigns
// =========================================================================

/// Designators that do not change the station's location
const LOCATION_NEUTRAL: &[&str] = &["P", "M", "QRP", "A", "B", "LH"];

/// The part of a callsign that decides its country.
///
/// `VE3/W1AW` -> `VE3`, `W1AW/KH6` -> `KH6`, `W1AW/P` -> `W1AW`.
/// Maritime and aeronautical mobile stations have no country.
pub fn location_part(call: &str) -> Option<String> {
    let upper = call.trim().to_uppercase();
    let parts: Vec<&str> = upper.split('/').filter(|p| !p.is_empty()).collect();
    if parts.iter().any(|p| *p == "MM" || *p == "AM") {
        return None;
    }
    let parts: Vec<&str> = parts
        .into_iter()
        .filter(|p| !LOCATION_NEUTRAL.contains(p))
        .filter(|p| !(p.len() == 1 && p.chars().all(|c| c.is_ascii_digit())))
        .collect();
    match parts.as_slice() {
        [] => None,
        [only] => Some(only.to_string()),
        [first, second, ..] => {
            let portable = if first.len() <= second.len() { first } else { second };
            Some(portable.to_string())
        }
    }
}

// =========================================================================
// Built-in resolver
// =========================================================================

/// Lazily-initialized HashMap for O(1) DXCC entity lookup by entity_id
static DXCC_MAP: OnceLock<HashMap<u16, &'static DxccEntity>> = OnceLock::new();

fn get_dxcc_map() -> &'static HashMap<u16, &'static DxccEntity> {
    DXCC_MAP.get_or_init(|| {
        let mut map = HashMap::with_capacity(DXCC_ENTITIES.len());
        for entity in DXCC_ENTITIES {
            map.insert(entity.entity_id, entity);
        }
        map
    })
}

/// Resolver over the compiled-in DXCC and prefix tables
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinResolver;

impl BuiltinResolver {
    pub fn new() -> Self {
        BuiltinResolver
    }

    fn best_rule(call: &str) -> Option<&'static prefixes::PrefixRule> {
        let mut best_match: Option<&prefixes::PrefixRule> = None;
        let mut best_priority = 0u8;
        let mut best_len = 0usize;

        for rule in PREFIX_RULES {
            if rule.exact {
                if call == rule.prefix {
                    return Some(rule);
                }
            } else if call.starts_with(rule.prefix) {
                let len = rule.prefix.len();
                if len > best_len || (len == best_len && rule.priority > best_priority) {
                    best_match = Some(rule);
                    best_priority = rule.priority;
                    best_len = len;
                }
            }
        }
        best_match
    }
}

impl GeographyResolver for BuiltinResolver {
    fn resolve(&self, call: &str) -> Option<GeoInfo> {
        let lookup = location_part(call)?;
        let rule = Self::best_rule(&lookup)?;
        let entity = get_dxcc_map().get(&rule.entity_id)?;
        let continent = Continent::parse(entity.continent)?;
        Some(GeoInfo {
            entity: entity.name.to_string(),
            primary_prefix: entity.prefix.to_string(),
            dxcc: Some(entity.entity_id),
            cq_zone: entity.cq_zone,
            itu_zone: entity.itu_zone,
            continent,
            latitude: entity.latitude,
            longitude: entity.longitude,
        })
    }
}
