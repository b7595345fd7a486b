// CTY.DAT country file resolver
// Format: https://www.country-files.com/cty-dat-format/
//
// Each entity is a header line
//   Name: CQ: ITU: Cont: Lat: Lon: UTC: Prefix:
// followed by comma separated aliases ending in ';'. Aliases may override
// the entity defaults: (cq) [itu] {cont} <lat/lon> ~utc~, and `=CALL` marks
// an exact callsign. Longitudes in the file are positive west.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

use super::{location_part, Continent, GeoInfo, GeographyResolver};

/// Resolver backed by a parsed CTY.DAT file
#[derive(Debug, Clone, Default)]
pub struct CtyResolver {
    exact: HashMap<String, GeoInfo>,
    /// Sorted longest first
    prefixes: Vec<(String, GeoInfo)>,
}

impl CtyResolver {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let resolver = Self::parse(&raw);
        log::info!(
            "Loaded {} prefixes and {} exact calls from {}",
            resolver.prefixes.len(),
            resolver.exact.len(),
            path.display()
        );
        Ok(resolver)
    }

    pub fn parse(raw: &str) -> Self {
        let mut exact = HashMap::new();
        let mut prefixes = Vec::new();
        let mut current: Option<GeoInfo> = None;
        let mut alias_buf = String::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if is_header(line) {
                if let Some(entity) = current.as_ref() {
                    parse_aliases(&alias_buf, entity, &mut exact, &mut prefixes);
                }
                alias_buf.clear();
                current = parse_header(line);
                if current.is_none() {
                    log::warn!("Skipping unreadable CTY.DAT entity line: {}", line);
                }
            } else {
                alias_buf.push_str(line);
                alias_buf.push(' ');
            }
        }
        if let Some(entity) = current.as_ref() {
            parse_aliases(&alias_buf, entity, &mut exact, &mut prefixes);
        }

        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { exact, prefixes }
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GeographyResolver for CtyResolver {
    fn resolve(&self, call: &str) -> Option<GeoInfo> {
        let full = call.trim().to_ascii_uppercase();
        if let Some(geo) = self.exact.get(&full) {
            return Some(geo.clone());
        }
        let lookup = location_part(&full)?;
        if let Some(geo) = self.exact.get(&lookup) {
            return Some(geo.clone());
        }
        self.prefixes
            .iter()
            .find(|(prefix, _)| lookup.starts_with(prefix.as_str()))
            .map(|(_, geo)| geo.clone())
    }
}

fn is_header(line: &str) -> bool {
    line.matches(':').count() >= 7 && !line.ends_with(';') && !line.ends_with(',')
}

fn parse_header(line: &str) -> Option<GeoInfo> {
    let parts: Vec<&str> = line.split(':').map(str::trim).collect();
    if parts.len() < 8 {
        return None;
    }
    let primary_prefix = parts[7].trim_start_matches('*').to_ascii_uppercase();
    if primary_prefix.is_empty() {
        return None;
    }
    Some(GeoInfo {
        entity: parts[0].to_string(),
        primary_prefix,
        dxcc: None,
        cq_zone: parts[1].parse().ok()?,
        itu_zone: parts[2].parse().ok()?,
        continent: Continent::parse(parts[3])?,
        latitude: parts[4].parse().ok()?,
        longitude: -parts[5].parse::<f64>().ok()?,
    })
}

fn parse_aliases(
    aliases: &str,
    entity: &GeoInfo,
    exact: &mut HashMap<String, GeoInfo>,
    prefixes: &mut Vec<(String, GeoInfo)>,
) {
    let aliases = aliases.trim().trim_end_matches(';');
    for alias in aliases.split(',') {
        let alias = alias.trim();
        if alias.is_empty() {
            continue;
        }
        let (base, is_exact, geo) = parse_alias(alias, entity);
        if base.is_empty() {
            continue;
        }
        if is_exact {
            exact.insert(base, geo);
        } else {
            prefixes.push((base, geo));
        }
    }
}

/// Split one alias into its callsign part and the entity with overrides applied
fn parse_alias(alias: &str, entity: &GeoInfo) -> (String, bool, GeoInfo) {
    let (body, is_exact) = match alias.strip_prefix('=') {
        Some(rest) => (rest, true),
        None => (alias, false),
    };
    let mut geo = entity.clone();
    let mut out = String::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '(' => {
                if let Ok(zone) = take_until(&mut chars, ')').parse() {
                    geo.cq_zone = zone;
                }
            }
            '[' => {
                if let Ok(zone) = take_until(&mut chars, ']').parse() {
                    geo.itu_zone = zone;
                }
            }
            '{' => {
                if let Some(cont) = Continent::parse(&take_until(&mut chars, '}')) {
                    geo.continent = cont;
                }
            }
            '<' => {
                let coords = take_until(&mut chars, '>');
                if let Some((lat, lon)) = coords.split_once('/') {
                    if let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) {
                        geo.latitude = lat;
                        geo.longitude = -lon;
                    }
                }
            }
            '~' => {
                take_until(&mut chars, '~');
            }
            _ => out.push(c),
        }
    }
    (out.trim().to_ascii_uppercase(), is_exact, geo)
}

fn take_until(chars: &mut std::str::Chars<'_>, end: char) -> String {
    let mut value = String::new();
    for c in chars.by_ref() {
        if c == end {
            break;
        }
        value.push(c);
    }
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
United States:            05:  08:  NA:   37.53:    91.67:     5.0:  K:
    AA,AB,K,N,W,=W1AW(5)[8],KH6TEST(31)[61]{OC}<21.0/157.0>;
Canada:                   05:  09:  NA:   44.35:    78.75:     5.0:  VE:
    CF,CG,VA,VE,VE3(4)[4],VO1(5)[9];
Japan:                    25:  45:  AS:   36.40:  -138.38:    -9.0:  JA:
    7J,JA,JE,JR;
";

    #[test]
    fn test_parse_entities() {
        let cty = CtyResolver::parse(SAMPLE);
        let geo = cty.resolve("K6GTE").unwrap();
        assert_eq!(geo.entity, "United States");
        assert_eq!(geo.primary_prefix, "K");
        assert_eq!(geo.continent, Continent::NA);
        assert!((geo.longitude + 91.67).abs() < 1e-9);

        let ja = cty.resolve("JA1ABC").unwrap();
        assert_eq!(ja.cq_zone, 25);
        assert!((ja.longitude - 138.38).abs() < 1e-9);
    }

    #[test]
    fn test_alias_overrides() {
        let cty = CtyResolver::parse(SAMPLE);
        let ve3 = cty.resolve("VE3ABC").unwrap();
        assert_eq!(ve3.cq_zone, 4);
        assert_eq!(ve3.itu_zone, 4);
        let ve1 = cty.resolve("VE1ABC").unwrap();
        assert_eq!(ve1.cq_zone, 5);

        let special = cty.resolve("KH6TEST1").unwrap();
        assert_eq!(special.continent, Continent::OC);
        assert_eq!(special.cq_zone, 31);
    }

    #[test]
    fn test_exact_calls_and_portables() {
        let cty = CtyResolver::parse(SAMPLE);
        assert!(cty.exact.contains_key("W1AW"));
        assert_eq!(cty.resolve("w1aw").unwrap().primary_prefix, "K");
        assert_eq!(cty.resolve("VE3/W1AW").unwrap().primary_prefix, "VE");
        assert!(cty.resolve("ZZ9ZZZ").is_none());
    }
}
