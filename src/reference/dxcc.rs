// DXCC Entity List
// Source: ARRL DXCC List (https://www.arrl.org/country-lists-prefixes),
// zones and coordinates as published in CTY.DAT
//
// A compact built-in table covering the entities most often worked in the
// supported contests. Load a full CTY.DAT through `CtyResolver` for complete
// coverage.
//
// Fields:
// - entity_id: ARRL DXCC entity number
// - name: ARRL entity name
// - prefix: primary prefix, used as the country multiplier key
// - continent: two-letter continent code
// - cq_zone / itu_zone: default zones for the entity
// - latitude / longitude: degrees, north and east positive

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DxccEntity {
    pub entity_id: u16,
    pub name: &'static str,
    pub prefix: &'static str,
    pub continent: &'static str,
    pub cq_zone: u8,
    pub itu_zone: u8,
    pub latitude: f64,
    pub longitude: f64,
}

pub const DXCC_ENTITIES: &[DxccEntity] = &[
    // =========================================================================
    // NORTH AMERICA (NA)
    // =========================================================================
    DxccEntity { entity_id: 291, name: "United States", prefix: "K", continent: "NA", cq_zone: 5, itu_zone: 8, latitude: 37.53, longitude: -91.67 },
    DxccEntity { entity_id: 1, name: "Canada", prefix: "VE", continent: "NA", cq_zone: 5, itu_zone: 9, latitude: 44.35, longitude: -78.75 },
    DxccEntity { entity_id: 6, name: "Alaska", prefix: "KL", continent: "NA", cq_zone: 1, itu_zone: 1, latitude: 61.40, longitude: -148.87 },
    DxccEntity { entity_id: 50, name: "Mexico", prefix: "XE", continent: "NA", cq_zone: 6, itu_zone: 10, latitude: 21.32, longitude: -100.23 },
    DxccEntity { entity_id: 202, name: "Puerto Rico", prefix: "KP4", continent: "NA", cq_zone: 8, itu_zone: 11, latitude: 18.18, longitude: -66.55 },
    DxccEntity { entity_id: 70, name: "Cuba", prefix: "CM", continent: "NA", cq_zone: 8, itu_zone: 11, latitude: 21.50, longitude: -80.00 },
    // =========================================================================
    // OCEANIA (OC)
    // =========================================================================
    DxccEntity { entity_id: 110, name: "Hawaii", prefix: "KH6", continent: "OC", cq_zone: 31, itu_zone: 61, latitude: 21.12, longitude: -157.48 },
    DxccEntity { entity_id: 150, name: "Australia", prefix: "VK", continent: "OC", cq_zone: 30, itu_zone: 59, latitude: -23.70, longitude: 132.33 },
    DxccEntity { entity_id: 170, name: "New Zealand", prefix: "ZL", continent: "OC", cq_zone: 32, itu_zone: 60, latitude: -41.83, longitude: 173.27 },
    DxccEntity { entity_id: 327, name: "Indonesia", prefix: "YB", continent: "OC", cq_zone: 28, itu_zone: 51, latitude: -7.30, longitude: 109.88 },
    // =========================================================================
    // SOUTH AMERICA (SA)
    // =========================================================================
    DxccEntity { entity_id: 108, name: "Brazil", prefix: "PY", continent: "SA", cq_zone: 11, itu_zone: 15, latitude: -10.00, longitude: -53.00 },
    DxccEntity { entity_id: 100, name: "Argentina", prefix: "LU", continent: "SA", cq_zone: 13, itu_zone: 14, latitude: -34.80, longitude: -65.92 },
    DxccEntity { entity_id: 112, name: "Chile", prefix: "CE", continent: "SA", cq_zone: 12, itu_zone: 14, latitude: -30.00, longitude: -71.00 },
    // =========================================================================
    // EUROPE (EU)
    // =========================================================================
    DxccEntity { entity_id: 230, name: "Fed. Rep. of Germany", prefix: "DL", continent: "EU", cq_zone: 14, itu_zone: 28, latitude: 51.00, longitude: 10.00 },
    DxccEntity { entity_id: 223, name: "England", prefix: "G", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 52.77, longitude: -1.47 },
    DxccEntity { entity_id: 279, name: "Scotland", prefix: "GM", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 56.82, longitude: -4.18 },
    DxccEntity { entity_id: 294, name: "Wales", prefix: "GW", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 52.28, longitude: -3.73 },
    DxccEntity { entity_id: 245, name: "Ireland", prefix: "EI", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 53.13, longitude: -8.02 },
    DxccEntity { entity_id: 227, name: "France", prefix: "F", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 46.00, longitude: 2.00 },
    DxccEntity { entity_id: 281, name: "Spain", prefix: "EA", continent: "EU", cq_zone: 14, itu_zone: 37, latitude: 40.37, longitude: -4.88 },
    DxccEntity { entity_id: 248, name: "Italy", prefix: "I", continent: "EU", cq_zone: 15, itu_zone: 28, latitude: 42.82, longitude: 12.58 },
    DxccEntity { entity_id: 263, name: "Netherlands", prefix: "PA", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 52.28, longitude: 5.47 },
    DxccEntity { entity_id: 209, name: "Belgium", prefix: "ON", continent: "EU", cq_zone: 14, itu_zone: 27, latitude: 50.70, longitude: 4.85 },
    DxccEntity { entity_id: 287, name: "Switzerland", prefix: "HB", continent: "EU", cq_zone: 14, itu_zone: 28, latitude: 46.87, longitude: 8.12 },
    DxccEntity { entity_id: 206, name: "Austria", prefix: "OE", continent: "EU", cq_zone: 15, itu_zone: 28, latitude: 47.33, longitude: 13.33 },
    DxccEntity { entity_id: 503, name: "Czech Republic", prefix: "OK", continent: "EU", cq_zone: 15, itu_zone: 28, latitude: 50.00, longitude: 16.00 },
    DxccEntity { entity_id: 269, name: "Poland", prefix: "SP", continent: "EU", cq_zone: 15, itu_zone: 28, latitude: 52.28, longitude: 18.67 },
    DxccEntity { entity_id: 284, name: "Sweden", prefix: "SM", continent: "EU", cq_zone: 14, itu_zone: 18, latitude: 61.20, longitude: 14.57 },
    DxccEntity { entity_id: 224, name: "Finland", prefix: "OH", continent: "EU", cq_zone: 15, itu_zone: 18, latitude: 63.78, longitude: 27.08 },
    DxccEntity { entity_id: 497, name: "Croatia", prefix: "9A", continent: "EU", cq_zone: 15, itu_zone: 28, latitude: 45.18, longitude: 15.30 },
    DxccEntity { entity_id: 499, name: "Slovenia", prefix: "S5", continent: "EU", cq_zone: 15, itu_zone: 28, latitude: 46.00, longitude: 14.00 },
    DxccEntity { entity_id: 288, name: "Ukraine", prefix: "UR", continent: "EU", cq_zone: 16, itu_zone: 29, latitude: 50.00, longitude: 30.00 },
    DxccEntity { entity_id: 54, name: "European Russia", prefix: "UA", continent: "EU", cq_zone: 16, itu_zone: 29, latitude: 53.65, longitude: 41.37 },
    // =========================================================================
    // ASIA (AS)
    // =========================================================================
    DxccEntity { entity_id: 15, name: "Asiatic Russia", prefix: "UA9", continent: "AS", cq_zone: 17, itu_zone: 30, latitude: 55.88, longitude: 84.08 },
    DxccEntity { entity_id: 339, name: "Japan", prefix: "JA", continent: "AS", cq_zone: 25, itu_zone: 45, latitude: 36.40, longitude: 138.38 },
    DxccEntity { entity_id: 137, name: "Republic of Korea", prefix: "HL", continent: "AS", cq_zone: 25, itu_zone: 44, latitude: 36.23, longitude: 127.90 },
    DxccEntity { entity_id: 318, name: "China", prefix: "BY", continent: "AS", cq_zone: 24, itu_zone: 44, latitude: 36.00, longitude: 102.00 },
    DxccEntity { entity_id: 324, name: "India", prefix: "VU", continent: "AS", cq_zone: 22, itu_zone: 41, latitude: 22.50, longitude: 77.58 },
    // =========================================================================
    // AFRICA (AF)
    // =========================================================================
    DxccEntity { entity_id: 462, name: "South Africa", prefix: "ZS", continent: "AF", cq_zone: 38, itu_zone: 57, latitude: -29.07, longitude: 22.63 },
    DxccEntity { entity_id: 446, name: "Morocco", prefix: "CN", continent: "AF", cq_zone: 33, itu_zone: 37, latitude: 32.00, longitude: -5.00 },
];
