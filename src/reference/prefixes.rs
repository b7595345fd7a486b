// Prefix to DXCC Entity mapping
// Source: ITU Radio Regulations and ARRL prefix assignments
//
// Longest prefix wins; equal lengths fall back to priority. Exact rules match
// a whole callsign only.

/// A prefix rule for matching callsigns to DXCC entities
#[derive(Debug, Clone)]
pub struct PrefixRule {
    /// The prefix pattern (e.g., "W", "VE", "JA")
    pub prefix: &'static str,
    /// The DXCC entity ID this prefix maps to
    pub entity_id: u16,
    /// Exact match only (special event and club calls)
    pub exact: bool,
    /// Priority for overlapping prefixes (higher = more specific)
    pub priority: u8,
}

const fn rule(prefix: &'static str, entity_id: u16, priority: u8) -> PrefixRule {
    PrefixRule { prefix, entity_id, exact: false, priority }
}

pub const PREFIX_RULES: &[PrefixRule] = &[
    // United States and territories
    rule("K", 291, 10),
    rule("W", 291, 10),
    rule("N", 291, 10),
    rule("AA", 291, 20),
    rule("AB", 291, 20),
    rule("AC", 291, 20),
    rule("AD", 291, 20),
    rule("AE", 291, 20),
    rule("AF", 291, 20),
    rule("AG", 291, 20),
    rule("AI", 291, 20),
    rule("AJ", 291, 20),
    rule("AK", 291, 20),
    rule("AL", 6, 30),
    rule("KL", 6, 30),
    rule("NL", 6, 30),
    rule("WL", 6, 30),
    rule("AH6", 110, 30),
    rule("AH7", 110, 30),
    rule("KH6", 110, 30),
    rule("KH7", 110, 30),
    rule("NH6", 110, 30),
    rule("WH6", 110, 30),
    rule("KP3", 202, 30),
    rule("KP4", 202, 30),
    rule("NP3", 202, 30),
    rule("NP4", 202, 30),
    rule("WP3", 202, 30),
    rule("WP4", 202, 30),
    // Canada
    rule("VA", 1, 10),
    rule("VB", 1, 10),
    rule("VC", 1, 10),
    rule("VD", 1, 10),
    rule("VE", 1, 10),
    rule("VG", 1, 10),
    rule("VO", 1, 10),
    rule("VX", 1, 10),
    rule("VY", 1, 10),
    rule("CF", 1, 10),
    rule("CG", 1, 10),
    rule("CJ", 1, 10),
    rule("CK", 1, 10),
    rule("CY", 1, 10),
    rule("CZ", 1, 10),
    rule("XJ", 1, 10),
    rule("XK", 1, 10),
    rule("XL", 1, 10),
    rule("XM", 1, 10),
    rule("XN", 1, 10),
    rule("XO", 1, 10),
    // Mexico and Caribbean
    rule("XE", 50, 10),
    rule("XF", 50, 10),
    rule("4A", 50, 10),
    rule("4B", 50, 10),
    rule("4C", 50, 10),
    rule("6D", 50, 10),
    rule("CL", 70, 10),
    rule("CM", 70, 10),
    rule("CO", 70, 10),
    rule("T4", 70, 10),
    // Oceania
    rule("VK", 150, 10),
    rule("AX", 150, 10),
    rule("ZL", 170, 10),
    rule("ZM", 170, 10),
    rule("YB", 327, 10),
    rule("YC", 327, 10),
    rule("YD", 327, 10),
    rule("YE", 327, 10),
    rule("YF", 327, 10),
    rule("YG", 327, 10),
    rule("YH", 327, 10),
    // South America
    rule("PP", 108, 10),
    rule("PQ", 108, 10),
    rule("PR", 108, 10),
    rule("PS", 108, 10),
    rule("PT", 108, 10),
    rule("PU", 108, 10),
    rule("PV", 108, 10),
    rule("PW", 108, 10),
    rule("PX", 108, 10),
    rule("PY", 108, 10),
    rule("ZV", 108, 10),
    rule("ZW", 108, 10),
    rule("ZX", 108, 10),
    rule("ZY", 108, 10),
    rule("ZZ", 108, 10),
    rule("LO", 100, 10),
    rule("LP", 100, 10),
    rule("LQ", 100, 10),
    rule("LR", 100, 10),
    rule("LS", 100, 10),
    rule("LT", 100, 10),
    rule("LU", 100, 10),
    rule("LV", 100, 10),
    rule("LW", 100, 10),
    rule("AY", 100, 10),
    rule("AZ", 100, 10),
    rule("L2", 100, 10),
    rule("CA", 112, 10),
    rule("CB", 112, 10),
    rule("CC", 112, 10),
    rule("CD", 112, 10),
    rule("CE", 112, 10),
    rule("XQ", 112, 10),
    rule("XR", 112, 10),
    rule("3G", 112, 10),
    // Germany
    rule("DA", 230, 10),
    rule("DB", 230, 10),
    rule("DC", 230, 10),
    rule("DD", 230, 10),
    rule("DF", 230, 10),
    rule("DG", 230, 10),
    rule("DH", 230, 10),
    rule("DJ", 230, 10),
    rule("DK", 230, 10),
    rule("DL", 230, 10),
    rule("DM", 230, 10),
    rule("DN", 230, 10),
    rule("DO", 230, 10),
    rule("DP", 230, 10),
    rule("DQ", 230, 10),
    rule("DR", 230, 10),
    // United Kingdom and Ireland
    rule("G", 223, 10),
    rule("M", 223, 10),
    rule("2E", 223, 20),
    rule("GM", 279, 20),
    rule("MM", 279, 20),
    rule("2M", 279, 20),
    rule("GW", 294, 20),
    rule("MW", 294, 20),
    rule("2W", 294, 20),
    rule("EI", 245, 10),
    rule("EJ", 245, 10),
    // Western and central Europe
    rule("F", 227, 10),
    rule("TM", 227, 20),
    rule("EA", 281, 10),
    rule("EB", 281, 10),
    rule("EC", 281, 10),
    rule("ED", 281, 10),
    rule("EE", 281, 10),
    rule("EF", 281, 10),
    rule("EG", 281, 10),
    rule("EH", 281, 10),
    rule("AM", 281, 20),
    rule("AN", 281, 20),
    rule("AO", 281, 20),
    rule("I", 248, 10),
    rule("PA", 263, 10),
    rule("PB", 263, 10),
    rule("PC", 263, 10),
    rule("PD", 263, 10),
    rule("PE", 263, 10),
    rule("PF", 263, 10),
    rule("PG", 263, 10),
    rule("PH", 263, 10),
    rule("PI", 263, 10),
    rule("ON", 209, 10),
    rule("OO", 209, 10),
    rule("OP", 209, 10),
    rule("OQ", 209, 10),
    rule("OR", 209, 10),
    rule("OS", 209, 10),
    rule("OT", 209, 10),
    rule("HB", 287, 10),
    rule("HE", 287, 10),
    rule("OE", 206, 10),
    rule("OK", 503, 10),
    rule("OL", 503, 10),
    rule("SN", 269, 10),
    rule("SO", 269, 10),
    rule("SP", 269, 10),
    rule("SQ", 269, 10),
    rule("SR", 269, 10),
    rule("3Z", 269, 10),
    rule("HF", 269, 10),
    rule("SM", 284, 10),
    rule("SA", 284, 10),
    rule("SB", 284, 10),
    rule("SC", 284, 10),
    rule("SD", 284, 10),
    rule("SE", 284, 10),
    rule("SF", 284, 10),
    rule("SG", 284, 10),
    rule("SH", 284, 10),
    rule("SI", 284, 10),
    rule("SJ", 284, 10),
    rule("SK", 284, 10),
    rule("SL", 284, 10),
    rule("7S", 284, 10),
    rule("8S", 284, 10),
    rule("OF", 224, 10),
    rule("OG", 224, 10),
    rule("OH", 224, 10),
    rule("OI", 224, 10),
    rule("9A", 497, 10),
    rule("S5", 499, 10),
    // Ukraine and Russia
    rule("EM", 288, 10),
    rule("EN", 288, 10),
    rule("EO", 288, 10),
    rule("UR", 288, 10),
    rule("US", 288, 10),
    rule("UT", 288, 10),
    rule("UU", 288, 10),
    rule("UV", 288, 10),
    rule("UW", 288, 10),
    rule("UX", 288, 10),
    rule("UY", 288, 10),
    rule("UZ", 288, 10),
    rule("R", 54, 10),
    rule("U", 54, 5),
    rule("UA", 54, 10),
    rule("R8", 15, 30),
    rule("R9", 15, 30),
    rule("R0", 15, 30),
    rule("RA8", 15, 30),
    rule("RA9", 15, 30),
    rule("RA0", 15, 30),
    rule("UA8", 15, 30),
    rule("UA9", 15, 30),
    rule("UA0", 15, 30),
    // Asia
    rule("JA", 339, 10),
    rule("JB", 339, 10),
    rule("JC", 339, 10),
    rule("JD", 339, 10),
    rule("JE", 339, 10),
    rule("JF", 339, 10),
    rule("JG", 339, 10),
    rule("JH", 339, 10),
    rule("JI", 339, 10),
    rule("JJ", 339, 10),
    rule("JK", 339, 10),
    rule("JL", 339, 10),
    rule("JM", 339, 10),
    rule("JN", 339, 10),
    rule("JO", 339, 10),
    rule("JP", 339, 10),
    rule("JQ", 339, 10),
    rule("JR", 339, 10),
    rule("JS", 339, 10),
    rule("7J", 339, 10),
    rule("7K", 339, 10),
    rule("7L", 339, 10),
    rule("7M", 339, 10),
    rule("7N", 339, 10),
    rule("8J", 339, 10),
    rule("8N", 339, 10),
    rule("HL", 137, 10),
    rule("DS", 137, 10),
    rule("DT", 137, 10),
    rule("6K", 137, 10),
    rule("6L", 137, 10),
    rule("6M", 137, 10),
    rule("6N", 137, 10),
    rule("B", 318, 10),
    rule("VU", 324, 10),
    rule("AT", 324, 10),
    rule("8T", 324, 10),
    // Africa
    rule("ZR", 462, 10),
    rule("ZS", 462, 10),
    rule("ZT", 462, 10),
    rule("ZU", 462, 10),
    rule("CN", 446, 10),
    rule("5C", 446, 10),
];
