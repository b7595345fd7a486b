// US states, Canadian provinces and ARRL/RAC sections
// Source: USPS (US), Canada Post (CA), ARRL Field Organization section list
//
// State/province codes are the NAQP and ARRL DX multipliers; sections are
// the Sweepstakes multipliers.

// =========================================================================
// US STATES
// =========================================================================

#[derive(Debug, Clone)]
pub struct Region {
    /// Abbreviation as sent in the exchange
    pub code: &'static str,
    pub name: &'static str,
}

/// 50 states plus the District of Columbia
pub const US_STATES: &[Region] = &[
    Region { code: "AL", name: "Alabama" },
    Region { code: "AK", name: "Alaska" },
    Region { code: "AZ", name: "Arizona" },
    Region { code: "AR", name: "Arkansas" },
    Region { code: "CA", name: "California" },
    Region { code: "CO", name: "Colorado" },
    Region { code: "CT", name: "Connecticut" },
    Region { code: "DE", name: "Delaware" },
    Region { code: "DC", name: "District of Columbia" },
    Region { code: "FL", name: "Florida" },
    Region { code: "GA", name: "Georgia" },
    Region { code: "HI", name: "Hawaii" },
    Region { code: "ID", name: "Idaho" },
    Region { code: "IL", name: "Illinois" },
    Region { code: "IN", name: "Indiana" },
    Region { code: "IA", name: "Iowa" },
    Region { code: "KS", name: "Kansas" },
    Region { code: "KY", name: "Kentucky" },
    Region { code: "LA", name: "Louisiana" },
    Region { code: "ME", name: "Maine" },
    Region { code: "MD", name: "Maryland" },
    Region { code: "MA", name: "Massachusetts" },
    Region { code: "MI", name: "Michigan" },
    Region { code: "MN", name: "Minnesota" },
    Region { code: "MS", name: "Mississippi" },
    Region { code: "MO", name: "Missouri" },
    Region { code: "MT", name: "Montana" },
    Region { code: "NE", name: "Nebraska" },
    Region { code: "NV", name: "Nevada" },
    Region { code: "NH", name: "New Hampshire" },
    Region { code: "NJ", name: "New Jersey" },
    Region { code: "NM", name: "New Mexico" },
    Region { code: "NY", name: "New York" },
    Region { code: "NC", name: "North Carolina" },
    Region { code: "ND", name: "North Dakota" },
    Region { code: "OH", name: "Ohio" },
    Region { code: "OK", name: "Oklahoma" },
    Region { code: "OR", name: "Oregon" },
    Region { code: "PA", name: "Pennsylvania" },
    Region { code: "RI", name: "Rhode Island" },
    Region { code: "SC", name: "South Carolina" },
    Region { code: "SD", name: "South Dakota" },
    Region { code: "TN", name: "Tennessee" },
    Region { code: "TX", name: "Texas" },
    Region { code: "UT", name: "Utah" },
    Region { code: "VT", name: "Vermont" },
    Region { code: "VA", name: "Virginia" },
    Region { code: "WA", name: "Washington" },
    Region { code: "WV", name: "West Virginia" },
    Region { code: "WI", name: "Wisconsin" },
    Region { code: "WY", name: "Wyoming" },
];

// =========================================================================
// CANADIAN PROVINCES AND TERRITORIES
// =========================================================================

pub const CANADIAN_PROVINCES: &[Region] = &[
    Region { code: "AB", name: "Alberta" },
    Region { code: "BC", name: "British Columbia" },
    Region { code: "MB", name: "Manitoba" },
    Region { code: "NB", name: "New Brunswick" },
    Region { code: "NL", name: "Newfoundland and Labrador" },
    Region { code: "NS", name: "Nova Scotia" },
    Region { code: "NT", name: "Northwest Territories" },
    Region { code: "NU", name: "Nunavut" },
    Region { code: "ON", name: "Ontario" },
    Region { code: "PE", name: "Prince Edward Island" },
    Region { code: "QC", name: "Quebec" },
    Region { code: "SK", name: "Saskatchewan" },
    Region { code: "YT", name: "Yukon" },
];

// =========================================================================
// ARRL / RAC SECTIONS (Sweepstakes)
// =========================================================================

pub const SECTIONS: &[&str] = &[
    // Call area 1
    "CT", "EMA", "ME", "NH", "RI", "VT", "WMA",
    // 2
    "ENY", "NLI", "NNJ", "NNY", "SNJ", "WNY",
    // 3
    "DE", "EPA", "MDC", "WPA",
    // 4
    "AL", "GA", "KY", "NC", "NFL", "PR", "SC", "SFL", "TN", "VA", "VI", "WCF",
    // 5
    "AR", "LA", "MS", "NM", "NTX", "OK", "STX", "WTX",
    // 6
    "EB", "LAX", "ORG", "PAC", "SB", "SCV", "SDG", "SF", "SJV", "SV",
    // 7
    "AK", "AZ", "EWA", "ID", "MT", "NV", "OR", "UT", "WWA", "WY",
    // 8
    "MI", "OH", "WV",
    // 9
    "IL", "IN", "WI",
    // 0
    "CO", "IA", "KS", "MN", "MO", "NE", "ND", "SD",
    // Canada
    "AB", "BC", "GH", "MB", "NB", "NL", "NS", "ONE", "ONN", "ONS", "PE", "QC", "SK", "TER",
];

pub fn get_us_state(code: &str) -> Option<&'static Region> {
    US_STATES.iter().find(|s| s.code.eq_ignore_ascii_case(code.trim()))
}

pub fn get_canadian_province(code: &str) -> Option<&'static Region> {
    CANADIAN_PROVINCES
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code.trim()))
}

/// State or province abbreviation, as used by NAQP and ARRL DX
pub fn is_state_or_province(code: &str) -> bool {
    get_us_state(code).is_some() || get_canadian_province(code).is_some()
}

pub fn is_valid_section(code: &str) -> bool {
    let code = code.trim();
    SECTIONS.iter().any(|s| s.eq_ignore_ascii_case(code))
}
