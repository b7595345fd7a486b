// WPX prefix derivation
// Reference: CQ WPX contest rules, "Prefix Definition"
//
// The prefix is the letter/number combination forming the first part of the
// callsign: W1AW -> W1, JA1ABC -> JA1, S50A -> S50, 2E0XYZ -> 2E0.
// Portable designators replace the home prefix (VE3/W1AW -> VE3), a single
// digit replaces the call area (W1AW/4 -> W4), and calls without a digit get
// a zero (RAEM -> RA0).

/// Trailing designators that never carry a prefix
const SUFFIXES: &[&str] = &["P", "M", "MM", "AM", "QRP", "A", "B", "LH"];

/// WPX prefix of a callsign, `None` for calls that cannot carry one
pub fn wpx_prefix(call: &str) -> Option<String> {
    let upper = call.trim().to_uppercase();
    let parts: Vec<&str> = upper
        .split('/')
        .filter(|p| !p.is_empty() && !SUFFIXES.contains(p))
        .collect();

    match parts.as_slice() {
        [] => None,
        [base] => base_prefix(base),
        [first, second, ..] => {
            // W1AW/4: call-area change
            if second.len() == 1 && second.chars().all(|c| c.is_ascii_digit()) {
                let home = base_prefix(first)?;
                return Some(replace_area_digit(&home, second));
            }
            if first.len() == 1 && first.chars().all(|c| c.is_ascii_digit()) {
                let home = base_prefix(second)?;
                return Some(replace_area_digit(&home, first));
            }
            // The shorter part is the portable prefix
            let portable = if first.len() <= second.len() { first } else { second };
            if portable.chars().last().map_or(false, |c| c.is_ascii_digit()) {
                Some(portable.to_string())
            } else if portable.chars().any(|c| c.is_ascii_digit()) {
                base_prefix(portable)
            } else {
                Some(format!("{}0", portable))
            }
        }
    }
}

/// Prefix of a plain callsign: everything up to the digit that precedes
/// the final run of letters
fn base_prefix(call: &str) -> Option<String> {
    if !call.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let chars: Vec<char> = call.chars().collect();
    let suffix_start = chars
        .iter()
        .rposition(|c| c.is_ascii_digit())
        .map(|i| i + 1);

    match suffix_start {
        Some(end) if end == chars.len() => {
            // Trailing digits (DA0HQ-style specials aside): back up to the
            // last digit that follows a letter
            let letters_end = chars.iter().rposition(|c| c.is_ascii_alphabetic())?;
            let cut = chars[..letters_end]
                .iter()
                .rposition(|c| c.is_ascii_digit())
                .map(|i| i + 1)?;
            Some(chars[..cut].iter().collect())
        }
        Some(end) => Some(chars[..end].iter().collect()),
        None if chars.len() >= 2 => Some(format!("{}0", chars[..2].iter().collect::<String>())),
        None => None,
    }
}

fn replace_area_digit(prefix: &str, digit: &str) -> String {
    let stem = prefix.trim_end_matches(|c: char| c.is_ascii_digit());
    format!("{}{}", stem, digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wpx(call: &str) -> String {
        wpx_prefix(call).unwrap_or_default()
    }

    #[test]
    fn test_plain_calls() {
        assert_eq!(wpx("W1AW"), "W1");
        assert_eq!(wpx("ja1abc"), "JA1");
        assert_eq!(wpx("N8BJQ"), "N8");
        assert_eq!(wpx("S50A"), "S50");
        assert_eq!(wpx("2E0XYZ"), "2E0");
        assert_eq!(wpx("9A1A"), "9A1");
        assert_eq!(wpx("KH6XX"), "KH6");
        assert_eq!(wpx("YT2000A"), "YT2000");
    }

    #[test]
    fn test_calls_without_digit() {
        assert_eq!(wpx("RAEM"), "RA0");
    }

    #[test]
    fn test_portable_calls() {
        assert_eq!(wpx("VE3/W1AW"), "VE3");
        assert_eq!(wpx("W1AW/KH6"), "KH6");
        assert_eq!(wpx("W1AW/4"), "W4");
        assert_eq!(wpx("W1AW/P"), "W1");
        assert_eq!(wpx("PA/DJ1ABC"), "PA0");
        assert_eq!(wpx("N8BJQ/QRP"), "N8");
    }

    #[test]
    fn test_unusable_calls() {
        assert_eq!(wpx_prefix(""), None);
        assert_eq!(wpx_prefix("/P"), None);
        assert_eq!(wpx_prefix("W"), None);
    }
}
