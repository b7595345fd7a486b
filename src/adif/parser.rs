// ADIF Parser
// Reads .adi files exported by other loggers for import into a contest
// session.
//
// Accepts files with no header, lower-case tags, free text and `//`
// comments between fields, and a truncated last field.

use std::collections::HashMap;

/// A single ADIF record (one QSO)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdifRecord {
    /// All fields as key-value pairs (uppercase keys)
    pub fields: HashMap<String, String>,
}

impl AdifRecord {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Get a field value (case-insensitive lookup)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_uppercase()).map(|s| s.as_str())
    }

    /// Field value, `None` when missing or blank
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    pub fn call(&self) -> Option<&str> {
        self.non_empty("CALL")
    }
    pub fn band(&self) -> Option<&str> {
        self.non_empty("BAND")
    }
    pub fn submode(&self) -> Option<&str> {
        self.non_empty("SUBMODE")
    }
    /// FREQ in MHz
    pub fn freq_mhz(&self) -> Option<f64> {
        self.non_empty("FREQ").and_then(|s| s.parse().ok())
    }
    pub fn cqz(&self) -> Option<i64> {
        self.non_empty("CQZ").and_then(|s| s.parse().ok())
    }
    pub fn state(&self) -> Option<&str> {
        self.non_empty("STATE")
    }
    pub fn arrl_sect(&self) -> Option<&str> {
        self.non_empty("ARRL_SECT")
    }
    pub fn gridsquare(&self) -> Option<&str> {
        self.non_empty("GRIDSQUARE")
    }
}

/// Parsed ADIF file
#[derive(Debug, Clone, Default)]
pub struct AdifFile {
    /// Header fields (before <EOH>)
    pub header: HashMap<String, String>,
    /// QSO records
    pub records: Vec<AdifRecord>,
}

impl AdifFile {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Byte offset of `tag` in `haystack`, ignoring ASCII case
fn find_tag(haystack: &str, tag: &str) -> Option<usize> {
    let tag = tag.as_bytes();
    haystack
        .as_bytes()
        .windows(tag.len())
        .position(|w| w.eq_ignore_ascii_case(tag))
}

/// Parse an ADIF string into records. Records without a CALL field are
/// dropped.
pub fn parse_adif(content: &str) -> AdifFile {
    let mut file = AdifFile::new();

    let body_start = match find_tag(content, "<EOH>") {
        Some(eoh_pos) => {
            parse_fields_into(&content[..eoh_pos], &mut file.header);
            eoh_pos + "<EOH>".len()
        }
        // No header, start from beginning
        None => 0,
    };

    let mut rest = &content[body_start..];
    while let Some(eor_offset) = find_tag(rest, "<EOR>") {
        let record_str = &rest[..eor_offset];
        if !record_str.trim().is_empty() {
            let mut record = AdifRecord::new();
            parse_fields_into(record_str, &mut record.fields);
            if record.get("CALL").is_some() {
                file.records.push(record);
            } else {
                log::debug!("Skipping ADIF record without CALL");
            }
        }
        rest = &rest[eor_offset + "<EOR>".len()..];
    }

    file
}

/// Value of `length` bytes starting at `pos`. A length that ends inside a
/// multi-byte character is read as a character count instead.
fn take_value(content: &str, pos: usize, length: usize) -> Option<(&str, usize)> {
    let tail = content.get(pos..)?;
    if let Some(value) = tail.get(..length) {
        return Some((value, length));
    }
    let end = tail
        .char_indices()
        .nth(length)
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    tail.get(..end).map(|value| (value, end))
}

/// Parse ADIF fields from a string section into a HashMap
fn parse_fields_into(content: &str, map: &mut HashMap<String, String>) {
    let mut pos = 0;

    while pos < content.len() {
        // Find next '<'
        match content[pos..].find('<') {
            Some(offset) => pos += offset + 1,
            None => break,
        }

        // Find matching '>'
        let field_end = match content[pos..].find('>') {
            Some(offset) => pos + offset,
            None => break,
        };

        let field_spec = &content[pos..field_end];
        pos = field_end + 1;

        // NAME:LENGTH or NAME:LENGTH:TYPE
        let mut parts = field_spec.split(':');
        let field_name = parts.next().unwrap_or("").trim().to_ascii_uppercase();
        if field_name.is_empty() || field_name == "EOH" || field_name == "EOR" {
            continue;
        }

        let length: usize = parts.next().and_then(|l| l.trim().parse().ok()).unwrap_or(0);
        if length == 0 {
            map.insert(field_name, String::new());
            continue;
        }

        match take_value(content, pos, length) {
            Some((value, consumed)) => {
                map.insert(field_name, value.to_string());
                pos += consumed;
            }
            None => break,
        }
    }
}
