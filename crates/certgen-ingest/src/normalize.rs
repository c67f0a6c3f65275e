//! Row normalization.

use certgen_model::{ParticipantRecord, SourceRow};

const NAME: usize = 0;
const EMAIL: usize = 1;
const SCHOOL: usize = 2;
const DOMAIN: usize = 3;
const CERTIFICATE: usize = 4;

/// Trim whitespace and stray byte-order marks from a cell.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// ASCII word character, as in a regex `\w` without Unicode classes.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Upper-case the first character of every word, leaving the rest as-is.
///
/// A word is a run of ASCII letters, digits or underscores, so
/// "e-learning" becomes "E-Learning" and "ABC school" becomes "ABC School".
/// Non-ASCII characters are copied unchanged and end a word. Only ASCII
/// letters are ever upper-cased, so applying it twice gives the same
/// result as applying it once.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        let word = is_word_char(ch);
        if word && !in_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        in_word = word;
    }
    out
}

/// Build a participant record from a raw row. Never fails; missing
/// cells become empty strings and validity is judged by the caller.
pub fn normalize_row(row: &SourceRow) -> ParticipantRecord {
    ParticipantRecord {
        name: normalize_cell(row.cell(NAME)),
        email: normalize_cell(row.cell(EMAIL)),
        school: title_case(&normalize_cell(row.cell(SCHOOL))),
        domain: title_case(&normalize_cell(row.cell(DOMAIN))),
        certificate_number: normalize_cell(row.cell(CERTIFICATE)).to_uppercase(),
    }
}

/// Raw school cell, used by the group filter before title-casing.
pub(crate) fn school_cell(row: &SourceRow) -> String {
    normalize_cell(row.cell(SCHOOL))
}
