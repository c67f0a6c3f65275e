//! Participant records read from the spreadsheet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One raw spreadsheet row with its 1-based sheet row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    /// Sheet row number (the header is row 1).
    pub row_number: usize,
    /// Cell values in column order.
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(row_number: usize, cells: Vec<String>) -> Self {
        Self { row_number, cells }
    }

    /// Cell at `index`, or "" when the row is shorter.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A normalized participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    /// Only needed for email delivery.
    pub email: String,
    /// Title-cased school name.
    pub school: String,
    /// Title-cased program domain.
    pub domain: String,
    /// Upper-cased certificate number.
    pub certificate_number: String,
}

/// Fields a record must carry before a certificate is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequiredField {
    Name,
    Email,
    School,
    CertificateNumber,
}

impl RequiredField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::School => "school",
            Self::CertificateNumber => "certificate number",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ParticipantRecord {
    /// Required fields that are empty. Email is not part of this set.
    pub fn missing_required_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.school.is_empty() {
            missing.push(RequiredField::School);
        }
        if self.certificate_number.is_empty() {
            missing.push(RequiredField::CertificateNumber);
        }
        missing
    }

    /// Required fields for email delivery, including the address.
    pub fn missing_fields_for_email(&self) -> Vec<RequiredField> {
        let mut missing = self.missing_required_fields();
        if self.email.is_empty() {
            missing.push(RequiredField::Email);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// Attachment and archive entry name: `{name}_{certificateNumber}.pdf`.
    ///
    /// Path separators are replaced so the name is always a single path
    /// component.
    pub fn certificate_file_name(&self) -> String {
        let raw = format!("{}_{}.pdf", self.name, self.certificate_number);
        raw.chars()
            .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
            .collect()
    }

    /// Name given to the remote template duplicate.
    pub fn duplicate_name(&self) -> String {
        format!("{} - Certificate", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, school: &str, cert: &str) -> ParticipantRecord {
        ParticipantRecord {
            name: name.to_string(),
            email: String::new(),
            school: school.to_string(),
            domain: "Python".to_string(),
            certificate_number: cert.to_string(),
        }
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let rec = record("", "", "C1");
        assert_eq!(
            rec.missing_required_fields(),
            vec![RequiredField::Name, RequiredField::School]
        );
        assert!(!rec.is_complete());
        assert!(record("Asha", "ABC", "C1").is_complete());
    }

    #[test]
    fn email_is_only_required_for_email_delivery() {
        let rec = record("Asha", "ABC", "C1");
        assert!(rec.missing_required_fields().is_empty());
        assert_eq!(rec.missing_fields_for_email(), vec![RequiredField::Email]);
    }

    #[test]
    fn file_name_uses_name_and_certificate() {
        assert_eq!(
            record("Asha", "ABC", "CERT01").certificate_file_name(),
            "Asha_CERT01.pdf"
        );
        assert_eq!(
            record("A/B", "ABC", "C\\1").certificate_file_name(),
            "A_B_C_1.pdf"
        );
    }

    #[test]
    fn short_rows_yield_empty_cells() {
        let row = SourceRow::new(2, vec!["Asha".to_string()]);
        assert_eq!(row.cell(0), "Asha");
        assert_eq!(row.cell(4), "");
    }
}
