//! Placeholder tokens and their replacement values.

use std::fmt;

use certgen_model::{DateRange, ParticipantRecord};

use crate::date::format_readable_date;

/// Literal tokens the certificate template contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Name,
    SchoolName,
    WebinarName,
    Date,
    DateTo,
    CertNumber,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Self::Name,
        Self::SchoolName,
        Self::WebinarName,
        Self::Date,
        Self::DateTo,
        Self::CertNumber,
    ];

    /// Exact, case-sensitive text matched in the template.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Name => "{{Name}}",
            Self::SchoolName => "{{SchoolName}}",
            Self::WebinarName => "{{WebinarName}}",
            Self::Date => "{{Date}}",
            Self::DateTo => "{{Dateto}}",
            Self::CertNumber => "{{CERT-NUMBER}}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One global exact-text replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub placeholder: Placeholder,
    pub replacement: String,
}

impl Substitution {
    pub fn token(&self) -> &'static str {
        self.placeholder.token()
    }
}

/// Values printed on one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFields {
    pub name: String,
    pub school: String,
    pub program: String,
    pub start_date: String,
    pub end_date: String,
    pub certificate_number: String,
}

impl CertificateFields {
    pub fn new(record: &ParticipantRecord, dates: FormattedDates<'_>) -> Self {
        Self {
            name: record.name.clone(),
            school: record.school.clone(),
            program: record.domain.clone(),
            start_date: dates.start.to_string(),
            end_date: dates.end.to_string(),
            certificate_number: record.certificate_number.clone(),
        }
    }

    pub fn value(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Name => &self.name,
            Placeholder::SchoolName => &self.school,
            Placeholder::WebinarName => &self.program,
            Placeholder::Date => &self.start_date,
            Placeholder::DateTo => &self.end_date,
            Placeholder::CertNumber => &self.certificate_number,
        }
    }

    /// One substitution per placeholder, in template order.
    pub fn substitutions(&self) -> Vec<Substitution> {
        Placeholder::ALL
            .iter()
            .map(|&placeholder| Substitution {
                placeholder,
                replacement: self.value(placeholder).to_string(),
            })
            .collect()
    }
}

/// Date strings shared by every certificate of a run.
#[derive(Debug, Clone, Copy)]
pub struct FormattedDates<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

/// Owned pair of formatted dates, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDates {
    start: String,
    end: String,
}

impl RunDates {
    pub fn new(range: &DateRange) -> Self {
        Self {
            start: format_readable_date(range.start),
            end: format_readable_date(range.end),
        }
    }

    pub fn as_formatted(&self) -> FormattedDates<'_> {
        FormattedDates {
            start: &self.start,
            end: &self.end,
        }
    }
}
