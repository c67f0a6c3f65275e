//! Per-run configuration.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Internship period printed on every certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when the end date precedes the start date.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

/// How certificates leave the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Email every participant, then build a merged master PDF.
    EmailAndMerge,
    /// Package the filtered group into one zip archive.
    Archive,
}

impl DeliveryMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmailAndMerge => "email + merged PDF",
            Self::Archive => "zip archive",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value upstream schedulers pass when no school was chosen.
pub const UNSET_GROUP: &str = "undefined";

/// Trimmed group name, or `None` for blank input and [`UNSET_GROUP`].
pub fn effective_group(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == UNSET_GROUP {
        None
    } else {
        Some(trimmed)
    }
}

/// What a single run processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub sheet_id: String,
    /// Sheet name or A1 range.
    pub sheet_range: String,
    pub date_range: DateRange,
    /// School name restricting the run; selects archive delivery.
    pub group_filter: Option<String>,
}

impl RunConfiguration {
    /// The group the run is restricted to, ignoring blank and unset values.
    pub fn selected_group(&self) -> Option<&str> {
        self.group_filter.as_deref().and_then(effective_group)
    }

    /// The selected group is the only switch between delivery modes.
    pub fn delivery_mode(&self) -> DeliveryMode {
        if self.selected_group().is_some() {
            DeliveryMode::Archive
        } else {
            DeliveryMode::EmailAndMerge
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(filter: Option<&str>) -> RunConfiguration {
        RunConfiguration {
            sheet_id: "sheet".to_string(),
            sheet_range: "Sheet1".to_string(),
            date_range: DateRange::new(
                NaiveDate::from_ymd_opt(2025, 6, 21).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
            ),
            group_filter: filter.map(str::to_string),
        }
    }

    #[test]
    fn filter_selects_mode() {
        assert_eq!(config(None).delivery_mode(), DeliveryMode::EmailAndMerge);
        assert_eq!(
            config(Some("ABC School")).delivery_mode(),
            DeliveryMode::Archive
        );
    }

    #[test]
    fn unset_or_blank_group_selects_email() {
        for raw in ["undefined", "   ", " undefined ", ""] {
            let cfg = config(Some(raw));
            assert_eq!(cfg.selected_group(), None);
            assert_eq!(cfg.delivery_mode(), DeliveryMode::EmailAndMerge);
        }
        assert_eq!(config(Some(" ABC ")).selected_group(), Some("ABC"));
    }

    #[test]
    fn inverted_range_is_detected() {
        let mut cfg = config(None);
        assert!(!cfg.date_range.is_inverted());
        std::mem::swap(&mut cfg.date_range.start, &mut cfg.date_range.end);
        assert!(cfg.date_range.is_inverted());
    }
}
