//! School (group) filter.

use certgen_model::{SourceRow, effective_group};

use crate::normalize::school_cell;

/// Case-insensitive school match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFilter {
    school: String,
    key: String,
}

impl GroupFilter {
    /// Returns `None` for blank input and for the literal "undefined",
    /// which upstream schedulers pass when no school was chosen.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = effective_group(raw)?;
        Some(Self {
            school: trimmed.to_string(),
            key: trimmed.to_uppercase(),
        })
    }

    pub fn school(&self) -> &str {
        &self.school
    }

    pub fn matches(&self, school: &str) -> bool {
        school.trim().to_uppercase() == self.key
    }
}

/// Keep rows whose school cell matches the filter; keep all rows without one.
pub fn filter_rows(rows: Vec<SourceRow>, filter: Option<&GroupFilter>) -> Vec<SourceRow> {
    match filter {
        Some(filter) => rows
            .into_iter()
            .filter(|row| filter.matches(&school_cell(row)))
            .collect(),
        None => rows,
    }
}
