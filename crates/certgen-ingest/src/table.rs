use certgen_model::SourceRow;

use crate::normalize::normalize_cell;

/// Sheet contents with the header split off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub header: Vec<String>,
    pub rows: Vec<SourceRow>,
}

impl SheetTable {
    /// Split raw values into header (index 0) and numbered data rows.
    ///
    /// The header is always dropped by position, whatever it contains.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        let mut values = values.into_iter();
        let header = values
            .next()
            .map(|cells| cells.iter().map(|c| normalize_cell(c)).collect())
            .unwrap_or_default();
        let rows = values
            .enumerate()
            .map(|(idx, cells)| SourceRow::new(idx + 2, cells))
            .collect();
        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
