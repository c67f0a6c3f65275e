//! Spreadsheet source contract.

use std::time::Instant;

use certgen_model::ServiceError;
use thiserror::Error;
use tracing::{debug, info_span};

use crate::table::SheetTable;

/// A store that returns spreadsheet rows as ordered string cells.
pub trait SheetSource {
    /// Fetch every row in `range` of spreadsheet `sheet_id`, header included.
    fn fetch_rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, ServiceError>;
}

#[derive(Debug, Error)]
pub enum SheetError {
    /// The data source could not be read. Always fatal for a run.
    #[error("failed to read range '{range}' of sheet {sheet_id}: {source}")]
    Unreachable {
        sheet_id: String,
        range: String,
        #[source]
        source: ServiceError,
    },
}

/// Fetch a range and split off its header row.
pub fn load_sheet(
    source: &dyn SheetSource,
    sheet_id: &str,
    range: &str,
) -> Result<SheetTable, SheetError> {
    let _span = info_span!("load_sheet", sheet_id = %sheet_id, range = %range).entered();
    let start = Instant::now();
    let values = source
        .fetch_rows(sheet_id, range)
        .map_err(|source| SheetError::Unreachable {
            sheet_id: sheet_id.to_string(),
            range: range.to_string(),
            source,
        })?;
    let table = SheetTable::from_values(values);
    debug!(
        header_columns = table.header.len(),
        data_rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "sheet loaded"
    );
    Ok(table)
}
