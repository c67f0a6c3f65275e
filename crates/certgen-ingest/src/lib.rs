//! Participant ingestion.
//!
//! Loads raw rows from a spreadsheet source, splits off the header row,
//! normalizes each row into a [`ParticipantRecord`](certgen_model::ParticipantRecord)
//! and applies the optional school filter.

pub mod filter;
pub mod normalize;
pub mod source;
pub mod table;

pub use filter::{GroupFilter, filter_rows};
pub use normalize::{normalize_cell, normalize_row, title_case};
pub use source::{SheetError, SheetSource, load_sheet};
pub use table::SheetTable;
