//! Delivery loops, one per pass.

mod archive;
mod email;
mod merge;

use std::path::Path;

use certgen_model::{DeliveryPass, ParticipantRecord, RequiredField, RowOutcome, RowStatus, SourceRow};
use certgen_output::OutputError;
use certgen_render::{FormattedDates, RenderError, TemplateRenderer};
use thiserror::Error;

use crate::settings::PipelineSettings;

pub(crate) use archive::archive_pass;
pub(crate) use email::email_pass;
pub(crate) use merge::merge_pass;

/// Everything a pass needs besides the rows.
pub(crate) struct DeliveryContext<'a> {
    pub renderer: TemplateRenderer<'a>,
    pub dates: FormattedDates<'a>,
    pub settings: &'a PipelineSettings,
    /// Per-run scratch directory for transient files.
    pub scratch: &'a Path,
}

/// Failure of one row. Recorded, never propagated past the loop.
#[derive(Debug, Error)]
enum RowError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn missing_reason(missing: &[RequiredField]) -> String {
    let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    format!("missing {}", labels.join(", "))
}

fn outcome(
    pass: DeliveryPass,
    row: &SourceRow,
    record: &ParticipantRecord,
    status: RowStatus,
) -> RowOutcome {
    RowOutcome {
        pass,
        row_number: row.row_number,
        name: record.name.clone(),
        certificate_number: record.certificate_number.clone(),
        status,
    }
}
