//! Merged-document pass.

use certgen_ingest::normalize_row;
use certgen_model::{DeliveryPass, ParticipantRecord, RowStatus, RunReport, SourceRow};
use certgen_output::{PdfMerger, TransientFile};
use tracing::{debug, error, info, info_span, warn};

use super::{DeliveryContext, RowError, missing_reason, outcome};

/// Render every complete row and append it to a merge accumulator.
pub(crate) fn merge_pass(
    ctx: &DeliveryContext<'_>,
    rows: &[SourceRow],
    report: &mut RunReport,
) -> PdfMerger {
    let total = rows.len();
    info!(total, "building merged document");
    let mut merger = PdfMerger::new();

    for (index, row) in rows.iter().enumerate() {
        let record = normalize_row(row);
        let _span = info_span!(
            "row",
            row = row.row_number,
            certificate = %record.certificate_number
        )
        .entered();

        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            let reason = missing_reason(&missing);
            warn!(name = %record.name, reason = %reason, "row skipped");
            report.record(outcome(
                DeliveryPass::Merge,
                row,
                &record,
                RowStatus::Skipped { reason },
            ));
            continue;
        }

        info!(position = index + 1, total, name = %record.name, "processing certificate");
        let status = match append_certificate(ctx, &record, &mut merger) {
            Ok(()) => RowStatus::Delivered,
            Err(err) => {
                error!(name = %record.name, error = %err, "failed to merge certificate");
                RowStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };
        report.record(outcome(DeliveryPass::Merge, row, &record, status));
    }

    debug!(pages = merger.page_count(), "merge pass finished");
    merger
}

fn append_certificate(
    ctx: &DeliveryContext<'_>,
    record: &ParticipantRecord,
    merger: &mut PdfMerger,
) -> Result<(), RowError> {
    let certificate = ctx.renderer.render(record, ctx.dates)?;
    let file_name = format!("temp_{}", certificate.file_name);
    let file = TransientFile::write(ctx.scratch, &file_name, &certificate.bytes)?;
    let added = merger.add_file(file.path());
    file.remove();
    added?;
    Ok(())
}
