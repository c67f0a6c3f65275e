//! Archive pass.

use certgen_ingest::normalize_row;
use certgen_model::{DeliveryPass, ParticipantRecord, RowStatus, RunReport, SourceRow};
use certgen_output::{CertificateArchive, TransientFile};
use tracing::{error, info, info_span, warn};

use super::{DeliveryContext, RowError, missing_reason, outcome};

/// Render every complete row into `archive`. Returns the number of entries
/// generated by this pass.
pub(crate) fn archive_pass(
    ctx: &DeliveryContext<'_>,
    archive: &mut CertificateArchive,
    rows: &[SourceRow],
    report: &mut RunReport,
) -> usize {
    let total = rows.len();
    info!(total, path = %archive.path().display(), "generating certificate archive");
    let mut generated = 0;

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
                DeliveryPass::Archive,
                row,
                &record,
                RowStatus::Skipped { reason },
            ));
            continue;
        }

        info!(position = index + 1, total, name = %record.name, "processing certificate");
        let status = match add_certificate(ctx, &record, archive) {
            Ok(entry) => {
                generated += 1;
                info!(entry = %entry, generated, "certificate archived");
                RowStatus::Delivered
            }
            Err(err) => {
                error!(name = %record.name, error = %err, "failed to archive certificate");
                RowStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };
        report.record(outcome(DeliveryPass::Archive, row, &record, status));
    }

    generated
}

fn add_certificate(
    ctx: &DeliveryContext<'_>,
    record: &ParticipantRecord,
    archive: &mut CertificateArchive,
) -> Result<String, RowError> {
    let certificate = ctx.renderer.render(record, ctx.dates)?;
    let file = TransientFile::write(ctx.scratch, &certificate.file_name, &certificate.bytes)?;
    let added = archive.add_file(&certificate.file_name, file.path());
    file.remove();
    added?;
    Ok(certificate.file_name)
}
