//! Per-recipient email pass.

use std::thread;

use certgen_ingest::normalize_row;
use certgen_model::{DeliveryPass, ParticipantRecord, RowStatus, RunReport, SourceRow};
use certgen_output::{Mailer, certificate_email};
use tracing::{error, info, info_span, warn};

use super::{DeliveryContext, RowError, missing_reason, outcome};

/// Render and email one certificate per row, pausing after every send.
pub(crate) fn email_pass(
    ctx: &DeliveryContext<'_>,
    mailer: &dyn Mailer,
    rows: &[SourceRow],
    report: &mut RunReport,
) {
    let total = rows.len();
    info!(total, "sending certificates by email");

    for (index, row) in rows.iter().enumerate() {
        let record = normalize_row(row);
        let _span = info_span!(
            "row",
            row = row.row_number,
            certificate = %record.certificate_number
        )
        .entered();

        let missing = record.missing_fields_for_email();
        if !missing.is_empty() {
            let reason = missing_reason(&missing);
            warn!(name = %record.name, reason = %reason, "row skipped");
            report.record(outcome(
                DeliveryPass::Email,
                row,
                &record,
                RowStatus::Skipped { reason },
            ));
            continue;
        }

        info!(position = index + 1, total, name = %record.name, "processing certificate");
        let status = match send_certificate(ctx, mailer, &record) {
            Ok(()) => {
                info!(
                    recipient = %ctx.settings.redact(&record.email),
                    "certificate emailed"
                );
                RowStatus::Delivered
            }
            Err(err) => {
                error!(name = %record.name, error = %err, "email delivery failed");
                RowStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };
        report.record(outcome(DeliveryPass::Email, row, &record, status));

        thread::sleep(ctx.settings.send_delay);
    }
}

fn send_certificate(
    ctx: &DeliveryContext<'_>,
    mailer: &dyn Mailer,
    record: &ParticipantRecord,
) -> Result<(), RowError> {
    let certificate = ctx.renderer.render(record, ctx.dates)?;
    let email = certificate_email(
        &record.email,
        &record.name,
        &certificate.file_name,
        certificate.mime_type,
        certificate.bytes,
    );
    mailer.send(&email)?;
    Ok(())
}
