//! Pipeline orchestrator.
//!
//! Stages run in order:
//! 1. **Loading**: fetch the sheet and drop its header row
//! 2. **Filtering**: keep rows of the requested school, if any
//! 3. **ModeSelect**: a school filter selects archive delivery
//! 4. **Processing**: run the delivery loop(s)
//! 5. **Finalizing**: finish the archive or save the merged document
//!
//! The last stage reached (`Done` or `Failed`) is stored in the report.

use std::thread;
use std::time::Instant;

use certgen_ingest::{GroupFilter, filter_rows, load_sheet};
use certgen_model::{
    ArchiveSummary, DeliveryMode, DeliveryPass, PipelineStage, RunConfiguration, RunReport,
    SourceRow,
};
use certgen_output::{ARCHIVE_FILE_NAME, CertificateArchive, MERGED_FILE_NAME, Mailer};
use certgen_render::{RunDates, TemplateRenderer};
use tracing::{error, info, info_span, warn};

use crate::delivery::{DeliveryContext, archive_pass, email_pass, merge_pass};
use crate::error::PipelineError;
use crate::settings::{PipelineSettings, Services};

/// Run one batch end to end.
///
/// Returns the report on completion, including runs where individual rows
/// failed. Returns an error only for failures that abort the whole run.
pub fn run_pipeline(
    config: &RunConfiguration,
    settings: &PipelineSettings,
    services: Services<'_>,
) -> Result<RunReport, PipelineError> {
    let span = info_span!(
        "run",
        sheet_id = %config.sheet_id,
        range = %config.sheet_range
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = RunReport::new(config.delivery_mode());
    if config.date_range.is_inverted() {
        warn!(
            start = %config.date_range.start,
            end = %config.date_range.end,
            "end date precedes start date"
        );
    }

    match execute(config, settings, services, &mut report) {
        Ok(()) => {
            enter(&mut report, PipelineStage::Done);
            info!(
                mode = %report.mode,
                rows = report.rows_selected,
                failures = report.has_row_failures(),
                duration_ms = start.elapsed().as_millis(),
                "run complete"
            );
            Ok(report)
        }
        Err(err) => {
            enter(&mut report, PipelineStage::Failed);
            error!(stage = %err.stage(), error = %err, "run failed");
            Err(err)
        }
    }
}

fn enter(report: &mut RunReport, stage: PipelineStage) {
    info!(from = %report.stage, to = %stage, "pipeline stage");
    report.stage = stage;
}

fn execute(
    config: &RunConfiguration,
    settings: &PipelineSettings,
    services: Services<'_>,
    report: &mut RunReport,
) -> Result<(), PipelineError> {
    enter(report, PipelineStage::Loading);
    let stage_start = Instant::now();
    let table = load_sheet(services.sheets, &config.sheet_id, &config.sheet_range)?;
    report.rows_loaded = table.len();
    if table.is_empty() {
        warn!("sheet has no data rows");
    }
    info!(
        rows = table.len(),
        duration_ms = stage_start.elapsed().as_millis(),
        "rows loaded"
    );

    enter(report, PipelineStage::Filtering);
    let filter = config.selected_group().and_then(GroupFilter::parse);
    let rows = filter_rows(table.rows, filter.as_ref());
    report.rows_selected = rows.len();
    info!(
        school = filter.as_ref().map_or("(all)", GroupFilter::school),
        selected = rows.len(),
        "rows selected"
    );

    enter(report, PipelineStage::ModeSelect);
    let mode = config.delivery_mode();
    report.mode = mode;
    let mailer = match mode {
        DeliveryMode::EmailAndMerge => Some(services.mailer.ok_or(PipelineError::MissingMailer)?),
        DeliveryMode::Archive => None,
    };
    info!(mode = %mode, "delivery mode selected");

    enter(report, PipelineStage::Processing);
    let scratch = tempfile::Builder::new()
        .prefix("certgen-")
        .tempdir()
        .map_err(PipelineError::Scratch)?;
    let dates = RunDates::new(&config.date_range);
    let ctx = DeliveryContext {
        renderer: TemplateRenderer::new(
            services.templates,
            settings.template_id.as_str(),
            settings.folder_id.as_str(),
        ),
        dates: dates.as_formatted(),
        settings,
        scratch: scratch.path(),
    };

    match mailer {
        Some(mailer) => email_and_merge(&ctx, mailer, &rows, report),
        None => archive(&ctx, &rows, report),
    }
}

fn email_and_merge(
    ctx: &DeliveryContext<'_>,
    mailer: &dyn Mailer,
    rows: &[SourceRow],
    report: &mut RunReport,
) -> Result<(), PipelineError> {
    let pass_start = Instant::now();
    email_pass(ctx, mailer, rows, report);
    info!(
        delivered = report.delivered(DeliveryPass::Email),
        skipped = report.skipped(DeliveryPass::Email),
        failed = report.failed(DeliveryPass::Email),
        duration_ms = pass_start.elapsed().as_millis(),
        "email pass finished"
    );

    if !rows.is_empty() {
        thread::sleep(ctx.settings.pass_delay);
    }

    let pass_start = Instant::now();
    let merger = merge_pass(ctx, rows, report);
    info!(
        delivered = report.delivered(DeliveryPass::Merge),
        skipped = report.skipped(DeliveryPass::Merge),
        failed = report.failed(DeliveryPass::Merge),
        duration_ms = pass_start.elapsed().as_millis(),
        "merge pass finished"
    );

    enter(report, PipelineStage::Finalizing);
    if merger.is_empty() {
        warn!("no certificates merged, {MERGED_FILE_NAME} not written");
        return Ok(());
    }
    let path = ctx.settings.output_dir.join(MERGED_FILE_NAME);
    let pages = merger.page_count();
    merger.save(&path).map_err(PipelineError::MergeSave)?;
    info!(path = %path.display(), pages, "merged document saved");
    report.merged_document = Some(path);
    Ok(())
}

fn archive(
    ctx: &DeliveryContext<'_>,
    rows: &[SourceRow],
    report: &mut RunReport,
) -> Result<(), PipelineError> {
    let path = ctx.settings.output_dir.join(ARCHIVE_FILE_NAME);
    let mut archive = CertificateArchive::create(&path).map_err(PipelineError::ArchiveCreate)?;

    let pass_start = Instant::now();
    let generated = archive_pass(ctx, &mut archive, rows, report);
    info!(
        generated,
        skipped = report.skipped(DeliveryPass::Archive),
        failed = report.failed(DeliveryPass::Archive),
        duration_ms = pass_start.elapsed().as_millis(),
        "archive pass finished"
    );

    enter(report, PipelineStage::Finalizing);
    let finished = archive.finish().map_err(PipelineError::ArchiveFinalize)?;
    info!(
        path = %finished.path.display(),
        entries = finished.entries.len(),
        bytes = finished.bytes,
        "archive written"
    );
    report.archive = Some(ArchiveSummary {
        path: finished.path,
        entries: finished.entries.len(),
        bytes: finished.bytes,
    });
    Ok(())
}
