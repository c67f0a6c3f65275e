//! Fatal pipeline errors.

use certgen_ingest::SheetError;
use certgen_model::PipelineStage;
use certgen_output::OutputError;
use thiserror::Error;

/// Failures that abort a run. Everything else is recorded per row.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SheetError),

    #[error("email delivery requires a configured mailer")]
    MissingMailer,

    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("failed to create archive: {0}")]
    ArchiveCreate(#[source] OutputError),

    #[error("failed to finalize archive: {0}")]
    ArchiveFinalize(#[source] OutputError),

    #[error("failed to save merged document: {0}")]
    MergeSave(#[source] OutputError),
}

impl PipelineError {
    /// Stage the run was in when it failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::Source(_) => PipelineStage::Loading,
            Self::MissingMailer => PipelineStage::ModeSelect,
            Self::Scratch(_) | Self::ArchiveCreate(_) => PipelineStage::Processing,
            Self::ArchiveFinalize(_) | Self::MergeSave(_) => PipelineStage::Finalizing,
        }
    }
}
