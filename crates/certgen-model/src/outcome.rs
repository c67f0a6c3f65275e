//! Typed per-row results and the run report.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::run::DeliveryMode;

/// Orchestrator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    Idle,
    Loading,
    Filtering,
    ModeSelect,
    Processing,
    Finalizing,
    Done,
    Failed,
}

impl PipelineStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Filtering => "filtering",
            Self::ModeSelect => "mode_select",
            Self::Processing => "processing",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One loop over the selected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPass {
    Email,
    Merge,
    Archive,
}

impl DeliveryPass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Merge => "merge",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for DeliveryPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Delivered,
    Skipped { reason: String },
    Failed { reason: String },
}

impl RowStatus {
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Delivered => None,
            Self::Skipped { reason } | Self::Failed { reason } => Some(reason),
        }
    }
}

/// Result of processing one row in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub pass: DeliveryPass,
    pub row_number: usize,
    pub name: String,
    pub certificate_number: String,
    #[serde(flatten)]
    pub status: RowStatus,
}

/// Finalized zip archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: DeliveryMode,
    /// Data rows read from the sheet (header excluded).
    pub rows_loaded: usize,
    /// Rows left after the group filter.
    pub rows_selected: usize,
    pub outcomes: Vec<RowOutcome>,
    pub archive: Option<ArchiveSummary>,
    pub merged_document: Option<PathBuf>,
    pub stage: PipelineStage,
}

impl RunReport {
    pub fn new(mode: DeliveryMode) -> Self {
        Self {
            mode,
            rows_loaded: 0,
            rows_selected: 0,
            outcomes: Vec::new(),
            archive: None,
            merged_document: None,
            stage: PipelineStage::Idle,
        }
    }

    pub fn record(&mut self, outcome: RowOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes_for(&self, pass: DeliveryPass) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes.iter().filter(move |o| o.pass == pass)
    }

    pub fn delivered(&self, pass: DeliveryPass) -> usize {
        self.outcomes_for(pass)
            .filter(|o| matches!(o.status, RowStatus::Delivered))
            .count()
    }

    pub fn skipped(&self, pass: DeliveryPass) -> usize {
        self.outcomes_for(pass)
            .filter(|o| matches!(o.status, RowStatus::Skipped { .. }))
            .count()
    }

    pub fn failed(&self, pass: DeliveryPass) -> usize {
        self.outcomes_for(pass)
            .filter(|o| matches!(o.status, RowStatus::Failed { .. }))
            .count()
    }

    /// Passes this report has outcomes for, in pipeline order.
    pub fn passes(&self) -> Vec<DeliveryPass> {
        let mut passes: Vec<DeliveryPass> = self.outcomes.iter().map(|o| o.pass).collect();
        passes.sort();
        passes.dedup();
        passes
    }

    pub fn has_row_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, RowStatus::Failed { .. }))
    }
}
