//! Rendering errors.

use std::fmt;

use certgen_model::ServiceError;
use thiserror::Error;

/// Remote step that failed while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Duplicate,
    Substitute,
    Export,
}

impl RenderStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate template",
            Self::Substitute => "replace placeholders",
            Self::Export => "export document",
        }
    }
}

impl fmt::Display for RenderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A certificate could not be rendered. Never fatal for a run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to {step}: {source}")]
    Service {
        step: RenderStep,
        #[source]
        source: ServiceError,
    },

    /// The export succeeded but returned no bytes.
    #[error("exported document {document} is empty")]
    EmptyExport { document: String },
}

impl RenderError {
    pub fn step(&self) -> RenderStep {
        match self {
            Self::Service { step, .. } => *step,
            Self::EmptyExport { .. } => RenderStep::Export,
        }
    }
}
