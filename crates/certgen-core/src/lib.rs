//! Certificate pipeline orchestration.
//!
//! [`run_pipeline`] loads participant rows, applies the optional school
//! filter, picks the delivery mode and drives one of the delivery loops:
//!
//! - **Email + merge**: email each certificate, then render every row again
//!   into one merged PDF.
//! - **Archive**: package the filtered group into one zip file.
//!
//! Row-level failures are recorded in the [`RunReport`](certgen_model::RunReport)
//! and never stop the loop. Only the failures listed on [`PipelineError`]
//! abort a run.

mod delivery;
mod error;
mod pipeline;
mod settings;

pub use error::PipelineError;
pub use pipeline::run_pipeline;
pub use settings::{
    DEFAULT_PASS_DELAY, DEFAULT_SEND_DELAY, PipelineSettings, REDACTED_VALUE, Services,
};
