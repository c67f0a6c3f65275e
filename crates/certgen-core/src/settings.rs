//! Run-wide settings and injected collaborators.

use std::path::PathBuf;
use std::time::Duration;

use certgen_ingest::SheetSource;
use certgen_output::Mailer;
use certgen_render::TemplateService;

/// Pause after every attempted email send.
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_secs(2);

/// Pause between the email pass and the merge pass.
pub const DEFAULT_PASS_DELAY: Duration = Duration::from_secs(2);

/// Placeholder logged instead of recipient addresses.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// External collaborators, constructed by the caller.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub sheets: &'a dyn SheetSource,
    pub templates: &'a dyn TemplateService,
    /// Required in email mode only.
    pub mailer: Option<&'a dyn Mailer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Template presentation id.
    pub template_id: String,
    /// Folder receiving the per-participant duplicates.
    pub folder_id: String,
    /// Directory receiving `certificates.zip` / `certificates.pdf`.
    pub output_dir: PathBuf,
    pub send_delay: Duration,
    pub pass_delay: Duration,
    /// Log recipient addresses instead of redacting them.
    pub log_data: bool,
}

impl PipelineSettings {
    pub fn new(
        template_id: impl Into<String>,
        folder_id: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            folder_id: folder_id.into(),
            output_dir: output_dir.into(),
            send_delay: DEFAULT_SEND_DELAY,
            pass_delay: DEFAULT_PASS_DELAY,
            log_data: false,
        }
    }

    #[must_use]
    pub fn with_delays(mut self, send_delay: Duration, pass_delay: Duration) -> Self {
        self.send_delay = send_delay;
        self.pass_delay = pass_delay;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Returns `value` when data logging is enabled, otherwise a redacted token.
    pub(crate) fn redact<'v>(&self, value: &'v str) -> &'v str {
        if self.log_data { value } else { REDACTED_VALUE }
    }
}
