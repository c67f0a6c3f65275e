//! Per-participant certificate rendering.

use std::time::Instant;

use certgen_model::ParticipantRecord;
use tracing::{debug, warn};

use crate::error::{RenderError, RenderStep};
use crate::placeholder::{CertificateFields, FormattedDates};
use crate::service::{DocumentId, ExportFormat, TemplateService};

/// An exported certificate for exactly one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCertificate {
    /// `{name}_{certificateNumber}.pdf`
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders certificates from one template into one destination folder.
pub struct TemplateRenderer<'a> {
    service: &'a dyn TemplateService,
    template: DocumentId,
    folder: String,
    format: ExportFormat,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(
        service: &'a dyn TemplateService,
        template: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            service,
            template: DocumentId::new(template),
            folder: folder.into(),
            format: ExportFormat::Pdf,
        }
    }

    /// Duplicate, fill, export, then trash the duplicate.
    ///
    /// The duplicate is trashed whether or not filling and exporting
    /// succeeded; a failed trash is logged and otherwise ignored.
    pub fn render(
        &self,
        record: &ParticipantRecord,
        dates: FormattedDates<'_>,
    ) -> Result<RenderedCertificate, RenderError> {
        let start = Instant::now();
        let fields = CertificateFields::new(record, dates);
        let document = self
            .service
            .duplicate(&self.template, &self.folder, &record.duplicate_name())
            .map_err(|source| RenderError::Service {
                step: RenderStep::Duplicate,
                source,
            })?;
        debug!(document = %document, "template duplicated");

        let exported = self.fill_and_export(&document, &fields);

        if let Err(error) = self.service.trash(&document) {
            warn!(
                document = %document,
                certificate = %record.certificate_number,
                error = %error,
                "failed to trash duplicate"
            );
        }

        let bytes = exported?;
        debug!(
            document = %document,
            bytes = bytes.len(),
            duration_ms = start.elapsed().as_millis(),
            "certificate rendered"
        );
        Ok(RenderedCertificate {
            file_name: record.certificate_file_name(),
            mime_type: self.format.mime_type(),
            bytes,
        })
    }

    fn fill_and_export(
        &self,
        document: &DocumentId,
        fields: &CertificateFields,
    ) -> Result<Vec<u8>, RenderError> {
        self.service
            .replace_all_text(document, &fields.substitutions())
            .map_err(|source| RenderError::Service {
                step: RenderStep::Substitute,
                source,
            })?;
        let bytes = self
            .service
            .export(document, self.format)
            .map_err(|source| RenderError::Service {
                step: RenderStep::Export,
                source,
            })?;
        if bytes.is_empty() {
            return Err(RenderError::EmptyExport {
                document: document.to_string(),
            });
        }
        Ok(bytes)
    }
}
