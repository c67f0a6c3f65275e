//! Certificate rendering.
//!
//! A certificate is produced from a template presentation in four remote
//! steps: duplicate the template, replace the placeholder tokens, export
//! the duplicate as PDF, and trash the duplicate. The steps go through the
//! [`TemplateService`] trait so the pipeline does not depend on a concrete
//! document backend.

pub mod date;
pub mod error;
pub mod placeholder;
pub mod renderer;
pub mod service;

pub use date::{format_readable_date, ordinal_suffix};
pub use error::{RenderError, RenderStep};
pub use placeholder::{CertificateFields, FormattedDates, Placeholder, RunDates, Substitution};
pub use renderer::{RenderedCertificate, TemplateRenderer};
pub use service::{DocumentId, ExportFormat, TemplateService};
