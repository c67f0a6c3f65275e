//! Template backend contract.

use std::fmt;

use certgen_model::ServiceResult;

use crate::placeholder::Substitution;

/// Identifier of a document in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Export target of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
}

impl ExportFormat {
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
        }
    }
}

/// Remote template operations used to render one certificate.
pub trait TemplateService {
    /// Copy `template` into `folder` under `name`, returning the copy's id.
    fn duplicate(&self, template: &DocumentId, folder: &str, name: &str)
    -> ServiceResult<DocumentId>;

    /// Replace every occurrence of each token, matching case exactly.
    fn replace_all_text(&self, document: &DocumentId, substitutions: &[Substitution])
    -> ServiceResult<()>;

    /// Export the document and return its bytes.
    fn export(&self, document: &DocumentId, format: ExportFormat) -> ServiceResult<Vec<u8>>;

    /// Move the document to the trash.
    fn trash(&self, document: &DocumentId) -> ServiceResult<()>;
}
