//! Certificate output writers.
//!
//! - **Archive**: streaming deflate zip (`certificates.zip`)
//! - **Merge**: PDF page accumulator (`certificates.pdf`)
//! - **Mail**: certificate email composition and SMTP delivery
//! - **Transient files**: scratch PDFs removed once consumed

mod archive;
mod error;
mod mail;
mod merge;
mod transient;

pub use archive::{ARCHIVE_FILE_NAME, CertificateArchive, FinishedArchive};
pub use error::{OutputError, Result};
pub use mail::{
    CERTIFICATE_SUBJECT, DEFAULT_SENDER, EmailAttachment, Mailer, OutgoingEmail, SmtpMailer,
    SmtpSettings, certificate_email, certificate_email_body,
};
pub use merge::{MERGED_FILE_NAME, PdfMerger};
pub use transient::TransientFile;
