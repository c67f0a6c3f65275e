//! Certificate emails.

use std::fmt;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Subject line of every certificate email.
pub const CERTIFICATE_SUBJECT: &str = "Summer Internship Completion Certificate";

/// Sender used when none is configured.
pub const DEFAULT_SENDER: &str = "\"GeniusHub - Unleash your Genius\" <Certificate@geniushub.in>";

/// SMTP command timeout.
const SMTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachment: EmailAttachment,
}

/// Mail transport contract. Implementations send synchronously.
pub trait Mailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// HTML body of the certificate email; only the name varies.
pub fn certificate_email_body(name: &str) -> String {
    format!(
        "Dear {name},<br><br>\n\
         Greetings from GeniusHub!!<br><br>\n\
         We sincerely appreciate your participation in the <b>GeniusHub Summer Internship Program - 2025</b>. \
         Your dedication and hard work have been truly commendable.<br><br>\n\
         As a token of our appreciation, please find your <b>Internship Completion Certificate</b> attached. \
         We wish you all the best in your future endeavors.<br><br>\n\
         We are also excited to announce our <b>upcoming Autumn Internship Program</b> starting from October, \
         offering opportunities to learn, grow, and work on exciting projects.<br><br>\n\
         Secure your spot through: <a href=\"https://forms.gle/XjwGdJPuVydMy7xq7\" target=\"_blank\">https://forms.gle/XjwGdJPuVydMy7xq7</a> \
         and continue your journey with us to gain a real-world edge for your portfolio.<br><br>\n\
         Looking forward to welcoming you again.<br><br>\n\
         <b>Best Regards,</b><br><br>\n\
         <b>Nisha Jain</b><br>\n\
         <b>Internships Program Manager</b><br>\n\
         <b>+91-9873331785</b><br>\n\
         <img src=\"https://upload.wikimedia.org/wikipedia/commons/a/a5/Instagram_icon.png\" alt=\"Instagram\" \
         width=\"20\" height=\"20\" style=\"vertical-align:middle;\">\n\
         <a href=\"https://www.instagram.com/geniushub_internships\" target=\"_blank\">@geniushub_internships</a><br>\n\
         <a href=\"https://www.geniushub.in/\" target=\"_blank\">https://www.geniushub.in</a>"
    )
}

/// Compose the certificate email for one participant.
pub fn certificate_email(
    to: &str,
    name: &str,
    filename: &str,
    mime_type: &str,
    bytes: Vec<u8>,
) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: CERTIFICATE_SUBJECT.to_string(),
        html_body: certificate_email_body(name),
        attachment: EmailAttachment {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        },
    }
}

/// SMTP relay settings.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `"Name" <addr@example.com>`.
    pub sender: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sender", &self.sender)
            .finish()
    }
}

/// Mailer backed by an authenticated SMTP relay (implicit TLS).
pub struct SmtpMailer {
    transport: SmtpTransport,
    sender: Mailbox,
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|e: lettre::address::AddressError| OutputError::Address {
        address: address.to_string(),
        message: e.to_string(),
    })
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let sender = parse_mailbox(&settings.sender)?;
        let transport = SmtpTransport::relay(&settings.host)?
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();
        Ok(Self { transport, sender })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message> {
        build_message(&self.sender, email)
    }
}

fn build_message(sender: &Mailbox, email: &OutgoingEmail) -> Result<Message> {
    let content_type =
        ContentType::parse(&email.attachment.mime_type).map_err(|e| OutputError::Message(e.to_string()))?;
    let attachment = Attachment::new(email.attachment.filename.clone())
        .body(email.attachment.bytes.clone(), content_type);
    let message = Message::builder()
        .from(sender.clone())
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.clone())
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::html(email.html_body.clone()))
                .singlepart(attachment),
        )?;
    Ok(message)
}

impl Mailer for SmtpMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = self.build_message(email)?;
        let response = self.transport.send(&message)?;
        debug!(code = %response.code(), "smtp accepted message");
        Ok(())
    }
}
