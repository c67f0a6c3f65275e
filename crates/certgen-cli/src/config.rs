//! Environment configuration.
//!
//! Values come from the process environment, after an optional `.env` file
//! in the working directory has been loaded. Blank values count as unset.

use std::env;
use std::path::PathBuf;

use certgen_google::{AccessToken, GoogleCredentials, OAuthCredentials};
use certgen_output::{DEFAULT_SENDER, SmtpSettings};
use thiserror::Error;

/// SMTP relay used when `SMTP_HOST` is unset.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct CertgenConfig {
    pub template_id: String,
    pub folder_id: String,
    pub google: GoogleCredentials,
    /// Present when `EMAIL` and `PASSWORD` are both set.
    pub mail: Option<SmtpSettings>,
    missing_mail: Option<&'static str>,
}

/// Load `.env` if present, returning its path. A missing file is not an error.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(error),
    }
}

impl CertgenConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let template_id = require("TEMPLATE_ID")?;
        let folder_id = require("FOLDER_ID")?;

        let google = match get("GOOGLE_ACCESS_TOKEN") {
            Some(token) => GoogleCredentials::AccessToken(AccessToken::new(token)),
            None => GoogleCredentials::RefreshToken(OAuthCredentials {
                client_id: require("CLIENT_ID")?,
                client_secret: require("CLIENT_SECRET")?,
                refresh_token: require("REFRESH_TOKEN")?,
            }),
        };

        let missing_mail = ["EMAIL", "PASSWORD"]
            .into_iter()
            .find(|key| get(*key).is_none());
        let mail = match (get("EMAIL"), get("PASSWORD")) {
            (Some(username), Some(password)) => Some(SmtpSettings {
                host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                username,
                password,
                sender: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            template_id,
            folder_id,
            google,
            mail,
            missing_mail,
        })
    }

    /// SMTP settings, required for email delivery.
    pub fn require_mail(&self) -> Result<&SmtpSettings, ConfigError> {
        self.mail
            .as_ref()
            .ok_or(ConfigError::Missing(self.missing_mail.unwrap_or("EMAIL")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const BASE: [(&str, &str); 5] = [
        ("TEMPLATE_ID", "tpl"),
        ("FOLDER_ID", "folder"),
        ("CLIENT_ID", "id"),
        ("CLIENT_SECRET", "secret"),
        ("REFRESH_TOKEN", "refresh"),
    ];

    #[test]
    fn refresh_credentials_without_mail() {
        let config = CertgenConfig::from_lookup(lookup(&BASE)).expect("config");
        assert_eq!(config.template_id, "tpl");
        assert!(matches!(config.google, GoogleCredentials::RefreshToken(_)));
        assert!(config.mail.is_none());
        assert_eq!(config.require_mail().unwrap_err(), ConfigError::Missing("EMAIL"));
    }

    #[test]
    fn access_token_replaces_refresh_credentials() {
        let config = CertgenConfig::from_lookup(lookup(&[
            ("TEMPLATE_ID", "tpl"),
            ("FOLDER_ID", "folder"),
            ("GOOGLE_ACCESS_TOKEN", "ya29.x"),
        ]))
        .expect("config");
        assert!(matches!(config.google, GoogleCredentials::AccessToken(_)));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut pairs = BASE.to_vec();
        pairs[1] = ("FOLDER_ID", "   ");
        let err = CertgenConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("FOLDER_ID"));
        assert_eq!(err.to_string(), "missing required environment variable FOLDER_ID");
    }

    #[test]
    fn incomplete_oauth_names_the_missing_variable() {
        let err = CertgenConfig::from_lookup(lookup(&BASE[..4])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("REFRESH_TOKEN"));
    }

    #[test]
    fn mail_settings_use_defaults() {
        let mut pairs = BASE.to_vec();
        pairs.extend([("EMAIL", "sender@gmail.com"), ("PASSWORD", "app-password")]);
        let config = CertgenConfig::from_lookup(lookup(&pairs)).expect("config");
        let mail = config.require_mail().expect("mail");
        assert_eq!(mail.host, DEFAULT_SMTP_HOST);
        assert_eq!(mail.username, "sender@gmail.com");
        assert_eq!(mail.sender, DEFAULT_SENDER);
    }

    #[test]
    fn missing_password_is_reported() {
        let mut pairs = BASE.to_vec();
        pairs.push(("EMAIL", "sender@gmail.com"));
        let config = CertgenConfig::from_lookup(lookup(&pairs)).expect("config");
        assert_eq!(config.require_mail().unwrap_err(), ConfigError::Missing("PASSWORD"));
    }
}
