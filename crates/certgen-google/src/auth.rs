//! Access tokens and the refresh-token grant.

use std::fmt;

use certgen_model::{ServiceError, ServiceResult};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;
use url::form_urlencoded;

/// OAuth 2.0 token endpoint.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Bearer token sent with every API request. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Installed-app client credentials with a pre-issued refresh token.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl OAuthCredentials {
    /// Form body of the refresh-token grant.
    pub(crate) fn grant_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("refresh_token", &self.refresh_token)
            .append_pair("grant_type", "refresh_token")
            .finish()
    }

    /// Exchange the refresh token for an access token.
    pub fn exchange(&self, http: &Client, token_url: &str) -> ServiceResult<AccessToken> {
        debug!(client_id = %self.client_id, "exchanging refresh token");
        let response = http
            .post(token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(self.grant_body())
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| status.to_string());
            return Err(ServiceError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| ServiceError::Decode(e.to_string()))?;
        debug!(expires_in = ?token.expires_in, "access token issued");
        Ok(AccessToken::new(token.access_token))
    }
}

/// How the client obtains its bearer token.
#[derive(Debug, Clone)]
pub enum GoogleCredentials {
    /// A ready access token.
    AccessToken(AccessToken),
    /// Exchanged once at startup.
    RefreshToken(OAuthCredentials),
}
