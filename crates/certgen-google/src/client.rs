//! Authenticated blocking HTTP client shared by all adapters.

use std::time::Duration;

use certgen_model::{ServiceError, ServiceResult};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{AccessToken, GoogleCredentials, TOKEN_URL};

/// HTTP request timeout. Exports of large decks can be slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("certgen/", env!("CARGO_PKG_VERSION"));

/// Base URLs of the APIs in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    pub sheets: String,
    pub drive: String,
    pub slides: String,
    pub token: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            sheets: "https://sheets.googleapis.com/v4".to_string(),
            drive: "https://www.googleapis.com/drive/v3".to_string(),
            slides: "https://slides.googleapis.com/v1".to_string(),
            token: TOKEN_URL.to_string(),
        }
    }
}

/// Client for the Sheets, Drive and Slides APIs.
pub struct GoogleClient {
    http: Client,
    token: AccessToken,
    endpoints: GoogleEndpoints,
}

fn build_http() -> ServiceResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT_VALUE)
        .build()
        .map_err(|e| ServiceError::Network(format!("failed to create HTTP client: {e}")))
}

impl GoogleClient {
    /// Create a client, exchanging a refresh token first when needed.
    pub fn connect(credentials: &GoogleCredentials) -> ServiceResult<Self> {
        Self::connect_with(credentials, GoogleEndpoints::default())
    }

    pub fn connect_with(
        credentials: &GoogleCredentials,
        endpoints: GoogleEndpoints,
    ) -> ServiceResult<Self> {
        let http = build_http()?;
        let token = match credentials {
            GoogleCredentials::AccessToken(token) => token.clone(),
            GoogleCredentials::RefreshToken(oauth) => oauth.exchange(&http, &endpoints.token)?,
        };
        Ok(Self {
            http,
            token,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &GoogleEndpoints {
        &self.endpoints
    }

    /// Join `segments` onto `base`, percent-encoding each one.
    pub(crate) fn url(base: &str, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = Url::parse(base).map_err(|e| ServiceError::Decode(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ServiceError::Decode(format!("{base}: not a base URL")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> ServiceResult<Response> {
        let response = request
            .bearer_auth(self.token.secret())
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: Url) -> ServiceResult<T> {
        debug!(method = "GET", path = %url.path(), "google api request");
        self.send(self.http.get(url))?
            .json()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    pub(crate) fn get_bytes(&self, url: Url) -> ServiceResult<Vec<u8>> {
        debug!(method = "GET", path = %url.path(), "google api request");
        let bytes = self
            .send(self.http.get(url))?
            .bytes()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    pub(crate) fn post_json<B, T>(&self, url: Url, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method = "POST", path = %url.path(), "google api request");
        self.send(self.http.post(url).json(body))?
            .json()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    pub(crate) fn patch_json<B>(&self, url: Url, body: &B) -> ServiceResult<()>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = "PATCH", path = %url.path(), "google api request");
        self.send(self.http.patch(url).json(body))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_segments_are_encoded() {
        let url = GoogleClient::url(
            "https://sheets.googleapis.com/v4",
            &["spreadsheets", "abc123", "values", "Form Responses 1"],
        )
        .expect("url");
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Form%20Responses%201"
        );
    }

    #[test]
    fn url_handles_trailing_slash_base() {
        let url = GoogleClient::url("https://slides.googleapis.com/v1/", &["presentations", "p1:batchUpdate"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://slides.googleapis.com/v1/presentations/p1:batchUpdate"
        );
    }

    #[test]
    fn invalid_base_is_rejected() {
        let err = GoogleClient::url("not a url", &["x"]).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[test]
    fn default_endpoints() {
        let endpoints = GoogleEndpoints::default();
        assert_eq!(endpoints.token, "https://oauth2.googleapis.com/token");
        assert!(endpoints.drive.ends_with("/drive/v3"));
    }

    #[test]
    fn access_token_client_needs_no_exchange() {
        let client = GoogleClient::connect(&GoogleCredentials::AccessToken(AccessToken::new(
            "ya29.x",
        )))
        .expect("client");
        assert_eq!(client.endpoints(), &GoogleEndpoints::default());
    }
}
