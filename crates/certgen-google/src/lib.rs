//! Google Workspace adapters.
//!
//! [`GoogleClient`] implements [`certgen_ingest::SheetSource`] over the
//! Sheets values API and [`certgen_render::TemplateService`] over Drive
//! (copy, export, trash) and Slides (batch text replacement). All calls are
//! blocking and issued one at a time.

mod auth;
mod client;
mod sheets;
mod slides;

pub use auth::{AccessToken, GoogleCredentials, OAuthCredentials, TOKEN_URL};
pub use client::{GoogleClient, GoogleEndpoints};
