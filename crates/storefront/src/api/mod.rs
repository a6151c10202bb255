//! HTTP client for the storefront REST API.
//!
//! # Architecture
//!
//! - One [`ApiClient`] per application, cheaply cloneable (`Arc` inner)
//! - The backend is the source of truth: no caching, no retries
//! - The access token from the shared [`TokenStore`](crate::tokens::TokenStore)
//!   is attached as a bearer token to every request
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pasta_house_storefront::{api::ApiClient, config::ClientConfig, tokens::MemoryTokenStore};
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config, Arc::new(MemoryTokenStore::new()))?;
//!
//! let latest = api.products().latest(&Default::default()).await?;
//! ```

mod client;

pub use client::ApiClient;

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
///
/// Resource services return these unmodified; status codes are not
/// translated into domain errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status code, if the API produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Whether the API rejected the request's credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
