//! Client side of the products API.
//!
//! The HTTP transport sits behind [`ProductClient`] so the loader can run
//! against the browser's `fetch` (through `reqwest`'s wasm backend), a
//! native `reqwest` client in tests, or a hand-written fake. Status checks
//! and JSON decoding live here and are shared by every transport.

use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

use crate::types::Product;

/// Everything that can go wrong while loading the product list.
///
/// The user sees all of them the same way; the variants exist for logs
/// and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Transport(String),
    #[error("Fetch failed: {0}")]
    Status(u16),
    #[error("{0}")]
    Body(String),
    #[error("{0}")]
    Json(String),
    #[error("invalid product at index {index}: {reason}")]
    InvalidProduct { index: usize, reason: String },
}

/// Status line and body of a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to reach the products API.
///
/// Futures are not required to be `Send`: in the browser they wrap a JS
/// promise.
pub trait ProductClient {
    /// Performs a GET request.
    ///
    /// Implementations only fail for transport problems; any HTTP status is
    /// reported through [`RawResponse::status`].
    #[allow(async_fn_in_trait)]
    async fn get(&self, url: &Url) -> Result<RawResponse, LoadError>;
}

/// [`ProductClient`] backed by `reqwest`, which uses `fetch` on wasm targets.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    #[must_use]
    pub const fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl ProductClient for ReqwestClient {
    async fn get(&self, url: &Url) -> Result<RawResponse, LoadError> {
        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            // The body of a failed request is never shown.
            return Ok(RawResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Body(e.to_string()))?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decoded product collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    Products(Vec<Product>),
    /// The backend answered with an empty array or with something that is
    /// not an array at all.
    Nothing,
}

/// Decodes a response body into a [`Catalog`].
///
/// Every element of a non-empty array must be a valid [`Product`]; one bad
/// element fails the whole collection.
///
/// # Errors
///
/// [`LoadError::Json`] for a body that is not JSON and
/// [`LoadError::InvalidProduct`] for an element that does not convert.
pub fn decode_catalog(body: &str) -> Result<Catalog, LoadError> {
    let value: Value = serde_json::from_str(body).map_err(|e| LoadError::Json(e.to_string()))?;
    let Value::Array(items) = value else {
        return Ok(Catalog::Nothing);
    };
    if items.is_empty() {
        return Ok(Catalog::Nothing);
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Product>(item).map_err(|e| LoadError::InvalidProduct {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Catalog::Products)
}

/// Fetches and decodes the product collection at `url`.
///
/// # Errors
///
/// Transport failures from `client`, [`LoadError::Status`] for non-2xx
/// responses, and the decoding errors of [`decode_catalog`].
pub async fn fetch_catalog(client: &impl ProductClient, url: &Url) -> Result<Catalog, LoadError> {
    let response = client.get(url).await?;
    if !response.is_ok() {
        return Err(LoadError::Status(response.status));
    }
    decode_catalog(&response.body)
}
