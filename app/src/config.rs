//! Backend endpoint configuration.
//!
//! The products API lives behind a base URL that can be overridden once at
//! startup. On the server the override comes from the `BACKEND_URL`
//! environment variable; in the browser it is read from `window.BACKEND_URL`,
//! which the server injects into the page shell. Either way the resolved
//! value is passed down explicitly (Leptos context or constructor argument)
//! and never mutated afterwards.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::api::LoadError;

/// Base URL used when no override is configured.
pub const DEFAULT_BACKEND_URL: &str = "/api/v1";

/// Name of the environment variable and of the `window` property carrying the override.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Path appended to the base URL to reach the product collection.
pub const PRODUCTS_PATH: &str = "/products";

/// Id of the element whose content the loader replaces.
pub const CONTAINER_ID: &str = "products";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    base_url: String,
    overridden: bool,
}

impl BackendConfig {
    /// Resolves the backend base URL from an optional override.
    ///
    /// Missing, empty and whitespace-only overrides all fall back to
    /// [`DEFAULT_BACKEND_URL`].
    #[must_use]
    pub fn from_override(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self {
                base_url: url.to_owned(),
                overridden: true,
            },
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The override value, if one was supplied.
    #[must_use]
    pub fn override_value(&self) -> Option<&str> {
        self.overridden.then_some(self.base_url.as_str())
    }

    /// Builds the absolute URL of the product collection.
    ///
    /// Absolute base URLs are used as-is. Relative ones (including the
    /// default) are resolved against `origin`, which in the browser is the
    /// page's `location.origin`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidUrl`] when the target cannot be parsed, or
    /// when it is relative and no usable origin is available.
    pub fn products_url(&self, origin: Option<&str>) -> Result<Url, LoadError> {
        let target = format!("{}{PRODUCTS_PATH}", self.base_url.trim_end_matches('/'));
        if let Ok(url) = Url::parse(&target) {
            return Ok(url);
        }
        let origin = origin.ok_or_else(|| {
            LoadError::InvalidUrl(format!("{target} is relative and no page origin is known"))
        })?;
        Url::parse(origin)
            .and_then(|base| base.join(&target))
            .map_err(|e| LoadError::InvalidUrl(format!("{target}: {e}")))
    }

    /// Origin (`scheme://host[:port]`) of an absolute backend URL.
    ///
    /// Relative base URLs share the page origin and yield `None`.
    #[must_use]
    pub fn backend_origin(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let origin = url.origin();
        origin.is_tuple().then(|| origin.ascii_serialization())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_owned(),
            overridden: false,
        }
    }
}

/// JavaScript statement assigning the override to `window.BACKEND_URL`.
///
/// The value is JSON-encoded and `</` is escaped so it cannot close the
/// surrounding `<script>` element.
#[must_use]
pub fn override_script(url: &str) -> String {
    let literal = serde_json::to_string(url)
        .unwrap_or_else(|_| "\"\"".to_owned())
        .replace("</", "<\\/");
    format!("window.{BACKEND_URL_VAR} = {literal};")
}
