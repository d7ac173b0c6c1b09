//! Error page shown by the router fallback.
//!
//! On the server it also sets the response status from the first
//! [`AppError`] it finds.

use http::status::StatusCode;
use leptos::{
    html::{div, h1, p},
    prelude::*,
};
use leptos_router::components::{A, AProps};
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Collects the [`AppError`]s in `errors` and renders one line per error.
pub fn component(errors: Errors) -> impl IntoView {
    let errors: Vec<AppError> = errors
        .into_iter()
        .filter_map(|(_key, err)| err.downcast_ref::<AppError>().cloned())
        .collect();

    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    div().class("error-page").child((
        h1().child(if errors.len() > 1 { "Errors" } else { "Error" }),
        errors
            .iter()
            .map(|error| p().child(format!("{}| {error}", error.status_code())))
            .collect_view(),
        A(AProps::builder()
            .href("/")
            .children(ToChildren::to_children(|| "Back to products"))
            .build()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.to_string(), "Not Found");
    }
}
