//! This module defines the `products` component, the page's product container.
//!
//! The server renders the container in its loading state. Once the page has
//! hydrated, a single client-side effect runs the [`ProductListLoader`] and
//! every state it publishes replaces the container's inner HTML.

use leptos::{html::div, prelude::*, task::spawn_local};
use leptos_meta::{Title, TitleProps};

use crate::{
    api::ReqwestClient,
    config::{BackendConfig, CONTAINER_ID},
    loader::{LoadState, ProductListLoader},
    render,
};

/// Renders the product container and starts the load on the client.
///
/// The backend configuration is taken from context; without one the
/// default endpoint is used.
pub fn component() -> impl IntoView {
    let config = use_context::<BackendConfig>().unwrap_or_default();
    // The placeholder is part of the server render, so hydration starts from `Loading`.
    let state = RwSignal::new(LoadState::Loading);

    // Effects only run in the browser, after hydration. Nothing is tracked, so this runs once.
    Effect::new(move |_| {
        let loader = ProductListLoader::new(ReqwestClient::default(), config.clone());
        spawn_local(async move {
            let origin = window().location().origin().ok();
            loader.run(origin.as_deref(), &state).await;
        });
    });

    (
        Title(TitleProps::builder().text("Products").build()),
        div()
            .id(CONTAINER_ID)
            .inner_html(move || render::markup(&state.get())),
    )
}
