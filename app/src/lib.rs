// Storefront page: shell, router and the product list loader
use crate::components::error_template;
use leptos::{
    html::{body, head, html, meta, script},
    prelude::*,
};
use leptos_meta::{MetaTags, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{FlatRoutes, Route, Router},
};

pub mod api;
mod components;
pub mod config;
pub mod loader;
mod products;
pub mod render;
pub mod types;

pub use components::error_template::AppError;

use config::BackendConfig;

/// Renders the full HTML document.
///
/// When the backend URL was overridden, the override is published as
/// `window.BACKEND_URL` for the client bundle to pick up at startup.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let html_comp = html().lang("en").child((
        head().child((
            meta().charset("utf-8"),
            meta()
                .name("viewport")
                .content("width=device-width, initial-scale=1"),
            backend_override_script(),
            HydrationScripts(HydrationScriptsProps::builder().options(options).build()),
            MetaTags(),
        )),
        body().child(self::component),
    ));

    view! {
        <!DOCTYPE html>
        {html_comp}
    }
}

/// `<script>` publishing the backend override from context, if there is one.
fn backend_override_script() -> Option<impl IntoView> {
    let backend = use_context::<BackendConfig>()?;
    backend
        .override_value()
        .map(|url| script().inner_html(config::override_script(url)))
}

#[must_use]
pub fn component() -> impl IntoView {
    view! {
        <Router>
            <main>
                <FlatRoutes fallback=|| {
                    let mut outside_errors = Errors::default();
                    outside_errors.insert_with_default_key(AppError::NotFound);
                    error_template::component(outside_errors)
                }>
                    <Route path=StaticSegment("") view=products::component/>
                </FlatRoutes>
            </main>
        </Router>
    }
}
