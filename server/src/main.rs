mod security;

use std::{env, sync::Arc};

use app::{component, config::BACKEND_URL_VAR, config::BackendConfig, shell, types::AppState};
use axum::{Router, extract::State, http::StatusCode, middleware, response::Json, routing::get};
use dotenvy::dotenv;
use leptos::logging;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes as _, generate_route_list};
use leptos_config::get_configuration;
use security::{SecurityHeaders, security_headers};
use serde_json::json;

use tower_http::compression::predicate::SizeAbove;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

// Health check handler
async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION"),
        "backend_url": state.backend.base_url(),
    })))
}

/// Reads the products backend override from the environment.
fn backend_from_env() -> BackendConfig {
    BackendConfig::from_override(env::var(BACKEND_URL_VAR).ok().as_deref())
}

#[tokio::main]
async fn main() {
    let tracing_level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing_level)
        .init();

    if dotenv().is_err() {
        logging::warn!("There is no corresponding .env file");
    }

    let Ok(conf) = get_configuration(Some("Cargo.toml")) else {
        logging::error!("Failed to get configuration");
        return;
    };

    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(component);

    let backend = backend_from_env();
    match backend.override_value() {
        Some(url) => tracing::info!(backend = url, "Using products backend override"),
        None => tracing::info!(backend = backend.base_url(), "Using default products backend"),
    }

    let app_state = AppState {
        backend: backend.clone(),
        leptos_options: Arc::new(leptos_options.clone()),
    };

    let app = Router::new()
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let backend = backend.clone();
                move || provide_context(backend.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .route("/health", get(health_handler))
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    SecurityHeaders::for_backend(&backend),
                    security_headers,
                )),
        )
        .layer(CompressionLayer::new().compress_when(SizeAbove::new(1024)))
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(list) => list,
        Err(err) => {
            logging::error!("Failed to bind tcp listener to {}: {}", &addr, err);
            return;
        }
    };
    logging::log!("Listening on http://{}", &addr);

    if let Err(err) = axum::serve(listener, app.into_make_service()).await {
        logging::error!("Failed to serve app: {:?}", err);
    } else {
        logging::log!("Server shutdown gracefully");
    }
}
