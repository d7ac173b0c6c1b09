use app::config::BackendConfig;
use axum::{
    body::Body,
    extract::State,
    http::{
        Request, Response,
        header::{HeaderName, HeaderValue},
    },
    middleware::Next,
};

/// Builds the Content-Security-Policy for the storefront page.
///
/// The page fetches products with `fetch`, so `connect-src` has to include
/// the backend's origin when it is not served from the page origin.
pub fn content_security_policy(backend: &BackendConfig) -> String {
    let connect_src = match backend.backend_origin() {
        Some(origin) => format!("connect-src 'self' {origin}"),
        None => "connect-src 'self'".to_owned(),
    };
    [
        "default-src 'self'",
        // WASM needs wasm-unsafe-eval; the injected BACKEND_URL script and hydration loader are inline
        "script-src 'self' 'unsafe-inline' 'wasm-unsafe-eval'",
        "style-src 'self' 'unsafe-inline'",
        "img-src 'self' data: https:",
        connect_src.as_str(),
        "frame-ancestors 'none'",
        "base-uri 'self'",
        "form-action 'self'",
    ]
    .join("; ")
}

/// Header values shared by every response.
#[derive(Clone, Debug)]
pub struct SecurityHeaders {
    csp: HeaderValue,
}

impl SecurityHeaders {
    pub fn for_backend(backend: &BackendConfig) -> Self {
        let csp = HeaderValue::from_str(&content_security_policy(backend)).unwrap_or_else(|err| {
            tracing::warn!(%err, "Backend origin produced an invalid CSP; falling back to 'self'");
            HeaderValue::from_static("default-src 'self'")
        });
        Self { csp }
    }
}

/// Security headers middleware
pub async fn security_headers(
    State(headers): State<SecurityHeaders>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let mut response = next.run(req).await;
    let response_headers = response.headers_mut();

    response_headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response_headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    response_headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response_headers.insert(
        HeaderName::from_static("content-security-policy"),
        headers.csp,
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, middleware, routing::get};
    use tower::ServiceExt as _;

    #[test]
    fn test_csp_same_origin_backend() {
        let csp = content_security_policy(&BackendConfig::default());
        assert!(csp.contains("connect-src 'self';"));
        assert!(csp.contains("'wasm-unsafe-eval'"));
    }

    #[test]
    fn test_csp_allows_remote_backend() {
        let backend = BackendConfig::from_override(Some("https://api.shop.example/api/v1"));
        let csp = content_security_policy(&backend);
        assert!(csp.contains("connect-src 'self' https://api.shop.example;"));
    }

    #[tokio::test]
    async fn test_headers_added_to_responses() {
        let headers = SecurityHeaders::for_backend(&BackendConfig::default());
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(headers, security_headers));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let got = response.headers();
        assert_eq!(got.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(got.get("x-content-type-options").unwrap(), "nosniff");
        assert!(
            got.get("content-security-policy")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("connect-src 'self'")
        );
    }
}
