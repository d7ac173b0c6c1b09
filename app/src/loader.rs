//! The product list loader.
//!
//! A load walks `Idle -> Loading -> {Empty | Populated | Error}` exactly
//! once. Every state it enters is pushed to a [`Container`], and the final
//! state is also returned so callers can await the outcome.

use leptos::logging;
use leptos::prelude::{RwSignal, Set as _};

use crate::api::{Catalog, LoadError, ProductClient, fetch_catalog};
use crate::config::BackendConfig;
use crate::types::Product;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Empty,
    Populated(Vec<Product>),
    /// Failure text shown to the user.
    Error(String),
}

impl LoadState {
    /// Maps the result of a fetch to its end state.
    #[must_use]
    pub fn from_outcome(outcome: Result<Catalog, LoadError>) -> Self {
        match outcome {
            Ok(Catalog::Products(products)) => Self::Populated(products),
            Ok(Catalog::Nothing) => Self::Empty,
            Err(err) => Self::Error(err.to_string()),
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Empty | Self::Populated(_) | Self::Error(_))
    }
}

/// Where the loader publishes its states. Each call replaces whatever was
/// shown before.
#[cfg_attr(test, mockall::automock)]
pub trait Container {
    fn show(&self, state: &LoadState);
}

impl Container for RwSignal<LoadState> {
    fn show(&self, state: &LoadState) {
        self.set(state.clone());
    }
}

pub struct ProductListLoader<C> {
    client: C,
    config: BackendConfig,
}

impl<C: ProductClient> ProductListLoader<C> {
    #[must_use]
    pub const fn new(client: C, config: BackendConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Resolves the products URL and fetches the catalogue.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] raised while building the URL, talking to the
    /// backend or decoding the body.
    pub async fn fetch(&self, origin: Option<&str>) -> Result<Catalog, LoadError> {
        let url = self.config.products_url(origin)?;
        logging::log!("Fetching products from {url}");
        fetch_catalog(&self.client, &url).await
    }

    /// Runs one load, publishing `Loading` and then the end state.
    ///
    /// `origin` resolves relative backend URLs; pass the page origin in the
    /// browser.
    pub async fn run(&self, origin: Option<&str>, container: &impl Container) -> LoadState {
        container.show(&LoadState::Loading);
        let outcome = self.fetch(origin).await;
        match &outcome {
            Ok(Catalog::Products(products)) => logging::log!("Loaded {} products", products.len()),
            Ok(Catalog::Nothing) => logging::warn!("Backend returned no products"),
            Err(err) => logging::error!("Failed to load products: {err:?}"),
        }
        let state = LoadState::from_outcome(outcome);
        container.show(&state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawResponse;
    use leptos::prelude::{GetUntracked as _, Owner};
    use mockall::Sequence;
    use mockall::predicate::eq;
    use reqwest::Url;

    struct StaticClient {
        status: u16,
        body: &'static str,
    }

    impl ProductClient for StaticClient {
        async fn get(&self, _url: &Url) -> Result<RawResponse, LoadError> {
            Ok(RawResponse {
                status: self.status,
                body: self.body.to_owned(),
            })
        }
    }

    fn loader(status: u16, body: &'static str) -> ProductListLoader<StaticClient> {
        ProductListLoader::new(
            StaticClient { status, body },
            BackendConfig::from_override(Some("http://backend.test/api/v1")),
        )
    }

    #[test]
    fn test_state_machine_terminal_states() {
        assert!(!LoadState::Idle.is_terminal());
        assert!(!LoadState::Loading.is_terminal());
        assert!(LoadState::Empty.is_terminal());
        assert!(LoadState::Populated(vec![]).is_terminal());
        assert!(LoadState::Error("boom".to_owned()).is_terminal());
        assert_eq!(LoadState::default(), LoadState::Idle);
    }

    #[test]
    fn test_from_outcome() {
        assert_eq!(LoadState::from_outcome(Ok(Catalog::Nothing)), LoadState::Empty);
        assert_eq!(
            LoadState::from_outcome(Err(LoadError::Status(500))),
            LoadState::Error("Fetch failed: 500".to_owned())
        );
    }

    #[test]
    fn test_shows_loading_then_populated() {
        tokio_test::block_on(async {
            let mut seq = Sequence::new();
            let mut container = MockContainer::new();
            container
                .expect_show()
                .with(eq(LoadState::Loading))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
            container
                .expect_show()
                .withf(|state| matches!(state, LoadState::Populated(p) if p.len() == 2))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());

            let body = r#"[{"name":"A","price":1,"category":"x"},{"name":"B","price":2,"category":"y"}]"#;
            let state = loader(200, body).run(None, &container).await;
            assert!(state.is_terminal());
        });
    }

    #[test]
    fn test_shows_loading_then_error() {
        tokio_test::block_on(async {
            let mut seq = Sequence::new();
            let mut container = MockContainer::new();
            container
                .expect_show()
                .with(eq(LoadState::Loading))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
            container
                .expect_show()
                .with(eq(LoadState::Error("Fetch failed: 500".to_owned())))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());

            loader(500, "").run(None, &container).await;
        });
    }

    #[test]
    fn test_relative_url_without_origin_is_an_error() {
        let owner = Owner::new();
        owner.set();
        tokio_test::block_on(async {
            let loader = ProductListLoader::new(
                StaticClient {
                    status: 200,
                    body: "[]",
                },
                BackendConfig::default(),
            );
            let signal = RwSignal::new(LoadState::Idle);
            let state = loader.run(None, &signal).await;
            assert!(matches!(state, LoadState::Error(ref msg) if msg.starts_with("invalid backend url")));
            assert_eq!(signal.get_untracked(), state);
            assert!(signal.get_untracked().is_terminal());
        });
    }

    #[test]
    fn test_signal_container_holds_last_state() {
        let owner = Owner::new();
        owner.set();
        tokio_test::block_on(async {
            let signal = RwSignal::new(LoadState::Idle);
            let state = loader(200, "[]").run(None, &signal).await;
            assert_eq!(state, LoadState::Empty);
            assert_eq!(signal.get_untracked(), LoadState::Empty);
            assert!(signal.get_untracked().is_terminal());
        });
    }
}
