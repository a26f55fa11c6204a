//! Application State
//!
//! The explicitly owned state every handler receives through axum's `State`:
//! the catalog (filled once by the loader) and one cart session per browser
//! session.

use crate::cart::state::CartSession;
use crate::catalog::{
    loader::load_catalog,
    models::{CatalogState, Product},
};
use crate::config::StoreConfig;
use dashmap::DashMap;
use std::{sync::Arc, time::Duration};
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{error, info};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// Cart sessions keyed by the `cart_session` cookie.
    /// DashMap allows concurrent access without external Mutexes.
    pub sessions: DashMap<String, CartSession>,

    catalog: RwLock<CatalogState>,

    pub config: StoreConfig,
}

impl AppState {
    /// Creates state with an empty session registry and a catalog that is
    /// still loading.
    pub fn new(config: StoreConfig) -> Self {
        info!(
            event_name = "catalog.source",
            source = %config.catalog.source,
            "using catalog source"
        );

        Self {
            sessions: DashMap::new(),
            catalog: RwLock::new(CatalogState::Loading),
            config,
        }
    }

    /// Creates state whose catalog is already loaded with `products`.
    pub fn with_products(config: StoreConfig, products: Vec<Product>) -> Self {
        Self {
            sessions: DashMap::new(),
            catalog: RwLock::new(CatalogState::Ready(Arc::new(products))),
            config,
        }
    }

    pub async fn catalog(&self) -> CatalogState {
        self.catalog.read().await.clone()
    }

    /// Fetches the catalog once and marks it ready.
    ///
    /// A failed fetch is logged and leaves an empty, ready catalog; there is
    /// no retry.
    pub async fn load_catalog(&self) {
        let source = &self.config.catalog.source;
        let products = match load_catalog(source).await {
            Ok(products) => {
                info!(
                    event_name = "catalog.loaded",
                    source = %source,
                    product_count = products.len(),
                    "catalog loaded"
                );
                products
            }
            Err(err) => {
                error!(
                    event_name = "catalog.load_failed",
                    source = %source,
                    error = %err,
                    "error loading products"
                );
                Vec::new()
            }
        };

        *self.catalog.write().await = CatalogState::Ready(Arc::new(products));
    }

    /// Runs [`AppState::load_catalog`] in the background.
    pub fn spawn_catalog_load(state: &SharedState) -> JoinHandle<()> {
        let state = Arc::clone(state);
        tokio::spawn(async move { state.load_catalog().await })
    }

    pub fn notice_duration(&self) -> Duration {
        self.config.notice_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::CatalogSource;
    use std::io::Write;

    fn config_for(source: CatalogSource) -> StoreConfig {
        let mut config = StoreConfig::default();
        config.catalog.source = source;
        config
    }

    #[tokio::test]
    async fn catalog_is_loading_until_the_fetch_resolves() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"id": 1, "title": "Mug", "description": "Ceramic", "category": "Home",
                 "brand": "Acme", "price": 8.5, "rating": 4.2, "image": "/mug.jpg"}]"#,
        )
        .unwrap();

        let state = Arc::new(AppState::new(config_for(CatalogSource::File(
            file.path().to_path_buf(),
        ))));
        assert!(state.catalog().await.products().is_none());

        AppState::spawn_catalog_load(&state).await.unwrap();

        let products = state.catalog().await.products().expect("catalog ready");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Mug");
    }

    #[tokio::test]
    async fn failed_fetch_ends_loading_with_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config_for(CatalogSource::File(dir.path().join("missing.json"))));

        state.load_catalog().await;

        let products = state.catalog().await.products().expect("loading has ended");
        assert!(products.is_empty());
    }
}
