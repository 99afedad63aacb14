//! # Zarlette Salon Application
//!
//! The application layer of the Zarlette salon point of sale: commands the
//! frontend invokes, the state they share, and the receipt/CSV rendering.
//! All persistent data lives on the collaborator service; this crate holds
//! only in-memory session, cart, catalog cache, and checkout state.
//!
//! ## Module Organization
//! ```text
//! zarlette_salon/
//! ├── lib.rs          ◄─── You are here (AppContext, startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Login gate
//! │   ├── cart.rs     ◄─── Cart state wrapper
//! │   ├── catalog.rs  ◄─── Category/product cache + stale-fetch guard
//! │   ├── checkout.rs ◄─── Payment modal state machine
//! │   └── config.rs   ◄─── Store name, currency, credentials
//! ├── commands/
//! │   ├── auth.rs     ◄─── login / logout / current_session
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── catalog.rs  ◄─── POS grid: categories, search, products
//! │   ├── checkout.rs ◄─── Payment modal & sale submission
//! │   ├── category.rs ◄─── Category management CRUD
//! │   ├── product.rs  ◄─── Product management CRUD
//! │   ├── sales.rs    ◄─── History, held sales, receipts
//! │   ├── inventory.rs◄─── Per-product report + CSV export
//! │   └── dashboard.rs◄─── Headline stats & top sellers
//! ├── export.rs       ◄─── CSV building
//! ├── receipt.rs      ◄─── Plain-text receipt rendering
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Shared State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            AppContext                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐  │
//! │  │ SessionState │ │  CartState   │ │ CatalogState │ │CheckoutState │  │
//! │  │              │ │              │ │              │ │              │  │
//! │  │ • login gate │ │ • line items │ │ • categories │ │ • modal phase│  │
//! │  │ • who/when   │ │ • totals     │ │ • products   │ │ • inputs     │  │
//! │  │              │ │              │ │ • generation │ │ • idem. key  │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  api: Arc<dyn SalonApi> ──► every data operation is one REST call       │
//! │                                                                         │
//! │  Locks are plain std Mutexes and are NEVER held across an await;        │
//! │  commands snapshot under the lock, release, then call the network.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod receipt;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use zarlette_api::{ApiConfig, RestApi, SalonApi};

use crate::error::AppError;
use crate::state::{
    AppConfig, CartState, CatalogState, CheckoutState, SessionState, StaticAuthenticator,
};

/// Everything a command needs, bundled so commands stay plain functions.
pub struct AppContext {
    /// The collaborator gateway. A trait object so tests swap in a fake.
    pub api: Arc<dyn SalonApi>,
    pub config: AppConfig,
    pub session: SessionState,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub checkout: CheckoutState,
}

impl AppContext {
    /// Builds a context around an existing gateway.
    pub fn new(config: AppConfig, api: Arc<dyn SalonApi>) -> Self {
        let session = SessionState::new(Box::new(StaticAuthenticator::from_config(&config)));
        AppContext {
            api,
            config,
            session,
            cart: CartState::new(),
            catalog: CatalogState::new(),
            checkout: CheckoutState::new(),
        }
    }

    /// Production wiring: REST gateway from the API config file/env.
    pub fn connect(config: AppConfig, api_config: &ApiConfig) -> Result<Self, AppError> {
        let api = RestApi::new(api_config)?;
        info!(base_url = %api_config.base_url, store = %config.store_name, "Connected to collaborator");
        Ok(AppContext::new(config, Arc::new(api)))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=zarlette=trace` - Show trace for zarlette crates only
/// - Default: INFO level, debug for this workspace
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zarlette=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
