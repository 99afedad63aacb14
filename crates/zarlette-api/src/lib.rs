//! # zarlette-api: REST Client for Zarlette Salon POS
//!
//! This crate is the only place in the workspace that touches the network.
//! It wraps the salon's backing REST service in typed operations and exposes
//! the whole surface behind the [`SalonApi`] trait so the application layer
//! can run against an in-memory fake in tests.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Client Architecture                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   SalonApi (trait, gateway.rs)                   │  │
//! │  │                                                                  │  │
//! │  │  One async method per operation the salon performs:             │  │
//! │  │  sales, held sales, stats, catalog CRUD, inventory report       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ impl                                    │
//! │                               ▼                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      RestApi (gateway.rs)                        │  │
//! │  │                                                                  │  │
//! │  │  Delegates to endpoint modules, one per service area:            │  │
//! │  │                                                                  │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────┐   │  │
//! │  │  │  sales.rs    │  │  catalog.rs  │  │  reports.rs          │   │  │
//! │  │  │              │  │              │  │                      │   │  │
//! │  │  │ /sales       │  │ /categories  │  │ /inventory-report    │   │  │
//! │  │  │ /sales/hold  │  │ /products    │  │                      │   │  │
//! │  │  │ /sales/stats │  │              │  │                      │   │  │
//! │  │  └──────┬───────┘  └──────┬───────┘  └──────────┬───────────┘   │  │
//! │  │         └────────────────┬┴──────────────────────┘              │  │
//! │  │                          ▼                                      │  │
//! │  │  ┌──────────────────────────────────────────────────────────┐  │  │
//! │  │  │              HttpClient (client.rs)                      │  │  │
//! │  │  │                                                          │  │  │
//! │  │  │  reqwest wrapper: base URL, JSON headers, bearer auth,   │  │  │
//! │  │  │  Idempotency-Key, status → ClientError mapping           │  │  │
//! │  │  └──────────────────────────────────────────────────────────┘  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ApiConfig (config.rs): base URL, timeout, token; TOML file + env       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`client`] - Shared `reqwest` wrapper with typed verbs
//! - [`config`] - Endpoint configuration (base URL, timeout, token)
//! - [`endpoints`] - Typed operations, one module per service area
//! - [`error`] - Client error types and user-facing message mapping
//! - [`gateway`] - The `SalonApi` trait and its REST implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zarlette_api::{ApiConfig, RestApi, SalonApi};
//!
//! let config = ApiConfig::load_or_default();
//! let api = RestApi::new(&config)?;
//!
//! let products = api.list_products("ALL", "").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod gateway;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{HttpClient, IDEMPOTENCY_KEY_HEADER};
pub use config::ApiConfig;
pub use endpoints::{ReceiptFormat, SaleFilter};
pub use error::{ClientError, ClientResult};
pub use gateway::{RestApi, SalonApi};
