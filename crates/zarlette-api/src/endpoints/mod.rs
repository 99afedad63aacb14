//! # Endpoint Modules
//!
//! Typed operations for the collaborator's REST surface, one module per
//! service area. Each function takes the shared [`HttpClient`] and speaks
//! the exact paths, query parameters, and body shapes the collaborator
//! expects.
//!
//! ```text
//! endpoints/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── sales.rs    ◄─── /sales, /sales/hold, /sales/held, /sales/stats, ...
//! ├── catalog.rs  ◄─── /categories, /products
//! └── reports.rs  ◄─── /inventory-report
//! ```
//!
//! [`HttpClient`]: crate::client::HttpClient

pub mod catalog;
pub mod reports;
pub mod sales;

pub use sales::{ReceiptFormat, SaleFilter};
