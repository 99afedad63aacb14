//! # Commands Module
//!
//! The invocation surface the frontend calls, one module per screen area.
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── auth.rs       ◄─── login / logout / current session
//! ├── cart.rs       ◄─── add, toggle, remove, clear, view
//! ├── checkout.rs   ◄─── payment modal + confirm/cancel/dismiss
//! ├── catalog.rs    ◄─── category tabs + product grid loading
//! ├── category.rs   ◄─── category CRUD + per-category counts
//! ├── product.rs    ◄─── product CRUD + rows with category names
//! ├── sales.rs      ◄─── held sales, history, status, receipts, summary
//! ├── inventory.rs  ◄─── inventory report + CSV export
//! └── dashboard.rs  ◄─── aggregate stats + trend + top products
//! ```
//!
//! Every command is a free async function taking the shared [`AppContext`];
//! all of them except `auth` require an active session and fail with
//! `AUTH_REQUIRED` before touching any other state or the network.
//!
//! [`AppContext`]: crate::AppContext

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod category;
pub mod checkout;
pub mod dashboard;
pub mod inventory;
pub mod product;
pub mod sales;
