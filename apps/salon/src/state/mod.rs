//! # State Module
//!
//! Shared application state for the salon app.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, state is
//! split by concern:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: The state machines are tested in isolation
//! 3. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppContext                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │           │            │             │             │            │
//! │       ▼           ▼            ▼             ▼             ▼            │
//! │  ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌───────────┐    │
//! │  │AppConfig│ │ Session  │ │CartState │ │ Catalog   │ │ Checkout  │    │
//! │  │         │ │ State    │ │          │ │ State     │ │ State     │    │
//! │  │store    │ │          │ │Arc<Mutex<│ │           │ │           │    │
//! │  │name,    │ │login/    │ │  Cart>>  │ │categories,│ │phase,     │    │
//! │  │currency,│ │logout/   │ │closure   │ │products,  │ │payment    │    │
//! │  │creds    │ │require   │ │accessors │ │generation │ │inputs, key│    │
//! │  └─────────┘ └──────────┘ └──────────┘ └───────────┘ └───────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: read-only after initialization                           │
//! │  • Everything else: Mutex-protected, locked only for short             │
//! │    synchronous sections, never across an await                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;
mod session;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use checkout::{CheckoutPhase, CheckoutState, SubmitTicket};
pub use config::AppConfig;
pub use session::{Authenticator, Session, SessionState, StaticAuthenticator};
