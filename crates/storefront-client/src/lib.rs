//! # storefront-client: Session, REST Client and Store
//!
//! Everything in the storefront client that touches the network or the
//! disk: configuration, the persisted bearer credential, the typed REST
//! client with its response normalization, and the [`Store`] that drives
//! the pure reducers of `storefront-core`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront Data Flow                            │
//! │                                                                         │
//! │   View ──► Store::add_to_cart(line)                                     │
//! │                 │                                                       │
//! │                 ├─► Action::pending(AddToCart)      loading = true      │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            ApiClient ── Bearer (TokenStore) ──► POST /api/cart          │
//! │                 │                                GET  /api/cart         │
//! │                 ▼                                                       │
//! │            wire DTO ──► CartItem (normalized)                           │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │         ticket current? ──► CartAction::Loaded ──► AppState::reduce     │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                                          watch::Receiver<AppState>      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `ClientConfig` (TOML file + environment overrides)
//! - [`token`] - `TokenStore` over pluggable credential storage
//! - [`api`] - `ApiClient`, one method per backend endpoint
//! - [`wire`] - Backend payloads and their conversion to core types
//! - [`store`] - `Store`, the session's state container
//! - [`error`] - `RequestError` and `ClientError`

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod token;
pub mod wire;

pub use api::ApiClient;
pub use config::{ClientConfig, StorageKind};
pub use error::{ClientError, ClientResult, RequestError};
pub use store::Store;
pub use token::{TokenClaims, TokenStore};
