//! # storefront-core: Pure State Layer for the Storefront Client
//!
//! This crate is the **heart** of the storefront client. It contains the
//! domain types, the state slices and their reducers as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Client Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Views (storefront-cli)                       │   │
//! │  │    Catalog ──► Product Detail ──► Cart ──► Wishlist ──► Orders  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Store operations                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Store + API client (storefront-client)             │   │
//! │  │    fetch_cart, add_to_cart, login, toggle_wishlist, etc.        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Actions                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   state   │  │ generation│  │   │
//! │  │   │  Product  │  │   Money   │  │  slices   │  │  tickets  │  │   │
//! │  │   │  CartItem │  │ Discount  │  │  reducers │  │  seq nums │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation performed by views before dispatching
//! - [`state`] - Slices, actions, reducers and selectors
//! - [`generation`] - Request-generation tickets for stale-response detection
//! - [`fallback`] - Sample catalog shown when the backend yields nothing
//!
//! ## Design Principles
//!
//! 1. **Pure Reducers**: `AppState::reduce(state, action)` is deterministic
//! 2. **Derived, Never Stored**: totals and filtered views are selectors
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::state::cart::{CartAction, CartState};
//! use storefront_core::types::{CartItem, Discount};
//!
//! let items = vec![
//!     CartItem::new(1, 10, Money::from_cents(10_000), Discount::zero(), 2),
//!     CartItem::new(2, 11, Money::from_cents(5_000), Discount::from_percentage(10.0), 1),
//! ];
//!
//! let cart = CartState::default().reduce(CartAction::Loaded(items));
//! let totals = cart.totals();
//!
//! assert_eq!(totals.total_items, 3);
//! assert_eq!(totals.subtotal.cents(), 24_500); // $245.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fallback;
pub mod generation;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use generation::{Generations, Operation, Ticket};
pub use money::Money;
pub use state::{Action, AppState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of products per catalog page.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The backend still enforces stock levels.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum number of related products shown on a product page.
pub const MAX_RELATED_PRODUCTS: usize = 4;
