//! # State Module
//!
//! The application state tree and the single reducer that advances it.
//!
//! ## One Tree, Five Slices
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                        Action::Cart(CartAction::Loaded(..))             │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  AppState::reduce(self, action)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │            │            │            │            │          │
//! │          ▼            ▼            ▼            ▼            ▼          │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐     │
//! │  │   auth   │ │   cart   │ │ wishlist │ │ products │ │  orders  │     │
//! │  │ user     │ │ items    │ │ items    │ │ products │ │ orders   │     │
//! │  │ token    │ │          │ │          │ │ filters  │ │ addresses│     │
//! │  │ loading  │ │ loading  │ │ loading  │ │ loading  │ │ loading  │     │
//! │  │ error    │ │ error    │ │ error    │ │ error    │ │ error    │     │
//! │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └──────────┘     │
//! │                                                                         │
//! │  Each action is routed to exactly one slice. Slices never read each    │
//! │  other. Derived values (totals, filtered views) are selectors.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Phase Fields
//! Every slice embeds a [`RequestStatus`]:
//! `idle → pending (loading, error cleared) → fulfilled | rejected (error set)`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generation::Operation;

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod wishlist;

pub use auth::{AuthAction, AuthState};
pub use cart::{CartAction, CartState, CartTotals};
pub use orders::{OrderAction, OrderState};
pub use products::{apply_filters, FilterPatch, ProductAction, ProductFilters, ProductState, SortBy};
pub use wishlist::{WishlistAction, WishlistState};

// =============================================================================
// Request Status
// =============================================================================

/// Loading and error phase shared by every slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    /// Pending: loading, previous error cleared.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Fulfilled.
    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// Rejected: the data stays as it was.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

// =============================================================================
// Slice
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Auth,
    Cart,
    Wishlist,
    Products,
    Orders,
}

impl Slice {
    pub const fn name(&self) -> &'static str {
        match self {
            Slice::Auth => "auth",
            Slice::Cart => "cart",
            Slice::Wishlist => "wishlist",
            Slice::Products => "products",
            Slice::Orders => "orders",
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Action
// =============================================================================

/// Any state transition, tagged with the slice it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Cart(CartAction),
    Wishlist(WishlistAction),
    Products(ProductAction),
    Orders(OrderAction),
}

impl Action {
    /// The pending transition for an operation's slice.
    pub fn pending(operation: Operation) -> Action {
        match operation.slice() {
            Slice::Auth => Action::Auth(AuthAction::Pending),
            Slice::Cart => Action::Cart(CartAction::Pending),
            Slice::Wishlist => Action::Wishlist(WishlistAction::Pending),
            Slice::Products => Action::Products(ProductAction::Pending),
            Slice::Orders => Action::Orders(OrderAction::Pending),
        }
    }

    /// The rejected transition for an operation's slice.
    ///
    /// Login and current-user failures reset the session as well.
    pub fn rejected(operation: Operation, message: impl Into<String>) -> Action {
        let message = message.into();
        match operation.slice() {
            Slice::Auth if operation.invalidates_session() => {
                Action::Auth(AuthAction::SessionRejected(message))
            }
            Slice::Auth => Action::Auth(AuthAction::Rejected(message)),
            Slice::Cart => Action::Cart(CartAction::Rejected(message)),
            Slice::Wishlist => Action::Wishlist(WishlistAction::Rejected(message)),
            Slice::Products => Action::Products(ProductAction::Rejected(message)),
            Slice::Orders => Action::Orders(OrderAction::Rejected(message)),
        }
    }

    /// Clears the error field of one slice.
    pub fn clear_error(slice: Slice) -> Action {
        match slice {
            Slice::Auth => Action::Auth(AuthAction::ClearError),
            Slice::Cart => Action::Cart(CartAction::ClearError),
            Slice::Wishlist => Action::Wishlist(WishlistAction::ClearError),
            Slice::Products => Action::Products(ProductAction::ClearError),
            Slice::Orders => Action::Orders(OrderAction::ClearError),
        }
    }

    pub fn slice(&self) -> Slice {
        match self {
            Action::Auth(_) => Slice::Auth,
            Action::Cart(_) => Slice::Cart,
            Action::Wishlist(_) => Slice::Wishlist,
            Action::Products(_) => Slice::Products,
            Action::Orders(_) => Slice::Orders,
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<WishlistAction> for Action {
    fn from(action: WishlistAction) -> Self {
        Action::Wishlist(action)
    }
}

impl From<ProductAction> for Action {
    fn from(action: ProductAction) -> Self {
        Action::Products(action)
    }
}

impl From<OrderAction> for Action {
    fn from(action: OrderAction) -> Self {
        Action::Orders(action)
    }
}

// =============================================================================
// App State
// =============================================================================

/// The whole client-side state tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub auth: AuthState,
    pub cart: CartState,
    pub wishlist: WishlistState,
    pub products: ProductState,
    pub orders: OrderState,
}

impl AppState {
    /// Applies one action and returns the next state.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::state::{Action, AppState, CartAction};
    ///
    /// let state = AppState::default().reduce(Action::Cart(CartAction::Pending));
    /// assert!(state.cart.status.loading);
    /// assert!(!state.products.status.loading);
    /// ```
    pub fn reduce(self, action: Action) -> AppState {
        let AppState {
            auth,
            cart,
            wishlist,
            products,
            orders,
        } = self;

        match action {
            Action::Auth(a) => AppState {
                auth: auth.reduce(a),
                cart,
                wishlist,
                products,
                orders,
            },
            Action::Cart(a) => AppState {
                auth,
                cart: cart.reduce(a),
                wishlist,
                products,
                orders,
            },
            Action::Wishlist(a) => AppState {
                auth,
                cart,
                wishlist: wishlist.reduce(a),
                products,
                orders,
            },
            Action::Products(a) => AppState {
                auth,
                cart,
                wishlist,
                products: products.reduce(a),
                orders,
            },
            Action::Orders(a) => AppState {
                auth,
                cart,
                wishlist,
                products,
                orders: orders.reduce(a),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
