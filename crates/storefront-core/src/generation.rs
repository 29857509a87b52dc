//! # Request Generations
//!
//! Stale-response detection for asynchronous operations.
//!
//! ## The Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  t0  fetch_products(page=1)  ── ticket #1 ──────────────┐               │
//! │  t1  fetch_products(page=2)  ── ticket #2 ──┐           │               │
//! │  t2                          response #2 ◄──┘ applied   │               │
//! │  t3                          response #1 ◄──────────────┘ DROPPED       │
//! │                                                                         │
//! │  Without tickets, t3 overwrites page 2 with page 1 (last write wins).  │
//! │  With tickets, only the highest ticket issued for an operation may     │
//! │  settle its result.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sequence numbers are tracked per [`Operation`], so a cart fetch never
//! invalidates an in-flight wishlist fetch.

use std::collections::HashMap;
use std::fmt;

use crate::state::Slice;

// =============================================================================
// Operation
// =============================================================================

/// Every asynchronous operation the store can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Auth
    Register,
    Login,
    FetchCurrentUser,

    // Cart
    FetchCart,
    AddToCart,
    UpdateCartItem,
    RemoveCartItem,
    ClearCart,

    // Wishlist
    FetchWishlist,
    AddToWishlist,
    RemoveFromWishlist,
    ClearWishlist,

    // Products
    FetchProducts,
    FetchProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    AddColor,
    DeleteColor,
    AddSize,
    DeleteSize,
    AddImage,
    DeleteImage,
    UpdateInventory,

    // Categories (held by the products slice)
    FetchCategories,
    FetchCategory,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,

    // Orders
    FetchOrders,
    FetchOrder,
    PlaceOrder,
    UpdateOrderStatus,

    // Addresses (held by the orders slice)
    FetchAddresses,
    FetchAddress,
    CreateAddress,
    UpdateAddress,
    DeleteAddress,
}

impl Operation {
    /// The slice whose phase fields this operation drives.
    pub const fn slice(&self) -> Slice {
        use Operation::*;
        match self {
            Register | Login | FetchCurrentUser => Slice::Auth,
            FetchCart | AddToCart | UpdateCartItem | RemoveCartItem | ClearCart => Slice::Cart,
            FetchWishlist | AddToWishlist | RemoveFromWishlist | ClearWishlist => Slice::Wishlist,
            FetchProducts | FetchProduct | CreateProduct | UpdateProduct | DeleteProduct
            | AddColor | DeleteColor | AddSize | DeleteSize | AddImage | DeleteImage
            | UpdateInventory | FetchCategories | FetchCategory | CreateCategory
            | UpdateCategory | DeleteCategory => Slice::Products,
            FetchOrders | FetchOrder | PlaceOrder | UpdateOrderStatus | FetchAddresses
            | FetchAddress | CreateAddress | UpdateAddress | DeleteAddress => Slice::Orders,
        }
    }

    /// Stable snake_case name used in logs.
    pub const fn name(&self) -> &'static str {
        use Operation::*;
        match self {
            Register => "register",
            Login => "login",
            FetchCurrentUser => "fetch_current_user",
            FetchCart => "fetch_cart",
            AddToCart => "add_to_cart",
            UpdateCartItem => "update_cart_item",
            RemoveCartItem => "remove_cart_item",
            ClearCart => "clear_cart",
            FetchWishlist => "fetch_wishlist",
            AddToWishlist => "add_to_wishlist",
            RemoveFromWishlist => "remove_from_wishlist",
            ClearWishlist => "clear_wishlist",
            FetchProducts => "fetch_products",
            FetchProduct => "fetch_product",
            CreateProduct => "create_product",
            UpdateProduct => "update_product",
            DeleteProduct => "delete_product",
            AddColor => "add_color",
            DeleteColor => "delete_color",
            AddSize => "add_size",
            DeleteSize => "delete_size",
            AddImage => "add_image",
            DeleteImage => "delete_image",
            UpdateInventory => "update_inventory",
            FetchCategories => "fetch_categories",
            FetchCategory => "fetch_category",
            CreateCategory => "create_category",
            UpdateCategory => "update_category",
            DeleteCategory => "delete_category",
            FetchOrders => "fetch_orders",
            FetchOrder => "fetch_order",
            PlaceOrder => "place_order",
            UpdateOrderStatus => "update_order_status",
            FetchAddresses => "fetch_addresses",
            FetchAddress => "fetch_address",
            CreateAddress => "create_address",
            UpdateAddress => "update_address",
            DeleteAddress => "delete_address",
        }
    }

    /// Whether a rejection resets the session to logged-out.
    ///
    /// A failed login or current-user fetch means the held credential can
    /// no longer be trusted. A failed registration leaves auth untouched.
    pub const fn invalidates_session(&self) -> bool {
        matches!(self, Operation::Login | Operation::FetchCurrentUser)
    }

    /// Message recorded when the server gives no reason of its own.
    pub const fn failure_message(&self) -> &'static str {
        use Operation::*;
        match self {
            Register => "Registration failed",
            Login => "Login failed",
            FetchCurrentUser => "Failed to fetch user",
            FetchCart => "Failed to fetch cart",
            AddToCart => "Failed to add item to cart",
            UpdateCartItem => "Failed to update cart item",
            RemoveCartItem => "Failed to remove item from cart",
            ClearCart => "Failed to clear cart",
            FetchWishlist => "Failed to fetch wishlist",
            AddToWishlist => "Failed to add item to wishlist",
            RemoveFromWishlist => "Failed to remove item from wishlist",
            ClearWishlist => "Failed to clear wishlist",
            FetchProducts => "Failed to fetch products",
            FetchProduct => "Failed to fetch product",
            CreateProduct => "Failed to create product",
            UpdateProduct => "Failed to update product",
            DeleteProduct => "Failed to delete product",
            AddColor => "Failed to add color",
            DeleteColor => "Failed to delete color",
            AddSize => "Failed to add size",
            DeleteSize => "Failed to delete size",
            AddImage => "Failed to add image",
            DeleteImage => "Failed to delete image",
            UpdateInventory => "Failed to update inventory",
            FetchCategories => "Failed to fetch categories",
            FetchCategory => "Failed to fetch category",
            CreateCategory => "Failed to create category",
            UpdateCategory => "Failed to update category",
            DeleteCategory => "Failed to delete category",
            FetchOrders => "Failed to fetch orders",
            FetchOrder => "Failed to fetch order",
            PlaceOrder => "Failed to place order",
            UpdateOrderStatus => "Failed to update order status",
            FetchAddresses => "Failed to fetch addresses",
            FetchAddress => "Failed to fetch address",
            CreateAddress => "Failed to create address",
            UpdateAddress => "Failed to update address",
            DeleteAddress => "Failed to delete address",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// Stamp issued when an operation is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    operation: Operation,
    seq: u64,
}

impl Ticket {
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.operation, self.seq)
    }
}

// =============================================================================
// Generations
// =============================================================================

/// Highest ticket issued per operation.
///
/// ## Example
/// ```rust
/// use storefront_core::generation::{Generations, Operation};
///
/// let mut generations = Generations::default();
/// let first = generations.issue(Operation::FetchProducts);
/// let second = generations.issue(Operation::FetchProducts);
///
/// assert!(!generations.is_current(&first));
/// assert!(generations.is_current(&second));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Generations {
    latest: HashMap<Operation, u64>,
}

impl Generations {
    /// Issues the next ticket for `operation`, superseding earlier ones.
    pub fn issue(&mut self, operation: Operation) -> Ticket {
        let seq = self.latest.entry(operation).or_insert(0);
        *seq += 1;
        Ticket {
            operation,
            seq: *seq,
        }
    }

    /// True if no later ticket has been issued for the same operation.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.operation) == Some(&ticket.seq)
    }

    /// Latest sequence number issued for `operation` (0 if never).
    pub fn latest(&self, operation: Operation) -> u64 {
        self.latest.get(&operation).copied().unwrap_or(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
