//! # Commands
//!
//! One module per view. A command mounts its view, dispatches Store
//! operations and prints the rendered state.
//!
//! ## Failure Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Where a failure goes                             │
//! │                                                                         │
//! │  read fails (fetch_*)      ──► Notice on stderr, view still renders     │
//! │                                 (sample catalog when applicable)        │
//! │  mutation fails            ──► command returns the message + retry hint │
//! │  invalid input             ──► command returns the validation message   │
//! │                                 before any request is sent              │
//! │  protected view, no session ──► login hint, nothing is requested        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::anyhow;

use storefront_client::{RequestError, Store};
use storefront_core::error::ValidationError;

use crate::views::notify::Notice;
use crate::views::{session_gate, Gate};

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;

/// Runs the session gate for a protected view. Prints the login hint and
/// returns false when there is no valid session.
pub(crate) fn signed_in(store: &Store) -> bool {
    match session_gate(store.tokens()) {
        Gate::Open => true,
        Gate::RedirectToLogin => {
            Notice::info("Please sign in first: storefront login --email <email>").emit();
            false
        }
    }
}

/// Emits a notice for a failed read. Returns true when the read succeeded.
pub(crate) fn settle(result: Result<(), RequestError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            Notice::request_failed(&err).emit();
            false
        }
    }
}

/// Turns a failed mutation into the command's error.
pub(crate) fn failed(err: RequestError) -> anyhow::Error {
    anyhow!(Notice::request_failed(&err).message)
}

pub(crate) fn invalid(err: ValidationError) -> anyhow::Error {
    anyhow!(Notice::invalid(&err).message)
}
