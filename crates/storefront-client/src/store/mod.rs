//! # Store
//!
//! The single state container of a client session.
//!
//! ## Operation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store::perform(op, request)                       │
//! │                                                                         │
//! │   0. session credential expired?     ──► SessionRejected, token cleared │
//! │   1. issue ticket (op, seq)          Generations (Mutex)                │
//! │   2. dispatch Action::pending(op)    ──► loading = true, error = None   │
//! │   3. await request                   ApiClient (+ follow-up read)       │
//! │      then repeat step 0                                                 │
//! │   4. ticket still current?                                              │
//! │        │                                                                │
//! │        ├── no  ──► drop result, debug log                               │
//! │        │                                                                │
//! │        └── yes ──► Ok(value)  ──► dispatch fulfilled(value)             │
//! │                    Err(error) ──► dispatch Action::rejected(op, msg)    │
//! │                                                                         │
//! │   Every dispatch runs AppState::reduce inside watch::Sender::send_modify│
//! │   so subscribers observe each committed state in order.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations are grouped per slice in the submodules. Each one returns the
//! [`RequestError`] it recorded so a view can raise a notification; the
//! message is already in the slice's `error` field either way.
//!
//! A dropped future does not cancel anything on the server. If it is dropped
//! after the pending dispatch, the slice stays `loading` until the next
//! operation on it settles.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, info_span, Instrument, Span};
use uuid::Uuid;

use storefront_core::generation::{Generations, Operation, Ticket};
use storefront_core::state::{Action, AppState, AuthAction, Slice};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientResult, RequestError};
use crate::token::{self, TokenStore};

mod auth;
mod cart;
mod orders;
mod products;
mod wishlist;

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

// =============================================================================
// Store
// =============================================================================

/// Session-scoped state container.
///
/// ## Example
/// ```rust,no_run
/// use storefront_client::{ClientConfig, Store};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::from_config(&ClientConfig::load_or_default(None))?;
/// store.fetch_products(Default::default()).await?;
///
/// let state = store.state();
/// println!("{} products", state.products.filtered_products().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Store {
    api: ApiClient,
    state: watch::Sender<AppState>,
    generations: Mutex<Generations>,
    session_id: Uuid,
    span: Span,
}

impl Store {
    /// Creates a store around `api`.
    ///
    /// A valid credential already in the token store marks the session as
    /// authenticated straight away; [`Store::restore_session`] then loads
    /// the user it belongs to.
    pub fn new(api: ApiClient) -> Self {
        let session_id = Uuid::new_v4();
        let span = info_span!("store", session = %session_id);
        let (state, _) = watch::channel(AppState::default());

        let store = Store {
            api,
            state,
            generations: Mutex::new(Generations::default()),
            session_id,
            span,
        };

        if let Some(token) = store.api.tokens().valid_token() {
            store.span.in_scope(|| info!("Restoring stored session"));
            store.dispatch(AuthAction::Restored { token });
        }
        store
    }

    /// Builds the token store, API client and store from configuration.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let tokens = TokenStore::from_config(config);
        let api = ApiClient::from_config(config, tokens)?;
        Ok(Store::new(api))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn tokens(&self) -> &TokenStore {
        self.api.tokens()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    // =========================================================================
    // Reading State
    // =========================================================================

    /// Borrows the current state. Do not hold the guard across an `.await`.
    pub fn state(&self) -> watch::Ref<'_, AppState> {
        self.state.borrow()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every committed dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Writing State
    // =========================================================================

    /// Applies one action through the reducer.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        self.span
            .in_scope(|| debug!(slice = %action.slice(), "Dispatching action"));
        self.state
            .send_modify(|state| *state = std::mem::take(state).reduce(action));
    }

    /// Clears the error field of one slice.
    pub fn clear_error(&self, slice: Slice) {
        self.dispatch(Action::clear_error(slice));
    }

    fn issue(&self, operation: Operation) -> Ticket {
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .issue(operation)
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_current(ticket)
    }

    /// Resets auth once the credential it holds has expired.
    ///
    /// The token store purges an expired credential when a request reads it;
    /// this keeps the auth slice in step with that purge.
    fn expire_stale_session(&self) {
        let now = Utc::now().timestamp();
        let expired = self
            .state
            .borrow()
            .auth
            .token
            .as_deref()
            .is_some_and(|credential| token::is_expired_at(credential, now));
        if expired {
            self.span.in_scope(|| info!("Session credential expired"));
            self.tokens().clear();
            self.dispatch(AuthAction::SessionRejected(SESSION_EXPIRED.to_string()));
        }
    }

    /// Runs one asynchronous operation through its full lifecycle.
    async fn perform<T, F, A>(
        &self,
        operation: Operation,
        request: F,
        fulfilled: impl FnOnce(T) -> A,
    ) -> Result<(), RequestError>
    where
        F: Future<Output = Result<T, RequestError>>,
        A: Into<Action>,
    {
        self.expire_stale_session();
        let ticket = self.issue(operation);
        self.span.in_scope(|| {
            debug!(%operation, seq = ticket.seq(), "Operation dispatched");
        });
        self.dispatch(Action::pending(operation));

        let outcome = request.instrument(self.span.clone()).await;
        self.expire_stale_session();

        if !self.is_current(&ticket) {
            self.span.in_scope(|| {
                debug!(%operation, seq = ticket.seq(), "Dropping stale completion");
            });
            return outcome.map(|_| ());
        }

        match outcome {
            Ok(value) => {
                self.dispatch(fulfilled(value));
                Ok(())
            }
            Err(err) => {
                self.span.in_scope(|| {
                    debug!(%operation, seq = ticket.seq(), status = ?err.status(), "Operation rejected");
                });
                if operation.invalidates_session() {
                    self.tokens().clear();
                }
                self.dispatch(Action::rejected(operation, err.message()));
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::money::Money;
    use storefront_core::state::CartAction;
    use storefront_core::types::{CartItem, Discount};
    use tokio::sync::oneshot;
    use url::Url;

    fn offline_store(tokens: TokenStore) -> Store {
        let url = Url::parse("http://127.0.0.1:9/api").unwrap();
        Store::new(ApiClient::new(&url, tokens).unwrap())
    }

    fn item(id: u64) -> CartItem {
        CartItem::new(id, id * 10, Money::from_cents(1_000), Discount::zero(), 1)
    }

    #[test]
    fn test_new_store_is_empty_without_token() {
        let store = offline_store(TokenStore::in_memory());
        let state = store.snapshot();
        assert!(!state.auth.is_authenticated);
        assert!(state.cart.items.is_empty());
        assert!(state.products.products.is_empty());
    }

    #[test]
    fn test_new_store_restores_opaque_token() {
        let tokens = TokenStore::in_memory();
        tokens.set("opaque-credential");
        let store = offline_store(tokens);
        let state = store.state();
        assert!(state.auth.is_authenticated);
        assert_eq!(state.auth.token.as_deref(), Some("opaque-credential"));
        assert!(state.auth.user.is_none());
    }

    #[test]
    fn test_dispatch_notifies_subscribers() {
        let store = offline_store(TokenStore::in_memory());
        let mut receiver = store.subscribe();
        assert!(!receiver.has_changed().unwrap());

        store.dispatch(CartAction::Set(vec![item(1)]));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().cart.items.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_completion_is_dropped() {
        let store = offline_store(TokenStore::in_memory());
        let (first_tx, first_rx) = oneshot::channel::<Vec<CartItem>>();
        let (second_tx, second_rx) = oneshot::channel::<Vec<CartItem>>();

        let closed = |_| RequestError::Transport {
            message: "closed".to_string(),
        };
        let first = store.perform(
            Operation::FetchCart,
            async { first_rx.await.map_err(closed) },
            CartAction::Loaded,
        );
        let second = store.perform(
            Operation::FetchCart,
            async { second_rx.await.map_err(closed) },
            CartAction::Loaded,
        );
        let respond = async {
            second_tx.send(vec![item(2)]).unwrap();
            first_tx.send(vec![item(1)]).unwrap();
        };

        let (first, second, _) = tokio::join!(first, second, respond);
        assert!(first.is_ok());
        assert!(second.is_ok());

        let state = store.state();
        assert_eq!(state.cart.items.len(), 1);
        assert_eq!(state.cart.items[0].id, 2);
        assert!(!state.cart.status.loading);
    }

    #[tokio::test]
    async fn test_rejection_records_message_and_keeps_data() {
        let store = offline_store(TokenStore::in_memory());
        store.dispatch(CartAction::Set(vec![item(1)]));

        let result = store
            .perform(
                Operation::FetchCart,
                async {
                    Err::<Vec<CartItem>, _>(RequestError::Status {
                        status: 500,
                        message: "Database unavailable".to_string(),
                    })
                },
                CartAction::Loaded,
            )
            .await;

        assert_eq!(result.unwrap_err().status(), Some(500));
        let state = store.state();
        assert_eq!(state.cart.status.error.as_deref(), Some("Database unavailable"));
        assert_eq!(state.cart.items.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_session_is_reset_before_request() {
        let expired = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({ "user_id": 1, "exp": Utc::now().timestamp() - 1 }),
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        let tokens = TokenStore::in_memory();
        let store = offline_store(tokens.clone());
        tokens.set(&expired);
        store.dispatch(AuthAction::Restored { token: expired });
        assert!(store.state().auth.is_authenticated);

        store
            .perform(
                Operation::FetchCart,
                async { Ok::<_, RequestError>(vec![item(1)]) },
                CartAction::Loaded,
            )
            .await
            .unwrap();

        let state = store.state();
        assert!(!state.auth.is_authenticated);
        assert!(state.auth.token.is_none());
        assert_eq!(state.auth.status.error.as_deref(), Some(SESSION_EXPIRED));
        assert_eq!(state.cart.items.len(), 1);
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_clear_error() {
        let store = offline_store(TokenStore::in_memory());
        store.dispatch(Action::rejected(Operation::FetchOrders, "Failed to fetch orders"));
        store.clear_error(Slice::Orders);
        assert!(store.state().orders.status.error.is_none());
    }
}
