//! Session operations.

use tracing::info;

use storefront_core::generation::Operation;
use storefront_core::state::AuthAction;
use storefront_core::types::{Credentials, ProfileUpdate, Registration, Session, User};

use super::Store;
use crate::error::RequestError;

impl Store {
    /// Creates an account. The new user is not logged in.
    pub async fn register(&self, registration: Registration) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::Register,
            async move { api.register(&registration).await },
            |_: User| AuthAction::Registered,
        )
        .await
    }

    /// Logs in and persists the returned credential.
    ///
    /// A failure resets the session and clears the stored credential.
    pub async fn login(&self, credentials: Credentials) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::Login,
            async move { api.login(&credentials).await },
            |session: Session| {
                self.tokens().set(&session.token);
                self.span
                    .in_scope(|| info!(user_id = session.user.id, "Logged in"));
                AuthAction::LoggedIn(session)
            },
        )
        .await
    }

    /// Loads the user behind the stored credential.
    ///
    /// A failure (typically a 401) resets the session.
    pub async fn fetch_current_user(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::FetchCurrentUser,
            async move { api.current_user().await },
            |user: User| AuthAction::UserLoaded {
                user,
                token: self.tokens().valid_token(),
            },
        )
        .await
    }

    /// Loads the user for a session restored at construction.
    ///
    /// Does nothing when no valid credential was found.
    pub async fn restore_session(&self) -> Result<(), RequestError> {
        let authenticated = self.state().auth.is_authenticated;
        if !authenticated {
            return Ok(());
        }
        self.fetch_current_user().await
    }

    /// Clears the stored credential and resets the session.
    pub fn logout(&self) {
        self.tokens().clear();
        self.span.in_scope(|| info!("Logged out"));
        self.dispatch(AuthAction::Logout);
    }

    /// Applies profile changes to the local user.
    pub fn update_profile(&self, update: ProfileUpdate) {
        self.dispatch(AuthAction::ProfileUpdated(update));
    }
}

#[cfg(test)]
mod tests {
    use crate::api::ApiClient;
    use crate::store::Store;
    use crate::token::TokenStore;
    use url::Url;

    fn store_with_token(token: &str) -> Store {
        let tokens = TokenStore::in_memory();
        tokens.set(token);
        let url = Url::parse("http://127.0.0.1:9/api").unwrap();
        Store::new(ApiClient::new(&url, tokens).unwrap())
    }

    #[test]
    fn test_logout_clears_state_and_storage() {
        let store = store_with_token("opaque");
        assert!(store.state().auth.is_authenticated);

        store.logout();
        let state = store.state();
        assert!(!state.auth.is_authenticated);
        assert!(state.auth.token.is_none());
        assert!(state.auth.user.is_none());
        assert!(store.tokens().get().is_none());
    }

    #[tokio::test]
    async fn test_restore_without_session_is_noop() {
        let url = Url::parse("http://127.0.0.1:9/api").unwrap();
        let store = Store::new(ApiClient::new(&url, TokenStore::in_memory()).unwrap());
        store.restore_session().await.unwrap();
        assert!(!store.state().auth.status.loading);
        assert!(store.state().auth.status.error.is_none());
    }
}
