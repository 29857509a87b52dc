//! # Auth Slice
//!
//! Session state: who is logged in and with which credential.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   logged out ──login──► LoggedIn{user, token} ──► authenticated         │
//! │       ▲                                               │                 │
//! │       │                                               │                 │
//! │       ├──────── Logout ◄──────────────────────────────┤                 │
//! │       └──────── SessionRejected (login / me failed) ◄─┘                 │
//! │                                                                         │
//! │   startup: valid stored token ──Restored{token}──► authenticated        │
//! │            then fetch_current_user fills in `user`                      │
//! │                                                                         │
//! │   register never logs in; its failure only sets `error`.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `is_authenticated == token.is_some()`. `user`, `token` and
//! `is_authenticated` are always reset together.

use serde::{Deserialize, Serialize};

use super::RequestStatus;
use crate::types::{ProfileUpdate, Session, User};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    /// Held in memory for the session; never written into snapshots.
    #[serde(skip_serializing, default)]
    pub token: Option<String>,
    pub is_authenticated: bool,
    #[serde(flatten)]
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Pending,
    /// Registration accepted. The user still has to log in.
    Registered,
    LoggedIn(Session),
    /// Current user fetched with the given credential.
    UserLoaded { user: User, token: Option<String> },
    /// A valid stored credential was found at startup.
    Restored { token: String },
    Logout,
    ProfileUpdated(ProfileUpdate),
    /// Failure that leaves the session as it was.
    Rejected(String),
    /// Failure that invalidates the session.
    SessionRejected(String),
    ClearError,
}

impl AuthState {
    pub fn reduce(mut self, action: AuthAction) -> Self {
        match action {
            AuthAction::Pending => self.status.begin(),
            AuthAction::Registered => self.status.succeed(),
            AuthAction::LoggedIn(Session { user, token }) => {
                self.user = Some(user);
                self.set_token(Some(token));
                self.status.succeed();
            }
            AuthAction::UserLoaded { user, token } => {
                self.user = Some(user);
                if token.is_some() {
                    self.set_token(token);
                }
                self.status.succeed();
            }
            AuthAction::Restored { token } => self.set_token(Some(token)),
            AuthAction::Logout => return AuthState::default(),
            AuthAction::ProfileUpdated(update) => {
                if let Some(user) = self.user.as_mut() {
                    if let Some(name) = update.name {
                        user.name = name;
                    }
                    if let Some(email) = update.email {
                        user.email = email;
                    }
                }
            }
            AuthAction::Rejected(message) => self.status.fail(message),
            AuthAction::SessionRejected(message) => {
                self.user = None;
                self.set_token(None);
                self.status.fail(message);
            }
            AuthAction::ClearError => self.status.clear_error(),
        }
        self
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
        self.is_authenticated = self.token.is_some();
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            role: "customer".to_string(),
            created_at: None,
        }
    }

    fn logged_in() -> AuthState {
        AuthState::default().reduce(AuthAction::LoggedIn(Session {
            user: user(),
            token: "abc.def.ghi".to_string(),
        }))
    }

    #[test]
    fn test_login_sets_session() {
        let auth = logged_in();
        assert!(auth.is_authenticated);
        assert_eq!(auth.token.as_deref(), Some("abc.def.ghi"));
        assert_eq!(auth.user.as_ref().map(|u| u.id), Some(1));
    }

    #[test]
    fn test_logout_resets_together() {
        let auth = logged_in()
            .reduce(AuthAction::Rejected("x".to_string()))
            .reduce(AuthAction::Logout);
        assert_eq!(auth, AuthState::default());
    }

    #[test]
    fn test_session_rejected_resets_and_sets_error() {
        let auth = logged_in()
            .reduce(AuthAction::Pending)
            .reduce(AuthAction::SessionRejected("Invalid or expired token".to_string()));
        assert!(auth.user.is_none());
        assert!(auth.token.is_none());
        assert!(!auth.is_authenticated);
        assert!(!auth.status.loading);
        assert_eq!(auth.status.error.as_deref(), Some("Invalid or expired token"));
    }

    #[test]
    fn test_register_rejection_keeps_session() {
        let auth = logged_in().reduce(AuthAction::Rejected("Email already registered".to_string()));
        assert!(auth.is_authenticated);
        assert!(auth.user.is_some());
    }

    #[test]
    fn test_registered_does_not_log_in() {
        let auth = AuthState::default()
            .reduce(AuthAction::Pending)
            .reduce(AuthAction::Registered);
        assert!(!auth.is_authenticated);
        assert!(!auth.status.loading);
    }

    #[test]
    fn test_restored_then_user_loaded() {
        let auth = AuthState::default().reduce(AuthAction::Restored {
            token: "opaque".to_string(),
        });
        assert!(auth.is_authenticated);
        assert!(auth.user.is_none());

        let auth = auth.reduce(AuthAction::UserLoaded {
            user: user(),
            token: None,
        });
        assert!(auth.is_authenticated);
        assert_eq!(auth.token.as_deref(), Some("opaque"));
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let auth = AuthState::default().reduce(AuthAction::Restored {
            token: String::new(),
        });
        assert!(!auth.is_authenticated);
    }

    #[test]
    fn test_profile_update_merges() {
        let auth = logged_in().reduce(AuthAction::ProfileUpdated(ProfileUpdate {
            name: Some("Jane Doe".to_string()),
            email: None,
        }));
        let user = auth.user.unwrap();
        assert_eq!(user.name, "Jane Doe");
        assert_eq!(user.email, "jane@example.com");
    }

    #[test]
    fn test_token_not_serialized() {
        let json = serde_json::to_value(logged_in()).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["isAuthenticated"], serde_json::json!(true));
    }
}
