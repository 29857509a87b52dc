//! `/auth` endpoints.

use storefront_core::generation::Operation;
use storefront_core::types::{Credentials, Registration, Session, User};

use super::{normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::account::{AuthResponse, UserEnvelope};

impl ApiClient {
    /// `POST /auth/register`. The returned user is not logged in.
    pub async fn register(&self, registration: &Registration) -> Result<User, RequestError> {
        let op = Operation::Register;
        let response: AuthResponse = self.post(op, "/auth/register", registration).await?;
        normalize(op, response.user)
    }

    /// `POST /auth/login`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, RequestError> {
        let op = Operation::Login;
        let response: AuthResponse = self.post(op, "/auth/login", credentials).await?;
        normalize(op, response)
    }

    /// `GET /auth/me`.
    pub async fn current_user(&self) -> Result<User, RequestError> {
        let op = Operation::FetchCurrentUser;
        let envelope: UserEnvelope = self.get(op, "/auth/me").await?;
        normalize(op, envelope.user)
    }
}
