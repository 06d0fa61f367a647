use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::Error;
use crate::token::TokenCodec;

pub mod memory;

/// One login attempt, plaintext at the boundary and never persisted.
#[derive(ToSchema, Deserialize, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Read-only identity owned by the user store.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub roles: Vec<String>,
}

/// Returned to the caller on a successful login.
#[derive(ToSchema, Serialize, Debug)]
pub struct AuthResult {
    pub token: String,
    pub username: String,
    pub roles: Vec<String>,
}

/// Checks raw credentials; the upstream failure propagates unchanged.
pub trait Authenticator: Send + Sync {
    /// # Errors
    /// `Error::Authentication` when the credentials do not match.
    fn authenticate(&self, username: &str, password: &str) -> Result<(), Error>;
}

/// Looks up identities by username.
pub trait UserStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<Identity>;
}

/// Seam between the orchestrator and the codec so tests can observe issuance.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    /// Returns an error when signing fails.
    fn issue(&self, subject: &str, roles: &[String]) -> Result<String, Error>;
}

impl TokenIssuer for TokenCodec {
    fn issue(&self, subject: &str, roles: &[String]) -> Result<String, Error> {
        TokenCodec::issue(self, subject, roles)
    }
}

/// Drives one login attempt end to end.
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            authenticator,
            users,
            tokens,
        }
    }

    /// Authenticate, look up the identity, issue a token.
    ///
    /// A store miss after successful authentication means the authenticator
    /// and the store disagree; it surfaces as `UserNotFound`, and no token is
    /// issued.
    ///
    /// # Errors
    /// Propagates the authenticator failure unchanged, `Error::UserNotFound`
    /// on a store miss, or the codec failure.
    pub fn login(&self, credentials: &Credentials) -> Result<AuthResult, Error> {
        self.authenticator
            .authenticate(&credentials.username, &credentials.password)?;

        let identity = self
            .users
            .find_by_username(&credentials.username)
            .ok_or_else(|| Error::UserNotFound(credentials.username.clone()))?;

        debug!("Issuing token for {}", identity.username);

        // Roles keep the store's natural order.
        let token = self.tokens.issue(&identity.username, &identity.roles)?;

        Ok(AuthResult {
            token,
            username: identity.username,
            roles: identity.roles,
        })
    }
}
