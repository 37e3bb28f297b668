//! Authentication collaborator contract.
//!
//! The controller only depends on the two-outcome shape of this trait:
//! the call resolves, or it fails with an [`AuthError`]. What a production
//! implementation does on the wire is its own concern.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// The credentials shape submitted to the authentication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

/// Why an authentication attempt failed.
///
/// The controller collapses all of these into one generic user-facing
/// message; the distinction exists for logging and for callers that care.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {0}")]
    Server(String),
}

/// Asynchronous authentication endpoint.
///
/// Implementations must preserve the resolve/reject contract: success is
/// opaque to the controller, failure carries an [`AuthError`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError>;
}

/// Stand-in endpoint: waits out a fixed delay, then succeeds.
///
/// Mirrors what the real endpoint feels like from the form's side, which is
/// all the state machine needs to be exercised end to end.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(900);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<(), AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
