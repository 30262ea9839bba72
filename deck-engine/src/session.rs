//! Session resolution.
//!
//! The session service is the external authentication layer. The engine
//! asks it for the caller's account before every store round-trip; a
//! missing or expired session surfaces as `Unauthenticated` and the
//! excluded presentation layer redirects to login.

use async_trait::async_trait;
use deck_types::{AccountId, StoreError};
use std::sync::{Arc, Mutex};

/// Resolves the current caller to an account.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// The account behind the current session, or `Unauthenticated`.
    async fn resolve_caller(&self) -> Result<AccountId, StoreError>;
}

/// Mock session service holding an optional signed-in account.
///
/// Clones share state, so a test can sign the account out mid-scenario.
#[derive(Debug, Default)]
pub struct MockSession {
    inner: Arc<Mutex<Option<AccountId>>>,
}

impl Clone for MockSession {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MockSession {
    /// Create a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already signed in as `account`.
    pub fn with_account(account: AccountId) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(account))),
        }
    }

    /// Sign in as `account`.
    pub fn sign_in(&self, account: AccountId) {
        *self.inner.lock().unwrap() = Some(account);
    }

    /// Sign out.
    pub fn sign_out(&self) {
        *self.inner.lock().unwrap() = None;
    }
}

#[async_trait]
impl SessionService for MockSession {
    async fn resolve_caller(&self) -> Result<AccountId, StoreError> {
        self.inner
            .lock()
            .unwrap()
            .ok_or(StoreError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signed_out_session_is_unauthenticated() {
        let session = MockSession::new();
        assert_eq!(
            session.resolve_caller().await,
            Err(StoreError::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn signed_in_session_resolves() {
        let account = AccountId::new();
        let session = MockSession::with_account(account);
        assert_eq!(session.resolve_caller().await, Ok(account));
    }

    #[tokio::test]
    async fn sign_out_revokes_mid_scenario() {
        let account = AccountId::new();
        let session = MockSession::with_account(account);
        let handle = session.clone();

        handle.sign_out();
        assert_eq!(
            session.resolve_caller().await,
            Err(StoreError::Unauthenticated)
        );
    }
}
