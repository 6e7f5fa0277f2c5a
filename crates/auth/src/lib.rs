//! Authentication capability for Bookswap.
//!
//! The marketplace treats authentication as an opaque provider: it can sign
//! a user in or up with email and password, look up the session behind a
//! bearer token, and end a session.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryAuthProvider;

/// An authenticated session handed out by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Opaque bearer token identifying the session.
    pub token: String,
    /// Email the session was opened with. Providers may omit it for
    /// identities that have no email attached.
    pub email: Option<String>,
}

/// Authentication failures. Messages are meant to be shown to users as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("The email address is badly formatted.")]
    InvalidEmail,

    #[error("The email or password is incorrect.")]
    InvalidCredentials,

    #[error("The email address is already in use by another account.")]
    EmailInUse,

    #[error("The password must be at least {min} characters long.")]
    WeakPassword { min: usize },

    #[error("authentication backend failure: {0}")]
    Backend(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

#[async_trait]
pub trait AuthProvider: Debug + Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Register a new account and open a session for it.
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Session behind `token`, if it is still open.
    async fn current_session(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Close the session behind `token`. Returns whether it was open.
    async fn sign_out(&self, token: &str) -> AuthResult<bool>;
}

/// Shared handle to an authentication provider.
pub type AuthProviderArc = Arc<dyn AuthProvider>;

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(email: &str) -> AuthResult<String> {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err(AuthError::InvalidEmail);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  A@X.com ").unwrap(), "a@x.com");
    }

    #[test]
    fn normalize_email_rejects_malformed_addresses() {
        for bad in ["", "ax.com", "@x.com", "a@", "a@b@c", "a b@x.com"] {
            assert_eq!(normalize_email(bad), Err(AuthError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn weak_password_message_names_minimum() {
        let err = AuthError::WeakPassword { min: 6 };
        assert_eq!(
            err.to_string(),
            "The password must be at least 6 characters long."
        );
    }
}
