use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{normalize_email, AuthError, AuthProvider, AuthResult, Session};

/// Argon2id hash of a password in PHC string form.
#[derive(Debug)]
struct Credential {
    phc: String,
}

impl Credential {
    fn new(password: &str) -> AuthResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| AuthError::Backend(format!("password hashing failed: {err}")))?
            .to_string();
        Ok(Self { phc })
    }

    fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.phc) {
            Ok(hash) => Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok(),
            Err(err) => {
                tracing::error!(error = %err, "stored credential is not a valid PHC string");
                false
            }
        }
    }
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Credential>,
    sessions: HashMap<String, String>,
}

/// In-memory email/password provider.
///
/// Passwords are kept only as Argon2id hashes. Sessions never expire
/// until signed out.
#[derive(Debug)]
pub struct MemoryAuthProvider {
    min_password_length: usize,
    state: RwLock<State>,
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new(6)
    }
}

impl MemoryAuthProvider {
    pub fn new(min_password_length: usize) -> Self {
        Self {
            min_password_length,
            state: RwLock::new(State::default()),
        }
    }

    fn open_session(state: &mut State, email: String) -> Session {
        let token = Uuid::now_v7().simple().to_string();
        state.sessions.insert(token.clone(), email.clone());
        Session {
            token,
            email: Some(email),
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = normalize_email(email)?;
        let mut state = self.state.write().await;

        let verified = state
            .accounts
            .get(&email)
            .is_some_and(|credential| credential.verify(password));
        if !verified {
            tracing::info!(email = %email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Self::open_session(&mut state, email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = normalize_email(email)?;
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::WeakPassword {
                min: self.min_password_length,
            });
        }

        let credential = Credential::new(password)?;
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }
        state.accounts.insert(email.clone(), credential);
        tracing::info!(email = %email, "account created");

        Ok(Self::open_session(&mut state, email))
    }

    async fn current_session(&self, token: &str) -> AuthResult<Option<Session>> {
        let state = self.state.read().await;
        Ok(state.sessions.get(token).map(|email| Session {
            token: token.to_string(),
            email: Some(email.clone()),
        }))
    }

    async fn sign_out(&self, token: &str) -> AuthResult<bool> {
        Ok(self.state.write().await.sessions.remove(token).is_some())
    }
}
