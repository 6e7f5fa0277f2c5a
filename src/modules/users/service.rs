//! Identity resolution and account flows.

use bookswap_auth::{normalize_email, AuthProvider, Session};
use bookswap_store::{to_fields, DocumentStore};
use serde_json::Value;

use super::models::{SignIn, SignUp, User, USERS};
use crate::error::{MarketError, MarketResult};

/// User record whose email equals `email`.
///
/// Absent input short-circuits to `None` without touching the store. When
/// several records share the email the first one returned wins.
pub async fn find_user(store: &dyn DocumentStore, email: Option<&str>) -> MarketResult<Option<User>> {
    let Some(email) = email else {
        return Ok(None);
    };

    let matches = store
        .query_eq(USERS, "email", &Value::from(email))
        .await?;
    if matches.len() > 1 {
        tracing::warn!(email, matches = matches.len(), "email maps to several user records");
    }

    matches
        .first()
        .map(|doc| doc.decode::<User>())
        .transpose()
        .map_err(Into::into)
}

/// Internal identifier of the user signed in with `email`.
pub async fn resolve_user_id(
    store: &dyn DocumentStore,
    email: Option<&str>,
) -> MarketResult<Option<String>> {
    Ok(find_user(store, email).await?.map(|user| user.user_id))
}

/// Identifier behind a session.
pub async fn session_user_id(
    store: &dyn DocumentStore,
    session: &Session,
) -> MarketResult<Option<String>> {
    resolve_user_id(store, session.email.as_deref()).await
}

/// Create the auth account, then the user record stored under `userID`.
///
/// Both the identifier and the email must be unused by existing user records.
///
/// A failed record write after the account exists is not compensated.
pub async fn sign_up(
    auth: &dyn AuthProvider,
    store: &dyn DocumentStore,
    request: SignUp,
) -> MarketResult<Session> {
    let user_id = request.user_id.trim();
    let full_name = request.full_name.trim();
    if user_id.is_empty() || user_id.contains('/') {
        return Err(MarketError::Invalid(
            "user id must be non-empty and must not contain '/'".into(),
        ));
    }
    if full_name.is_empty() {
        return Err(MarketError::Invalid("full name is required".into()));
    }
    if store.get(USERS, user_id).await?.is_some() {
        return Err(MarketError::UserIdTaken(user_id.to_string()));
    }
    let normalized = normalize_email(&request.email)?;
    if !store
        .query_eq(USERS, "email", &Value::from(normalized.as_str()))
        .await?
        .is_empty()
    {
        tracing::warn!(email = %normalized, "sign-up rejected: email already has a user record");
        return Err(MarketError::EmailTaken(normalized));
    }

    let session = auth.sign_up(&request.email, &request.password).await?;
    let email = session.email.clone().unwrap_or(normalized);

    let user = User {
        user_id: user_id.to_string(),
        email,
        full_name: full_name.to_string(),
        is_admin: false,
    };
    store.set(USERS, user_id, to_fields(&user)?).await?;

    tracing::info!(user_id, "user registered");
    Ok(session)
}

pub async fn sign_in(auth: &dyn AuthProvider, request: SignIn) -> MarketResult<Session> {
    Ok(auth.sign_in(&request.email, &request.password).await?)
}

pub async fn sign_out(auth: &dyn AuthProvider, session: &Session) -> MarketResult<()> {
    auth.sign_out(&session.token).await?;
    Ok(())
}

/// Record of the signed-in user.
pub async fn profile(store: &dyn DocumentStore, session: &Session) -> MarketResult<User> {
    find_user(store, session.email.as_deref())
        .await?
        .ok_or_else(|| MarketError::NotFound("user profile".into()))
}

#[cfg(test)]
mod tests {
    use bookswap_auth::{AuthError, MemoryAuthProvider};
    use bookswap_store::{DocumentStore, MemoryDocumentStore};

    use super::*;
    use crate::testing::{marketplace, session_for};

    fn sign_up_request(email: &str, user_id: &str) -> SignUp {
        SignUp {
            email: email.into(),
            password: "hunter22".into(),
            full_name: "Ada Lovelace".into(),
            user_id: user_id.into(),
        }
    }

    #[tokio::test]
    async fn resolves_existing_email() {
        let store = marketplace().await;
        let user_id = resolve_user_id(&store, Some("a@x.com")).await.unwrap();
        assert_eq!(user_id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn unknown_or_absent_email_resolves_to_none() {
        let store = marketplace().await;
        assert_eq!(resolve_user_id(&store, Some("nobody@x.com")).await.unwrap(), None);
        assert_eq!(resolve_user_id(&store, None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_without_email_resolves_to_none() {
        let store = marketplace().await;
        let session = Session {
            token: "t".into(),
            email: None,
        };
        assert_eq!(session_user_id(&store, &session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn profile_returns_signed_in_user() {
        let store = marketplace().await;
        let user = profile(&store, &session_for("b@x.com")).await.unwrap();
        assert_eq!(user.user_id, "u2");
        assert!(!user.is_admin);

        let missing = profile(&store, &session_for("ghost@x.com")).await;
        assert!(matches!(missing, Err(MarketError::NotFound(_))));
    }

    #[tokio::test]
    async fn sign_up_writes_user_record_under_chosen_id() {
        let store = MemoryDocumentStore::new();
        let auth = MemoryAuthProvider::default();

        let session = sign_up(&auth, &store, sign_up_request("New@X.com", "reader7"))
            .await
            .unwrap();
        assert_eq!(session.email.as_deref(), Some("new@x.com"));

        let doc = store.get(USERS, "reader7").await.unwrap().unwrap();
        let user: User = doc.decode().unwrap();
        assert_eq!(user.email, "new@x.com");
        assert_eq!(user.full_name, "Ada Lovelace");
        assert!(doc.get("password").is_none());

        assert_eq!(
            resolve_user_id(&store, session.email.as_deref()).await.unwrap().as_deref(),
            Some("reader7")
        );
    }

    #[tokio::test]
    async fn sign_up_rejects_taken_user_id_before_creating_account() {
        let store = marketplace().await;
        let auth = MemoryAuthProvider::default();

        let err = sign_up(&auth, &store, sign_up_request("fresh@x.com", "u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::UserIdTaken(_)));
        assert_eq!(
            auth.sign_in("fresh@x.com", "hunter22").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn sign_up_cannot_claim_an_existing_users_email() {
        let store = marketplace().await;
        let auth = MemoryAuthProvider::default();

        let err = sign_up(&auth, &store, sign_up_request(" A@X.com", "zz9"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::EmailTaken(ref email) if email == "a@x.com"));

        assert!(store.get(USERS, "zz9").await.unwrap().is_none());
        assert_eq!(
            auth.sign_in("a@x.com", "hunter22").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            resolve_user_id(&store, Some("a@x.com")).await.unwrap().as_deref(),
            Some("u1")
        );
    }

    #[tokio::test]
    async fn sign_up_surfaces_provider_errors() {
        let store = MemoryDocumentStore::new();
        let auth = MemoryAuthProvider::default();
        // Account without a user record, e.g. an earlier sign-up whose record write failed.
        auth.sign_up("a@x.com", "hunter22").await.unwrap();

        let err = sign_up(&auth, &store, sign_up_request("a@x.com", "two"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::Auth(AuthError::EmailInUse)));
        assert!(store.get(USERS, "two").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_in_and_out_round_trip() {
        let store = MemoryDocumentStore::new();
        let auth = MemoryAuthProvider::default();
        sign_up(&auth, &store, sign_up_request("a@x.com", "u1"))
            .await
            .unwrap();

        let session = sign_in(
            &auth,
            SignIn {
                email: "a@x.com".into(),
                password: "hunter22".into(),
            },
        )
        .await
        .unwrap();
        sign_out(&auth, &session).await.unwrap();
        assert_eq!(auth.current_session(&session.token).await.unwrap(), None);
    }
}
