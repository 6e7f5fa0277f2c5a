use serde::{Deserialize, Serialize};

/// Collection holding one record per user, keyed by `userID`.
pub const USERS: &str = "users";

/// A marketplace user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal identifier, also the document id
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Email the account signs in with
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Request model for creating an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Identifier chosen by the user at sign-up
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}
