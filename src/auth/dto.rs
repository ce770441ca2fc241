use serde::{Deserialize, Serialize};

/// Login form per the OAuth2 password convention: the username field carries
/// the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub access_token: String,
    pub token_type: &'static str,
}
