use axum::{
    extract::{FromRef, State},
    http::{header, HeaderMap, HeaderValue},
    routing::post,
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginForm, LoginResponse};
use crate::auth::jwt::JwtKeys;
use crate::auth::password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Unknown email and wrong password both come back as the same generic 401
/// so the login form cannot be used to probe which emails are registered.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(mut form): Form<LoginForm>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    form.username = form.username.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &form.username)
        .await?
        .ok_or_else(|| {
            warn!(email = %form.username, "login with unknown email");
            ApiError::Unauthorized
        })?;

    if !password::verify_password(&form.password, &user.password_hash) {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::Unauthorized);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.issue(&user.email)?;

    // the token also travels as an HttpOnly cookie, mirroring the body
    let cookie = format!("access_token=Bearer {access_token}; HttpOnly; Path=/");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?,
    );

    info!(user_id = user.id, "user logged in");
    Ok((
        headers,
        Json(LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            access_token,
            token_type: "bearer",
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serializes_bearer_type() {
        let response = LoginResponse {
            id: 1,
            name: "Ada".into(),
            email: "ada@x.com".into(),
            access_token: "tok".into(),
            token_type: "bearer",
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"token_type\":\"bearer\""));
        assert!(json.contains("\"access_token\":\"tok\""));
    }
}
