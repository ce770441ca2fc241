use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::state::AppState;

/// Fixed signing algorithm; only the secret comes from configuration.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token payload. The subject is the user's email, the only identity fact a
/// verified token carries; the numeric id is deliberately not embedded.
///
/// There is no `exp` claim: tokens stay valid until the secret rotates, which
/// invalidates all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
}

/// Why a token was rejected. Callers at the HTTP boundary must collapse all
/// variants into one generic unauthorized response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("missing subject claim")]
    MissingClaim,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_secret(&state.config.jwt.secret)
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a token whose subject is the given email.
    pub fn issue(&self, email: &str) -> anyhow::Result<String> {
        let claims = Claims {
            sub: email.to_owned(),
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)?;
        debug!(sub = %email, "jwt issued");
        Ok(token)
    }

    /// Verifies the signature and decodes the claims.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        // no exp claim is issued, so expiry checking must be off
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::Json(_) => TokenError::MissingClaim,
                _ => TokenError::Malformed,
            }
        })?;
        if data.claims.sub.is_empty() {
            return Err(TokenError::MissingClaim);
        }
        debug!(sub = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_parse_round_trip() {
        let keys = JwtKeys::from_secret("dev-secret");
        let token = keys.issue("a@x.com").expect("issue");
        let claims = keys.parse(&token).expect("parse");
        assert_eq!(claims.sub, "a@x.com");
    }

    #[tokio::test]
    async fn keys_build_from_app_state() {
        let state = crate::state::AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.issue("b@x.com").expect("issue");
        assert_eq!(keys.parse(&token).expect("parse").sub, "b@x.com");
    }

    #[test]
    fn parse_rejects_token_signed_with_other_secret() {
        let ours = JwtKeys::from_secret("secret-one");
        let theirs = JwtKeys::from_secret("secret-two");
        let token = theirs.issue("a@x.com").expect("issue");
        assert_eq!(ours.parse(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn parse_rejects_tampered_signature() {
        let keys = JwtKeys::from_secret("dev-secret");
        let token = keys.issue("a@x.com").expect("issue");
        let (head, sig) = token.rsplit_once('.').expect("jwt has three parts");
        let mut sig = sig.as_bytes().to_vec();
        sig[0] = if sig[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{head}.{}", std::str::from_utf8(&sig).expect("ascii"));
        assert_eq!(keys.parse(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn parse_rejects_garbage() {
        let keys = JwtKeys::from_secret("dev-secret");
        assert_eq!(keys.parse("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(keys.parse(""), Err(TokenError::Malformed));
    }

    #[test]
    fn parse_rejects_token_without_subject() {
        let keys = JwtKeys::from_secret("dev-secret");
        let token = encode(
            &Header::new(ALGORITHM),
            &serde_json::json!({ "aud": "nobody" }),
            &keys.encoding,
        )
        .expect("encode");
        assert_eq!(keys.parse(&token), Err(TokenError::MissingClaim));
    }

    #[test]
    fn parse_rejects_empty_subject() {
        let keys = JwtKeys::from_secret("dev-secret");
        let token = keys.issue("").expect("issue");
        assert_eq!(keys.parse(&token), Err(TokenError::MissingClaim));
    }
}
