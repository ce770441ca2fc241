use serde::{Deserialize, Serialize};

use crate::items::dto::ItemResponse;
use crate::users::repo::User;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public part of a user returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// User profile with their items embedded.
#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub items: Vec<ItemResponse>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    100
}

impl Pagination {
    /// Negative query values would surface as a Postgres error on
    /// `LIMIT`/`OFFSET`; treat them as zero.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.max(0), self.skip.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.clamped(), (100, 0));
    }

    #[test]
    fn negative_pagination_values_clamp_to_zero() {
        let p: Pagination = serde_json::from_str(r#"{"skip":-5,"limit":-1}"#).unwrap();
        assert_eq!(p.clamped(), (0, 0));
    }
}
