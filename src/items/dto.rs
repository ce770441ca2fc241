use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::items::repo::Item;

/// Request body for item creation, also accepted on update.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i64,
    pub content: String,
    pub category: String,
    pub done: bool,
    pub owner_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            content: item.content,
            category: item.category,
            done: item.done,
            owner_id: item.owner_id,
            created_at: item.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_defaults_to_false() {
        let payload: ItemPayload =
            serde_json::from_str(r#"{"content":"milk","category":"groceries"}"#).unwrap();
        assert!(!payload.done);
    }
}
