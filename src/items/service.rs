use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::items::dto::ItemPayload;
use crate::items::repo::Item;

/// Ownership gate: an item may only be mutated by the user that created it.
/// A mismatch is a distinct forbidden outcome, not a not-found.
pub(crate) fn ensure_owner(item: &Item, actor_id: i64) -> Result<(), ApiError> {
    if item.owner_id == actor_id {
        Ok(())
    } else {
        warn!(
            item_id = item.id,
            owner_id = item.owner_id,
            actor_id,
            "ownership check failed"
        );
        Err(ApiError::Forbidden)
    }
}

pub async fn update_item(
    db: &PgPool,
    actor_id: i64,
    id: i64,
    fields: &ItemPayload,
) -> Result<Item, ApiError> {
    let existing = Item::find_by_id(db, id).await?.ok_or_else(|| not_found(id))?;
    ensure_owner(&existing, actor_id)?;

    let updated = Item::update(db, id, &fields.content, &fields.category, fields.done)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(item_id = id, user_id = actor_id, "item updated");
    Ok(updated)
}

pub async fn delete_item(db: &PgPool, actor_id: i64, id: i64) -> Result<(), ApiError> {
    let existing = Item::find_by_id(db, id).await?.ok_or_else(|| not_found(id))?;
    ensure_owner(&existing, actor_id)?;

    if !Item::delete(db, id).await? {
        return Err(not_found(id));
    }

    info!(item_id = id, user_id = actor_id, "item deleted");
    Ok(())
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("no item with id {id}"))
}
