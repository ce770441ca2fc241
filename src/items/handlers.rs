use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::items::dto::{ItemPayload, ItemResponse};
use crate::items::repo::Item;
use crate::items::service;
use crate::state::AppState;

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/item", post(create_item))
        .route("/items/", get(list_items))
        .route("/item/update/:id", put(update_item))
        .route("/item/delete/:id", delete(delete_item))
}

#[instrument(skip(state, user, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ItemPayload>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = Item::create(
        &state.db,
        user.id,
        &payload.content,
        &payload.category,
        payload.done,
    )
    .await?;

    info!(item_id = item.id, user_id = user.id, "item created");
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Lists the caller's own items. An empty list is a normal response, not an
/// error.
#[instrument(skip(state, user))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = Item::list_by_owner(&state.db, user.id).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

#[instrument(skip(state, user, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = service::update_item(&state.db, user.id, id, &payload).await?;
    Ok(Json(ItemResponse::from(item)))
}

#[instrument(skip(state, user))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service::delete_item(&state.db, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
