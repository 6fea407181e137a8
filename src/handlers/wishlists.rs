//! Wishlist endpoints, mirroring the cart shape without a quantity.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::repository::wishlists;
use crate::{AppState, Result, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_id: Option<i64>,
    pub product_id: Option<String>,
}

/// With a `productId` this answers the membership question instead of
/// listing: `{ exists: bool }`.
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> Result<Json<Value>> {
    let user_id = params
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;

    if let Some(product_id) = &params.product_id {
        let exists = wishlists::exists(&state.db, user_id, product_id).await?;
        return Ok(Json(json!({ "exists": exists })));
    }

    let items = wishlists::find_by_user(&state.db, user_id).await?;
    Ok(Json(json!({ "wishlists": items })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub user_id: Option<i64>,
    pub product_id: Option<String>,
}

impl MembershipRequest {
    fn into_pair(self) -> Result<(i64, String)> {
        match (self.user_id, self.product_id) {
            (Some(u), Some(p)) if !p.is_empty() => Ok((u, p)),
            _ => Err(StoreError::validation("missing required fields")),
        }
    }
}

pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> Result<Json<Value>> {
    let (user_id, product_id) = req.into_pair()?;
    let id = wishlists::add(&state.db, user_id, &product_id).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

pub async fn remove(
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> Result<Json<Value>> {
    let (user_id, product_id) = req.into_pair()?;
    wishlists::remove(&state.db, user_id, &product_id).await?;
    Ok(Json(json!({ "success": true })))
}
