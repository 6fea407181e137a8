//! Cart endpoints. Add is add-or-increment; PATCH sets the quantity.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::repository::carts;
use crate::{AppState, Result, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    pub user_id: Option<i64>,
}

pub async fn list(State(state): State<AppState>, Query(params): Query<UserParams>) -> Result<Json<Value>> {
    let user_id = params
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;
    let items = carts::find_by_user(&state.db, user_id).await?;
    Ok(Json(json!({ "carts": items })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub user_id: Option<i64>,
    pub product_id: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

pub async fn add(State(state): State<AppState>, Json(req): Json<AddRequest>) -> Result<Json<Value>> {
    let (user_id, product_id) = require_pair(req.user_id, req.product_id)?;
    if req.quantity <= 0 {
        return Err(StoreError::validation("quantity must be positive"));
    }
    let id = carts::add(&state.db, user_id, &product_id, req.quantity).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityRequest {
    pub user_id: Option<i64>,
    pub quantity: Option<i32>,
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<QuantityRequest>,
) -> Result<Json<Value>> {
    let user_id = req
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;
    let quantity = req
        .quantity
        .ok_or_else(|| StoreError::validation("quantity is required"))?;
    if quantity <= 0 {
        return Err(StoreError::validation("quantity must be positive"));
    }
    carts::set_quantity(&state.db, user_id, &product_id, quantity).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub user_id: Option<i64>,
    pub product_id: Option<String>,
}

/// What a DELETE removes: one line, or the whole cart when no product is
/// named (used after checkout).
#[derive(Debug, PartialEq, Eq)]
enum RemoveScope {
    One(i64, String),
    All(i64),
}

impl RemoveRequest {
    fn scope(self) -> Result<RemoveScope> {
        let user_id = self
            .user_id
            .ok_or_else(|| StoreError::validation("userId is required"))?;
        match self.product_id.filter(|p| !p.is_empty()) {
            Some(product_id) => Ok(RemoveScope::One(user_id, product_id)),
            None => Ok(RemoveScope::All(user_id)),
        }
    }
}

pub async fn remove(State(state): State<AppState>, Json(req): Json<RemoveRequest>) -> Result<Json<Value>> {
    match req.scope()? {
        RemoveScope::One(user_id, product_id) => {
            carts::remove(&state.db, user_id, &product_id).await?;
        }
        RemoveScope::All(user_id) => {
            carts::clear(&state.db, user_id).await?;
        }
    }
    Ok(Json(json!({ "success": true })))
}

fn require_pair(user_id: Option<i64>, product_id: Option<String>) -> Result<(i64, String)> {
    match (user_id, product_id) {
        (Some(u), Some(p)) if !p.is_empty() => Ok((u, p)),
        _ => Err(StoreError::validation("missing required fields")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_without_product_clears_the_whole_cart() {
        let req = RemoveRequest {
            user_id: Some(7),
            product_id: None,
        };
        assert_eq!(req.scope().unwrap(), RemoveScope::All(7));

        let empty = RemoveRequest {
            user_id: Some(7),
            product_id: Some(String::new()),
        };
        assert_eq!(empty.scope().unwrap(), RemoveScope::All(7));
    }

    #[test]
    fn test_delete_with_product_removes_one_line() {
        let req = RemoveRequest {
            user_id: Some(7),
            product_id: Some("p1".into()),
        };
        assert_eq!(req.scope().unwrap(), RemoveScope::One(7, "p1".into()));
    }

    #[test]
    fn test_delete_without_user_is_rejected() {
        let req = RemoveRequest {
            user_id: None,
            product_id: Some("p1".into()),
        };
        assert!(req.scope().is_err());
    }
}
