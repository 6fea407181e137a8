//! Delivery address endpoints. Mutations always scope by the owning user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::domain::address::{AddressPatch, NewAddress};
use crate::repository::addresses;
use crate::{AppState, Result, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_id: Option<i64>,
    #[serde(default)]
    pub default: bool,
}

/// With `default=true` this returns only the user's default address
/// (checkout pre-selection), `{ address: null }` when none is set.
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> Result<Json<Value>> {
    let user_id = params
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;

    if params.default {
        let address = addresses::find_default(&state.db, user_id).await?;
        return Ok(Json(json!({ "address": address })));
    }

    let items = addresses::find_by_user(&state.db, user_id).await?;
    Ok(Json(json!({ "addresses": items })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewAddress>,
) -> Result<(StatusCode, Json<Value>)> {
    new.validate()?;
    let id = addresses::create(&state.db, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "addressId": id })),
    ))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    let address = addresses::find_by_id(&state.db, id)
        .await?
        .ok_or(StoreError::NotFound("delivery address"))?;
    Ok(Json(json!({ "address": address })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub patch: AddressPatch,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Value>> {
    let user_id = req
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;
    addresses::update(&state.db, id, user_id, &req.patch).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserParams>,
) -> Result<Json<Value>> {
    let user_id = params
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;
    addresses::delete(&state.db, id, user_id).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDefaultRequest {
    pub user_id: Option<i64>,
}

pub async fn set_default(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SetDefaultRequest>,
) -> Result<Json<Value>> {
    let user_id = req
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;
    addresses::set_default(&state.db, id, user_id).await?;
    Ok(Json(json!({ "success": true })))
}
