//! Catalog endpoints: storefront listing/detail plus the admin write path.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::domain::product::{self, NewProduct, ProductPatch, SortKey};
use crate::repository::products;
use crate::{AppState, Result, StoreError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub trending: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

/// `GET /api/products`: one endpoint, four shapes of query: trending
/// (app-side sort + paging), category, search, or the plain paginated list.
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> Result<Json<Value>> {
    if params.trending == Some(true) {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params.limit.unwrap_or(12).clamp(1, 100);
        let sort = SortKey::parse(params.sort.as_deref());
        let all = products::find_trending(&state.db).await?;
        let (items, total) = product::sort_and_page(all, sort, page, limit);
        return Ok(Json(json!({
            "products": items,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": total,
                "hasMore": (page as usize) * (limit as usize) < total,
            }
        })));
    }

    if let Some(category) = &params.category {
        let items = products::find_by_category(&state.db, category).await?;
        return Ok(Json(json!({ "products": items })));
    }

    if let Some(term) = &params.search {
        let items = products::search(&state.db, term).await?;
        return Ok(Json(json!({ "products": items })));
    }

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let (items, total) = products::find_all(&state.db, page, limit).await?;
    Ok(Json(json!({
        "products": items,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "hasMore": i64::from(page) * i64::from(limit) < total,
        }
    })))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let product = products::find_by_id(&state.db, &id)
        .await?
        .ok_or(StoreError::NotFound("product"))?;
    Ok(Json(json!({ "product": product })))
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<u32>,
}

pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Value>> {
    let product = products::find_row(&state.db, &id)
        .await?
        .ok_or(StoreError::NotFound("product"))?;

    let limit = params.limit.unwrap_or(4).clamp(1, 20);
    let items = products::find_related(&state.db, &product.category_id, &id, limit).await?;
    Ok(Json(json!({ "products": items })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Value>)> {
    new.validate()?;
    let id = products::create(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "productId": id }))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Value>> {
    products::update(&state.db, &id, &patch).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    products::delete(&state.db, &id).await?;
    Ok(Json(json!({ "success": true })))
}
