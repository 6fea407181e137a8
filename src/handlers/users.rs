//! User endpoints: manager console lookup (profile aggregated with order and
//! address counts) and registration.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::domain::user::User;
use crate::repository::{addresses, orders, users};
use crate::{AppState, Result, StoreError};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub id: Option<i64>,
    pub email: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let user = match (params.id, params.email.filter(|e| !e.is_empty())) {
        (Some(id), _) => users::find_by_id(&state.db, id).await?,
        (None, Some(email)) => users::find_by_email(&state.db, &email).await?,
        (None, None) => {
            return Err(StoreError::validation("id or email parameter is required"))
        }
    }
    .ok_or(StoreError::NotFound("user"))?;

    let order_count = orders::find_by_user(&state.db, user.id).await?.len();
    let address_count = addresses::find_by_user(&state.db, user.id).await?.len();

    Ok(Json(json!({ "user": profile(&user, order_count, address_count) })))
}

fn profile(user: &User, order_count: usize, address_count: usize) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "name": user.name,
        "phone": user.phone,
        "isGuest": user.is_guest,
        "totalOrders": order_count,
        "totalAddresses": address_count,
        "createdAt": user.created_at,
        "lastLogin": user.last_login,
    })
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "valid email is required"))]
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Registration. An email already held by a registered account is rejected;
/// the created account gets its first last_login stamp immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    req.validate()?;

    // The email column is unique when present, so a guest checkout row with
    // this email is promoted instead of duplicated.
    let id = match users::find_by_email(&state.db, &req.email).await? {
        Some(existing) if !existing.is_guest => {
            return Err(StoreError::validation("email already registered"));
        }
        Some(guest) => {
            users::promote_guest(&state.db, guest.id, req.name.as_deref(), req.phone.as_deref())
                .await?;
            guest.id
        }
        None => {
            users::create(
                &state.db,
                &req.email,
                req.name.as_deref(),
                req.phone.as_deref(),
            )
            .await?
        }
    };
    users::update_last_login(&state.db, id).await?;

    tracing::info!(user_id = id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": id })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_requires_a_well_formed_email() {
        let bad = RegisterRequest {
            email: "not-an-email".into(),
            name: None,
            phone: None,
        };
        assert!(bad.validate().is_err());

        let good = RegisterRequest {
            email: "minsu@example.com".into(),
            name: Some("Kim Minsu".into()),
            phone: None,
        };
        assert!(good.validate().is_ok());
    }
}
