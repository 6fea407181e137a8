//! Cart rows keyed by (user, product). Add-or-increment rides on the
//! uniqueness constraint so concurrent adds cannot duplicate a row.

use sqlx::PgPool;

use crate::domain::cart::CartItem;
use crate::{Result, StoreError};

pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<CartItem>> {
    let rows = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM carts WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Adds a product to the cart, incrementing the quantity if it is already
/// there. Returns the row id either way.
pub async fn add(pool: &PgPool, user_id: i64, product_id: &str, quantity: i32) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO carts (user_id, product_id, quantity) VALUES ($1, $2, $3) \
         ON CONFLICT (user_id, product_id) \
         DO UPDATE SET quantity = carts.quantity + EXCLUDED.quantity, updated_at = NOW() \
         RETURNING id",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Replaces the quantity outright, unlike `add`.
pub async fn set_quantity(
    pool: &PgPool,
    user_id: i64,
    product_id: &str,
    quantity: i32,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE carts SET quantity = $3, updated_at = NOW() \
         WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("cart item"));
    }
    Ok(())
}

pub async fn remove(pool: &PgPool, user_id: i64, product_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM carts WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn clear(pool: &PgPool, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM carts WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
