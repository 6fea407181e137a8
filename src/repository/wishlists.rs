//! Wishlist membership per user. Add is idempotent: re-adding a product
//! returns the existing row id instead of duplicating it.

use sqlx::PgPool;

use crate::domain::cart::WishlistItem;
use crate::Result;

pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<WishlistItem>> {
    let rows = sqlx::query_as::<_, WishlistItem>(
        "SELECT * FROM wishlists WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn add(pool: &PgPool, user_id: i64, product_id: &str) -> Result<i64> {
    // The no-op DO UPDATE makes RETURNING yield the existing id on conflict.
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO wishlists (user_id, product_id) VALUES ($1, $2) \
         ON CONFLICT (user_id, product_id) \
         DO UPDATE SET product_id = EXCLUDED.product_id \
         RETURNING id",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn remove(pool: &PgPool, user_id: i64, product_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn exists(pool: &PgPool, user_id: i64, product_id: &str) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM wishlists WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}
