//! Delivery address book. Every default-flag transition clears the siblings
//! and sets the target inside one transaction, keeping the at-most-one
//! invariant even when a step fails or two requests interleave.

use sqlx::PgPool;

use crate::domain::address::{AddressPatch, DeliveryAddress, NewAddress};
use crate::{Result, StoreError};

pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<DeliveryAddress>> {
    let rows = sqlx::query_as::<_, DeliveryAddress>(
        "SELECT * FROM delivery_addresses WHERE user_id = $1 \
         ORDER BY is_default DESC, created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<DeliveryAddress>> {
    let row = sqlx::query_as::<_, DeliveryAddress>("SELECT * FROM delivery_addresses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_default(pool: &PgPool, user_id: i64) -> Result<Option<DeliveryAddress>> {
    let row = sqlx::query_as::<_, DeliveryAddress>(
        "SELECT * FROM delivery_addresses WHERE user_id = $1 AND is_default = TRUE",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, new: &NewAddress) -> Result<i64> {
    let mut tx = pool.begin().await?;

    if new.is_default {
        sqlx::query("UPDATE delivery_addresses SET is_default = FALSE WHERE user_id = $1")
            .bind(new.user_id)
            .execute(&mut *tx)
            .await?;
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO delivery_addresses \
         (user_id, recipient_name, phone, postal_code, address, address_detail, is_default) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(new.user_id)
    .bind(&new.recipient_name)
    .bind(&new.phone)
    .bind(&new.postal_code)
    .bind(&new.address)
    .bind(new.address_detail.as_deref())
    .bind(new.is_default)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(id)
}

/// Partial update scoped by (id, user_id). Returns `NotFound` when the
/// address does not exist or belongs to another user.
pub async fn update(pool: &PgPool, id: i64, user_id: i64, patch: &AddressPatch) -> Result<()> {
    if patch.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    if patch.is_default == Some(true) {
        sqlx::query(
            "UPDATE delivery_addresses SET is_default = FALSE WHERE user_id = $1 AND id != $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    }

    let result = sqlx::query(
        "UPDATE delivery_addresses SET \
         recipient_name = COALESCE($3, recipient_name), \
         phone = COALESCE($4, phone), \
         postal_code = COALESCE($5, postal_code), \
         address = COALESCE($6, address), \
         address_detail = COALESCE($7, address_detail), \
         is_default = COALESCE($8, is_default), \
         updated_at = NOW() \
         WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.recipient_name.as_deref())
    .bind(patch.phone.as_deref())
    .bind(patch.postal_code.as_deref())
    .bind(patch.address.as_deref())
    .bind(patch.address_detail.as_deref())
    .bind(patch.is_default)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("delivery address"));
    }

    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM delivery_addresses WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("delivery address"));
    }
    Ok(())
}

pub async fn set_default(pool: &PgPool, id: i64, user_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE delivery_addresses SET is_default = FALSE WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query(
        "UPDATE delivery_addresses SET is_default = TRUE, updated_at = NOW() \
         WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("delivery address"));
    }

    tx.commit().await?;
    Ok(())
}
