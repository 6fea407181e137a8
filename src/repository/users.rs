//! User lookups and creation. Guests are rows like any other, created during
//! checkout with whatever contact details the buyer supplied.

use sqlx::{PgConnection, PgPool};

use crate::domain::user::{GuestContact, User};
use crate::Result;

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Registered-user creation, used by the registration endpoint. Guests go
/// through `create_guest` instead.
pub async fn create(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, name, phone, is_guest) VALUES ($1, $2, $3, FALSE) RETURNING id",
    )
    .bind(email)
    .bind(name)
    .bind(phone)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Turns a guest row into a registered account, keeping any contact details
/// the guest already supplied unless the registration overrides them.
pub async fn promote_guest(
    pool: &PgPool,
    user_id: i64,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    sqlx::query(
        "UPDATE users SET is_guest = FALSE, \
         name = COALESCE($2, name), phone = COALESCE($3, phone), updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(user_id)
    .bind(name)
    .bind(phone)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_last_login(pool: &PgPool, user_id: i64) -> Result<()> {
    sqlx::query("UPDATE users SET last_login = NOW(), updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Guest creation used by checkout. Takes a bare connection so the caller
/// can run it inside the order transaction.
pub async fn create_guest(conn: &mut PgConnection, contact: &GuestContact) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, name, phone, is_guest) VALUES ($1, $2, $3, TRUE) RETURNING id",
    )
    .bind(contact.email.as_deref())
    .bind(contact.name.as_deref())
    .bind(contact.phone.as_deref())
    .fetch_one(conn)
    .await?;
    Ok(id)
}
