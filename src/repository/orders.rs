//! Order persistence and the checkout workflow.
//!
//! `place` is the sole writer of orders and order items. It resolves the
//! buyer, generates the order number and inserts the header plus every line
//! item inside a single transaction, so a failure at any point leaves no
//! trace (including the guest row created for an anonymous buyer).

use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::domain::order::{
    format_order_number, CheckoutDraft, Order, OrderItem, OrderStatus, OrderWithItems,
};
use crate::domain::user::BuyerIdentity;
use crate::repository::users;
use crate::{Result, StoreError};

pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Order>> {
    let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_order_number(pool: &PgPool, order_number: &str) -> Result<Option<Order>> {
    let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_number = $1")
        .bind(order_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn items_for_order(pool: &PgPool, order_id: i64) -> Result<Vec<OrderItem>> {
    let rows =
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
            .bind(order_id)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Places an order from a validated checkout draft. Returns the persisted
/// order with its items and the resolved buyer identity.
pub async fn place(pool: &PgPool, draft: CheckoutDraft) -> Result<(OrderWithItems, BuyerIdentity)> {
    let mut tx = pool.begin().await?;

    // A supplied id is trusted as-is; only anonymous checkouts write a row.
    let buyer = match draft.user_id {
        Some(id) => BuyerIdentity::Registered(id),
        None => BuyerIdentity::Guest(users::create_guest(&mut *tx, &draft.guest).await?),
    };

    let suffix = sqlx::query_scalar::<_, i64>("SELECT nextval('order_number_seq')")
        .fetch_one(&mut *tx)
        .await?;
    let order_number = format_order_number(Utc::now().date_naive(), suffix);

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders \
         (user_id, order_number, status, total_amount, shipping_fee, \
          recipient_name, phone, postal_code, address, address_detail) \
         VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $8, $9) \
         RETURNING *",
    )
    .bind(buyer.user_id())
    .bind(&order_number)
    .bind(draft.total_amount)
    .bind(draft.shipping_fee)
    .bind(&draft.recipient_name)
    .bind(&draft.recipient_phone)
    .bind(&draft.postal_code)
    .bind(&draft.address)
    .bind(draft.address_detail.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    let mut items = Vec::with_capacity(draft.items.len());
    for snapshot in &draft.items {
        let item = sqlx::query_as::<_, OrderItem>(
            "INSERT INTO order_items (order_id, product_id, product_name, price, quantity) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(order.id)
        .bind(&snapshot.product_id)
        .bind(&snapshot.product_name)
        .bind(snapshot.price)
        .bind(snapshot.quantity)
        .fetch_one(&mut *tx)
        .await?;
        items.push(item);
    }

    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        user_id = buyer.user_id(),
        guest = buyer.is_guest(),
        "order placed"
    );

    Ok((OrderWithItems { order, items }, buyer))
}

pub async fn update_status(pool: &PgPool, order_id: i64, status: OrderStatus) -> Result<()> {
    let result = sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(order_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("order"));
    }
    Ok(())
}

/// Manager view: every order with its items grouped in, newest first.
pub async fn find_all_with_items(pool: &PgPool) -> Result<Vec<Value>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut grouped: std::collections::HashMap<i64, Vec<OrderItem>> = std::collections::HashMap::new();
    for item in items {
        grouped.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = grouped.remove(&order.id).unwrap_or_default();
            json!({
                "id": order.id,
                "orderNumber": order.order_number,
                "recipientName": order.recipient_name,
                "phone": order.phone,
                "totalAmount": order.total_amount,
                "shippingFee": order.shipping_fee,
                "status": order.status,
                "createdAt": order.created_at,
                "items": items,
            })
        })
        .collect())
}
