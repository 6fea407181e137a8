//! Catalog access. Storefront paths are read-only; admin writes keep the
//! secondary detail record in step with the primary row.

use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::{NewProduct, Product, ProductDetail, ProductPatch};
use crate::{Result, StoreError};

pub async fn find_all(pool: &PgPool, page: u32, limit: u32) -> Result<(Vec<Product>, i64)> {
    // Widen before multiplying; a page near u32::MAX must not wrap the offset.
    let offset = (i64::from(page.max(1)) - 1) * i64::from(limit);
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(i64::from(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok((products, total))
}

pub async fn find_by_category(pool: &PgPool, category_id: &str) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE category_id = $1 ORDER BY created_at DESC",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// Trending rows, unsorted. Sorting and paging happen in the application
/// (`domain::product::sort_and_page`) since popularity and discount order
/// are not native to this path.
pub async fn find_trending(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE trending = TRUE")
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Product>> {
    let pattern = format!("%{term}%");
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE name ILIKE $1 OR description ILIKE $1 \
         ORDER BY created_at DESC",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_row(pool: &PgPool, id: &str) -> Result<Option<Product>> {
    let row = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Product joined with its detail record, shaped for the detail page.
pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Value>> {
    let Some(product) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = sqlx::query_as::<_, ProductDetail>(
        "SELECT description, features, specifications FROM product_details WHERE product_id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .unwrap_or_default();

    let mut body = serde_json::to_value(&product).unwrap_or_default();
    if let Value::Object(map) = &mut body {
        if detail.description.is_some() {
            map.insert("description".into(), json!(detail.description));
        }
        map.insert("features".into(), json!(detail.features));
        map.insert("specifications".into(), json!(detail.specifications));
    }
    Ok(Some(body))
}

/// Random sample of same-category products, excluding the product itself.
pub async fn find_related(
    pool: &PgPool,
    category_id: &str,
    exclude_id: &str,
    limit: u32,
) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE category_id = $1 AND id != $2 \
         ORDER BY RANDOM() LIMIT $3",
    )
    .bind(category_id)
    .bind(exclude_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn create(pool: &PgPool, new: &NewProduct) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO products \
         (id, name, description, category_id, price, original_price, discount, stock, \
          rating, reviews, image, trending, badge, free_shipping, shipping_days) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
    )
    .bind(&id)
    .bind(&new.name)
    .bind(new.detail.description.as_deref())
    .bind(&new.category_id)
    .bind(new.price)
    .bind(new.original_price)
    .bind(new.discount)
    .bind(new.stock)
    .bind(new.rating)
    .bind(new.reviews)
    .bind(&new.image)
    .bind(new.trending)
    .bind(new.badge.as_deref())
    .bind(new.free_shipping)
    .bind(new.shipping_days.as_deref().unwrap_or("1-2"))
    .execute(&mut *tx)
    .await?;

    if !new.detail.is_empty() {
        upsert_detail(&mut tx, &id, &new.detail).await?;
    }

    tx.commit().await?;
    Ok(id)
}

pub async fn update(pool: &PgPool, id: &str, patch: &ProductPatch) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE products SET \
         name = COALESCE($2, name), \
         category_id = COALESCE($3, category_id), \
         price = COALESCE($4, price), \
         original_price = COALESCE($5, original_price), \
         discount = COALESCE($6, discount), \
         stock = COALESCE($7, stock), \
         rating = COALESCE($8, rating), \
         reviews = COALESCE($9, reviews), \
         image = COALESCE($10, image), \
         trending = COALESCE($11, trending), \
         badge = COALESCE($12, badge), \
         updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.category_id.as_deref())
    .bind(patch.price)
    .bind(patch.original_price)
    .bind(patch.discount)
    .bind(patch.stock)
    .bind(patch.rating)
    .bind(patch.reviews)
    .bind(patch.image.as_deref())
    .bind(patch.trending)
    .bind(patch.badge.as_deref())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("product"));
    }

    if !patch.detail.is_empty() {
        upsert_detail(&mut tx, id, &patch.detail).await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("product"));
    }
    Ok(())
}

async fn upsert_detail(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: &str,
    detail: &ProductDetail,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO product_details (product_id, description, features, specifications) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (product_id) DO UPDATE SET \
         description = COALESCE(EXCLUDED.description, product_details.description), \
         features = COALESCE(EXCLUDED.features, product_details.features), \
         specifications = COALESCE(EXCLUDED.specifications, product_details.specifications)",
    )
    .bind(product_id)
    .bind(detail.description.as_deref())
    .bind(detail.features.as_deref())
    .bind(detail.specifications.as_deref())
    .execute(&mut **tx)
    .await?;
    Ok(())
}
