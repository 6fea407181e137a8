//! Catalog products and the application-level trending sort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub price: i64,
    pub original_price: i64,
    pub discount: i32,
    pub stock: i32,
    pub rating: f64,
    pub reviews: i32,
    pub image: String,
    pub trending: bool,
    pub badge: Option<String>,
    pub free_shipping: bool,
    pub shipping_days: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Secondary record for the product detail page, upserted alongside the
/// primary row on admin writes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub description: Option<String>,
    pub features: Option<String>,
    pub specifications: Option<String>,
}

/// Admin create payload. The id is generated server-side.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "categoryId is required"))]
    pub category_id: String,
    pub price: i64,
    pub original_price: i64,
    pub discount: i32,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i32,
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
    #[serde(default)]
    pub trending: bool,
    pub badge: Option<String>,
    #[serde(default)]
    pub free_shipping: bool,
    pub shipping_days: Option<String>,
    #[serde(flatten)]
    pub detail: ProductDetail,
}

/// Admin partial update; absent fields keep their current value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub discount: Option<i32>,
    pub stock: Option<i32>,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
    pub image: Option<String>,
    pub trending: Option<bool>,
    pub badge: Option<String>,
    #[serde(flatten)]
    pub detail: ProductDetail,
}

impl ProductDetail {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.features.is_none() && self.specifications.is_none()
    }
}

/// Sort keys offered on the trending listing. The store has no native
/// ordering for these, so sorting and paging happen in the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Popular,
    Latest,
    Discount,
}

impl SortKey {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("latest") => Self::Latest,
            Some("discount") => Self::Discount,
            _ => Self::Popular,
        }
    }
}

/// Sorts in place and returns the requested page slice along with the total
/// count before slicing.
pub fn sort_and_page(
    mut products: Vec<Product>,
    sort: SortKey,
    page: u32,
    limit: u32,
) -> (Vec<Product>, usize) {
    match sort {
        SortKey::Popular => products.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.reviews.cmp(&a.reviews))
        }),
        SortKey::Latest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Discount => products.sort_by(|a, b| b.discount.cmp(&a.discount)),
    }

    let total = products.len();
    let page = page.max(1) as usize;
    let limit = limit as usize;
    let start = (page - 1) * limit;
    let slice = if start >= total {
        Vec::new()
    } else {
        products[start..(start + limit).min(total)].to_vec()
    };
    (slice, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, discount: i32, rating: f64, reviews: i32) -> Product {
        Product {
            id: id.into(),
            name: format!("product {id}"),
            description: None,
            category_id: "electronics".into(),
            price: 10_000,
            original_price: 12_000,
            discount,
            stock: 10,
            rating,
            reviews,
            image: "/img.jpg".into(),
            trending: true,
            badge: None,
            free_shipping: false,
            shipping_days: "1-2".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_sort_pages_highest_first() {
        let catalog = vec![
            product("a", 10, 4.0, 5),
            product("b", 40, 3.0, 1),
            product("c", 25, 5.0, 9),
        ];
        let (page, total) = sort_and_page(catalog, SortKey::Discount, 1, 2);
        assert_eq!(total, 3);
        assert_eq!(
            page.iter().map(|p| p.discount).collect::<Vec<_>>(),
            vec![40, 25]
        );
    }

    #[test]
    fn test_popular_sort_breaks_rating_ties_by_reviews() {
        let catalog = vec![
            product("a", 0, 4.5, 10),
            product("b", 0, 4.5, 200),
            product("c", 0, 3.0, 999),
        ];
        let (page, _) = sort_and_page(catalog, SortKey::Popular, 1, 3);
        assert_eq!(
            page.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let catalog = vec![product("a", 0, 4.0, 1)];
        let (page, total) = sort_and_page(catalog, SortKey::Latest, 3, 10);
        assert!(page.is_empty());
        assert_eq!(total, 1);
    }

    #[test]
    fn test_huge_page_number_is_just_empty() {
        let catalog = vec![product("a", 0, 4.0, 1)];
        let (page, total) = sort_and_page(catalog, SortKey::Latest, u32::MAX, 100);
        assert!(page.is_empty());
        assert_eq!(total, 1);
    }

    #[test]
    fn test_sort_key_parsing_defaults_to_popular() {
        assert_eq!(SortKey::parse(Some("discount")), SortKey::Discount);
        assert_eq!(SortKey::parse(Some("latest")), SortKey::Latest);
        assert_eq!(SortKey::parse(Some("unknown")), SortKey::Popular);
        assert_eq!(SortKey::parse(None), SortKey::Popular);
    }
}
