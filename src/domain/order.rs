//! Orders, line-item snapshots and checkout validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::GuestContact;
use crate::{Result, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StoreError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub order_number: String,
    pub status: String,
    pub total_amount: i64,
    pub shipping_fee: i64,
    pub recipient_name: String,
    pub phone: String,
    pub postal_code: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: String,
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// An order plus its line items, the shape returned to checkout callers.
#[derive(Clone, Debug, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// A product's name and price copied at order time. Later edits to the
/// catalog row never touch historical orders.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    pub product_id: String,
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
}

impl ItemSnapshot {
    /// `None` when price times quantity does not fit in i64; both values
    /// come straight from the client.
    pub fn line_total(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

/// Builds the human-facing order number: `ORD` + YYYYMMDD + a 5-digit
/// zero-padded suffix drawn from a database sequence. The sequence cycles at
/// 100000; the UNIQUE column constraint catches a same-day wrap.
pub fn format_order_number(date: NaiveDate, suffix: i64) -> String {
    format!("ORD{}{:05}", date.format("%Y%m%d"), suffix % 100_000)
}

/// Raw checkout request body. Required fields are optional here so that a
/// missing field becomes a 400 with a message rather than a decode failure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub total_amount: Option<i64>,
    pub shipping_fee: Option<i64>,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
}

/// A checkout request that passed validation. Construction is the only
/// validation path, so the order workflow never sees a bad request.
#[derive(Clone, Debug)]
pub struct CheckoutDraft {
    pub user_id: Option<i64>,
    pub guest: GuestContact,
    pub total_amount: i64,
    pub shipping_fee: i64,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub postal_code: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub items: Vec<ItemSnapshot>,
}

impl CheckoutRequest {
    pub fn into_draft(self) -> Result<CheckoutDraft> {
        fn required(value: Option<String>, field: &str) -> Result<String> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(StoreError::validation(format!("{field} is required"))),
            }
        }

        let total_amount = self
            .total_amount
            .ok_or_else(|| StoreError::validation("totalAmount is required"))?;
        let recipient_name = required(self.recipient_name, "recipientName")?;
        let recipient_phone = required(self.recipient_phone, "recipientPhone")?;
        let postal_code = required(self.postal_code, "postalCode")?;
        let address = required(self.address, "address")?;

        if self.items.is_empty() {
            return Err(StoreError::validation("items must not be empty"));
        }
        if self.items.iter().any(|i| i.quantity <= 0 || i.price < 0) {
            return Err(StoreError::validation("invalid item price or quantity"));
        }

        let shipping_fee = self.shipping_fee.unwrap_or(0);
        let computed = self
            .items
            .iter()
            .try_fold(shipping_fee, |acc, item| {
                item.line_total().and_then(|line| acc.checked_add(line))
            })
            .ok_or_else(|| StoreError::validation("total amount out of range"))?;
        if computed != total_amount {
            return Err(StoreError::validation(format!(
                "totalAmount mismatch: expected {computed}, got {total_amount}"
            )));
        }

        Ok(CheckoutDraft {
            user_id: self.user_id,
            guest: GuestContact {
                email: self.email,
                name: self.name,
                phone: self.phone,
            },
            total_amount,
            shipping_fee,
            recipient_name,
            recipient_phone,
            postal_code,
            address,
            address_detail: self.address_detail,
            items: self.items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(quantity: i32) -> ItemSnapshot {
        ItemSnapshot {
            product_id: "p1".into(),
            product_name: "Widget".into(),
            price: 1000,
            quantity,
        }
    }

    fn valid_request() -> CheckoutRequest {
        CheckoutRequest {
            total_amount: Some(2000),
            recipient_name: Some("Kim Minsu".into()),
            recipient_phone: Some("010-1234-5678".into()),
            postal_code: Some("04524".into()),
            address: Some("100 Sejong-daero, Jung-gu".into()),
            items: vec![widget(2)],
            ..Default::default()
        }
    }

    #[test]
    fn test_order_number_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let number = format_order_number(date, 42);
        assert_eq!(number, "ORD2026082600042");
        assert_eq!(number.len(), 16);
        assert!(number[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_order_number_suffix_wraps_at_five_digits() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(format_order_number(date, 100_001), "ORD2026010200001");
    }

    #[test]
    fn test_valid_checkout_passes() {
        let draft = valid_request().into_draft().unwrap();
        assert_eq!(draft.total_amount, 2000);
        assert_eq!(draft.shipping_fee, 0);
        assert_eq!(draft.items.len(), 1);
        assert!(draft.user_id.is_none());
    }

    #[test]
    fn test_missing_address_is_rejected() {
        let request = CheckoutRequest {
            address: None,
            ..valid_request()
        };
        assert!(matches!(
            request.into_draft(),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_items_are_rejected() {
        let request = CheckoutRequest {
            items: vec![],
            ..valid_request()
        };
        assert!(request.into_draft().is_err());
    }

    #[test]
    fn test_total_mismatch_is_rejected() {
        let request = CheckoutRequest {
            total_amount: Some(9999),
            ..valid_request()
        };
        assert!(request.into_draft().is_err());
    }

    #[test]
    fn test_shipping_fee_counts_toward_total() {
        let request = CheckoutRequest {
            total_amount: Some(2500),
            shipping_fee: Some(500),
            ..valid_request()
        };
        let draft = request.into_draft().unwrap();
        assert_eq!(draft.shipping_fee, 500);
    }

    #[test]
    fn test_overflowing_line_total_is_rejected() {
        let request = CheckoutRequest {
            items: vec![ItemSnapshot {
                product_id: "p1".into(),
                product_name: "Widget".into(),
                price: i64::MAX,
                quantity: 2,
            }],
            total_amount: Some(i64::MAX),
            ..valid_request()
        };
        assert!(matches!(
            request.into_draft(),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_overflowing_item_sum_is_rejected() {
        let one_max = ItemSnapshot {
            product_id: "p1".into(),
            product_name: "Widget".into(),
            price: i64::MAX,
            quantity: 1,
        };
        let request = CheckoutRequest {
            items: vec![one_max.clone(), one_max],
            total_amount: Some(0),
            ..valid_request()
        };
        assert!(matches!(
            request.into_draft(),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(OrderStatus::parse("shipped").unwrap(), OrderStatus::Shipped);
        assert_eq!(OrderStatus::Shipped.as_str(), "shipped");
        assert!(OrderStatus::parse("returned").is_err());
    }

    #[test]
    fn test_zero_quantity_item_is_rejected() {
        let request = CheckoutRequest {
            items: vec![widget(0)],
            total_amount: Some(0),
            ..valid_request()
        };
        assert!(request.into_draft().is_err());
    }
}
