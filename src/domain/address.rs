//! Delivery addresses. At most one address per user carries the default
//! flag; the repository enforces the transition transactionally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub id: i64,
    pub user_id: i64,
    pub recipient_name: String,
    pub phone: String,
    pub postal_code: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub user_id: i64,
    #[validate(length(min = 1, message = "recipientName is required"))]
    pub recipient_name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "postalCode is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    pub address_detail: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressPatch {
    pub fn is_empty(&self) -> bool {
        self.recipient_name.is_none()
            && self.phone.is_none()
            && self.postal_code.is_none()
            && self.address.is_none()
            && self.address_detail.is_none()
            && self.is_default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_address_requires_core_fields() {
        let addr = NewAddress {
            user_id: 1,
            recipient_name: String::new(),
            phone: "010-1234-5678".into(),
            postal_code: "04524".into(),
            address: "100 Sejong-daero".into(),
            address_detail: None,
            is_default: false,
        };
        assert!(addr.validate().is_err());
    }

    #[test]
    fn test_empty_patch_detection() {
        assert!(AddressPatch::default().is_empty());
        let patch = AddressPatch {
            is_default: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
