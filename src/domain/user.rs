//! Users and buyer identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Who an order belongs to. Checkout resolves this before any order row is
/// written: a supplied id is trusted as-is, otherwise a guest row is created
/// and its generated id used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuyerIdentity {
    Registered(i64),
    Guest(i64),
}

impl BuyerIdentity {
    pub fn user_id(self) -> i64 {
        match self {
            Self::Registered(id) | Self::Guest(id) => id,
        }
    }

    pub fn is_guest(self) -> bool {
        matches!(self, Self::Guest(_))
    }
}

/// Contact details carried by a checkout request for guest creation.
/// All fields are optional; a guest can be entirely anonymous.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GuestContact {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buyer_identity() {
        let registered = BuyerIdentity::Registered(7);
        let guest = BuyerIdentity::Guest(12);
        assert_eq!(registered.user_id(), 7);
        assert_eq!(guest.user_id(), 12);
        assert!(!registered.is_guest());
        assert!(guest.is_guest());
    }
}
