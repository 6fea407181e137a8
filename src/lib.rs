//! Direct-import storefront service
//!
//! A small e-commerce backend over Postgres:
//! - Product catalog (storefront reads, admin writes)
//! - Per-user cart and wishlist
//! - Delivery address book with a single default per user
//! - Checkout: guest or registered buyers, transactional order placement

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod handlers;
pub mod repository;
pub mod routes;

pub use error::{Result, StoreError};

/// Shared handler state: the connection pool plus the optional event client.
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub events: events::EventBus,
}
