//! HTTP boundary: parse requests, call repositories, shape JSON responses.
//! Handlers stay thin; the error type does all status-code mapping.

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;
