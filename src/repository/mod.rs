//! Entity-scoped SQL. Repositories map rows to domain records and propagate
//! storage failures with `?`; multi-step writes run inside one transaction.

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;
