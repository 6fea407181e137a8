//! Typed domain records and the pure logic that operates on them.

pub mod address;
pub mod cart;
pub mod order;
pub mod product;
pub mod user;
