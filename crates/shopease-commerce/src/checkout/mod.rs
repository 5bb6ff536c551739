//! Checkout module.

mod order;

pub use order::Order;
