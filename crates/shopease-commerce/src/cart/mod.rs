//! Shopping cart module.
//!
//! Contains the cart value type, pricing and promo codes.

mod cart;
mod pricing;
mod promo;

pub use cart::{
    clamp_quantity, AddOutcome, Cart, CartItem, QuantityBound, QuantityChange, MAX_QUANTITY,
    MIN_QUANTITY,
};
pub use pricing::{CartTotals, PricingRules};
pub use promo::PromoCode;
