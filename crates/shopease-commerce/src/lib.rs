//! Cart, pricing and order types for the ShopEase storefront.
//!
//! - **Cart**: ordered line items unique by name, quantities held in `[1, 10]`
//! - **Pricing**: subtotal, tax, shipping and total in integer cents
//! - **Promo codes**: a fixed, display-only table
//! - **Checkout**: order receipts
//!
//! # Example
//!
//! ```
//! use shopease_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add("Keyboard", Money::usd(2000), 3).unwrap();
//!
//! let totals = cart.totals(&PricingRules::default()).unwrap();
//! assert_eq!(totals.total.display(), "$65.40");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        clamp_quantity, AddOutcome, Cart, CartItem, CartTotals, PricingRules, PromoCode,
        QuantityBound, QuantityChange, MAX_QUANTITY, MIN_QUANTITY,
    };
    pub use crate::checkout::Order;
}
