//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Quantity to add was zero.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Unit price was negative or not a number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Item name was blank.
    #[error("Item name must not be empty")]
    EmptyItemName,

    /// No line item at a 1-based cart position.
    #[error("No cart item at position {position} (cart has {len} items)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Promo code not in the table.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Checkout attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
