//! Order receipts.

use crate::cart::{Cart, CartItem, CartTotals, PricingRules};
use crate::error::CommerceError;
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A placed order: a snapshot of the cart at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// Lines as they were in the cart.
    pub items: Vec<CartItem>,
    /// Totals at the time of placement.
    pub totals: CartTotals,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot a non-empty cart into an order.
    pub fn from_cart(cart: &Cart, rules: &PricingRules) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            id: OrderId::generate(),
            items: cart.items().to_vec(),
            totals: cart.totals(rules)?,
            placed_at: Utc::now(),
        })
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u32 {
        self.totals.item_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_order_from_cart() {
        let mut cart = Cart::new();
        cart.add("Backpack", Money::usd(3999), 2).unwrap();

        let order = Order::from_cart(&cart, &PricingRules::default()).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.totals.subtotal.amount_cents, 7998);
        assert!(order.id.as_str().starts_with("ord-"));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let result = Order::from_cart(&Cart::new(), &PricingRules::default());
        assert_eq!(result, Err(CommerceError::EmptyCart));
    }
}
