//! Cart pricing calculations.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Tax and shipping rules applied to a cart subtotal.
///
/// Amounts are in cents so the rules can live in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Sales tax in basis points (900 = 9%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
    /// Subtotals strictly above this ship free.
    #[serde(default = "default_free_shipping_over_cents")]
    pub free_shipping_over_cents: i64,
    /// Flat shipping fee below the threshold.
    #[serde(default = "default_shipping_fee_cents")]
    pub shipping_fee_cents: i64,
}

fn default_tax_rate_bps() -> u32 {
    900
}

fn default_free_shipping_over_cents() -> i64 {
    5000
}

fn default_shipping_fee_cents() -> i64 {
    999
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tax_rate_bps: default_tax_rate_bps(),
            free_shipping_over_cents: default_free_shipping_over_cents(),
            shipping_fee_cents: default_shipping_fee_cents(),
        }
    }
}

impl PricingRules {
    /// Shipping cost for a subtotal.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_cents > self.free_shipping_over_cents {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.shipping_fee_cents, subtotal.currency)
        }
    }
}

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Discount. Promo codes are display-only, so this is always zero.
    pub discount: Money,
    /// subtotal + tax + shipping - discount.
    pub total: Money,
    /// Sum of quantities.
    pub item_count: u32,
}

impl CartTotals {
    /// Compute totals for a list of line items.
    pub fn compute(items: &[CartItem], rules: &PricingRules) -> Result<Self, CommerceError> {
        let currency = crate::cart::Cart::CURRENCY;
        let line_totals = items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::try_sum(line_totals.iter(), currency).ok_or(CommerceError::Overflow)?;
        let tax = subtotal
            .apply_bps(rules.tax_rate_bps)
            .ok_or(CommerceError::Overflow)?;
        let shipping = rules.shipping_for(&subtotal);
        let discount = Money::zero(currency);

        let total = subtotal
            .try_add(&tax)
            .and_then(|m| m.try_add(&shipping))
            .and_then(|m| m.try_subtract(&discount))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            shipping,
            discount,
            total,
            item_count: items.iter().map(|i| i.quantity).sum(),
        })
    }

    /// Whether the order ships free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
