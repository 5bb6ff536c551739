//! Cart and line item types.

use crate::cart::{CartTotals, PricingRules};
use crate::error::CommerceError;
use crate::money::{self, Currency, Money};
use serde::{Deserialize, Serialize};

/// Smallest quantity a line item may hold.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a line item may hold.
pub const MAX_QUANTITY: u32 = 10;

/// Which end of the quantity range a change ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityBound {
    Min,
    Max,
}

/// Result of applying a quantity delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityChange {
    /// Quantity after clamping.
    pub quantity: u32,
    /// Set when the requested quantity fell outside the allowed range.
    pub clamped: Option<QuantityBound>,
}

impl QuantityChange {
    /// Whether the change was capped at `MAX_QUANTITY`.
    pub fn hit_max(&self) -> bool {
        self.clamped == Some(QuantityBound::Max)
    }
}

/// Apply `delta` to `current` and clamp the result to `[MIN_QUANTITY, MAX_QUANTITY]`.
///
/// ```
/// use shopease_commerce::cart::{clamp_quantity, QuantityBound};
/// let change = clamp_quantity(9, 5);
/// assert_eq!(change.quantity, 10);
/// assert_eq!(change.clamped, Some(QuantityBound::Max));
/// ```
pub fn clamp_quantity(current: u32, delta: i64) -> QuantityChange {
    let requested = i64::from(current).saturating_add(delta);
    if requested < i64::from(MIN_QUANTITY) {
        QuantityChange {
            quantity: MIN_QUANTITY,
            clamped: Some(QuantityBound::Min),
        }
    } else if requested > i64::from(MAX_QUANTITY) {
        QuantityChange {
            quantity: MAX_QUANTITY,
            clamped: Some(QuantityBound::Max),
        }
    } else {
        QuantityChange {
            quantity: requested as u32,
            clamped: None,
        }
    }
}

/// What `Cart::add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// 1-based position of the affected line.
    pub position: usize,
    /// Quantity of the line after the add.
    pub quantity: u32,
    /// True when an existing line was incremented.
    pub merged: bool,
    /// True when the quantity was capped at `MAX_QUANTITY`.
    pub clamped: bool,
}

/// A shopping cart: line items in insertion order, unique by name.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Currency every line item is priced in.
    pub const CURRENCY: Currency = Currency::USD;

    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a product.
    ///
    /// An item with the same name has its quantity incremented instead of a
    /// second line being appended; the existing unit price is kept.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Result<AddOutcome, CommerceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommerceError::EmptyItemName);
        }
        if quantity < MIN_QUANTITY {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if unit_price.is_negative() {
            return Err(CommerceError::InvalidPrice(unit_price.display()));
        }

        if let Some(index) = self.items.iter().position(|i| i.name == name) {
            let existing = &mut self.items[index];
            let requested = existing.quantity.saturating_add(quantity);
            existing.quantity = requested.min(MAX_QUANTITY);
            return Ok(AddOutcome {
                position: index + 1,
                quantity: existing.quantity,
                merged: true,
                clamped: requested > MAX_QUANTITY,
            });
        }

        let clamped = quantity > MAX_QUANTITY;
        self.items.push(CartItem {
            name,
            unit_price,
            quantity: quantity.min(MAX_QUANTITY),
        });
        Ok(AddOutcome {
            position: self.items.len(),
            quantity: quantity.min(MAX_QUANTITY),
            merged: false,
            clamped,
        })
    }

    /// Remove the line at a 1-based `position`.
    pub fn remove(&mut self, position: usize) -> Result<CartItem, CommerceError> {
        let index = self.index_of(position)?;
        Ok(self.items.remove(index))
    }

    /// Change the quantity of the line at a 1-based `position` by `delta`,
    /// clamping to the allowed range.
    pub fn update_quantity(
        &mut self,
        position: usize,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let index = self.index_of(position)?;
        let item = &mut self.items[index];
        let change = clamp_quantity(item.quantity, delta);
        item.quantity = change.quantity;
        Ok(change)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&CartItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Line with the given name.
    pub fn find(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// All lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Compute subtotal, tax, shipping and total.
    pub fn totals(&self, rules: &PricingRules) -> Result<CartTotals, CommerceError> {
        CartTotals::compute(&self.items, rules)
    }

    fn index_of(&self, position: usize) -> Result<usize, CommerceError> {
        if position == 0 || position > self.items.len() {
            return Err(CommerceError::PositionOutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(position - 1)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product name; unique within a cart.
    pub name: String,
    /// Unit price, stored as a decimal dollar amount.
    #[serde(rename = "price", with = "money::dollars")]
    pub unit_price: Money,
    /// Quantity, within `[MIN_QUANTITY, MAX_QUANTITY]`.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}
