//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so that totals, tax and shipping
//! thresholds never drift the way floating-point sums do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies. The storefront prices everything in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD => 2,
        }
    }

    fn minor_units(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a USD value from cents.
    pub fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Returns `None` for NaN, infinite or out-of-range amounts.
    ///
    /// ```
    /// use shopease_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let scaled = (amount * currency.minor_units() as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units() as f64
    }

    /// Format as a display string with grouping (e.g., "$1,249.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Format the absolute amount without symbol (e.g., "1,249.99").
    pub fn display_amount(&self) -> String {
        let units = self.currency.minor_units() as u64;
        let abs = self.amount_cents.unsigned_abs();
        let whole = group_thousands(abs / units);
        match self.currency.decimal_places() {
            0 => whole,
            places => format!(
                "{}.{:0width$}",
                whole,
                abs % units,
                width = places as usize
            ),
        }
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Apply a rate expressed in basis points (900 = 9%), rounding half up.
    ///
    /// ```
    /// use shopease_commerce::money::Money;
    /// assert_eq!(Money::usd(6000).apply_bps(900).unwrap().amount_cents, 540);
    /// ```
    pub fn apply_bps(&self, bps: u32) -> Option<Money> {
        let scaled = (self.amount_cents as i128).checked_mul(bps as i128)?;
        let half = if scaled < 0 { -5_000 } else { 5_000 };
        let rounded = (scaled + half) / 10_000;
        let amount = i64::try_from(rounded).ok()?;
        Some(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter storing a USD amount as a plain decimal number (`19.99`).
///
/// This is the shape the storefront keeps in local storage.
pub mod dollars {
    use super::{Currency, Money};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount, Currency::USD)
            .ok_or_else(|| D::Error::custom(format!("invalid price: {}", amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD).unwrap();
        assert_eq!(m.amount_cents, 4999);

        assert!(Money::from_decimal(f64::NAN, Currency::USD).is_none());
        assert!(Money::from_decimal(f64::INFINITY, Currency::USD).is_none());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::usd(4999).display(), "$49.99");
        assert_eq!(Money::usd(5).display(), "$0.05");
        assert_eq!(Money::usd(123_456_789).display(), "$1,234,567.89");
        assert_eq!(Money::usd(-999).display(), "-$9.99");
    }

    #[test]
    fn test_try_add_and_subtract_overflow() {
        assert_eq!(
            Money::usd(1000).try_add(&Money::usd(500)),
            Some(Money::usd(1500))
        );
        assert_eq!(
            Money::usd(1000).try_subtract(&Money::usd(1500)),
            Some(Money::usd(-500))
        );
        assert!(Money::usd(i64::MAX).try_add(&Money::usd(1)).is_none());
        assert!(Money::usd(i64::MIN).try_subtract(&Money::usd(1)).is_none());
    }

    #[test]
    fn test_try_sum() {
        let lines = [Money::usd(2000), Money::usd(1999), Money::usd(1)];
        assert_eq!(
            Money::try_sum(lines.iter(), Currency::USD),
            Some(Money::usd(4000))
        );
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::USD),
            Some(Money::zero(Currency::USD))
        );

        let overflowing = [Money::usd(i64::MAX), Money::usd(1)];
        assert!(Money::try_sum(overflowing.iter(), Currency::USD).is_none());
    }

    #[test]
    fn test_try_multiply_overflow() {
        assert_eq!(Money::usd(2000).try_multiply(3).unwrap().amount_cents, 6000);
        assert!(Money::usd(i64::MAX).try_multiply(2).is_none());
    }

    #[test]
    fn test_apply_bps_rounds_half_up() {
        // 9% of $10.50 is 94.5 cents
        assert_eq!(Money::usd(1050).apply_bps(900).unwrap().amount_cents, 95);
        // 9% of $10.49 is 94.41 cents
        assert_eq!(Money::usd(1049).apply_bps(900).unwrap().amount_cents, 94);
        assert_eq!(Money::usd(0).apply_bps(900).unwrap().amount_cents, 0);
    }

    #[test]
    fn test_dollars_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "dollars")]
            price: Money,
        }

        let json = serde_json::to_string(&Priced { price: Money::usd(1999) }).unwrap();
        assert_eq!(json, r#"{"price":19.99}"#);

        let parsed: Priced = serde_json::from_str(r#"{"price":20}"#).unwrap();
        assert_eq!(parsed.price, Money::usd(2000));
    }
}
