//! Promo codes.
//!
//! The table is fixed and codes are display-only: applying one produces a
//! message but never changes `CartTotals`.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognised promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromoCode {
    Save10,
    Save20,
    FreeShip,
    Welcome15,
}

impl PromoCode {
    /// Every code in the table.
    pub const ALL: [PromoCode; 4] = [
        PromoCode::Save10,
        PromoCode::Save20,
        PromoCode::FreeShip,
        PromoCode::Welcome15,
    ];

    /// Look up user input. Surrounding whitespace and case are ignored.
    pub fn lookup(input: &str) -> Result<Self, CommerceError> {
        let normalized = input.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.code() == normalized)
            .ok_or(CommerceError::InvalidPromoCode(normalized))
    }

    /// The code as typed by customers.
    pub fn code(&self) -> &'static str {
        match self {
            PromoCode::Save10 => "SAVE10",
            PromoCode::Save20 => "SAVE20",
            PromoCode::FreeShip => "FREESHIP",
            PromoCode::Welcome15 => "WELCOME15",
        }
    }

    /// Percentage off the subtotal.
    pub fn percent_off(&self) -> u8 {
        match self {
            PromoCode::Save10 => 10,
            PromoCode::Save20 => 20,
            PromoCode::FreeShip => 0,
            PromoCode::Welcome15 => 15,
        }
    }

    pub fn free_shipping(&self) -> bool {
        matches!(self, PromoCode::FreeShip)
    }

    /// Confirmation shown to the customer.
    pub fn applied_message(&self) -> String {
        let shipping = if self.free_shipping() {
            " + Free Shipping"
        } else {
            ""
        };
        format!("Promo code applied! {}% off{}", self.percent_off(), shipping)
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes_input() {
        assert_eq!(PromoCode::lookup("SAVE10"), Ok(PromoCode::Save10));
        assert_eq!(PromoCode::lookup("  welcome15 "), Ok(PromoCode::Welcome15));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            PromoCode::lookup(" bogus "),
            Err(CommerceError::InvalidPromoCode("BOGUS".to_string()))
        );
        assert!(PromoCode::lookup("").is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PromoCode::Save20.applied_message(),
            "Promo code applied! 20% off"
        );
        assert_eq!(
            PromoCode::lookup("freeship").unwrap().applied_message(),
            "Promo code applied! 0% off + Free Shipping"
        );
    }
}
