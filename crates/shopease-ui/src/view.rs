//! Seams between the cart manager and whatever is displaying the page.

use shopease_commerce::cart::CartTotals;
use shopease_commerce::Money;

use crate::toast::Toast;

/// The parts of a storefront page the cart updates.
pub trait CartView {
    /// Navbar cart badge.
    fn set_badge_count(&mut self, count: u32);

    /// Line total for the row at a 1-based position.
    fn set_line_total(&mut self, position: usize, total: Money);

    /// Subtotal, tax, shipping and total figures.
    fn set_totals(&mut self, totals: &CartTotals);

    /// Toggle the order button's processing state.
    fn set_processing(&mut self, processing: bool);

    /// Whether the cart page is the one being shown.
    fn is_cart_page(&self) -> bool;

    /// Re-render the current page from scratch.
    fn reload(&mut self);

    /// Navigate to another page.
    fn redirect(&mut self, url: &str);
}

/// Receives toasts.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Asks the customer a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A `Confirm` that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}
