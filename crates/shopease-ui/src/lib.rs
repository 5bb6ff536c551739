//! Toasts, page rendering and widget state for the ShopEase storefront.
//!
//! - [`toast`]: transient notifications and their container
//! - [`view`]: the `CartView`, `Notifier` and `Confirm` seams
//! - [`page`]: an in-memory `CartView` plus cart markup
//! - [`widgets`]: sidebar, wishlist, rating, quantity, search and alert controls

pub mod page;
pub mod toast;
pub mod view;
pub mod widgets;

pub use page::{PageKind, PageModel};
pub use toast::{Toast, ToastKind, ToastStack};
pub use view::{CartView, Confirm, FixedAnswer, Notifier};

/// Escape text for inclusion in HTML.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
