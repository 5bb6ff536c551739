//! State for the small interactive controls around the storefront.
//!
//! Each widget is a plain value. Event methods mutate it and return the
//! toast to show, if any.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use shopease_commerce::cart::{clamp_quantity, MAX_QUANTITY, MIN_QUANTITY};

use crate::toast::Toast;

/// How long a non-permanent alert stays on screen.
pub const ALERT_DISMISS_MS: i64 = 5000;

/// Viewport width below which the admin sidebar behaves as an overlay.
pub const MOBILE_BREAKPOINT_PX: u32 = 992;

/// Stars in a rating input.
pub const RATING_STARS: usize = 5;

/// Toast shown when a quantity runs into the upper bound.
pub fn max_quantity_toast() -> Toast {
    Toast::error(format!("Maximum quantity is {}", MAX_QUANTITY))
}

/// Quantity picker on the product details page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u32,
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self {
            value: MIN_QUANTITY,
        }
    }
}

impl QuantitySelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Apply a `+`/`-` press. Clamps to the allowed range and warns only at the top.
    pub fn step(&mut self, delta: i64) -> Option<Toast> {
        let change = clamp_quantity(self.value, delta);
        self.value = change.quantity;
        change.hit_max().then(max_quantity_toast)
    }

    /// Delta for a quantity button by its label.
    pub fn delta_for_label(label: &str) -> i64 {
        if label.trim() == "+" {
            1
        } else {
            -1
        }
    }
}

/// Collapsible admin sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
}

impl Sidebar {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The toggle button was clicked.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A click landed outside both the sidebar and its toggle.
    pub fn click_outside(&mut self, viewport_width: u32) {
        if viewport_width < MOBILE_BREAKPOINT_PX {
            self.open = false;
        }
    }
}

/// Heart button on product cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WishlistButton {
    wished: bool,
}

impl WishlistButton {
    pub fn is_wished(&self) -> bool {
        self.wished
    }

    pub fn toggle(&mut self) -> Toast {
        self.wished = !self.wished;
        if self.wished {
            Toast::success("Added to wishlist!")
        } else {
            Toast::warning("Removed from wishlist")
        }
    }

    pub fn button_class(&self) -> &'static str {
        if self.wished {
            "btn-danger"
        } else {
            "btn-outline-danger"
        }
    }

    pub fn icon_class(&self) -> &'static str {
        if self.wished {
            "fa-heart-broken"
        } else {
            "fa-heart"
        }
    }
}

/// Star rating input with hover preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingInput {
    hovered: Option<usize>,
}

impl RatingInput {
    /// Pointer entered the star at a 0-based index.
    pub fn hover(&mut self, index: usize) {
        self.hovered = Some(index.min(RATING_STARS - 1));
    }

    /// Pointer left the input.
    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Filled (`true`) or empty state for each star.
    pub fn stars(&self) -> [bool; RATING_STARS] {
        let mut stars = [false; RATING_STARS];
        if let Some(hovered) = self.hovered {
            for star in stars.iter_mut().take(hovered + 1) {
                *star = true;
            }
        }
        stars
    }

    /// Font Awesome style class per star (`fas` filled, `far` empty).
    pub fn star_classes(&self) -> [&'static str; RATING_STARS] {
        self.stars().map(|filled| if filled { "fas" } else { "far" })
    }
}

/// Navbar search form.
pub struct SearchForm;

impl SearchForm {
    /// Where to navigate for a submitted query, or `None` if it is blank.
    pub fn submit(input: &str) -> Option<String> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }
        Some(format!("products.html?search={}", encode_component(query)))
    }
}

/// Percent-encode a URL component, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as is.
fn encode_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '!' | '~' | '*' | '\''
            | '(' | ')' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// A set of buttons where exactly one is active (admin nav, chart periods).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGroup {
    len: usize,
    active: usize,
}

impl ActiveGroup {
    /// A group of `len` members with the first active.
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    /// Make `index` the active member. Out-of-range indexes are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active = index;
        true
    }
}

/// Client-side form validation feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormValidation {
    was_validated: bool,
}

impl FormValidation {
    /// Handle a submit. Returns whether submission should proceed.
    pub fn submit(&mut self, valid: bool) -> bool {
        self.was_validated = true;
        valid
    }

    /// Whether the `was-validated` class is applied.
    pub fn was_validated(&self) -> bool {
        self.was_validated
    }
}

/// Trailing-edge debouncer over caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a call, replacing any pending one and restarting the wait.
    pub fn call(&mut self, now: Instant, value: T) {
        self.pending = Some((now, value));
    }

    /// Take the pending value once the wait has elapsed since the last call.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((at, _)) if now.duration_since(at) >= self.wait => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Toast for the quick view button on a product card.
pub fn quick_view_toast(product_name: &str) -> Toast {
    Toast::info(format!("Quick view: {}", product_name.trim()))
}

/// Toast for the compare button.
pub fn compare_toast() -> Toast {
    Toast::success("Added to compare list!")
}

/// Toast for a click on a product gallery thumbnail.
///
/// The first thumbnail is the image already on display, so it shows nothing.
pub fn gallery_click_toast(index: usize) -> Option<Toast> {
    (index > 0).then(|| Toast::info("Image gallery click handled"))
}

/// An inline page alert.
///
/// Alerts fade out on their own after [`ALERT_DISMISS_MS`] unless they are
/// marked permanent.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub permanent: bool,
    pub shown_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(message: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            permanent: false,
            shown_at,
        }
    }

    pub fn permanent(message: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self {
            permanent: true,
            ..Self::new(message, shown_at)
        }
    }

    /// When the alert dismisses itself, or `None` for a permanent alert.
    pub fn dismisses_at(&self) -> Option<DateTime<Utc>> {
        let delay = chrono::Duration::milliseconds(ALERT_DISMISS_MS);
        (!self.permanent).then(|| self.shown_at + delay)
    }

    pub fn is_dismissed(&self, now: DateTime<Utc>) -> bool {
        self.dismisses_at().is_some_and(|at| now >= at)
    }
}
