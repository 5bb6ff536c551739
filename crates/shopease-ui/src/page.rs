//! In-memory page model and cart markup.

use std::collections::BTreeMap;

use shopease_commerce::cart::{CartItem, CartTotals};
use shopease_commerce::Money;

use crate::escape_html;
use crate::view::CartView;

/// Pages of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Products,
    ProductDetails,
    Cart,
    Checkout,
    Other,
}

impl PageKind {
    /// Classify a location by its file name.
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or("");
        let file = path.rsplit('/').next().unwrap_or("");
        match file {
            "" | "index.html" => Self::Home,
            "products.html" => Self::Products,
            "product-details.html" => Self::ProductDetails,
            "cart.html" => Self::Cart,
            "checkout.html" => Self::Checkout,
            _ => Self::Other,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home | Self::Other => "index.html",
            Self::Products => "products.html",
            Self::ProductDetails => "product-details.html",
            Self::Cart => "cart.html",
            Self::Checkout => "checkout.html",
        }
    }
}

/// A page held in memory: the values the cart last pushed to it.
#[derive(Debug, Clone)]
pub struct PageModel {
    location: String,
    badge_count: u32,
    line_totals: BTreeMap<usize, Money>,
    totals: Option<CartTotals>,
    processing: bool,
    reloads: u32,
}

impl PageModel {
    /// A page showing `location` (e.g. "cart.html").
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            badge_count: 0,
            line_totals: BTreeMap::new(),
            totals: None,
            processing: false,
            reloads: 0,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn kind(&self) -> PageKind {
        PageKind::from_location(&self.location)
    }

    pub fn badge_count(&self) -> u32 {
        self.badge_count
    }

    pub fn line_total(&self, position: usize) -> Option<Money> {
        self.line_totals.get(&position).copied()
    }

    pub fn totals(&self) -> Option<&CartTotals> {
        self.totals.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// How many times the page was reloaded.
    pub fn reloads(&self) -> u32 {
        self.reloads
    }
}

impl CartView for PageModel {
    fn set_badge_count(&mut self, count: u32) {
        self.badge_count = count;
    }

    fn set_line_total(&mut self, position: usize, total: Money) {
        self.line_totals.insert(position, total);
    }

    fn set_totals(&mut self, totals: &CartTotals) {
        self.totals = Some(*totals);
    }

    fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    fn is_cart_page(&self) -> bool {
        self.kind() == PageKind::Cart
    }

    fn reload(&mut self) {
        // Rows are rebuilt from the cart on reload.
        self.line_totals.clear();
        self.reloads += 1;
    }

    fn redirect(&mut self, url: &str) {
        self.location = url.to_string();
        self.line_totals.clear();
        self.totals = None;
        self.processing = false;
    }
}

/// Render the navbar badge.
pub fn render_badge(count: u32) -> String {
    format!(r#"<span class="badge bg-danger cart-count">{}</span>"#, count)
}

/// Render one cart row. Element ids use the 1-based position.
pub fn render_cart_row(position: usize, item: &CartItem, line_total: Money) -> String {
    format!(
        r#"<tr data-position="{position}">
    <td class="product-title">{name}</td>
    <td class="unit-price">{price}</td>
    <td>
        <div class="quantity-selector">
            <button class="quantity-btn" data-delta="-1">-</button>
            <input type="number" id="qty{position}" value="{quantity}" min="1" max="10">
            <button class="quantity-btn" data-delta="1">+</button>
        </div>
    </td>
    <td id="total{position}">{total}</td>
    <td><button class="btn btn-sm btn-outline-secondary" data-remove="{position}">Remove</button></td>
</tr>"#,
        position = position,
        name = escape_html(&item.name),
        price = item.unit_price.display(),
        quantity = item.quantity,
        total = line_total.display(),
    )
}

/// Render the order summary card.
pub fn render_summary(totals: &CartTotals) -> String {
    let shipping = if totals.free_shipping() {
        "FREE".to_string()
    } else {
        totals.shipping.display()
    };
    format!(
        r#"<div class="order-summary">
    <div class="d-flex justify-content-between"><span>Subtotal</span><span id="subtotal">{subtotal}</span></div>
    <div class="d-flex justify-content-between"><span>Tax</span><span id="tax">{tax}</span></div>
    <div class="d-flex justify-content-between"><span>Shipping</span><span id="shipping">{shipping}</span></div>
    <hr>
    <div class="d-flex justify-content-between fw-bold"><span>Total</span><span id="total">{total}</span></div>
</div>"#,
        subtotal = totals.subtotal.display(),
        tax = totals.tax.display(),
        shipping = shipping,
        total = totals.total.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopease_commerce::cart::{Cart, PricingRules};

    #[test]
    fn test_page_kind_from_location() {
        assert_eq!(PageKind::from_location("/shop/cart.html"), PageKind::Cart);
        assert_eq!(PageKind::from_location("cart.html?step=2"), PageKind::Cart);
        assert_eq!(PageKind::from_location("/"), PageKind::Home);
        assert_eq!(
            PageKind::from_location("products.html?search=mouse"),
            PageKind::Products
        );
        assert_eq!(PageKind::from_location("admin.html"), PageKind::Other);
    }

    #[test]
    fn test_redirect_resets_page_state() {
        let mut page = PageModel::at("cart.html");
        assert!(page.is_cart_page());

        page.set_line_total(1, Money::usd(500));
        page.set_processing(true);
        page.redirect("index.html");

        assert_eq!(page.kind(), PageKind::Home);
        assert!(!page.is_cart_page());
        assert!(page.line_total(1).is_none());
        assert!(!page.is_processing());
    }

    #[test]
    fn test_render_cart_markup() {
        let mut cart = Cart::new();
        cart.add("Desk Lamp & Bulb", Money::usd(2000), 3).unwrap();
        let item = cart.get(1).unwrap();

        let row = render_cart_row(1, item, item.line_total().unwrap());
        assert!(row.contains(r#"id="qty1" value="3""#));
        assert!(row.contains(r#"<td id="total1">$60.00</td>"#));
        assert!(row.contains("Desk Lamp &amp; Bulb"));

        let summary = render_summary(&cart.totals(&PricingRules::default()).unwrap());
        assert!(summary.contains(r#"<span id="tax">$5.40</span>"#));
        assert!(summary.contains(r#"<span id="shipping">FREE</span>"#));
        assert!(summary.contains(r#"<span id="total">$65.40</span>"#));
    }

    #[test]
    fn test_render_badge() {
        assert_eq!(
            render_badge(4),
            r#"<span class="badge bg-danger cart-count">4</span>"#
        );
    }
}
