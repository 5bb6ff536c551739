//! Simulated order placement.

use std::time::Instant;

use shopease_cache::KeyValueStore;
use shopease_commerce::cart::Cart;
use shopease_commerce::checkout::Order;
use shopease_commerce::CommerceError;
use shopease_ui::{CartView, Notifier, Toast};

use crate::manager::CartManager;
use crate::StorefrontError;

/// Toast shown once an order has been placed.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully! Thank you for shopping with us!";

impl<S: KeyValueStore, V: CartView, N: Notifier> CartManager<S, V, N> {
    /// Place an order for everything in the cart.
    ///
    /// The view shows a processing state for the processing delay, then the
    /// cart is emptied and the customer is sent to the redirect page after
    /// the redirect delay.
    pub async fn place_order(&mut self) -> Result<Order, StorefrontError> {
        if self.cart.is_empty() {
            self.logger.warn("checkout attempted with empty cart");
            return Err(self.reject(CommerceError::EmptyCart));
        }

        let started = Instant::now();
        self.view.set_processing(true);
        self.logger
            .debug_builder("processing order")
            .field_i64("count", i64::from(self.cart.item_count()))
            .emit();

        tokio::time::sleep(self.checkout.processing_delay()).await;

        let order = match Order::from_cart(&self.cart, &self.pricing) {
            Ok(order) => order,
            Err(e) => {
                self.view.set_processing(false);
                return Err(self.reject(e));
            }
        };
        if let Err(e) = self.commit(Cart::new()) {
            self.view.set_processing(false);
            return Err(e);
        }
        self.promo = None;
        self.view.set_processing(false);
        self.refresh_badge();
        self.notify(Toast::success(ORDER_PLACED_MESSAGE));

        self.logger
            .info_builder("order placed")
            .field("order_id", order.id.as_str())
            .field_i64("count", i64::from(order.item_count()))
            .field("total", order.totals.total.display())
            .duration_ms("processing_ms", started.elapsed())
            .emit();

        tokio::time::sleep(self.checkout.redirect_delay()).await;
        let url = self.checkout.redirect_url.clone();
        self.view.redirect(&url);

        Ok(order)
    }
}
