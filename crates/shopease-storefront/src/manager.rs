//! The cart manager: sequences cart update, persistence, view refresh and
//! notification.

use shopease_cache::{Cache, KeyValueStore};
use shopease_commerce::cart::{AddOutcome, Cart, CartItem, CartTotals, PricingRules, PromoCode, QuantityChange};
use shopease_commerce::{CommerceError, Money};
use shopease_observability::StructuredLogger;
use shopease_ui::widgets::max_quantity_toast;
use shopease_ui::{CartView, Confirm, Notifier, Toast};

use crate::config::{CheckoutConfig, StorefrontConfig};
use crate::StorefrontError;

/// Prompt shown before the cart is emptied.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear your cart?";

/// Owns the cart and drives a view and a notifier from it.
///
/// Every mutation persists the whole cart under one storage key before the
/// view is refreshed. Failed operations leave both cart and storage as they
/// were and surface as an error toast plus the returned error.
pub struct CartManager<S: KeyValueStore, V: CartView, N: Notifier> {
    pub(crate) cache: Cache<S>,
    pub(crate) cart: Cart,
    pub(crate) key: String,
    pub(crate) pricing: PricingRules,
    pub(crate) checkout: CheckoutConfig,
    pub(crate) toast_delay_ms: u64,
    pub(crate) promo: Option<PromoCode>,
    pub(crate) view: V,
    pub(crate) notifier: N,
    pub(crate) logger: StructuredLogger,
}

impl<S: KeyValueStore, V: CartView, N: Notifier> CartManager<S, V, N> {
    /// Load the persisted cart and push its item count to the view.
    ///
    /// A missing entry is an empty cart. So is an unreadable one: it is
    /// logged and left in storage until the next mutation overwrites it.
    pub fn load(
        store: S,
        view: V,
        notifier: N,
        config: &StorefrontConfig,
        logger: &StructuredLogger,
    ) -> Self {
        let cache = Cache::new(store);
        let key = config.store.key.clone();
        let logger = logger.child("cart");

        let cart = match cache.get::<Cart>(&key) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                logger
                    .warn_builder("discarding unreadable cart")
                    .field("key", key.as_str())
                    .field("error", e.to_string())
                    .emit();
                Cart::new()
            }
        };

        logger
            .debug_builder("cart loaded")
            .field_i64("lines", cart.len() as i64)
            .field_i64("count", i64::from(cart.item_count()))
            .emit();

        let mut manager = Self {
            cache,
            cart,
            key,
            pricing: config.pricing,
            checkout: config.checkout.clone(),
            toast_delay_ms: config.ui.toast_delay_ms,
            promo: None,
            view,
            notifier,
            logger,
        };
        manager.refresh_badge();
        manager
    }

    /// Add `quantity` of a product, merging with an existing line of the same name.
    pub fn add(
        &mut self,
        name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> Result<AddOutcome, StorefrontError> {
        let mut next = self.cart.clone();
        let outcome = next
            .add(name, unit_price, quantity)
            .map_err(|e| self.reject(e))?;
        self.commit(next)?;

        self.refresh_badge();
        self.notify(Toast::success(format!("{} added to cart!", name)));
        if outcome.clamped {
            self.notify(max_quantity_toast());
        }

        self.logger
            .info_builder("item added")
            .field("item", name)
            .field_i64("quantity", i64::from(outcome.quantity))
            .field_i64("count", i64::from(self.cart.item_count()))
            .field_bool("merged", outcome.merged)
            .emit();

        Ok(outcome)
    }

    /// Remove the line at a 1-based position.
    pub fn remove(&mut self, position: usize) -> Result<CartItem, StorefrontError> {
        let mut next = self.cart.clone();
        let removed = next.remove(position).map_err(|e| self.reject(e))?;
        self.commit(next)?;

        self.refresh_badge();
        self.notify(Toast::warning(format!("{} removed from cart!", removed.name)));
        if self.view.is_cart_page() {
            self.view.reload();
        }

        self.logger
            .info_builder("item removed")
            .field("item", removed.name.as_str())
            .field_i64("quantity", i64::from(removed.quantity))
            .field_i64("count", i64::from(self.cart.item_count()))
            .emit();

        Ok(removed)
    }

    /// Change the quantity of the line at a 1-based position by `delta`.
    ///
    /// The result is clamped to `[1, 10]`; only the upper bound is reported.
    pub fn update_quantity(
        &mut self,
        position: usize,
        delta: i64,
    ) -> Result<QuantityChange, StorefrontError> {
        let mut next = self.cart.clone();
        let change = next
            .update_quantity(position, delta)
            .map_err(|e| self.reject(e))?;
        self.commit(next)?;

        if change.hit_max() {
            self.notify(max_quantity_toast());
        }

        let (name, line_total) = match self.cart.get(position) {
            Some(item) => (item.name.clone(), item.line_total()?),
            None => {
                return Err(CommerceError::PositionOutOfRange {
                    position,
                    len: self.cart.len(),
                }
                .into())
            }
        };
        self.view.set_line_total(position, line_total);
        let totals = self.totals()?;
        self.view.set_totals(&totals);
        self.refresh_badge();

        self.logger
            .info_builder("quantity updated")
            .field("item", name)
            .field_i64("quantity", i64::from(change.quantity))
            .field_i64("count", i64::from(self.cart.item_count()))
            .emit();

        Ok(change)
    }

    /// Empty the cart after asking the customer. Returns whether it was cleared.
    pub fn clear(&mut self, confirm: &mut impl Confirm) -> Result<bool, StorefrontError> {
        if !confirm.confirm(CLEAR_PROMPT) {
            self.logger.debug("clear declined");
            return Ok(false);
        }

        self.commit(Cart::new())?;
        self.refresh_badge();
        self.notify(Toast::warning("Cart cleared!"));
        if self.view.is_cart_page() {
            self.view.reload();
        }

        self.logger
            .info_builder("cart cleared")
            .field_i64("count", 0)
            .emit();

        Ok(true)
    }

    /// Look up a promo code and confirm it to the customer.
    ///
    /// Codes are display-only and never change the totals.
    pub fn apply_promo(&mut self, input: &str) -> Result<PromoCode, StorefrontError> {
        let promo = match PromoCode::lookup(input) {
            Ok(promo) => promo,
            Err(e) => {
                self.logger
                    .warn_builder("promo rejected")
                    .field("code", input.trim())
                    .emit();
                return Err(self.reject(e));
            }
        };

        self.promo = Some(promo);
        self.notify(Toast::success(promo.applied_message()));
        self.logger
            .info_builder("promo applied")
            .field("code", promo.code())
            .field_i64("percent_off", i64::from(promo.percent_off()))
            .field_bool("free_shipping", promo.free_shipping())
            .emit();

        Ok(promo)
    }

    /// Subtotal, tax, shipping and total for the current cart.
    pub fn totals(&self) -> Result<CartTotals, StorefrontError> {
        Ok(self.cart.totals(&self.pricing)?)
    }

    /// Push every line total and the cart totals to the view.
    pub fn render(&mut self) -> Result<(), StorefrontError> {
        for (index, item) in self.cart.items().iter().enumerate() {
            self.view.set_line_total(index + 1, item.line_total()?);
        }
        let totals = self.totals()?;
        self.view.set_totals(&totals);
        Ok(())
    }

    /// Push the item count to the badge.
    pub fn refresh_badge(&mut self) {
        self.view.set_badge_count(self.cart.item_count());
    }

    /// Empty the cart and delete its storage entry.
    pub fn forget(&mut self) -> Result<(), StorefrontError> {
        self.cache.delete(&self.key)?;
        self.cart.clear();
        self.promo = None;
        self.refresh_badge();
        self.logger.info("cart forgotten");
        Ok(())
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total item count.
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// The last promo code accepted, if any.
    pub fn applied_promo(&self) -> Option<PromoCode> {
        self.promo
    }

    pub fn pricing(&self) -> &PricingRules {
        &self.pricing
    }

    /// Storage key the cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Persist `next` and make it the current cart.
    pub(crate) fn commit(&mut self, next: Cart) -> Result<(), StorefrontError> {
        if let Err(e) = self.cache.set(&self.key, &next) {
            self.logger
                .error_builder("failed to persist cart")
                .field("key", self.key.as_str())
                .field("error", e.to_string())
                .emit();
            return Err(e.into());
        }
        self.cart = next;
        Ok(())
    }

    pub(crate) fn notify(&mut self, toast: Toast) {
        self.notifier.notify(toast.with_delay_ms(self.toast_delay_ms));
    }

    /// Report a rejected operation to the customer.
    pub(crate) fn reject(&mut self, error: CommerceError) -> StorefrontError {
        self.notify(Toast::error(error_message(&error)));
        error.into()
    }
}

/// Customer-facing text for a rejected operation.
pub fn error_message(error: &CommerceError) -> String {
    match error {
        CommerceError::PositionOutOfRange { position, .. } => {
            format!("No cart item at position {}", position)
        }
        CommerceError::InvalidPromoCode(_) => "Invalid promo code".to_string(),
        CommerceError::EmptyCart => "Your cart is empty!".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopease_cache::MemoryStore;
    use shopease_commerce::cart::MAX_QUANTITY;
    use shopease_observability::MemoryLog;
    use shopease_ui::{FixedAnswer, PageModel, ToastKind, ToastStack};

    type TestManager = CartManager<MemoryStore, PageModel, ToastStack>;

    fn manager_with(store: MemoryStore, location: &str) -> (TestManager, MemoryLog) {
        let (logger, log) = StructuredLogger::in_memory("sess-test");
        let manager = CartManager::load(
            store,
            PageModel::at(location),
            ToastStack::new(),
            &StorefrontConfig::default(),
            &logger,
        );
        (manager, log)
    }

    fn manager() -> TestManager {
        manager_with(MemoryStore::new(), "products.html").0
    }

    fn stored(manager: &TestManager) -> Option<String> {
        manager.cache().get_raw("shopEaseCart").unwrap()
    }

    fn last_toast(manager: &TestManager) -> (ToastKind, String) {
        let toast = manager.notifier().last().unwrap();
        (toast.kind, toast.message.clone())
    }

    #[test]
    fn test_load_restores_persisted_cart() {
        let mut store = MemoryStore::new();
        store
            .set("shopEaseCart", r#"[{"name":"Mouse","price":29.99,"quantity":3}]"#)
            .unwrap();

        let (manager, _) = manager_with(store, "index.html");
        assert_eq!(manager.item_count(), 3);
        assert_eq!(manager.view().badge_count(), 3);
        assert_eq!(manager.cart().get(1).unwrap().unit_price, Money::usd(2999));
    }

    #[test]
    fn test_load_treats_malformed_storage_as_empty() {
        let mut store = MemoryStore::new();
        store.set("shopEaseCart", "{not json").unwrap();

        let (manager, log) = manager_with(store, "index.html");
        assert!(manager.cart().is_empty());
        assert_eq!(manager.view().badge_count(), 0);
        assert_eq!(stored(&manager).as_deref(), Some("{not json"));

        let warnings = log.find("discarding unreadable cart");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].component.as_deref(), Some("cart"));
    }

    #[test]
    fn test_add_persists_and_notifies() {
        let mut manager = manager();
        manager.add("Wireless Mouse", Money::usd(2999), 1).unwrap();
        manager.add("Wireless Mouse", Money::usd(2999), 2).unwrap();

        assert_eq!(manager.cart().len(), 1);
        assert_eq!(manager.view().badge_count(), 3);
        assert_eq!(
            stored(&manager).as_deref(),
            Some(r#"[{"name":"Wireless Mouse","price":29.99,"quantity":3}]"#)
        );
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Success, "Wireless Mouse added to cart!".to_string())
        );
        assert!(manager
            .notifier()
            .visible()
            .iter()
            .all(|t| t.delay_ms == 3000));
    }

    #[test]
    fn test_add_clamps_and_warns() {
        let mut manager = manager();
        manager.add("Cable", Money::usd(999), 9).unwrap();
        let outcome = manager.add("Cable", Money::usd(999), 4).unwrap();

        assert!(outcome.clamped);
        assert_eq!(manager.item_count(), MAX_QUANTITY);
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Error, "Maximum quantity is 10".to_string())
        );
    }

    #[test]
    fn test_add_rejects_zero_quantity_without_change() {
        let mut manager = manager();
        let err = manager.add("Cable", Money::usd(999), 0).unwrap_err();

        assert_eq!(err.as_commerce(), Some(&CommerceError::InvalidQuantity(0)));
        assert!(manager.cart().is_empty());
        assert_eq!(stored(&manager), None);
        assert_eq!(last_toast(&manager).0, ToastKind::Error);
    }

    #[test]
    fn test_mutations_log_item_and_count() {
        let (mut manager, log) = manager_with(MemoryStore::new(), "products.html");
        manager.add("Lamp", Money::usd(2000), 2).unwrap();

        let entry = &log.find("item added")[0];
        assert_eq!(entry.fields["item"], serde_json::json!("Lamp"));
        assert_eq!(entry.fields["quantity"], serde_json::json!(2));
        assert_eq!(entry.fields["count"], serde_json::json!(2));
    }

    #[test]
    fn test_remove_reloads_cart_page() {
        let (mut manager, _) = manager_with(MemoryStore::new(), "cart.html");
        manager.add("A", Money::usd(100), 1).unwrap();
        manager.add("B", Money::usd(200), 2).unwrap();

        let removed = manager.remove(1).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(manager.view().badge_count(), 2);
        assert_eq!(manager.view().reloads(), 1);
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Warning, "A removed from cart!".to_string())
        );
    }

    #[test]
    fn test_remove_out_of_range_changes_nothing() {
        let mut manager = manager();
        manager.add("A", Money::usd(100), 1).unwrap();
        let before = stored(&manager);

        let err = manager.remove(5).unwrap_err();
        assert!(matches!(
            err.as_commerce(),
            Some(CommerceError::PositionOutOfRange { position: 5, len: 1 })
        ));
        assert_eq!(manager.cart().len(), 1);
        assert_eq!(stored(&manager), before);
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Error, "No cart item at position 5".to_string())
        );
        assert_eq!(manager.view().reloads(), 0);
    }

    #[test]
    fn test_update_quantity_refreshes_row_and_totals() {
        let (mut manager, _) = manager_with(MemoryStore::new(), "cart.html");
        manager.add("Keyboard", Money::usd(2000), 1).unwrap();

        let change = manager.update_quantity(1, 2).unwrap();
        assert_eq!(change.quantity, 3);
        assert_eq!(manager.view().line_total(1), Some(Money::usd(6000)));

        let totals = manager.view().totals().unwrap();
        assert_eq!(totals.subtotal, Money::usd(6000));
        assert_eq!(totals.tax, Money::usd(540));
        assert_eq!(totals.shipping, Money::usd(0));
        assert_eq!(totals.total.display(), "$65.40");
        assert_eq!(
            stored(&manager).as_deref(),
            Some(r#"[{"name":"Keyboard","price":20.0,"quantity":3}]"#)
        );
    }

    #[test]
    fn test_update_quantity_warns_only_at_upper_bound() {
        let mut manager = manager();
        manager.add("Mug", Money::usd(1200), 1).unwrap();
        let toasts = manager.notifier().len();

        let change = manager.update_quantity(1, -3).unwrap();
        assert_eq!(change.quantity, 1);
        assert_eq!(manager.notifier().len(), toasts);

        let change = manager.update_quantity(1, 20).unwrap();
        assert_eq!(change.quantity, MAX_QUANTITY);
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Error, "Maximum quantity is 10".to_string())
        );
        assert_eq!(manager.cart().get(1).unwrap().quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_clear_respects_confirmation() {
        let (mut manager, _) = manager_with(MemoryStore::new(), "cart.html");
        manager.add("A", Money::usd(100), 4).unwrap();

        assert!(!manager.clear(&mut FixedAnswer(false)).unwrap());
        assert_eq!(manager.item_count(), 4);

        assert!(manager.clear(&mut FixedAnswer(true)).unwrap());
        assert!(manager.cart().is_empty());
        assert_eq!(manager.view().badge_count(), 0);
        assert_eq!(stored(&manager).as_deref(), Some("[]"));
        assert_eq!(manager.view().reloads(), 1);
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Warning, "Cart cleared!".to_string())
        );
    }

    #[test]
    fn test_clear_empty_cart_still_confirms_and_toasts() {
        let (mut manager, _) = manager_with(MemoryStore::new(), "cart.html");
        assert!(manager.cart().is_empty());

        assert!(!manager.clear(&mut FixedAnswer(false)).unwrap());
        assert!(manager.notifier().is_empty());

        assert!(manager.clear(&mut FixedAnswer(true)).unwrap());
        assert_eq!(stored(&manager).as_deref(), Some("[]"));
        assert_eq!(manager.view().reloads(), 1);
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Warning, "Cart cleared!".to_string())
        );
    }

    #[test]
    fn test_apply_promo() {
        let mut manager = manager();
        manager.add("A", Money::usd(10000), 1).unwrap();
        let before = manager.totals().unwrap();

        let promo = manager.apply_promo(" freeship ").unwrap();
        assert_eq!(promo, PromoCode::FreeShip);
        assert_eq!(
            last_toast(&manager),
            (
                ToastKind::Success,
                "Promo code applied! 0% off + Free Shipping".to_string()
            )
        );
        assert_eq!(manager.totals().unwrap(), before);

        let err = manager.apply_promo("BOGUS").unwrap_err();
        assert!(matches!(
            err.as_commerce(),
            Some(CommerceError::InvalidPromoCode(_))
        ));
        assert_eq!(
            last_toast(&manager),
            (ToastKind::Error, "Invalid promo code".to_string())
        );
        assert_eq!(manager.applied_promo(), Some(PromoCode::FreeShip));
    }

    #[test]
    fn test_render_pushes_every_line() {
        let mut manager = manager();
        manager.add("A", Money::usd(150), 2).unwrap();
        manager.add("B", Money::usd(1000), 1).unwrap();

        manager.render().unwrap();
        assert_eq!(manager.view().line_total(1), Some(Money::usd(300)));
        assert_eq!(manager.view().line_total(2), Some(Money::usd(1000)));
        assert_eq!(manager.view().totals().unwrap().shipping, Money::usd(999));
    }

    #[test]
    fn test_forget_deletes_entry() {
        let mut manager = manager();
        manager.add("A", Money::usd(100), 1).unwrap();
        manager.forget().unwrap();

        assert!(manager.cart().is_empty());
        assert!(!manager.cache().exists("shopEaseCart").unwrap());
        assert_eq!(manager.view().badge_count(), 0);
    }

    #[test]
    fn test_custom_toast_delay() {
        let (logger, _) = StructuredLogger::in_memory("sess-delay");
        let mut config = StorefrontConfig::default();
        config.ui.toast_delay_ms = 750;

        let mut manager = CartManager::load(
            MemoryStore::new(),
            PageModel::at("index.html"),
            ToastStack::new(),
            &config,
            &logger,
        );
        manager.add("A", Money::usd(100), 1).unwrap();
        assert_eq!(manager.notifier().last().unwrap().delay_ms, 750);
    }
}
