//! Cart manager and checkout for the ShopEase storefront.
//!
//! [`CartManager`] owns a [`Cart`](shopease_commerce::cart::Cart), persists it
//! through a [`KeyValueStore`](shopease_cache::KeyValueStore) and keeps a
//! [`CartView`](shopease_ui::CartView) and a [`Notifier`](shopease_ui::Notifier)
//! in step with it.
//!
//! # Example
//!
//! ```
//! use shopease_cache::MemoryStore;
//! use shopease_commerce::Money;
//! use shopease_observability::StructuredLogger;
//! use shopease_storefront::{CartManager, StorefrontConfig};
//! use shopease_ui::{PageModel, ToastStack};
//!
//! let (logger, _log) = StructuredLogger::in_memory("sess-doc");
//! let mut manager = CartManager::load(
//!     MemoryStore::new(),
//!     PageModel::at("products.html"),
//!     ToastStack::new(),
//!     &StorefrontConfig::default(),
//!     &logger,
//! );
//!
//! manager.add("Desk Lamp", Money::usd(2000), 3).unwrap();
//! assert_eq!(manager.view().badge_count(), 3);
//! assert_eq!(manager.totals().unwrap().total.display(), "$65.40");
//! ```

mod checkout;
pub mod config;
mod error;
mod manager;

pub use checkout::ORDER_PLACED_MESSAGE;
pub use config::{generate_default_config, ConfigSearch, StorefrontConfig};
pub use error::StorefrontError;
pub use manager::{error_message, CartManager, CLEAR_PROMPT};
