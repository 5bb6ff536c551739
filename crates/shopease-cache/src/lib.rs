//! Type-safe local key-value storage for the ShopEase storefront.
//!
//! Mirrors browser local storage: string keys map to string values, and
//! [`Cache`] layers JSON serialization on top.
//!
//! # Example
//!
//! ```
//! use shopease_cache::{Cache, MemoryStore};
//!
//! let mut cache = Cache::new(MemoryStore::new());
//! cache.set("shopEaseCart", &vec!["mouse"]).unwrap();
//!
//! let items: Option<Vec<String>> = cache.get("shopEaseCart").unwrap();
//! assert_eq!(items, Some(vec!["mouse".to_string()]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
