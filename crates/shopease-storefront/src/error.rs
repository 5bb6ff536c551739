//! Storefront error types.

use shopease_cache::CacheError;
use shopease_commerce::CommerceError;
use thiserror::Error;

/// Errors surfaced by the cart manager.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// A cart or checkout rule was violated.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),

    /// Configuration could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StorefrontError {
    /// The underlying commerce error, if that is what this is.
    pub fn as_commerce(&self) -> Option<&CommerceError> {
        match self {
            StorefrontError::Commerce(e) => Some(e),
            _ => None,
        }
    }
}
