//! Structured logging for the ShopEase storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with session context
//! - `LogBuilder` - Fluent construction of entries with typed fields
//! - `LogSink` - Where entries go (stderr, or memory for tests)

mod logging;

pub use logging::*;
