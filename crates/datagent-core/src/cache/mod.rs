//! Two-level response cache for SQL generation.
//!
//! The question cache maps a natural-language question to the SQL query the
//! model generated for it; the query cache maps that query to the full model
//! content. [`SqlCacheHook`] reads both levels before a model call and fills
//! them after a genuine response.

pub mod hook;
pub mod manager;
pub mod types;

pub use hook::{CacheHookStats, SqlCacheHook};
pub use manager::CacheManager;
pub use types::{Artifact, CacheSnapshot, CachedResponse};
