//! Datagent Core - response caching for a natural-language-to-SQL agent.
//!
//! This crate provides:
//! - A two-level question/query response cache
//! - A model hook that serves repeated questions from that cache
//! - A hook registry and a hooked model wrapper to run hooks around model calls
//! - Configuration, logging setup and error handling
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use datagent_abstraction::{Content, Model, ModelRequest};
//! use datagent_core::{CacheManager, Config, HookedModel};
//!
//! # async fn run(model: Arc<dyn Model>) -> datagent_core::Result<()> {
//! let config = Config::load(None)?;
//! let cache = Arc::new(CacheManager::new());
//! let (model, _hook) = HookedModel::with_sql_cache(model, cache, &config.cache).await?;
//!
//! let request = ModelRequest::new(vec![Content::user("how many rows?")])
//!     .with_config(config.model.generation_config());
//! let invocation = model.invoke(&request).await?;
//! println!("{:?}", invocation.response.primary_text());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod hooks;
pub mod invoker;
pub mod logging;

pub use cache::{
    Artifact, CacheHookStats, CacheManager, CacheSnapshot, CachedResponse, SqlCacheHook,
};
pub use config::{CacheSettings, Config, ConfigError, LoggingConfig, ModelSettings};
pub use error::{DatagentError, Result};
pub use hooks::{
    HookError, HookExecutionResult, HookPriority, HookRegistry, ModelHook, ModelHookContext,
};
pub use invoker::{HookedModel, Invocation, ResponseSource};
