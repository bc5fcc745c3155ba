//! Hooks system for model call interception.
//!
//! Hooks run around every model invocation:
//! - Before the call, a hook may answer the request itself and skip the model
//! - After the call, hooks observe the genuine response
//!
//! Hook failures are logged and never fail the enclosing model call.

pub mod error;
pub mod model;
pub mod registry;
pub mod types;

pub use error::{HookError, Result as HookResult};
pub use model::{ModelHook, ModelHookContext, ModelHookType};
pub use registry::{HookRegistry, ShortCircuit};
pub use types::{HookPriority, HookResult as HookExecutionResult};
