//! Hook registry for managing and executing model hooks.

use crate::hooks::error::{HookError, Result};
use crate::hooks::model::{ModelHook, ModelHookContext, ModelHookType};
use crate::hooks::types::HookResult as HookExecutionResult;
use datagent_abstraction::ModelResponse;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A before-model hook answered the request in place of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortCircuit {
    /// Name of the hook that produced the response.
    pub hook: String,
    /// The synthesized response.
    pub response: ModelResponse,
}

/// Registry for managing hooks.
pub struct HookRegistry {
    /// Registered hooks, sorted by priority (highest first).
    hooks: Arc<RwLock<Vec<Arc<dyn ModelHook>>>>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry").finish_non_exhaustive()
    }
}

impl HookRegistry {
    /// Create a new hook registry.
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a hook.
    ///
    /// # Errors
    /// Returns `HookError::RegistrationFailed` if a hook with the same name is
    /// already registered.
    pub async fn register(&self, hook: Arc<dyn ModelHook>) -> Result<()> {
        let mut hooks = self.hooks.write().await;
        if hooks.iter().any(|h| h.name() == hook.name()) {
            return Err(HookError::RegistrationFailed(format!(
                "hook '{}' is already registered",
                hook.name()
            )));
        }
        debug!(hook = %hook.name(), priority = hook.priority().value(), "Registering hook");
        hooks.push(hook);
        // Sort by priority (higher priority first)
        hooks.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Ok(())
    }

    /// Unregister a hook by name.
    pub async fn unregister(&self, name: &str) -> Result<()> {
        let mut hooks = self.hooks.write().await;
        let before = hooks.len();
        hooks.retain(|h| h.name() != name);
        if hooks.len() == before {
            return Err(HookError::NotFound(name.to_string()));
        }
        Ok(())
    }

    /// Names of registered hooks in execution order.
    pub async fn names(&self) -> Vec<String> {
        let hooks = self.hooks.read().await;
        hooks.iter().map(|h| h.name().to_string()).collect()
    }

    async fn snapshot(&self) -> Vec<Arc<dyn ModelHook>> {
        self.hooks.read().await.clone()
    }

    /// Run the before-model hooks.
    ///
    /// Returns the first response produced by a hook. A hook that asks to stop
    /// without a response ends the before phase and the model call proceeds.
    /// Hook errors are logged and skipped.
    pub async fn run_before_model(&self, context: &ModelHookContext) -> Option<ShortCircuit> {
        for hook in self.snapshot().await {
            match hook.before_model_call(context).await {
                Ok(result) => {
                    if let Some(response) = result.response {
                        debug!(hook = %hook.name(), "Hook short-circuited model call");
                        return Some(ShortCircuit {
                            hook: hook.name().to_string(),
                            response,
                        });
                    }
                    if !result.should_continue {
                        debug!(
                            hook = %hook.name(),
                            message = ?result.message,
                            "Hook stopped before-model phase"
                        );
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        hook_name = %hook.name(),
                        hook_type = ModelHookType::Before.as_str(),
                        error = %e,
                        "Hook execution failed"
                    );
                }
            }
        }
        None
    }

    /// Run the after-model hooks.
    ///
    /// Every hook runs unless one asks to stop. Failures are recorded as error
    /// results rather than returned.
    pub async fn run_after_model(&self, context: &ModelHookContext) -> Vec<HookExecutionResult> {
        let mut results = Vec::new();

        for hook in self.snapshot().await {
            match hook.after_model_call(context).await {
                Ok(result) => {
                    let stop = !result.should_continue;
                    results.push(result);
                    if stop {
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        hook_name = %hook.name(),
                        hook_type = ModelHookType::After.as_str(),
                        error = %e,
                        "Hook execution failed"
                    );
                    results.push(HookExecutionResult::error(format!(
                        "Hook {} failed: {}",
                        hook.name(),
                        e
                    )));
                }
            }
        }

        results
    }

    /// Clear all hooks.
    pub async fn clear(&self) {
        let mut hooks = self.hooks.write().await;
        hooks.clear();
    }

    /// Get the number of registered hooks.
    pub async fn count(&self) -> usize {
        let hooks = self.hooks.read().await;
        hooks.len()
    }
}
