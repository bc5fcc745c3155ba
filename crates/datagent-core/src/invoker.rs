//! Model invocation wrapped in before/after hooks.

use std::sync::Arc;

use async_trait::async_trait;
use datagent_abstraction::{Model, ModelError, ModelRequest, ModelResponse};
use tracing::{debug, instrument};

use crate::cache::{CacheManager, SqlCacheHook};
use crate::config::CacheSettings;
use crate::error::Result;
use crate::hooks::model::{ModelHook, ModelHookContext};
use crate::hooks::registry::HookRegistry;
use crate::hooks::types::HookPriority;

/// Where an invocation's response came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSource {
    /// The underlying model generated it.
    Model,
    /// The named before-model hook supplied it.
    Hook(String),
}

/// Outcome of a hooked model call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The response handed back to the caller.
    pub response: ModelResponse,
    /// Who produced the response.
    pub source: ResponseSource,
}

impl Invocation {
    /// Whether the model was skipped.
    pub fn is_short_circuit(&self) -> bool {
        matches!(self.source, ResponseSource::Hook(_))
    }
}

/// A model with hooks run around every call.
///
/// Before hooks may answer a request themselves, in which case the inner
/// model is not called and after hooks do not run. Otherwise the inner model
/// is called and after hooks see its response together with the request
/// history. Hook failures never fail the call; model failures propagate
/// unchanged.
pub struct HookedModel {
    model: Arc<dyn Model>,
    hooks: Arc<HookRegistry>,
}

impl std::fmt::Debug for HookedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookedModel")
            .field("model_id", &self.model.model_id())
            .finish_non_exhaustive()
    }
}

impl HookedModel {
    /// Wrap `model` with the hooks in `hooks`.
    pub fn new(model: Arc<dyn Model>, hooks: Arc<HookRegistry>) -> Self {
        Self { model, hooks }
    }

    /// Wrap `model` with a SQL cache hook over `cache`.
    ///
    /// Returns the hooked model and the registered hook, or `None` for the hook
    /// when caching is disabled in `settings`.
    pub async fn with_sql_cache(
        model: Arc<dyn Model>,
        cache: Arc<CacheManager>,
        settings: &CacheSettings,
    ) -> Result<(Self, Option<Arc<SqlCacheHook>>)> {
        let hooks = Arc::new(HookRegistry::new());
        if !settings.enabled {
            debug!("SQL cache disabled, model calls are not cached");
            return Ok((Self::new(model, hooks), None));
        }

        let hook = Arc::new(SqlCacheHook::with_name(
            cache,
            settings.hook_name.clone(),
            HookPriority::new(settings.priority),
        ));
        let registered: Arc<dyn ModelHook> = hook.clone();
        hooks.register(registered).await?;
        Ok((Self::new(model, hooks), Some(hook)))
    }

    /// The hook registry used by this model.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Run one model call through the hooks.
    #[instrument(
        skip_all,
        fields(model_id = %self.model.model_id(), turns = request.contents.len())
    )]
    pub async fn invoke(
        &self,
        request: &ModelRequest,
    ) -> std::result::Result<Invocation, ModelError> {
        let before = ModelHookContext::before(self.model.model_id(), request.clone());
        if let Some(short_circuit) = self.hooks.run_before_model(&before).await {
            debug!(hook = %short_circuit.hook, "Answered without calling the model");
            return Ok(Invocation {
                response: short_circuit.response,
                source: ResponseSource::Hook(short_circuit.hook),
            });
        }

        let response = self.model.generate_content(request).await?;

        let history = request.contents.clone();
        let after = ModelHookContext::after(before.model_id, before.request, response, history);
        self.hooks.run_after_model(&after).await;

        let response = after.response.unwrap_or_default();
        Ok(Invocation {
            response,
            source: ResponseSource::Model,
        })
    }
}

#[async_trait]
impl Model for HookedModel {
    async fn generate_content(
        &self,
        request: &ModelRequest,
    ) -> std::result::Result<ModelResponse, ModelError> {
        let invocation = self.invoke(request).await?;
        Ok(invocation.response)
    }

    fn model_id(&self) -> &str {
        self.model.model_id()
    }
}
