//! Model call hooks.

use crate::hooks::error::Result;
use crate::hooks::types::{HookPriority, HookResult as HookExecutionResult};
use async_trait::async_trait;
use datagent_abstraction::{Content, ModelRequest, ModelResponse};
use serde::{Deserialize, Serialize};

/// Type of model hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelHookType {
    /// Before model call.
    Before,
    /// After model call.
    After,
}

impl ModelHookType {
    /// Get the string representation of the hook type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before_model",
            Self::After => "after_model",
        }
    }
}

/// Context for model call hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHookContext {
    /// The model ID being used.
    pub model_id: String,
    /// The outgoing request.
    pub request: ModelRequest,
    /// The genuine model response (after hooks only).
    pub response: Option<ModelResponse>,
    /// Conversation history visible to the caller, most recent last (after
    /// hooks only).
    pub history: Vec<Content>,
}

impl ModelHookContext {
    /// Create a new model hook context for before model call.
    ///
    /// Before hooks read the conversation from `request.contents`, so the
    /// history is left empty.
    pub fn before(model_id: impl Into<String>, request: ModelRequest) -> Self {
        Self {
            model_id: model_id.into(),
            request,
            response: None,
            history: Vec::new(),
        }
    }

    /// Create a new model hook context for after model call.
    pub fn after(
        model_id: impl Into<String>,
        request: ModelRequest,
        response: ModelResponse,
        history: Vec<Content>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            request,
            response: Some(response),
            history,
        }
    }
}

/// Trait for model hooks.
///
/// A single hook instance serves both phases of a call, so state shared
/// between the before and after phase lives on the hook itself.
#[async_trait]
pub trait ModelHook: Send + Sync {
    /// Get the name of the hook.
    fn name(&self) -> &str;

    /// Get the priority of the hook.
    fn priority(&self) -> HookPriority;

    /// Execute before model call.
    ///
    /// Returning a result that carries a response skips the model call.
    async fn before_model_call(&self, context: &ModelHookContext) -> Result<HookExecutionResult>;

    /// Execute after model call.
    async fn after_model_call(&self, context: &ModelHookContext) -> Result<HookExecutionResult>;
}
