//! Core types for the hooks system.

use datagent_abstraction::ModelResponse;
use serde::{Deserialize, Serialize};

/// Priority for hook execution order.
///
/// Hooks with higher priority values execute first.
/// Default priority is 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookPriority(pub u32);

impl Default for HookPriority {
    fn default() -> Self {
        Self(100)
    }
}

impl HookPriority {
    /// Create a new hook priority.
    pub fn new(priority: u32) -> Self {
        Self(priority)
    }

    /// Get the priority value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Result of hook execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookResult {
    /// Whether the hook execution was successful.
    pub success: bool,
    /// Optional message from the hook.
    pub message: Option<String>,
    /// Response produced by the hook in place of the model.
    pub response: Option<ModelResponse>,
    /// Whether execution should continue.
    pub should_continue: bool,
}

impl Default for HookResult {
    fn default() -> Self {
        Self {
            success: true,
            message: None,
            response: None,
            should_continue: true,
        }
    }
}

impl HookResult {
    /// Create a successful hook result.
    pub fn success() -> Self {
        Self::default()
    }

    /// Create a successful hook result carrying a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Answer the request in place of the model.
    ///
    /// Only meaningful for before-model hooks; the model call is skipped.
    pub fn respond(response: ModelResponse) -> Self {
        Self {
            success: true,
            message: None,
            response: Some(response),
            should_continue: false,
        }
    }

    /// Create a hook result that stops execution.
    pub fn stop(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            response: None,
            should_continue: false,
        }
    }

    /// Create a hook result with an error message but continue execution.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            response: None,
            should_continue: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagent_abstraction::Part;

    #[test]
    fn test_priority_ordering() {
        assert!(HookPriority::new(200) > HookPriority::default());
        assert_eq!(HookPriority::default().value(), 100);
    }

    #[test]
    fn test_result_constructors() {
        let ok = HookResult::success();
        assert!(ok.success && ok.should_continue && ok.response.is_none());

        let stop = HookResult::stop("halt");
        assert!(!stop.success && !stop.should_continue);
        assert_eq!(stop.message.as_deref(), Some("halt"));

        let err = HookResult::error("oops");
        assert!(!err.success && err.should_continue);

        let response = ModelResponse::from_cached_parts(vec![Part::text("x")]);
        let respond = HookResult::respond(response.clone());
        assert!(respond.success && !respond.should_continue);
        assert_eq!(respond.response, Some(response));
    }
}
