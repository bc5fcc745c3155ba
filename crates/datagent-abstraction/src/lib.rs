//! Model abstraction layer for datagent.
//!
//! This module defines the content types exchanged with generative models and
//! the core `Model` trait. The shapes follow the Gemini content API: a request
//! carries an ordered history of `Content` entries, each made of `Part`s.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role marker for user turns.
pub const ROLE_USER: &str = "user";

/// Role marker for model turns.
pub const ROLE_MODEL: &str = "model";

/// Represents an error that can occur when interacting with an AI model.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelError {
    /// An error occurred during the API request (e.g., network issues, invalid request).
    #[error("Request Error: {0}")]
    RequestError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization Error: {0}")]
    SerializationError(String),
}

/// Inline binary payload, carried base64 encoded and never decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// IANA media type of the payload (e.g. "image/png").
    pub mime_type: String,
    /// Base64 encoded bytes.
    pub data: String,
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function (tool) to call.
    pub name: String,
    /// Call arguments.
    #[serde(default)]
    pub args: serde_json::Value,
}

/// The result of a function call, sent back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Name of the function that produced the response.
    pub name: String,
    /// Function output.
    #[serde(default)]
    pub response: serde_json::Value,
}

/// A single piece of content. Exactly one field is normally set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    /// Function call requested by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// Function result returned to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Create a function call part.
    pub fn function_call(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            function_call: Some(FunctionCall {
                name: name.into(),
                args,
            }),
            ..Self::default()
        }
    }

    /// Create a function response part.
    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            function_response: Some(FunctionResponse {
                name: name.into(),
                response,
            }),
            ..Self::default()
        }
    }

    /// The text payload, if present and non-empty.
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Producer of the content ("user" or "model").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts of the turn.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a content entry with the given role and parts.
    pub fn new(role: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.into()),
            parts,
        }
    }

    /// Create a single-part user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ROLE_USER, vec![Part::text(text)])
    }

    /// Create a single-part model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ROLE_MODEL, vec![Part::text(text)])
    }

    /// Text of the first part, if that part carries non-empty text.
    pub fn primary_text(&self) -> Option<&str> {
        self.parts.first().and_then(Part::as_text)
    }
}

/// Parameters for controlling the model's generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// What sampling temperature to use, between 0 and 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling probability mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// The maximum number of tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Sequences where the model will stop generating further tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// An outgoing request to a content generation model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRequest {
    /// Optional model override for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Ordered conversation history, most recent last.
    #[serde(default)]
    pub contents: Vec<Content>,
    /// Optional generation parameters.
    #[serde(
        default,
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<GenerationConfig>,
}

impl ModelRequest {
    /// Create a request from a conversation history.
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            model: None,
            contents,
            config: None,
        }
    }

    /// Set the generation parameters.
    #[must_use]
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Primary text of the most recent content entry.
    pub fn last_text(&self) -> Option<&str> {
        self.contents.last().and_then(Content::primary_text)
    }
}

/// Usage statistics for a model request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelUsage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,

    /// Number of tokens in the completion.
    pub completion_tokens: u32,

    /// Total number of tokens used.
    pub total_tokens: u32,
}

/// The response from a content generation model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    /// The generated content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Optional: The ID of the model used to generate the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Optional: Usage statistics for the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<ModelUsage>,

    /// Optional: Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl ModelResponse {
    /// Wrap a content entry in a response.
    pub fn from_content(content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    /// Build a response replaying previously generated parts.
    ///
    /// The content is always tagged with the `"model"` role.
    pub fn from_cached_parts(parts: Vec<Part>) -> Self {
        Self::from_content(Content::new(ROLE_MODEL, parts))
    }

    /// Parts of the response content, empty when there is no content.
    pub fn parts(&self) -> &[Part] {
        match &self.content {
            Some(content) => &content.parts,
            None => &[],
        }
    }

    /// Text of the first response part.
    pub fn primary_text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::primary_text)
    }
}

/// A trait for interacting with content generation models.
///
/// All models must be `Send + Sync` to allow concurrent use across threads.
#[async_trait]
pub trait Model: Send + Sync {
    /// Generates content for the given request.
    ///
    /// # Errors
    /// Returns a `ModelError` if generation fails.
    async fn generate_content(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError>;

    /// Returns the ID of the model.
    fn model_id(&self) -> &str;
}
