//! Model implementations for datagent development and testing.
//!
//! # Provided Models
//!
//! - **Mock**: echoes the question back as the generated content
//! - **Scripted**: replies from a fixed question → SQL table, loadable from TOML

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use datagent_abstraction::{Content, Model, ModelError, ModelRequest, ModelResponse, ModelUsage};
use serde::Deserialize;
use tracing::debug;

/// Reply used by [`ScriptedModel`] for questions it has no entry for.
pub const NO_SCRIPTED_REPLY: &str = "-- no scripted reply";

/// A mock implementation of the `Model` trait for testing and demonstration.
#[derive(Debug, Default)]
pub struct MockModel {
    id: String,
    calls: AtomicUsize,
}

impl MockModel {
    /// Creates a new `MockModel` with the given ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate_content` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate_content(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = request.last_text().unwrap_or_default();

        debug!(model_id = %self.id, turns = request.contents.len(), "MockModel generating content");

        let reply = format!("Mock response for: {prompt}");
        Ok(response(&self.id, prompt, reply))
    }

    fn model_id(&self) -> &str {
        &self.id
    }
}

/// One canned question/reply pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptEntry {
    /// The exact question text.
    pub question: String,
    /// The reply text (usually SQL).
    pub reply: String,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    responses: Vec<ScriptEntry>,
}

/// A model that answers from a fixed script.
///
/// The last request turn is matched exactly against the script's questions.
#[derive(Debug)]
pub struct ScriptedModel {
    id: String,
    replies: HashMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    /// Create a scripted model from question/reply pairs.
    pub fn new(id: impl Into<String>, entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            id: id.into(),
            replies: entries.into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Parse a script from TOML.
    ///
    /// ```toml
    /// [[responses]]
    /// question = "how many rows?"
    /// reply = "SELECT COUNT(*) FROM sales"
    /// ```
    ///
    /// # Errors
    /// Returns `ModelError::SerializationError` if the script is malformed.
    pub fn from_toml(id: impl Into<String>, content: &str) -> Result<Self, ModelError> {
        let script: ScriptFile = match toml::from_str(content) {
            Ok(script) => script,
            Err(e) => return Err(ModelError::SerializationError(e.to_string())),
        };
        let entries = script
            .responses
            .into_iter()
            .map(|entry| (entry.question, entry.reply));
        Ok(Self::new(id, entries))
    }

    /// Load a script from a TOML file.
    ///
    /// # Errors
    /// Returns `ModelError::RequestError` if the file cannot be read and
    /// `ModelError::SerializationError` if it is malformed.
    pub fn from_file(id: impl Into<String>, path: &Path) -> Result<Self, ModelError> {
        let location = path.display();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModelError::RequestError(format!("{location}: {e}")))?;
        Self::from_toml(id, &content)
    }

    /// Number of scripted questions.
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    /// Whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// Number of `generate_content` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Model for ScriptedModel {
    async fn generate_content(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let question = request.last_text().unwrap_or_default();

        let reply = match self.replies.get(question) {
            Some(reply) => reply.clone(),
            None => {
                debug!(model_id = %self.id, "No scripted reply for question");
                NO_SCRIPTED_REPLY.to_string()
            }
        };
        Ok(response(&self.id, question, reply))
    }

    fn model_id(&self) -> &str {
        &self.id
    }
}

fn response(model_id: &str, prompt: &str, reply: String) -> ModelResponse {
    let prompt_tokens = count_tokens(prompt);
    let completion_tokens = count_tokens(&reply);
    ModelResponse {
        content: Some(Content::model(reply)),
        model_id: Some(model_id.to_string()),
        usage: Some(ModelUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }),
        finish_reason: Some("STOP".to_string()),
    }
}

/// Count tokens in a string (simplified: word count).
#[allow(clippy::cast_possible_truncation)]
fn count_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_echoes_last_turn() {
        let model = MockModel::new("mock");
        let turns = vec![Content::user("first"), Content::user("how many rows?")];
        let request = ModelRequest::new(turns);
        let response = model.generate_content(&request).await.unwrap();
        assert_eq!(
            response.primary_text(),
            Some("Mock response for: how many rows?")
        );
        assert_eq!(response.model_id.as_deref(), Some("mock"));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_model_empty_request() {
        let model = MockModel::new("mock");
        let request = ModelRequest::default();
        let response = model.generate_content(&request).await.unwrap();
        assert_eq!(response.primary_text(), Some("Mock response for: "));
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens("SELECT COUNT(*) FROM t"), 4);
        assert_eq!(count_tokens(""), 0);
    }

    #[tokio::test]
    async fn test_scripted_model_from_toml() {
        let script = r#"
            [[responses]]
            question = "how many rows?"
            reply = "SELECT COUNT(*) FROM sales"
        "#;
        let model = ScriptedModel::from_toml("scripted", script).unwrap();
        assert_eq!(model.len(), 1);

        let request = ModelRequest::new(vec![Content::user("how many rows?")]);
        let response = model.generate_content(&request).await.unwrap();
        assert_eq!(response.primary_text(), Some("SELECT COUNT(*) FROM sales"));

        let request = ModelRequest::new(vec![Content::user("unknown")]);
        let response = model.generate_content(&request).await.unwrap();
        assert_eq!(response.primary_text(), Some(NO_SCRIPTED_REPLY));
        assert_eq!(model.calls(), 2);
    }

    #[test]
    fn test_scripted_model_bad_toml() {
        let result = ScriptedModel::from_toml("scripted", "[[responses]\nquestion = 1");
        assert!(matches!(result, Err(ModelError::SerializationError(_))));
    }

    #[test]
    fn test_scripted_model_empty_script() {
        let model = ScriptedModel::from_toml("scripted", "").unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_scripted_model_missing_file() {
        let result = ScriptedModel::from_file("scripted", Path::new("/nonexistent/script.toml"));
        assert!(matches!(result, Err(ModelError::RequestError(_))));
    }
}
