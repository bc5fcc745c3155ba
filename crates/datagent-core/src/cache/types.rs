//! Data types stored in the response cache.

use datagent_abstraction::{Content, Part};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named side payload associated with a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact file name.
    pub name: String,
    /// Artifact payload.
    pub part: Part,
}

/// A model response stored under its generated query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// The model content, passed through unmodified.
    pub response: Content,
    /// Side artifacts, in order.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl CachedResponse {
    /// Cache a content payload with no artifacts.
    pub fn new(response: Content) -> Self {
        Self {
            response,
            artifacts: Vec::new(),
        }
    }
}

/// Point-in-time copy of both cache levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    /// Question → query entries.
    pub questions: HashMap<String, String>,
    /// Query → response entries.
    pub queries: HashMap<String, CachedResponse>,
}
