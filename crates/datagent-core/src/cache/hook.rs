//! Model hook that serves repeated questions from the response cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use datagent_abstraction::{Content, ModelResponse};
use serde::Serialize;
use tracing::{debug, info};

use super::manager::CacheManager;
use super::types::CachedResponse;
use crate::hooks::{HookExecutionResult, HookPriority, HookResult, ModelHook, ModelHookContext};

/// Default registration name of the SQL cache hook.
pub const DEFAULT_HOOK_NAME: &str = "sql-cache";

/// Counters describing what the hook did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheHookStats {
    /// Calls answered from the cache.
    pub hits: u64,
    /// Questions not found in the question cache.
    pub misses: u64,
    /// Questions whose cached query had no cached response.
    pub dangling: u64,
    /// Calls where no question or query text could be extracted.
    pub bypassed: u64,
    /// Responses written to the query cache.
    pub writes: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    dangling: AtomicU64,
    bypassed: AtomicU64,
    writes: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Read-ahead, write-through cache around SQL generation calls.
///
/// The question is the text of the last turn in the request. Before the call
/// the hook resolves question → query → response; if both levels hit, the
/// cached parts are replayed as a `"model"` response and the model is never
/// called. After a genuine call the first response part is taken as the
/// query, and the response is cached under it before the question is linked
/// to it.
///
/// Neither phase ever returns an error.
#[derive(Debug)]
pub struct SqlCacheHook {
    name: String,
    priority: HookPriority,
    cache: Arc<CacheManager>,
    counters: Counters,
}

impl SqlCacheHook {
    /// Create a hook over a shared cache manager.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self::with_name(cache, DEFAULT_HOOK_NAME, HookPriority::default())
    }

    /// Create a hook with an explicit registration name and priority.
    pub fn with_name(
        cache: Arc<CacheManager>,
        name: impl Into<String>,
        priority: HookPriority,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            cache,
            counters: Counters::default(),
        }
    }

    /// The cache manager backing this hook.
    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    /// Current counter values.
    pub fn stats(&self) -> CacheHookStats {
        CacheHookStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            dangling: self.counters.dangling.load(Ordering::Relaxed),
            bypassed: self.counters.bypassed.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
        }
    }

    /// Resolve a question through both cache levels.
    fn lookup(&self, question: &str) -> Option<ModelResponse> {
        let Some(query) = self.cache.get_from_question_cache(question) else {
            bump(&self.counters.misses);
            debug!(hook = %self.name, "Question cache miss");
            return None;
        };

        let Some(cached) = self.cache.get_from_query_cache(&query) else {
            // The question points at a query whose response was never stored,
            // e.g. a reader landed between the two writes of another call.
            bump(&self.counters.dangling);
            debug!(hook = %self.name, query = %query, "Query cache miss for cached question");
            return None;
        };

        bump(&self.counters.hits);
        info!(hook = %self.name, query = %query, "Cache hit");
        Some(ModelResponse::from_cached_parts(cached.response.parts))
    }

    /// Record a genuine response.
    fn store(&self, content: &Content, history: &[Content]) -> bool {
        let Some(query) = content.primary_text() else {
            return false;
        };

        // Artifacts are not carried over from the response.
        let cached = CachedResponse::new(content.clone());
        self.cache.set_to_query_cache(query, cached);
        bump(&self.counters.writes);

        match history.last().and_then(Content::primary_text) {
            Some(question) => {
                self.cache.set_to_question_cache(question, query);
                debug!(hook = %self.name, query = %query, "Cached question and response");
            }
            None => {
                debug!(hook = %self.name, query = %query, "Cached response without question");
            }
        }
        true
    }
}

#[async_trait]
impl ModelHook for SqlCacheHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> HookPriority {
        self.priority
    }

    async fn before_model_call(
        &self,
        context: &ModelHookContext,
    ) -> HookResult<HookExecutionResult> {
        let Some(question) = context.request.last_text() else {
            bump(&self.counters.bypassed);
            debug!(hook = %self.name, "No question text in request, bypassing cache");
            return Ok(HookExecutionResult::success());
        };

        Ok(match self.lookup(question) {
            Some(response) => HookExecutionResult::respond(response),
            None => HookExecutionResult::success(),
        })
    }

    async fn after_model_call(
        &self,
        context: &ModelHookContext,
    ) -> HookResult<HookExecutionResult> {
        let Some(content) = context.response.as_ref().and_then(|r| r.content.as_ref()) else {
            bump(&self.counters.bypassed);
            return Ok(HookExecutionResult::success());
        };

        if self.store(content, &context.history) {
            Ok(HookExecutionResult::with_message("response cached"))
        } else {
            bump(&self.counters.bypassed);
            debug!(hook = %self.name, "No query text in response, not caching");
            Ok(HookExecutionResult::success())
        }
    }
}
