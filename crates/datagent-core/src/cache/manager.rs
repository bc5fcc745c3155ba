//! In-memory question and query caches.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::types::{CacheSnapshot, CachedResponse};

/// Owner of the question cache and the query cache.
///
/// The two maps are independent: nothing here keeps a question's query
/// present in the query cache. Callers that need the chain intact write the
/// query cache first. Entries are never removed.
///
/// Share one manager between hooks with `Arc<CacheManager>`.
#[derive(Debug, Default)]
pub struct CacheManager {
    /// Query → cached response.
    query_cache: RwLock<HashMap<String, CachedResponse>>,
    /// Question → query.
    question_cache: RwLock<HashMap<String, String>>,
}

impl CacheManager {
    /// Create an empty cache manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the response cached for `query`.
    pub fn get_from_query_cache(&self, query: &str) -> Option<CachedResponse> {
        read(&self.query_cache).get(query).cloned()
    }

    /// Store `response` under `query`, replacing any previous entry.
    pub fn set_to_query_cache(&self, query: impl Into<String>, response: CachedResponse) {
        write(&self.query_cache).insert(query.into(), response);
    }

    /// Look up the query cached for `question`.
    pub fn get_from_question_cache(&self, question: &str) -> Option<String> {
        read(&self.question_cache).get(question).cloned()
    }

    /// Store `query` under `question`, replacing any previous entry.
    pub fn set_to_question_cache(&self, question: impl Into<String>, query: impl Into<String>) {
        write(&self.question_cache).insert(question.into(), query.into());
    }

    /// Number of cached questions.
    pub fn question_entries(&self) -> usize {
        read(&self.question_cache).len()
    }

    /// Number of cached queries.
    pub fn query_entries(&self) -> usize {
        read(&self.query_cache).len()
    }

    /// Whether both caches are empty.
    pub fn is_empty(&self) -> bool {
        self.question_entries() == 0 && self.query_entries() == 0
    }

    /// Copy both caches.
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            questions: read(&self.question_cache).clone(),
            queries: read(&self.query_cache).clone(),
        }
    }
}

// A panic while holding a guard cannot leave a HashMap half-inserted, so a
// poisoned lock is still safe to use.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagent_abstraction::Content;

    fn cached(text: &str) -> CachedResponse {
        CachedResponse::new(Content::model(text))
    }

    #[test]
    fn test_fresh_manager_misses() {
        let cache = CacheManager::new();
        assert!(cache.get_from_query_cache("never-seen").is_none());
        assert!(cache.get_from_question_cache("never-seen").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_query_cache_set_then_get() {
        let cache = CacheManager::new();
        cache.set_to_query_cache("SELECT 1", cached("SELECT 1"));
        let hit = cache.get_from_query_cache("SELECT 1");
        assert_eq!(hit, Some(cached("SELECT 1")));
    }

    #[test]
    fn test_question_cache_set_then_get() {
        let cache = CacheManager::new();
        cache.set_to_question_cache("how many rows?", "SELECT COUNT(*) FROM t");
        assert_eq!(
            cache.get_from_question_cache("how many rows?").as_deref(),
            Some("SELECT COUNT(*) FROM t")
        );
    }

    #[test]
    fn test_repeated_write_is_idempotent() {
        let cache = CacheManager::new();
        cache.set_to_query_cache("q", cached("r"));
        cache.set_to_query_cache("q", cached("r"));
        assert_eq!(cache.get_from_query_cache("q"), Some(cached("r")));
        assert_eq!(cache.query_entries(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = CacheManager::new();
        cache.set_to_query_cache("q", cached("r1"));
        cache.set_to_query_cache("q", cached("r2"));
        assert_eq!(cache.get_from_query_cache("q"), Some(cached("r2")));

        cache.set_to_question_cache("k", "v1");
        cache.set_to_question_cache("k", "v2");
        assert_eq!(cache.get_from_question_cache("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_keys_are_verbatim() {
        let cache = CacheManager::new();
        cache.set_to_question_cache("How many rows?", "SELECT 1");
        assert!(cache.get_from_question_cache("how many rows?").is_none());
        assert!(cache.get_from_question_cache("How many rows? ").is_none());
    }

    #[test]
    fn test_empty_and_long_keys_are_valid() {
        let cache = CacheManager::new();
        let long = "x".repeat(100_000);
        cache.set_to_question_cache("", "");
        cache.set_to_question_cache(long.clone(), "SELECT 2");
        assert_eq!(cache.get_from_question_cache("").as_deref(), Some(""));
        let query = cache.get_from_question_cache(&long);
        assert_eq!(query.as_deref(), Some("SELECT 2"));
    }

    #[test]
    fn test_caches_are_independent() {
        let cache = CacheManager::new();
        cache.set_to_question_cache("question", "SELECT 1");
        assert!(cache.get_from_query_cache("SELECT 1").is_none());
        assert_eq!(cache.question_entries(), 1);
        assert_eq!(cache.query_entries(), 0);
    }

    #[test]
    fn test_snapshot_reflects_contents() {
        let cache = CacheManager::new();
        let empty = cache.snapshot();
        cache.set_to_query_cache("SELECT 1", cached("SELECT 1"));
        cache.set_to_question_cache("q", "SELECT 1");

        let snapshot = cache.snapshot();
        assert_ne!(snapshot, empty);
        let query = snapshot.questions.get("q").map(String::as_str);
        assert_eq!(query, Some("SELECT 1"));
        assert!(snapshot.queries.contains_key("SELECT 1"));
    }
}
