//! Ask command implementation.
//!
//! Runs each question through the cache-wrapped scripted model and reports
//! whether the answer came from the cache or the model.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use datagent_abstraction::{Content, ModelRequest};
use datagent_core::{CacheManager, Config, HookedModel};
use datagent_models::ScriptedModel;
use tracing::info;

/// Execute the ask command.
pub async fn execute(config: &Config, script: &Path, questions: &[String]) -> anyhow::Result<()> {
    let scripted = ScriptedModel::from_file(config.model.model_id.clone(), script)
        .with_context(|| format!("Failed to load script {}", script.display()))?;
    let scripted = Arc::new(scripted);
    info!(entries = scripted.len(), model_id = %config.model.model_id, "Loaded script");

    let cache = Arc::new(CacheManager::new());
    let shared = Arc::clone(&cache);
    let installed = HookedModel::with_sql_cache(scripted.clone(), shared, &config.cache);
    let (model, hook) = installed.await.context("Failed to install cache hook")?;

    let generation = config.model.generation_config();
    for question in questions {
        let request = ModelRequest::new(vec![Content::user(question.as_str())])
            .with_config(generation.clone());
        let invocation = model
            .invoke(&request)
            .await
            .with_context(|| format!("Model call failed for '{}'", question))?;

        let tag = if invocation.is_short_circuit() {
            "[cache]".green()
        } else {
            "[model]".yellow()
        };
        let answer = invocation.response.primary_text().unwrap_or("(no text)");
        println!("{} {}", tag, answer);
    }

    let hits = hook.map_or(0, |hook| hook.stats().hits);
    println!(
        "{}",
        format!(
            "model calls: {}, cache hits: {}, questions cached: {}, queries cached: {}",
            scripted.calls(),
            hits,
            cache.question_entries(),
            cache.query_entries()
        )
        .dimmed()
    );

    Ok(())
}
