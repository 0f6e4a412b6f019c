use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use vowlog::config::VowlogConfig;
use vowlog::embedding::{self, EmbeddingProvider};
use vowlog::journal;
use vowlog::retrieval::SemanticRetriever;

fn retriever(config: &VowlogConfig) -> Result<SemanticRetriever> {
    let provider = embedding::create_provider(&config.embedding)?;
    let provider: Arc<dyn EmbeddingProvider> = Arc::from(provider);
    Ok(SemanticRetriever::new(provider, config.retrieval.clone()))
}

/// Run a semantic search from the terminal.
pub async fn search(config: &VowlogConfig, path: &Path, query: &str, top_k: Option<usize>) -> Result<()> {
    let entries = journal::load_entries(path)?;
    let top_k = top_k.unwrap_or(config.retrieval.default_top_k);

    let results = retriever(config)?.search(query, &entries, top_k).await?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());

    for (i, result) in results.iter().enumerate() {
        println!(
            "  {}. {} [{}] (relevance: {:.4}, emotion: {})",
            i + 1,
            result.id,
            result.date.as_deref().unwrap_or("undated"),
            result.relevance_score,
            result
                .sentiment
                .as_ref()
                .and_then(|s| s.emotion.as_deref())
                .unwrap_or("unknown"),
        );
        println!("     {}", result.text);
        println!();
    }

    Ok(())
}

/// Print the prompt context block for `query`.
pub async fn context(config: &VowlogConfig, path: &Path, query: &str, num: Option<usize>) -> Result<()> {
    let entries = journal::load_entries(path)?;
    let num = num.unwrap_or(config.retrieval.default_num_context);

    let context = retriever(config)?.retrieve_context(query, &entries, num).await?;
    if context.is_empty() {
        println!("No similar entries found.");
    } else {
        print!("{context}");
    }
    Ok(())
}
