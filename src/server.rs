//! MCP server initialization for stdio and Streamable HTTP transports.
//!
//! Provides [`serve`], which picks a transport from `server.transport`, plus
//! the [`serve_stdio`] and [`serve_http`] entry points that wire the embedding
//! provider and MCP tool handler into a running server.

use crate::tools::VowlogTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;
use vowlog::config::VowlogConfig;
use vowlog::embedding;

/// Shared setup: create the embedding provider and wrap both in Arc for sharing.
fn setup_shared_state(
    config: VowlogConfig,
) -> Result<(Arc<dyn embedding::EmbeddingProvider>, Arc<VowlogConfig>)> {
    let provider = embedding::create_provider(&config.embedding)?;
    let embedding: Arc<dyn embedding::EmbeddingProvider> = Arc::from(provider);
    tracing::info!(
        provider = %config.embedding.provider,
        model = embedding.model(),
        dimensions = embedding.dimensions(),
        "embedding provider ready"
    );

    Ok((embedding, Arc::new(config)))
}

/// Start the MCP server on the configured transport (`"stdio"` or `"http"`).
pub async fn serve(config: VowlogConfig) -> Result<()> {
    match config.server.transport.as_str() {
        "stdio" => serve_stdio(config).await,
        "http" | "sse" => serve_http(config).await,
        other => anyhow::bail!("unknown transport: {other}. Supported: stdio, http"),
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: VowlogConfig) -> Result<()> {
    tracing::info!("starting Vowlog MCP server on stdio");

    let (embedding, config) = setup_shared_state(config)?;

    let tools = VowlogTools::new(embedding, config);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport, mounted at `/mcp`.
pub async fn serve_http(config: VowlogConfig) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!(addr = %bind_addr, "starting Vowlog MCP server on HTTP");

    let (embedding, config) = setup_shared_state(config)?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(VowlogTools::new(embedding.clone(), config.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
