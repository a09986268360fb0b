//! Reksadana Advisor HTTP Server
//!
//! Axum server exposing the fund advisor as a chat endpoint plus direct
//! capability calls. Each conversation id gets its own session, and with it
//! its own risk profile.

mod config;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use agent_core::{
    provider::GenerationOptions, Agent, AgentConfig, LlmProvider, MemorySessionStore, ToolRegistry,
};
use agent_runtime::OllamaProvider;
use axum::{
    routing::{get, post},
    Router,
};
use reksadana_advisor::{
    search::{DisabledSearchClient, HttpSearchClient, SearchClient},
    CapabilityRouter, FundCatalog, ADVISOR_PROMPT,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::handlers::{chat_handler, health_check, invoke_tool, list_models, list_tools};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before reading RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_config(&config.ollama)?);

    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama at {}", config.ollama.base_url());
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - /chat will fail until it is reachable");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    // Fund catalog
    let catalog = Arc::new(FundCatalog::load(&config.data_dir));
    let summary = catalog.summary();
    tracing::info!(
        dir = %config.data_dir.display(),
        partitions = summary.partitions.len(),
        master_rows = summary.master_rows.unwrap_or(0),
        "Catalog loaded"
    );

    // Market search backend
    let search: Arc<dyn SearchClient> = match config.search.clone() {
        Some(search_config) => Arc::new(HttpSearchClient::new(search_config)?),
        None => {
            tracing::warn!("⚠ SEARCH_API_URL not set - market_search disabled");
            Arc::new(DisabledSearchClient)
        }
    };

    // Tools
    let router = Arc::new(CapabilityRouter::new(catalog.clone(), search));
    let mut tools = ToolRegistry::new();
    reksadana_advisor::register_tools(&mut tools, &router);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }
    let tools = Arc::new(tools);

    let agent = Agent::new(
        provider.clone(),
        tools.clone(),
        AgentConfig {
            system_prompt: ADVISOR_PROMPT.into(),
            generation: GenerationOptions {
                model: config.model.clone(),
                ..Default::default()
            },
            ..Default::default()
        },
    );

    let state = AppState {
        agent: Arc::new(agent),
        tools,
        sessions: Arc::new(MemorySessionStore::new()),
        catalog,
        provider,
        model: config.model.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 Reksadana advisor running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/models        - List available models");
    tracing::info!("  GET  /api/tools         - Capability schemas");
    tracing::info!("  POST /api/tools/{{name}}  - Invoke one capability");
    tracing::info!("  POST /chat              - Send message");

    axum::serve(listener, app(state)).await?;

    Ok(())
}

pub(crate) fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/tools", get(list_tools))
        // Agent API
        .route("/api/tools/{name}", post(invoke_tool))
        .route("/chat", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
