//! HTTP Handlers

use std::collections::HashMap;

use agent_core::{provider::ModelInfo, ToolCall, ToolContext, ToolResult, ToolSchema};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use reksadana_advisor::CatalogSummary;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorResponse, ServerError};
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub model: String,
    pub llm_connected: bool,
    pub catalog: CatalogSummary,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub conversation_id: String,

    /// Structured tool output of this turn (chart data, rankings)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_results: Vec<ToolResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolInvocationRequest {
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToolInvocationResponse {
    pub tool: String,
    pub conversation_id: String,
    pub success: bool,
    pub result: serde_json::Value,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
        model: state.model.clone(),
        llm_connected,
        catalog: state.catalog.summary(),
    })
}

/// Models available on the provider
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelInfo>>, (StatusCode, Json<ErrorResponse>)> {
    state.provider.list_models().await.map(Json).map_err(|e| {
        tracing::warn!(error = %e, "Listing models failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.user_message(),
                code: "PROVIDER_UNAVAILABLE".into(),
            }),
        )
    })
}

/// Capability schemas
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// One conversation turn: extract a tool call, run it, synthesize the reply
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let prompt = payload.prompt.trim();
    if prompt.is_empty() {
        return Err(ServerError::BadRequest("prompt must not be empty".into()));
    }

    let mut session = state.sessions.load_or_create(payload.conversation_id.as_deref())?;
    let reply = state.agent.run(&mut session, prompt).await?;
    state.sessions.save(&session)?;

    tracing::info!(
        conversation = %session.id,
        tools = reply.tool_results.len(),
        "Chat turn completed"
    );

    Ok(Json(ChatResponse {
        reply: reply.content,
        conversation_id: session.id.to_string(),
        tool_results: reply.tool_results,
    }))
}

/// Run a single capability directly, against a conversation's memory
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<ToolInvocationRequest>,
) -> Result<Json<ToolInvocationResponse>, ServerError> {
    if state.tools.get(&name).is_none() {
        return Err(ServerError::ToolNotFound(name));
    }

    let mut session = state.sessions.load_or_create(payload.conversation_id.as_deref())?;
    let call = ToolCall {
        name,
        arguments: payload.arguments,
        id: None,
    };

    let result = {
        let mut ctx = ToolContext::new(&session.id, &mut session.state);
        state.tools.execute(&call, &mut ctx).await?
    };
    session.touch();
    state.sessions.save(&session)?;

    Ok(Json(ToolInvocationResponse {
        tool: call.name,
        conversation_id: session.id.to_string(),
        success: result.success,
        result: result.data.unwrap_or(serde_json::Value::String(result.output)),
    }))
}
