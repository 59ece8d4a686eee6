//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use smartdate_core::{EngineContext, Overrides, SmartdateError};
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// A timestamp together with per-call overrides
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TimestampRequest {
    /// Unix seconds as a number or numeric string, e.g. 947769193 or "-10000"
    pub input: Value,
    /// Overrides such as locale, mode, fullMonthNames, capitalize, addTitle
    #[serde(flatten)]
    pub overrides: Overrides,
}

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    engine: Arc<Mutex<EngineContext>>,
}

impl McpHandlers {
    pub fn new(engine: Arc<Mutex<EngineContext>>) -> Self {
        Self { engine }
    }

    pub async fn format_timestamp(
        &self,
        Parameters(request): Parameters<TimestampRequest>,
    ) -> McpResult {
        debug!("format_timestamp: {:?}", request);
        let TimestampRequest { input, overrides } = request;

        let phrase = self
            .engine
            .lock()
            .await
            .try_format(input, Some(&overrides))
            .map_err(|e| to_mcp_error("Failed to format timestamp", &e))?;

        Ok(CallToolResult::success(vec![Content::text(phrase)]))
    }

    pub async fn create_element(
        &self,
        Parameters(request): Parameters<TimestampRequest>,
    ) -> McpResult {
        debug!("create_element: {:?}", request);
        let TimestampRequest { input, overrides } = request;

        let element = self
            .engine
            .lock()
            .await
            .create_element(input.clone(), Some(&overrides))
            .ok_or_else(|| {
                to_mcp_error(
                    "Failed to create element",
                    &SmartdateError::invalid_timestamp(&input),
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            element.to_string(),
        )]))
    }

    pub async fn list_locales(&self) -> McpResult {
        debug!("list_locales");
        let engine = self.engine.lock().await;

        let mut result = String::from("# Locales\n\n");
        for locale in engine.locales().iter() {
            let modes = locale.mode_names().collect::<Vec<_>>().join(", ");
            result.push_str(&format!("- {}: {modes}\n", locale.name()));
        }
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn configure(&self, Parameters(overrides): Parameters<Overrides>) -> McpResult {
        debug!("configure: {:?}", overrides);
        let mut engine = self.engine.lock().await;
        engine.setup(&overrides);

        let config = serde_json::to_string_pretty(engine.config())
            .map_err(|e| {
                ErrorData::internal_error(format!("Failed to serialize configuration: {e}"), None)
            })?;
        Ok(CallToolResult::success(vec![Content::text(config)]))
    }
}
