//! MCP server implementation for smartdate
//!
//! Exposes the formatting engine over the Model Context Protocol so assistants
//! can turn timestamps into phrases and markup elements.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use smartdate_core::{EngineContext, Overrides};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{McpResult, TimestampRequest};

/// MCP server for smartdate
#[derive(Clone)]
pub struct SmartdateMcpServer {
    engine: Arc<Mutex<EngineContext>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SmartdateMcpServer {
    pub fn new(engine: EngineContext) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "format_timestamp",
        description = "Format a Unix timestamp (seconds, number or numeric string) as a short phrase such as '2 min ago', 'tomorrow at 3:00 pm' or 'Jan 13, 2000'. Optional keys: locale ('en', 'ru'), mode ('auto', 'past', 'future', 'date', 'time', 'datetime'), fullMonthNames, capitalize."
    )]
    async fn format_timestamp(&self, params: Parameters<TimestampRequest>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.engine.clone());
        handlers.format_timestamp(params).await
    }

    #[tool(
        name = "create_element",
        description = "Create an HTML element (by default <span class=\"smartdate\">) carrying the timestamp in a data attribute and the formatted phrase as its text. Accepts the same keys as format_timestamp plus addTitle to control the absolute-time tooltip."
    )]
    async fn create_element(&self, params: Parameters<TimestampRequest>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.engine.clone());
        handlers.create_element(params).await
    }

    #[tool(
        name = "list_locales",
        description = "List the registered locales and the modes each one provides. The first locale is the fallback for unknown names."
    )]
    async fn list_locales(&self) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.engine.clone());
        handlers.list_locales().await
    }

    #[tool(
        name = "configure",
        description = "Merge options into the server's base configuration; later format_timestamp and create_element calls use them unless overridden. Returns the resulting configuration."
    )]
    async fn configure(&self, params: Parameters<Overrides>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.engine.clone());
        handlers.configure(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SmartdateMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "smartdate".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"smartdate renders Unix timestamps as short, locale-aware phrases.

## Modes
- **auto** (default): relative phrase, past or future depending on the timestamp
- **past** / **future**: relative phrase in one direction only
- **date**, **time**, **datetime**: absolute phrases

Relative phrases fall back to the absolute date once the timestamp is more than a calendar day away.

## Tools
- `format_timestamp`: phrase for one timestamp
- `create_element`: HTML element for one timestamp
- `list_locales`: available locales and modes
- `configure`: change the defaults for later calls"#.to_string()),
        }
    }
}

/// Serves `server` over stdin/stdout until the client disconnects or the
/// process receives SIGINT or SIGTERM.
pub async fn run_stdio_server(server: SmartdateMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    let tools = server.tool_router.list_all().len();
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| error!("Cannot start MCP service: {e:?}"))?;
    info!("MCP server ready on stdio with {tools} tools");

    tokio::select! {
        result = service.waiting() => match result {
            Ok(_) => debug!("MCP session ended"),
            Err(e) => error!("MCP session failed: {e:?}"),
        },
        received = shutdown_signal() => info!("{}, shutting down", received?),
    }
    Ok(())
}

async fn shutdown_signal() -> Result<&'static str> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    Ok(tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    })
}
