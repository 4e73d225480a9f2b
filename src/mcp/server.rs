//! MCP server implementation.

use super::protocol::*;
use crate::agent::{parse_tool_call, ToolContext};
use crate::catalog;
use crate::config::Settings;
use crate::lookup::LookupService;
use crate::store::SqliteStore;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "svar";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Svar.
pub struct McpServer {
    settings: Settings,
    tools: Option<ToolContext>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tools: None,
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // Log to stderr so it doesn't interfere with JSON-RPC
        eprintln!("Svar MCP server starting...");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    eprintln!("Failed to parse request: {}", e);
                    let response = JsonRpcResponse::error(None, -32700, "Parse error");
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                    stdout.flush()?;
                    continue;
                }
            };

            let response = self.handle_request(request).await;
            writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            stdout.flush()?;
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" => {
                // Notification, no response needed but we'll send empty success
                JsonRpcResponse::success(request.id, json!({}))
            }
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, id: Option<Value>) -> JsonRpcResponse {
        // Open the service data store lazily
        match SqliteStore::new(&self.settings.sqlite_path()) {
            Ok(store) => {
                let lookup = LookupService::new(Arc::new(store));
                self.tools = Some(ToolContext::new(lookup));
                eprintln!("Service data store opened");
            }
            Err(e) => {
                eprintln!("Failed to open service data store: {}", e);
                return JsonRpcResponse::error(id, -32000, &format!("Init failed: {}", e));
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or_default())
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: catalog::functions().into_iter().map(Tool::from).collect(),
        };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or_default())
    }

    /// Handle tools/call request.
    async fn handle_tools_call(
        &self,
        id: Option<Value>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, &format!("Invalid params: {}", e))
                }
            },
            None => return JsonRpcResponse::error(id, -32602, "Missing params"),
        };

        let tools = match &self.tools {
            Some(t) => t,
            None => {
                let result = ToolCallResult::error("Server not initialized".to_string());
                return JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or_default());
            }
        };

        // The same parse/dispatch path the agent loop uses
        let arguments = params.arguments.unwrap_or_else(|| json!({})).to_string();
        let result = match parse_tool_call(&params.name, &arguments) {
            Ok(tool) => match tools.execute(&tool).await {
                Ok(text) => ToolCallResult::text(text),
                Err(e) => ToolCallResult::error(format!("Tool failed: {}", e)),
            },
            Err(e) => ToolCallResult::error(format!("{}", e)),
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or_default())
    }
}
