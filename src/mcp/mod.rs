//! MCP (Model Context Protocol) server for Svar.
//!
//! Exposes the registered catalog functions to external assistant hosts
//! over stdio JSON-RPC.

mod protocol;
mod server;

pub use server::McpServer;
