//! Svar - Customer Service Lookups with LLM Tool Calling
//!
//! A local-first CLI tool that packages customer service lookup functions
//! as catalog functions callable by an LLM agent.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Query the latest service interaction for a customer by name fragment
//! - Retrieve company return/refund policies
//! - Aggregate a customer's issue history per category
//! - Expose all three lookups to an LLM via OpenAI tool calling or MCP
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `store` - SQLite-backed service data store
//! - `lookup` - The three read-only lookup operations
//! - `catalog` - Catalog function registry (names, schemas, descriptions)
//! - `agent` - Tool-calling agent loop
//! - `mcp` - MCP server for external assistant hosts
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use svar::lookup::LookupService;
//! use svar::store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(SqliteStore::in_memory()?);
//!     let lookup = LookupService::new(store);
//!
//!     if let Some(latest) = lookup.latest_interaction("Pelaez").await? {
//!         println!("{}: {}", latest.customer_name, latest.issue_category);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod mcp;
pub mod openai;
pub mod store;

pub use error::{Result, SvarError};
