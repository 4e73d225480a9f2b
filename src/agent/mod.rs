//! Agent system for customer service tasks with tool calling.
//!
//! Provides an LLM agent that can call the registered catalog functions
//! (latest interaction, policies, order history) to work a return-processing
//! request end to end.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
