//! Tool definitions and implementations for the agent system.

use crate::catalog;
use crate::error::{Result, SvarError};
use crate::lookup::LookupService;
use serde::{Deserialize, Serialize};

/// Available tools for the agent, one per registered catalog function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Most recent service interaction for a customer.
    GetLatestInteraction { cust_name: String },

    /// All company policies.
    GetPolicy,

    /// Issue counts per category for a customer.
    GetOrderHistory { cust_name: String },
}

/// Tool execution context with access to the lookup service.
pub struct ToolContext {
    lookup: LookupService,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::GetLatestInteraction { cust_name } => {
                self.execute_latest_interaction(cust_name).await
            }
            ToolCall::GetPolicy => self.execute_policy().await,
            ToolCall::GetOrderHistory { cust_name } => {
                self.execute_order_history(cust_name).await
            }
        }
    }

    async fn execute_latest_interaction(&self, cust_name: &str) -> Result<String> {
        match self.lookup.latest_interaction(cust_name).await? {
            Some(latest) => Ok(format!(
                "Latest interaction for {}:\nDate: {}\nCategory: {}\nIssue: {}",
                latest.customer_name,
                latest.interaction_date,
                latest.issue_category,
                latest.issue_description
            )),
            None => Ok(format!(
                "No customer matching '{}' has any recorded interactions.",
                cust_name
            )),
        }
    }

    async fn execute_policy(&self) -> Result<String> {
        let policies = self.lookup.policy().await?;

        if policies.is_empty() {
            return Ok("No policies are on file.".to_string());
        }

        let formatted = policies
            .iter()
            .map(|p| {
                format!(
                    "{} (last updated {})\n{}",
                    p.policy, p.last_updated, p.policy_details
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!("Company policies ({}):\n\n{}", policies.len(), formatted))
    }

    async fn execute_order_history(&self, cust_name: &str) -> Result<String> {
        let history = self.lookup.order_history(cust_name).await?;

        if history.is_empty() {
            return Ok(format!(
                "No issue history found for customers matching '{}'.",
                cust_name
            ));
        }

        let today = history[0].todays_date;
        let lines = history
            .iter()
            .map(|entry| {
                format!(
                    "- {}: {} issue(s)",
                    entry.issue_category, entry.issues_last_12_months
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            "Issue history for customers matching '{}' (today's date: {}):\n{}",
            cust_name, today, lines
        ))
    }
}

/// Get OpenAI function/tool definitions for the agent.
///
/// Derived from the catalog registry, so the agent sees exactly the
/// registered names and schemas.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    catalog::functions()
        .into_iter()
        .map(|function| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: function.name.to_string(),
                description: Some(function.description.to_string()),
                parameters: Some(function.parameters),
                strict: None,
            },
        })
        .collect()
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| SvarError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        catalog::GET_LATEST_INTERACTION => {
            let cust_name = require_cust_name(&args)?;
            Ok(ToolCall::GetLatestInteraction { cust_name })
        }
        catalog::GET_POLICY => Ok(ToolCall::GetPolicy),
        catalog::GET_ORDER_HISTORY => {
            let cust_name = require_cust_name(&args)?;
            Ok(ToolCall::GetOrderHistory { cust_name })
        }
        _ => Err(SvarError::Agent(format!("Unknown tool: {}", name))),
    }
}

fn require_cust_name(args: &serde_json::Value) -> Result<String> {
    args["cust_name"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| SvarError::Agent("Missing 'cust_name' argument".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        demo_customers, demo_interactions, demo_policies, ServiceDataStore, SqliteStore,
    };
    use std::sync::Arc;

    async fn seeded_context() -> ToolContext {
        let store = SqliteStore::in_memory().unwrap();
        store.insert_customers(&demo_customers()).await.unwrap();
        store
            .insert_interactions(&demo_interactions())
            .await
            .unwrap();
        store.insert_policies(&demo_policies()).await.unwrap();
        ToolContext::new(LookupService::new(Arc::new(store)))
    }

    #[test]
    fn test_parse_latest_interaction_tool() {
        let tool =
            parse_tool_call("get_latest_interaction", r#"{"cust_name": "Pelaez"}"#).unwrap();
        match tool {
            ToolCall::GetLatestInteraction { cust_name } => {
                assert_eq!(cust_name, "Pelaez");
            }
            _ => panic!("Expected GetLatestInteraction tool"),
        }
    }

    #[test]
    fn test_parse_get_policy_ignores_arguments() {
        let tool = parse_tool_call("get_policy", "{}").unwrap();
        assert!(matches!(tool, ToolCall::GetPolicy));
    }

    #[test]
    fn test_parse_missing_cust_name() {
        let result = parse_tool_call("get_order_history", "{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_tool() {
        let result = parse_tool_call("get_weather", "{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_definitions_match_catalog() {
        let definitions = tool_definitions();
        assert_eq!(definitions.len(), catalog::functions().len());
        assert_eq!(definitions[0].function.name, "get_latest_interaction");
    }

    #[tokio::test]
    async fn test_execute_latest_interaction() {
        let context = seeded_context().await;
        let result = context
            .execute(&ToolCall::GetLatestInteraction {
                cust_name: "Pelaez".to_string(),
            })
            .await
            .unwrap();

        assert!(result.contains("Nicolas Pelaez"));
        assert!(result.contains("Shipping"));
        assert!(result.contains("2024-03-10"));
    }

    #[tokio::test]
    async fn test_execute_no_match_is_text_not_error() {
        let context = seeded_context().await;
        let result = context
            .execute(&ToolCall::GetLatestInteraction {
                cust_name: "zzz-nobody".to_string(),
            })
            .await
            .unwrap();

        assert!(result.contains("No customer matching"));
    }

    #[tokio::test]
    async fn test_execute_policy() {
        let context = seeded_context().await;
        let result = context.execute(&ToolCall::GetPolicy).await.unwrap();
        assert!(result.contains("Return Policy"));
        assert!(result.contains("Refund Policy"));
    }

    #[tokio::test]
    async fn test_execute_order_history() {
        let context = seeded_context().await;
        let result = context
            .execute(&ToolCall::GetOrderHistory {
                cust_name: "Pelaez".to_string(),
            })
            .await
            .unwrap();

        assert!(result.contains("Billing: 1 issue(s)"));
        assert!(result.contains("Shipping: 1 issue(s)"));
        assert!(result.contains("today's date"));
    }
}
