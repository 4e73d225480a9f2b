//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::error::{Result, SvarError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// Default system prompt for the customer service agent.
const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a customer service representative processing product returns.

You have tools to look up customer interactions, company policies, and order history.
Follow the return-processing workflow:

1. Use 'get_latest_interaction' to retrieve the customer's most recent issue.
2. Use 'get_policy' to verify the relevant return, refund, exchange, or shipping policy.
3. Use 'get_order_history' to review the customer's issue history before deciding.

Notes:
- Customer names match case-insensitively on partial input; pass whatever name the user gave.
- 'get_order_history' includes todays_date so you can reason about relative dates like "last month".
- An empty result means no matching customer, not a system failure.

When you have gathered enough information, state your recommendation and the policy it rests on."#;

/// Agent that can call the registered lookup functions as tools.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given tool context and model.
    pub fn new(tools: ToolContext, model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            tools,
            max_iterations: 10,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent with a user task.
    pub async fn run(&self, task: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?
                .into(),
        ];

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(task)
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?
                .into(),
        );

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SvarError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            // Call LLM with tools
            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| SvarError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| SvarError::Agent("No response from model".to_string()))?;

            // Check if LLM wants to call tools
            if let Some(ref tool_calls) = choice.message.tool_calls {
                if tool_calls.is_empty() {
                    // No tool calls, treat as final response
                    return self.build_response(&choice.message.content, tool_calls_made, iterations);
                }

                // Add assistant message with tool calls to history
                let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(tool_calls.clone())
                    .build()
                    .map_err(|e| SvarError::Agent(e.to_string()))?;
                messages.push(assistant_msg.into());

                // Execute each tool call
                for tool_call in tool_calls {
                    let record = self.execute_tool_call(tool_call).await;

                    // Add tool result to messages
                    let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(&tool_call.id)
                        .content(record.result.clone())
                        .build()
                        .map_err(|e| SvarError::Agent(e.to_string()))?;
                    messages.push(tool_msg.into());

                    tool_calls_made.push(record);
                }
            } else {
                // No tool calls - LLM is done, return final response
                return self.build_response(&choice.message.content, tool_calls_made, iterations);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Tool failures are rendered as text for the model rather than aborting
    /// the loop; only the loop itself can fail the run.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }

    /// Build the final agent response.
    fn build_response(
        &self,
        content: &Option<String>,
        tool_calls: Vec<ToolCallRecord>,
        iterations: usize,
    ) -> Result<AgentResponse> {
        let content = content.clone().unwrap_or_default();

        Ok(AgentResponse {
            content,
            tool_calls,
            iterations,
        })
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "get_order_history".to_string(),
            arguments: r#"{"cust_name": "Pelaez"}"#.to_string(),
            result: "Issue history".to_string(),
        };
        assert_eq!(
            format!("{}", record),
            r#"get_order_history({"cust_name": "Pelaez"})"#
        );
    }
}
