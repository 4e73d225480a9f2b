//! Agent command implementation.

use crate::agent::{Agent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::lookup::LookupService;
use crate::store::SqliteStore;
use anyhow::Result;
use std::sync::Arc;

/// Run the agent command.
pub async fn run_agent(task: &str, model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Agent) {
        Output::error(&format!("{}", e));
        Output::info("Run 'svar doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let store = SqliteStore::new(&settings.sqlite_path())?;
    let lookup = LookupService::new(Arc::new(store));
    let model = model.unwrap_or_else(|| settings.agent.model.clone());

    let tool_context = ToolContext::new(lookup);
    let agent = Agent::new(tool_context, &model)
        .with_max_iterations(settings.agent.max_iterations);

    let spinner = Output::spinner("Agent working...");

    match agent.run(task).await {
        Ok(response) => {
            spinner.finish_and_clear();

            // Show the agent's response
            println!("\n{}\n", response.content);

            // Show tool calls summary
            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {} {}", call.name, truncate(&call.arguments, 60)));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
