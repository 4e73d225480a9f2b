//! Lookup commands: latest, policy, history.

use crate::cli::Output;
use crate::config::Settings;
use crate::lookup::LookupService;
use crate::store::SqliteStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the lookup service over the configured store.
fn open_lookup(settings: &Settings) -> Result<LookupService> {
    let store = SqliteStore::new(&settings.sqlite_path())?;
    Ok(LookupService::new(Arc::new(store)))
}

/// Run the latest command.
pub async fn run_latest(name: &str, json: bool, settings: Settings) -> Result<()> {
    let lookup = open_lookup(&settings)?;

    match lookup.latest_interaction(name).await? {
        Some(latest) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&latest)?);
            } else {
                Output::header("Latest Interaction");
                Output::kv("Customer", &latest.customer_name);
                Output::kv("Date", &latest.interaction_date.to_string());
                Output::kv("Category", &latest.issue_category);
                Output::kv("Issue", &latest.issue_description);
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                Output::warning(&format!(
                    "No customer matching '{}' has any recorded interactions.",
                    name
                ));
                Output::info("Run 'svar seed' to load the demo dataset.");
            }
        }
    }

    Ok(())
}

/// Run the policy command.
pub async fn run_policy(json: bool, settings: Settings) -> Result<()> {
    let lookup = open_lookup(&settings)?;
    let policies = lookup.policy().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&policies)?);
        return Ok(());
    }

    if policies.is_empty() {
        Output::warning("No policies are on file.");
        Output::info("Run 'svar seed' to load the demo dataset.");
        return Ok(());
    }

    Output::header(&format!("Company Policies ({})", policies.len()));
    for policy in &policies {
        Output::policy(
            &policy.policy,
            &policy.last_updated.to_string(),
            &policy.policy_details,
        );
    }
    println!();

    Ok(())
}

/// Run the history command.
pub async fn run_history(name: &str, json: bool, settings: Settings) -> Result<()> {
    let lookup = open_lookup(&settings)?;
    let history = lookup.order_history(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        Output::warning(&format!(
            "No issue history found for customers matching '{}'.",
            name
        ));
        return Ok(());
    }

    Output::header(&format!("Issue History for '{}'", name));
    for entry in &history {
        Output::list_item(&format!(
            "{}: {} issue(s)",
            entry.issue_category, entry.issues_last_12_months
        ));
    }
    println!();
    Output::kv("Today's date", &history[0].todays_date.to_string());

    Ok(())
}
