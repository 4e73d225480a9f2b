//! Doctor command - verify configuration and data store health.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{ServiceDataStore, SqliteStore};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Svar Doctor");
    println!();
    println!("Checking configuration and data store...\n");

    let mut checks = Vec::new();

    // API key
    println!("{}", style("API Configuration").bold());
    let api_check = check_openai_api_key();
    api_check.print();
    checks.push(api_check);

    println!();

    // Configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Data store
    println!("{}", style("Service Data").bold());
    let store_checks = check_store(settings).await;
    for check in &store_checks {
        check.print();
    }
    checks.extend(store_checks);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Svar.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Svar is ready to use.");
    }

    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_openai_api_key() -> CheckResult {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if key.starts_with("sk-") && key.len() > 20 => {
            let masked = format!("{}...{}", &key[..7], &key[key.len() - 4..]);
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", masked))
        }
        Ok(key) if key.is_empty() => CheckResult::warning(
            "OPENAI_API_KEY",
            "empty (lookups work, agent won't)",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Ok(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        Err(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "not set (lookups work, agent won't)",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: svar init",
        )
    }
}

/// Check the database and its row counts.
async fn check_store(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let db_path = settings.sqlite_path();
    if !db_path.exists() {
        results.push(CheckResult::warning(
            "Database",
            &format!("{} (not created yet)", db_path.display()),
            "Create and seed with: svar init",
        ));
        return results;
    }

    results.push(CheckResult::ok(
        "Database",
        &format!("{}", db_path.display()),
    ));

    match SqliteStore::new(&db_path) {
        Ok(store) => match store.counts().await {
            Ok(counts) => {
                let message = format!(
                    "{} customers, {} interactions, {} policies",
                    counts.customers, counts.interactions, counts.policies
                );
                if counts.customers == 0 && counts.policies == 0 {
                    results.push(CheckResult::warning(
                        "Service tables",
                        &message,
                        "Load demo data with: svar seed",
                    ));
                } else {
                    results.push(CheckResult::ok("Service tables", &message));
                }
            }
            Err(e) => results.push(CheckResult::error(
                "Service tables",
                &format!("query failed: {}", e),
                "The database file may be corrupt",
            )),
        },
        Err(e) => results.push(CheckResult::error(
            "Database",
            &format!("open failed: {}", e),
            "Check file permissions on the data directory",
        )),
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }
}
