//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{demo_customers, demo_interactions, demo_policies, ServiceDataStore, SqliteStore};
use console::style;

/// Run the init command for first-time setup.
pub async fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Svar Setup");
    println!();
    println!("Welcome to Svar! Setting up configuration and demo data.\n");

    // Step 1: Check API key
    println!("{}", style("Step 1: API configuration").bold().cyan());
    println!();

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  Local lookups work without it, but 'svar agent' and 'svar playground'");
        println!("  need an OpenAI API key for tool selection.");
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 2: Create directories
    println!("{}", style("Step 2: Directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    println!();

    // Step 3: Config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    }

    println!();

    // Step 4: Database and demo data
    println!("{}", style("Step 4: Service data").bold().cyan());
    println!();

    let store = SqliteStore::new(&settings.sqlite_path())?;
    let counts = store.counts().await?;

    if counts.customers == 0 && counts.policies == 0 {
        store.insert_customers(&demo_customers()).await?;
        store.insert_interactions(&demo_interactions()).await?;
        store.insert_policies(&demo_policies()).await?;
        Output::success(&format!(
            "Seeded demo data into {}",
            settings.sqlite_path().display()
        ));
    } else {
        Output::info(&format!(
            "Database already has data ({} customers, {} interactions, {} policies)",
            counts.customers, counts.interactions, counts.policies
        ));
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("svar doctor").cyan());
    println!("  {} Look up a customer", style("svar latest \"Nicolas Pelaez\"").cyan());
    println!("  {} Let the agent work a return", style("svar agent \"<task>\"").cyan());
    println!();
    println!("For more help: {}", style("svar --help").cyan());

    Ok(())
}
