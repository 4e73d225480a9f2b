//! Seed command - load the demo dataset.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{demo_customers, demo_interactions, demo_policies, ServiceDataStore, SqliteStore};
use anyhow::Result;

/// Run the seed command.
pub async fn run_seed(force: bool, settings: Settings) -> Result<()> {
    let store = SqliteStore::new(&settings.sqlite_path())?;

    let counts = store.counts().await?;
    if counts.customers > 0 || counts.policies > 0 {
        if !force {
            Output::warning("Service tables already contain data.");
            Output::info("Use 'svar seed --force' to wipe and reseed.");
            return Ok(());
        }
        store.clear().await?;
        Output::info("Cleared existing rows.");
    }

    let customers = store.insert_customers(&demo_customers()).await?;
    let interactions = store.insert_interactions(&demo_interactions()).await?;
    let policies = store.insert_policies(&demo_policies()).await?;

    Output::success(&format!(
        "Seeded {} customers, {} interactions, {} policies.",
        customers, interactions, policies
    ));
    Output::info("Try: svar latest \"Nicolas Pelaez\"");

    Ok(())
}
