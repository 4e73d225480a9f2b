//! CLI command implementations.

mod agent;
mod config;
mod doctor;
mod init;
mod lookup;
mod mcp;
mod playground;
mod seed;

pub use agent::run_agent;
pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use lookup::{run_history, run_latest, run_policy};
pub use mcp::run_mcp;
pub use playground::run_playground;
pub use seed::run_seed;
