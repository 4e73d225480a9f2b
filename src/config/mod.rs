//! Configuration management for Svar.

mod settings;

pub use settings::{AgentSettings, DatabaseSettings, GeneralSettings, Settings};
