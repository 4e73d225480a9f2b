//! Service data store abstraction for Svar.
//!
//! Provides a trait-based interface over the three service tables
//! (`customer`, `cust_service_data`, `policies`). The lookup surface is
//! read-only; the ingest surface exists only for seeding demo data.

mod demo;
mod sqlite;

pub use demo::{demo_customers, demo_interactions, demo_policies};
pub use sqlite::SqliteStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer key.
    pub customer_id: i64,
    /// Full customer name, matched case-insensitively by substring.
    pub name: String,
}

/// A single customer service interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInteraction {
    /// Customer this interaction belongs to.
    pub customer_id: i64,
    /// When the interaction happened.
    pub interaction_date: DateTime<Utc>,
    /// Issue category (e.g. "Billing", "Shipping").
    pub issue_category: String,
    /// Free-text description of the issue.
    pub issue_description: String,
}

/// A company policy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy name.
    pub policy: String,
    /// Full policy text.
    pub policy_details: String,
    /// When the policy was last revised.
    pub last_updated: NaiveDate,
}

/// The most recent interaction for customers matching a name fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInteraction {
    /// Interaction timestamp, cast to a date.
    pub interaction_date: NaiveDate,
    pub issue_category: String,
    pub issue_description: String,
    /// Resolved customer name (useful when the fragment was ambiguous).
    pub customer_name: String,
}

/// Per-category interaction count for customers matching a name fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub issue_count: i64,
    pub issue_category: String,
}

/// Row counts per table, for diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableCounts {
    pub customers: usize,
    pub interactions: usize,
    pub policies: usize,
}

/// Trait for service data store implementations.
#[async_trait]
pub trait ServiceDataStore: Send + Sync {
    /// Most recent interaction across all customers whose name contains
    /// the fragment (case-insensitive). None if nothing matches.
    async fn latest_interaction(&self, name_fragment: &str) -> Result<Option<LatestInteraction>>;

    /// All policy rows, verbatim.
    async fn policies(&self) -> Result<Vec<Policy>>;

    /// Interaction counts grouped by issue category, across all customers
    /// whose name contains the fragment. Empty if nothing matches.
    async fn issue_counts(&self, name_fragment: &str) -> Result<Vec<CategoryCount>>;

    /// Bulk insert customers (seeding only).
    async fn insert_customers(&self, customers: &[Customer]) -> Result<usize>;

    /// Bulk insert interactions (seeding only).
    async fn insert_interactions(&self, interactions: &[ServiceInteraction]) -> Result<usize>;

    /// Bulk insert policies (seeding only).
    async fn insert_policies(&self, policies: &[Policy]) -> Result<usize>;

    /// Row counts for all three tables.
    async fn counts(&self) -> Result<TableCounts>;

    /// Delete all rows from all three tables.
    async fn clear(&self) -> Result<()>;
}
