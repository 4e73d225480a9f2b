//! SQLite-based service data store implementation.
//!
//! Mirrors the catalog SQL the lookups were originally written in:
//! case-insensitive substring match on customer name, descending order by
//! interaction date, and a GROUP BY over issue categories.

use super::{
    CategoryCount, Customer, LatestInteraction, Policy, ServiceDataStore, ServiceInteraction,
    TableCounts,
};
use crate::error::{Result, SvarError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS customer (
        customer_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS cust_service_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL REFERENCES customer(customer_id),
        interaction_date TEXT NOT NULL,
        issue_category TEXT NOT NULL,
        issue_description TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_csd_customer_id ON cust_service_data(customer_id);
    CREATE INDEX IF NOT EXISTS idx_csd_interaction_date ON cust_service_data(interaction_date);

    CREATE TABLE IF NOT EXISTS policies (
        policy TEXT PRIMARY KEY,
        policy_details TEXT NOT NULL,
        last_updated TEXT NOT NULL
    );
"#;

/// SQLite-backed service data store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized service data store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SvarError::Store(format!("Failed to acquire lock: {}", e)))
    }
}

/// Interaction timestamps are stored as RFC 3339 text in UTC, so string
/// ordering matches chronological ordering.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

#[async_trait]
impl ServiceDataStore for SqliteStore {
    #[instrument(skip(self))]
    async fn latest_interaction(&self, name_fragment: &str) -> Result<Option<LatestInteraction>> {
        let conn = self.lock()?;

        let row = conn.query_row(
            r#"
            SELECT s.interaction_date, s.issue_category, s.issue_description, c.name
            FROM cust_service_data s
            JOIN customer c ON s.customer_id = c.customer_id
            WHERE lower(c.name) LIKE '%' || lower(?1) || '%'
            ORDER BY s.interaction_date DESC
            LIMIT 1
            "#,
            params![name_fragment],
            |row| {
                let date_str: String = row.get(0)?;
                Ok(LatestInteraction {
                    interaction_date: parse_timestamp(&date_str).date_naive(),
                    issue_category: row.get(1)?,
                    issue_description: row.get(2)?,
                    customer_name: row.get(3)?,
                })
            },
        );

        match row {
            Ok(latest) => Ok(Some(latest)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn policies(&self) -> Result<Vec<Policy>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT policy, policy_details, last_updated FROM policies ORDER BY policy",
        )?;

        let rows = stmt.query_map([], |row| {
            let updated_str: String = row.get(2)?;
            Ok(Policy {
                policy: row.get(0)?,
                policy_details: row.get(1)?,
                last_updated: parse_date(&updated_str),
            })
        })?;

        let result: Vec<Policy> = rows.filter_map(|r| r.ok()).collect();
        debug!("Fetched {} policy rows", result.len());
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn issue_counts(&self, name_fragment: &str) -> Result<Vec<CategoryCount>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT COUNT(*) AS issue_count, s.issue_category
            FROM cust_service_data s
            JOIN customer c ON s.customer_id = c.customer_id
            WHERE lower(c.name) LIKE '%' || lower(?1) || '%'
            GROUP BY s.issue_category
            ORDER BY issue_count DESC, s.issue_category
            "#,
        )?;

        let rows = stmt.query_map(params![name_fragment], |row| {
            Ok(CategoryCount {
                issue_count: row.get(0)?,
                issue_category: row.get(1)?,
            })
        })?;

        let result: Vec<CategoryCount> = rows.filter_map(|r| r.ok()).collect();
        debug!(
            "Found {} categories for fragment {:?}",
            result.len(),
            name_fragment
        );
        Ok(result)
    }

    #[instrument(skip(self, customers))]
    async fn insert_customers(&self, customers: &[Customer]) -> Result<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        for customer in customers {
            tx.execute(
                "INSERT OR REPLACE INTO customer (customer_id, name) VALUES (?1, ?2)",
                params![customer.customer_id, customer.name],
            )?;
        }

        tx.commit()?;
        info!("Inserted {} customers", customers.len());
        Ok(customers.len())
    }

    #[instrument(skip(self, interactions))]
    async fn insert_interactions(&self, interactions: &[ServiceInteraction]) -> Result<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        for interaction in interactions {
            tx.execute(
                r#"
                INSERT INTO cust_service_data
                (customer_id, interaction_date, issue_category, issue_description)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    interaction.customer_id,
                    interaction.interaction_date.to_rfc3339(),
                    interaction.issue_category,
                    interaction.issue_description,
                ],
            )?;
        }

        tx.commit()?;
        info!("Inserted {} interactions", interactions.len());
        Ok(interactions.len())
    }

    #[instrument(skip(self, policies))]
    async fn insert_policies(&self, policies: &[Policy]) -> Result<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        for policy in policies {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO policies (policy, policy_details, last_updated)
                VALUES (?1, ?2, ?3)
                "#,
                params![
                    policy.policy,
                    policy.policy_details,
                    policy.last_updated.format("%Y-%m-%d").to_string(),
                ],
            )?;
        }

        tx.commit()?;
        info!("Inserted {} policies", policies.len());
        Ok(policies.len())
    }

    async fn counts(&self) -> Result<TableCounts> {
        let conn = self.lock()?;

        let customers: i64 = conn.query_row("SELECT COUNT(*) FROM customer", [], |r| r.get(0))?;
        let interactions: i64 =
            conn.query_row("SELECT COUNT(*) FROM cust_service_data", [], |r| r.get(0))?;
        let policies: i64 = conn.query_row("SELECT COUNT(*) FROM policies", [], |r| r.get(0))?;

        Ok(TableCounts {
            customers: customers as usize,
            interactions: interactions as usize,
            policies: policies as usize,
        })
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "DELETE FROM cust_service_data; DELETE FROM customer; DELETE FROM policies;",
        )?;
        info!("Cleared all service tables");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn seeded_store() -> SqliteStore {
        let store = SqliteStore::in_memory().unwrap();
        store
            .insert_customers(&super::super::demo_customers())
            .await
            .unwrap();
        store
            .insert_interactions(&super::super::demo_interactions())
            .await
            .unwrap();
        store
            .insert_policies(&super::super::demo_policies())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_latest_interaction_single_customer() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .insert_customers(&[Customer {
                customer_id: 1,
                name: "Nicolas Pelaez".to_string(),
            }])
            .await
            .unwrap();
        store
            .insert_interactions(&[
                ServiceInteraction {
                    customer_id: 1,
                    interaction_date: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
                    issue_category: "Billing".to_string(),
                    issue_description: "Charged twice".to_string(),
                },
                ServiceInteraction {
                    customer_id: 1,
                    interaction_date: Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap(),
                    issue_category: "Shipping".to_string(),
                    issue_description: "Damaged package".to_string(),
                },
            ])
            .await
            .unwrap();

        let latest = store.latest_interaction("Pelaez").await.unwrap().unwrap();
        assert_eq!(
            latest.interaction_date,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(latest.issue_category, "Shipping");
        assert_eq!(latest.customer_name, "Nicolas Pelaez");
    }

    #[tokio::test]
    async fn test_latest_interaction_no_match() {
        let store = SqliteStore::in_memory().unwrap();
        let latest = store.latest_interaction("nobody").await.unwrap();
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive() {
        let store = seeded_store().await;
        let lower = store.latest_interaction("pelaez").await.unwrap();
        let upper = store.latest_interaction("PELAEZ").await.unwrap();
        assert!(lower.is_some());
        assert_eq!(
            lower.unwrap().customer_name,
            upper.unwrap().customer_name
        );
    }

    #[tokio::test]
    async fn test_ambiguous_fragment_returns_global_latest() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .insert_customers(&[
                Customer {
                    customer_id: 1,
                    name: "Nicolas Pelaez".to_string(),
                },
                Customer {
                    customer_id: 2,
                    name: "Nicolas Martin".to_string(),
                },
            ])
            .await
            .unwrap();
        store
            .insert_interactions(&[
                ServiceInteraction {
                    customer_id: 1,
                    interaction_date: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
                    issue_category: "Shipping".to_string(),
                    issue_description: "Older".to_string(),
                },
                ServiceInteraction {
                    customer_id: 2,
                    interaction_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
                    issue_category: "Billing".to_string(),
                    issue_description: "Newer".to_string(),
                },
            ])
            .await
            .unwrap();

        // "Nicolas" matches both customers; the globally newest row wins.
        let latest = store.latest_interaction("Nicolas").await.unwrap().unwrap();
        assert_eq!(latest.customer_name, "Nicolas Martin");
        assert_eq!(latest.issue_category, "Billing");
    }

    #[tokio::test]
    async fn test_policies_idempotent() {
        let store = seeded_store().await;
        let first = store.policies().await.unwrap();
        let second = store.policies().await.unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_issue_counts_groups_by_category() {
        let store = seeded_store().await;
        let counts = store.issue_counts("Pelaez").await.unwrap();

        // Demo data: one Billing and one Shipping interaction for Pelaez.
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|c| c.issue_count == 1));
        let categories: Vec<&str> = counts.iter().map(|c| c.issue_category.as_str()).collect();
        assert!(categories.contains(&"Billing"));
        assert!(categories.contains(&"Shipping"));
    }

    #[tokio::test]
    async fn test_issue_counts_no_match_is_empty() {
        let store = seeded_store().await;
        let counts = store.issue_counts("nonexistent customer").await.unwrap();
        assert!(counts.is_empty());
    }

    #[tokio::test]
    async fn test_clear_and_counts() {
        let store = seeded_store().await;
        let counts = store.counts().await.unwrap();
        assert!(counts.customers > 0);
        assert!(counts.interactions > 0);
        assert!(counts.policies > 0);

        store.clear().await.unwrap();
        let counts = store.counts().await.unwrap();
        assert_eq!(counts.customers, 0);
        assert_eq!(counts.interactions, 0);
        assert_eq!(counts.policies, 0);
    }

    #[tokio::test]
    async fn test_on_disk_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.db");

        let store = SqliteStore::new(&path).unwrap();
        store
            .insert_policies(&[Policy {
                policy: "Return Policy".to_string(),
                policy_details: "30 days".to_string(),
                last_updated: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            }])
            .await
            .unwrap();
        drop(store);

        let reopened = SqliteStore::new(&path).unwrap();
        let policies = reopened.policies().await.unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(
            policies[0].last_updated,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }
}
