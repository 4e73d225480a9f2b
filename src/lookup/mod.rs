//! The Lookup Service: three read-only operations over the service tables.
//!
//! Each operation is a pure function of the stored data. A name fragment
//! matching zero customers yields an empty result, never an error; a fragment
//! matching several customers is resolved by ordering (latest interaction) or
//! aggregation (order history) rather than flagged.

use crate::error::Result;
use crate::store::{CategoryCount, LatestInteraction, Policy, ServiceDataStore};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// One row of the order history result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    /// Interaction count for this category. Despite the name, no 12-month
    /// filter is applied; the count covers all recorded history.
    pub issues_last_12_months: i64,
    pub issue_category: String,
    /// Wall-clock date at query time, so a calling model has an unambiguous
    /// anchor for relative-date reasoning.
    pub todays_date: NaiveDate,
}

/// Read-only lookup operations over the service data store.
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn ServiceDataStore>,
}

impl LookupService {
    /// Create a lookup service over the given store.
    pub fn new(store: Arc<dyn ServiceDataStore>) -> Self {
        Self { store }
    }

    /// The single most recent interaction among customers whose name
    /// contains the fragment. None when nothing matches.
    pub async fn latest_interaction(
        &self,
        name_fragment: &str,
    ) -> Result<Option<LatestInteraction>> {
        let latest = self.store.latest_interaction(name_fragment).await?;
        debug!(
            fragment = name_fragment,
            matched = latest.is_some(),
            "latest_interaction"
        );
        Ok(latest)
    }

    /// All policy rows, verbatim.
    pub async fn policy(&self) -> Result<Vec<Policy>> {
        self.store.policies().await
    }

    /// Interaction counts per issue category for all matching customers,
    /// each row stamped with today's date.
    pub async fn order_history(&self, name_fragment: &str) -> Result<Vec<OrderHistoryEntry>> {
        let counts = self.store.issue_counts(name_fragment).await?;
        let today = Local::now().date_naive();

        Ok(counts
            .into_iter()
            .map(|CategoryCount { issue_count, issue_category }| OrderHistoryEntry {
                issues_last_12_months: issue_count,
                issue_category,
                todays_date: today,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        demo_customers, demo_interactions, demo_policies, ServiceDataStore, SqliteStore,
    };

    async fn seeded_service() -> LookupService {
        let store = SqliteStore::in_memory().unwrap();
        store.insert_customers(&demo_customers()).await.unwrap();
        store
            .insert_interactions(&demo_interactions())
            .await
            .unwrap();
        store.insert_policies(&demo_policies()).await.unwrap();
        LookupService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_latest_interaction_is_most_recent() {
        let service = seeded_service().await;
        let latest = service
            .latest_interaction("Pelaez")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(latest.issue_category, "Shipping");
        assert_eq!(
            latest.interaction_date,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let service = seeded_service().await;
        assert!(service
            .latest_interaction("zzz-nobody")
            .await
            .unwrap()
            .is_none());
        assert!(service.order_history("zzz-nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_history_stamps_today() {
        let service = seeded_service().await;
        let history = service.order_history("Pelaez").await.unwrap();

        assert_eq!(history.len(), 2);
        let today = Local::now().date_naive();
        for entry in &history {
            assert_eq!(entry.issues_last_12_months, 1);
            assert_eq!(entry.todays_date, today);
        }
    }

    #[tokio::test]
    async fn test_order_history_counts_all_history() {
        // Maria Chen has a 2023 interaction; it must be counted because the
        // lookup applies no time-window filter.
        let service = seeded_service().await;
        let history = service.order_history("Chen").await.unwrap();

        let returns = history
            .iter()
            .find(|e| e.issue_category == "Returns")
            .unwrap();
        assert_eq!(returns.issues_last_12_months, 2);
    }

    #[tokio::test]
    async fn test_policy_returns_all_rows() {
        let service = seeded_service().await;
        let policies = service.policy().await.unwrap();
        assert_eq!(policies.len(), demo_policies().len());
    }
}
