//! Built-in demo dataset for seeding a fresh store.
//!
//! Small enough to read at a glance, rich enough to exercise every lookup:
//! an ambiguous "Nicolas" fragment, a customer with several categories, and
//! the full set of return-processing policies.

use super::{Customer, Policy, ServiceInteraction};
use chrono::{NaiveDate, TimeZone, Utc};

fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid demo timestamp")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid demo date")
}

/// Demo customers.
pub fn demo_customers() -> Vec<Customer> {
    let names = [
        (1001, "Nicolas Pelaez"),
        (1002, "Maria Chen"),
        (1003, "Priya Patel"),
        (1004, "Nicolas Martin"),
        (1005, "John Akufo"),
    ];

    names
        .iter()
        .map(|(customer_id, name)| Customer {
            customer_id: *customer_id,
            name: (*name).to_string(),
        })
        .collect()
}

/// Demo service interactions.
pub fn demo_interactions() -> Vec<ServiceInteraction> {
    let rows = [
        (
            1001,
            ts(2024, 1, 5, 10, 15),
            "Billing",
            "Charged twice for order #8421, requesting refund of duplicate charge",
        ),
        (
            1001,
            ts(2024, 3, 10, 14, 30),
            "Shipping",
            "Package arrived damaged, requesting return and replacement",
        ),
        (
            1002,
            ts(2023, 11, 20, 9, 5),
            "Returns",
            "Wants to return headphones bought during sale, unopened",
        ),
        (
            1002,
            ts(2024, 2, 14, 16, 45),
            "Returns",
            "Second return request this quarter, jacket wrong size",
        ),
        (
            1002,
            ts(2024, 4, 2, 11, 0),
            "Billing",
            "Gift card balance not applied at checkout",
        ),
        (
            1003,
            ts(2024, 5, 18, 13, 20),
            "Shipping",
            "Order stuck in transit for two weeks, asking for status",
        ),
        (
            1004,
            ts(2024, 6, 1, 8, 40),
            "Account",
            "Cannot reset password, locked out after address change",
        ),
    ];

    rows.iter()
        .map(
            |(customer_id, interaction_date, issue_category, issue_description)| {
                ServiceInteraction {
                    customer_id: *customer_id,
                    interaction_date: *interaction_date,
                    issue_category: (*issue_category).to_string(),
                    issue_description: (*issue_description).to_string(),
                }
            },
        )
        .collect()
}

/// Demo policies.
pub fn demo_policies() -> Vec<Policy> {
    let rows = [
        (
            "Return Policy",
            "Items may be returned within 30 days of delivery in original condition. \
             Opened electronics carry a 15% restocking fee.",
            date(2024, 6, 1),
        ),
        (
            "Refund Policy",
            "Refunds are issued to the original payment method within 5-7 business days \
             of the return being received and inspected.",
            date(2024, 4, 15),
        ),
        (
            "Exchange Policy",
            "Exchanges for size or color are free within 45 days. The replacement ships \
             once the original item is scanned by the carrier.",
            date(2023, 12, 1),
        ),
        (
            "Shipping Policy",
            "Standard shipping is 3-5 business days. Lost or damaged shipments are \
             replaced at no cost after a carrier claim is filed.",
            date(2024, 2, 20),
        ),
    ];

    rows.iter()
        .map(|(policy, policy_details, last_updated)| Policy {
            policy: (*policy).to_string(),
            policy_details: (*policy_details).to_string(),
            last_updated: *last_updated,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_interactions_reference_known_customers() {
        let ids: Vec<i64> = demo_customers().iter().map(|c| c.customer_id).collect();
        for interaction in demo_interactions() {
            assert!(ids.contains(&interaction.customer_id));
        }
    }

    #[test]
    fn test_demo_data_covers_pelaez_scenario() {
        let interactions = demo_interactions();
        let pelaez: Vec<_> = interactions
            .iter()
            .filter(|i| i.customer_id == 1001)
            .collect();

        assert_eq!(pelaez.len(), 2);
        assert!(pelaez.iter().any(|i| i.issue_category == "Billing"));
        assert!(pelaez.iter().any(|i| i.issue_category == "Shipping"));
    }

    #[test]
    fn test_demo_policies_nonempty() {
        assert!(!demo_policies().is_empty());
    }
}
