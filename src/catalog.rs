//! Catalog function registry.
//!
//! Each lookup operation is registered under a stable name with a
//! description, a JSON-schema parameter object, and a declared tabular
//! return shape. Both tool-calling surfaces (the OpenAI agent loop and the
//! MCP server) derive their tool definitions from this registry so names and
//! schemas cannot drift apart.

use serde_json::{json, Value};

/// Stable name of the latest-interaction lookup.
pub const GET_LATEST_INTERACTION: &str = "get_latest_interaction";
/// Stable name of the policy lookup.
pub const GET_POLICY: &str = "get_policy";
/// Stable name of the order-history lookup.
pub const GET_ORDER_HISTORY: &str = "get_order_history";

/// One column of a function's tabular return shape.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub data_type: &'static str,
}

/// A registered catalog function: stable name, typed parameter list, and
/// typed tabular return shape.
#[derive(Debug, Clone)]
pub struct CatalogFunction {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON-schema object describing the input parameters.
    pub parameters: Value,
    pub returns: &'static [ColumnSpec],
}

/// Schema for the single `cust_name` string parameter shared by the two
/// name-matching lookups.
fn cust_name_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "cust_name": {
                "type": "string",
                "description": "Full or partial customer name, matched case-insensitively"
            }
        },
        "required": ["cust_name"]
    })
}

/// All registered catalog functions.
pub fn functions() -> Vec<CatalogFunction> {
    vec![
        CatalogFunction {
            name: GET_LATEST_INTERACTION,
            description: "Returns the most recent customer service interaction for \
                customers matching the given name. Use this to find the return or \
                issue currently being processed for a customer.",
            parameters: cust_name_parameters(),
            returns: &[
                ColumnSpec { name: "interaction_date", data_type: "DATE" },
                ColumnSpec { name: "issue_category", data_type: "STRING" },
                ColumnSpec { name: "issue_description", data_type: "STRING" },
                ColumnSpec { name: "customer_name", data_type: "STRING" },
            ],
        },
        CatalogFunction {
            name: GET_POLICY,
            description: "Returns the company return, refund, exchange, and shipping \
                policies. Use this to verify compliance before deciding on a return.",
            parameters: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
            returns: &[
                ColumnSpec { name: "policy", data_type: "STRING" },
                ColumnSpec { name: "policy_details", data_type: "STRING" },
                ColumnSpec { name: "last_updated", data_type: "DATE" },
            ],
        },
        CatalogFunction {
            name: GET_ORDER_HISTORY,
            description: "Takes a customer name and returns the number of issues per \
                issue category for matching customers, plus today's date for \
                relative-date reasoning.",
            parameters: cust_name_parameters(),
            returns: &[
                ColumnSpec { name: "issues_last_12_months", data_type: "INT" },
                ColumnSpec { name: "issue_category", data_type: "STRING" },
                ColumnSpec { name: "todays_date", data_type: "DATE" },
            ],
        },
    ]
}

/// Look up a registered function by name.
pub fn find(name: &str) -> Option<CatalogFunction> {
    functions().into_iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_stable() {
        let names: Vec<&str> = functions().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["get_latest_interaction", "get_policy", "get_order_history"]
        );
    }

    #[test]
    fn test_parameter_schemas_are_objects() {
        for function in functions() {
            assert_eq!(function.parameters["type"], "object");
            assert!(function.parameters["properties"].is_object());
        }
    }

    #[test]
    fn test_name_lookups_require_cust_name() {
        for name in [GET_LATEST_INTERACTION, GET_ORDER_HISTORY] {
            let function = find(name).unwrap();
            let required = function.parameters["required"].as_array().unwrap();
            assert_eq!(required, &[Value::from("cust_name")]);
        }
    }

    #[test]
    fn test_get_policy_has_no_parameters() {
        let function = find(GET_POLICY).unwrap();
        assert!(function.parameters["properties"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_find_unknown_is_none() {
        assert!(find("get_weather").is_none());
    }
}
