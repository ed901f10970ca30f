use lzguard_core::diff::{compute_diff, DiffEntry};
use lzguard_core::guard::{evaluate, Violation, CATALOG};
use lzguard_core::value::ConfigValue;
use serde_json::{json, Value};

/// Untyped tree for a JSON literal
#[allow(dead_code)]
pub fn tree(value: Value) -> ConfigValue {
    ConfigValue::from_json(&value)
}

/// Diff of two JSON literals
#[allow(dead_code)]
pub fn diff(previous: Value, current: Value) -> Vec<DiffEntry> {
    compute_diff(&tree(previous), &tree(current))
}

/// Full catalog evaluation without account-deletion names
#[allow(dead_code)]
pub fn catalog_violations(previous: Value, current: Value) -> Vec<Violation> {
    evaluate(CATALOG, &diff(previous, current), &[])
}

/// Rule ids of `violations`, in order
#[allow(dead_code)]
pub fn rule_ids(violations: &[Violation]) -> Vec<&'static str> {
    violations.iter().map(|v| v.rule_id).collect()
}

/// A mandatory account holding one VPC, shaped like the shared-network account
#[allow(dead_code)]
pub fn network_account(vpc: Value) -> Value {
    json!({
        "mandatory-account-configs": {
            "shared-network": {
                "account-name": "shared-network",
                "email": "shared-network@example.com",
                "ou": "core",
                "src-filename": "config.json",
                "vpc": [vpc]
            }
        }
    })
}

/// An OU holding one VPC
#[allow(dead_code)]
pub fn ou_with_vpc(vpc: Value) -> Value {
    json!({
        "organizational-units": {
            "dev": {"type": "workload", "scps": ["Guardrails-Part-0"], "vpc": [vpc]}
        }
    })
}

/// Minimal VPC with two subnets
#[allow(dead_code)]
pub fn endpoint_vpc() -> Value {
    json!({
        "deploy": "local",
        "name": "Endpoint",
        "region": "ca-central-1",
        "cidr": [{"value": "10.2.0.0/16"}],
        "subnets": [
            {
                "name": "TGW",
                "definitions": [{"az": "a", "route-table": "Common", "cidr": {"value": "10.2.88.0/27"}}]
            },
            {
                "name": "Web",
                "definitions": [{"az": "a", "route-table": "Common", "cidr": {"value": "10.2.32.0/24"}}]
            }
        ]
    })
}
