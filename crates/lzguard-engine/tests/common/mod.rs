//! Shared fixtures for validate_change integration tests.

use lzguard_core::guard::Violation;
use serde_json::Value;

/// A complete landing-zone document that decodes cleanly
pub fn baseline() -> Value {
    serde_json::from_str(include_str!("../fixtures/baseline-config.json"))
        .expect("baseline fixture is valid JSON")
}

/// Mutable handle on the shared-network account of `doc`
#[allow(dead_code)]
pub fn shared_network(doc: &mut Value) -> &mut Value {
    &mut doc["mandatory-account-configs"]["shared-network"]
}

/// Mutable handle on the first VPC of the shared-network account
#[allow(dead_code)]
pub fn endpoint_vpc(doc: &mut Value) -> &mut Value {
    &mut shared_network(doc)["vpc"][0]
}

/// Rule ids of `violations`, in report order
#[allow(dead_code)]
pub fn rule_ids(violations: &[Violation]) -> Vec<&'static str> {
    violations.iter().map(|v| v.rule_id).collect()
}
