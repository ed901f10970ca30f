//! Landing-zone configuration schema.
//!
//! The root document has five sections:
//!
//! - `replacements`: free-form substitution values
//! - `global-options`: organization-wide settings and central service accounts
//! - `mandatory-account-configs` / `workload-account-configs`: account maps keyed
//!   by account key
//! - `organizational-units`: OU map keyed by OU key
//!
//! The schema graph is built once per process by [`accelerator_config`] and
//! shared read-only across every decode call.

pub mod accounts;
pub mod deployments;
pub mod global_options;
pub mod network;

use crate::errors::DecodeError;
use crate::schema::build::*;
use crate::schema::{decode, DefaultValue, SchemaNode};
use crate::value::ConfigValue;
use serde_json::Value;
use std::sync::OnceLock;

pub const REPLACEMENTS: &str = "replacements";
pub const GLOBAL_OPTIONS: &str = "global-options";
pub const MANDATORY_ACCOUNTS: &str = "mandatory-account-configs";
pub const WORKLOAD_ACCOUNTS: &str = "workload-account-configs";
pub const ORGANIZATIONAL_UNITS: &str = "organizational-units";

/// Both account sections, in the order checks visit them
pub const ACCOUNT_SECTIONS: &[&str] = &[MANDATORY_ACCOUNTS, WORKLOAD_ACCOUNTS];

/// `global-options` entries that must name a key of `mandatory-account-configs`
pub const GLOBAL_MANDATORY_ACCOUNTS: &[&str] = &[
    "aws-org-management",
    "central-security-services",
    "central-operations-services",
    "central-log-services",
];

fn replacements() -> SchemaNode {
    let string_or_list = || union("ReplacementObjectValue", vec![non_empty(), array(non_empty())]);
    map_of(union(
        "ReplacementConfigValue",
        vec![non_empty(), array(non_empty()), map_of(string_or_list())],
    ))
}

fn build_accelerator_config() -> SchemaNode {
    record(
        "AcceleratorConfig",
        vec![
            defaulted(REPLACEMENTS, replacements(), DefaultValue::EmptyMap),
            required(GLOBAL_OPTIONS, global_options::global_options()),
            required(MANDATORY_ACCOUNTS, map_of(accounts::account())),
            required(WORKLOAD_ACCOUNTS, map_of(accounts::account())),
            required(ORGANIZATIONAL_UNITS, map_of(accounts::organizational_unit())),
        ],
    )
}

/// Root schema of a landing-zone configuration document.
pub fn accelerator_config() -> &'static SchemaNode {
    static SCHEMA: OnceLock<SchemaNode> = OnceLock::new();
    SCHEMA.get_or_init(build_accelerator_config)
}

/// Decode a whole configuration document against [`accelerator_config`].
///
/// # Errors
///
/// Returns every field-level defect found in the document.
pub fn decode_accelerator_config(document: &Value) -> Result<ConfigValue, DecodeError> {
    decode(accelerator_config(), document)
}
