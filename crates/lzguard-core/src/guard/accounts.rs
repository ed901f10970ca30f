//! Account-deletion rule.
//!
//! Accounts can be referenced from several sections, so deletion is detected
//! by name rather than by path shape: any `Deleted` entry whose last key is a
//! previously known account key is blocked.

use super::Violation;
use crate::diff::model::DiffEntry;
use crate::landing_zone::ACCOUNT_SECTIONS;
use crate::value::ConfigValue;

pub const RULE_ID: &str = "account.deleted";

/// Account keys of the mandatory and workload sections of `previous`, in
/// document order.
pub fn prior_account_names(previous: &ConfigValue) -> Vec<String> {
    ACCOUNT_SECTIONS
        .iter()
        .filter_map(|section| previous.get(section))
        .flat_map(|accounts| accounts.keys())
        .map(str::to_string)
        .collect()
}

/// One violation per deleted entry named after a prior account.
pub fn deleted_accounts(entries: &[DiffEntry], prior_account_names: &[String]) -> Vec<Violation> {
    entries
        .iter()
        .filter(|entry| matches!(entry, DiffEntry::Deleted { .. }))
        .filter_map(|entry| {
            let path = entry.path();
            let name = path.last()?.as_key()?;
            prior_account_names.iter().any(|n| n == name).then(|| {
                tracing::debug!(rule_id = RULE_ID, config_path = %path, "Account deleted");
                Violation::new(
                    RULE_ID,
                    format!(
                        "ConfigCheck: blocked changing account name \"{}\" from config path \"{}\"",
                        name,
                        path.render()
                    ),
                    path.clone(),
                )
            })
        })
        .collect()
}
