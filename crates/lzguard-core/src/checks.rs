//! Whole-document checks on the decoded current configuration.
//!
//! Unlike the catalog predicates these look at the new document itself rather
//! than at what changed, so the email and account-key checks also run when
//! the diff is empty.

use crate::diff::DiffEntry;
use crate::guard::{RuleGroup, Violation};
use crate::landing_zone::{
    GLOBAL_MANDATORY_ACCOUNTS, GLOBAL_OPTIONS, MANDATORY_ACCOUNTS, WORKLOAD_ACCOUNTS,
};
use crate::options::{GuardOptions, Overrides};
use crate::path;
use crate::value::{ConfigValue, Path};
use lzguard_core_types::Sensitive;
use std::collections::HashSet;
use tracing::debug;

pub const EXECUTION_REGION_RULE: &str = "check.execution-region";
pub const ACCOUNT_EMAILS_RULE: &str = "check.account-emails";
pub const GLOBAL_ACCOUNT_KEYS_RULE: &str = "check.global-account-keys";

/// Run every document check enabled by `options` and `overrides`.
///
/// Order: execution region, duplicate emails, global account keys.
pub fn run_document_checks(
    current: &ConfigValue,
    diff: &[DiffEntry],
    options: &GuardOptions,
    overrides: &Overrides,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !diff.is_empty() && !overrides.suppresses(RuleGroup::GlobalOptions) {
        if let Some(region) = options.execution_region.as_deref() {
            violations.extend(check_execution_region(current, region));
        }
    }
    if !overrides.suppresses(RuleGroup::AccountEmail) {
        violations.extend(check_email_duplicates(current));
    }
    violations.extend(check_global_account_keys(current));
    violations
}

/// The pipeline must run in the organization management region.
pub fn check_execution_region(current: &ConfigValue, region: &str) -> Option<Violation> {
    let org_region = current
        .get_path(&[GLOBAL_OPTIONS, "aws-org-management", "region"])
        .and_then(ConfigValue::as_str)
        .unwrap_or_default();
    if org_region == region {
        return None;
    }
    Some(Violation::new(
        EXECUTION_REGION_RULE,
        format!(
            "ConfigCheck: state machine is running in the region {} but \"aws-org-management\" region has {}",
            region, org_region
        ),
        path![GLOBAL_OPTIONS, "aws-org-management", "region"],
    ))
}

/// Account emails must be unique across mandatory and active workload accounts.
pub fn check_email_duplicates(current: &ConfigValue) -> Option<Violation> {
    let mut seen = HashSet::new();
    let mut duplicated = false;
    for (account_key, email) in account_emails(current) {
        if !seen.insert(email.expose().to_string()) {
            debug!(account_key, email = %email, "Duplicate account email");
            duplicated = true;
        }
    }
    duplicated.then(|| {
        Violation::new(
            ACCOUNT_EMAILS_RULE,
            "Found duplicate entries for account emails under mandatory-account-configs / workload-account-configs",
            Path::root(),
        )
    })
}

/// Emails of every mandatory account and every workload account not marked
/// `deleted`.
fn account_emails(current: &ConfigValue) -> Vec<(&str, Sensitive<&str>)> {
    let mandatory = section(current, MANDATORY_ACCOUNTS).iter();
    let workload = section(current, WORKLOAD_ACCOUNTS).iter().filter(|(_, account)| {
        !account
            .get("deleted")
            .and_then(ConfigValue::as_bool)
            .unwrap_or(false)
    });
    mandatory
        .chain(workload)
        .filter_map(|(key, account)| {
            let email = account.get("email")?.as_str()?;
            Some((key.as_str(), Sensitive::new(email)))
        })
        .collect()
}

fn section<'a>(current: &'a ConfigValue, name: &str) -> &'a [(String, ConfigValue)] {
    current
        .get(name)
        .and_then(ConfigValue::entries)
        .unwrap_or_default()
}

/// Each central service account named in `global-options` must exist under
/// `mandatory-account-configs`.
pub fn check_global_account_keys(current: &ConfigValue) -> Vec<Violation> {
    let mandatory_keys = current
        .get(MANDATORY_ACCOUNTS)
        .map(ConfigValue::keys)
        .unwrap_or_default();
    GLOBAL_MANDATORY_ACCOUNTS
        .iter()
        .filter_map(|service| {
            let account_key = current
                .get_path(&[GLOBAL_OPTIONS, *service, "account"])
                .and_then(ConfigValue::as_str)
                .unwrap_or_default();
            (!mandatory_keys.contains(&account_key)).then(|| {
                Violation::new(
                    GLOBAL_ACCOUNT_KEYS_RULE,
                    format!(
                        "Global mandatory account {} was not found under mandatory-account-configs",
                        account_key
                    ),
                    path![GLOBAL_OPTIONS, *service, "account"],
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(workload_deleted: bool) -> ConfigValue {
        ConfigValue::from_json(&json!({
            "global-options": {
                "aws-org-management": {"account": "management", "region": "ca-central-1"},
                "central-security-services": {"account": "security", "region": "ca-central-1"},
                "central-operations-services": {"account": "operations", "region": "ca-central-1"},
                "central-log-services": {"account": "log-archive", "region": "ca-central-1"}
            },
            "mandatory-account-configs": {
                "management": {"email": "mgmt@example.com"},
                "security": {"email": "security@example.com"},
                "operations": {"email": "ops@example.com"},
                "log-archive": {"email": "logs@example.com"}
            },
            "workload-account-configs": {
                "dev": {"email": "ops@example.com", "deleted": workload_deleted}
            }
        }))
    }

    #[test]
    fn test_duplicate_email_reported_once() {
        let violation = check_email_duplicates(&document(false)).unwrap();
        assert_eq!(violation.rule_id, ACCOUNT_EMAILS_RULE);
    }

    #[test]
    fn test_deleted_workload_account_email_ignored() {
        assert!(check_email_duplicates(&document(true)).is_none());
    }

    #[test]
    fn test_global_account_keys_present() {
        assert!(check_global_account_keys(&document(true)).is_empty());
    }

    #[test]
    fn test_missing_global_account_key() {
        let mut json = document(true).to_json();
        json["global-options"]["central-log-services"]["account"] = json!("logs");
        let violations = check_global_account_keys(&ConfigValue::from_json(&json));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Global mandatory account logs was not found under mandatory-account-configs"
        );
        assert_eq!(
            violations[0].path.render(),
            "global-options/central-log-services/account"
        );
    }

    #[test]
    fn test_execution_region_mismatch() {
        let violation = check_execution_region(&document(true), "us-east-1").unwrap();
        assert_eq!(
            violation.message,
            "ConfigCheck: state machine is running in the region us-east-1 but \"aws-org-management\" region has ca-central-1"
        );
        assert!(check_execution_region(&document(true), "ca-central-1").is_none());
    }

    #[test]
    fn test_region_check_skipped_for_empty_diff() {
        let options = GuardOptions::default().with_execution_region("us-east-1");
        let violations = run_document_checks(&document(true), &[], &options, &Overrides::default());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_email_override_suppresses_check() {
        let overrides = Overrides::from_groups([RuleGroup::AccountEmail]);
        let violations =
            run_document_checks(&document(false), &[], &GuardOptions::default(), &overrides);
        assert!(violations.is_empty());
    }
}
