//! Scope validation.
//!
//! A deployment limited to a scope may only change its own slice of the
//! document. Every diff entry outside that slice is blocked.

use crate::diff::{DiffEntry, DiffKind};
use crate::errors::{GuardError, Result};
use crate::guard::Violation;
use crate::landing_zone::{
    ACCOUNT_SECTIONS, GLOBAL_OPTIONS, MANDATORY_ACCOUNTS, ORGANIZATIONAL_UNITS,
};
use crate::options::{ChangeScope, GuardOptions, TARGET_ALL, TARGET_NEW};

pub const RULE_ID: &str = "scope";

/// Out-of-scope changes for the scope named in `options`.
///
/// `FULL` never blocks. `ACCOUNT` and `OU` fail with
/// [`GuardError::MissingScopeTargets`] when their target list is missing or
/// empty.
pub fn validate_scope(options: &GuardOptions, diff: &[DiffEntry]) -> Result<Vec<Violation>> {
    let blocked: Vec<&DiffEntry> = match options.scope {
        ChangeScope::Full => Vec::new(),
        ChangeScope::NewAccounts => diff.iter().filter(|e| !is_new_account(e)).collect(),
        ChangeScope::GlobalOptions => diff
            .iter()
            .filter(|e| e.path().key_at(0) != Some(GLOBAL_OPTIONS))
            .collect(),
        ChangeScope::Account => account_scope(options, diff)?,
        ChangeScope::Ou => ou_scope(options, diff)?,
    };
    Ok(blocked.into_iter().map(scope_violation).collect())
}

fn scope_violation(entry: &DiffEntry) -> Violation {
    Violation::new(
        RULE_ID,
        format!(
            "ConfigCheck: blocked changing from config path \"{}\" in SCOPE validation",
            entry.path().render()
        ),
        entry.path().clone(),
    )
}

fn in_account_section(entry: &DiffEntry) -> bool {
    entry
        .path()
        .key_at(0)
        .is_some_and(|section| ACCOUNT_SECTIONS.contains(&section))
}

/// A whole account added under one of the account sections.
fn is_new_account(entry: &DiffEntry) -> bool {
    is_account_level_addition(entry) && in_account_section(entry)
}

fn is_account_level_addition(entry: &DiffEntry) -> bool {
    entry.path().len() == 2 && entry.kind() == DiffKind::Added
}

fn targets<'a>(
    scope: ChangeScope,
    targets: &'a Option<Vec<String>>,
) -> Result<&'a [String]> {
    match targets {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(GuardError::MissingScopeTargets {
            scope: scope.to_string(),
        }),
    }
}

fn targets_include(targets: &[String], name: &str) -> bool {
    targets.iter().any(|t| t == name)
}

fn account_scope<'d>(options: &GuardOptions, diff: &'d [DiffEntry]) -> Result<Vec<&'d DiffEntry>> {
    let outside: Vec<&DiffEntry> = diff.iter().filter(|e| !in_account_section(e)).collect();
    if !outside.is_empty() {
        return Ok(outside);
    }
    let accounts = targets(ChangeScope::Account, &options.target_accounts)?;
    if targets_include(accounts, TARGET_ALL) {
        return Ok(Vec::new());
    }
    // Mandatory accounts stay editable under any account target list.
    let mut blocked: Vec<&DiffEntry> = diff
        .iter()
        .filter(|e| {
            let path = e.path();
            path.len() != 2
                && !path.key_at(1).is_some_and(|key| targets_include(accounts, key))
                && path.key_at(0) != Some(MANDATORY_ACCOUNTS)
        })
        .collect();
    if !targets_include(accounts, TARGET_NEW) {
        blocked.extend(diff.iter().filter(|e| is_account_level_addition(e)));
    }
    Ok(blocked)
}

fn ou_scope<'d>(options: &GuardOptions, diff: &'d [DiffEntry]) -> Result<Vec<&'d DiffEntry>> {
    let ous = targets(ChangeScope::Ou, &options.target_ous)?;
    let outside = |e: &&DiffEntry| e.path().key_at(0) != Some(ORGANIZATIONAL_UNITS);
    let mut blocked: Vec<&DiffEntry> = diff.iter().filter(outside).collect();
    if !targets_include(ous, TARGET_ALL) {
        blocked.extend(diff.iter().filter(outside).filter(|e| {
            !e.path()
                .key_at(1)
                .is_some_and(|key| targets_include(ous, key))
        }));
    }
    Ok(blocked)
}
