//! Predicate evaluator.

use super::accounts::deleted_accounts;
use super::predicate::PathPredicate;
use super::Violation;
use crate::diff::model::DiffEntry;

/// Evaluate `predicates` against `entries`.
///
/// Account-deletion violations come first, then one violation per matching
/// (predicate, entry) pair in predicate order and then entry order. Overlapping
/// predicates each report their own violation. Evaluation never fails.
pub fn evaluate(
    predicates: &[PathPredicate],
    entries: &[DiffEntry],
    prior_account_names: &[String],
) -> Vec<Violation> {
    let mut violations = deleted_accounts(entries, prior_account_names);
    for predicate in predicates {
        for entry in entries.iter().filter(|e| predicate.matches(e)) {
            tracing::debug!(
                rule_id = predicate.id,
                rule_group = %predicate.group,
                config_path = %entry.path(),
                "Change blocked"
            );
            violations.push(Violation::new(
                predicate.id,
                predicate.render(entry),
                entry.path().clone(),
            ));
        }
    }
    violations
}
