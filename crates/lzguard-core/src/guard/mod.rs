//! Change-policy guard.
//!
//! Evaluates a rule catalog of [`PathPredicate`]s against diff entries and
//! turns each match into a [`Violation`]. The guard never mutates inputs and
//! never fails; an empty result means the change is accepted.

pub mod accounts;
pub mod catalog;
pub mod evaluate;
pub mod predicate;

pub use accounts::prior_account_names;
pub use catalog::CATALOG;
pub use evaluate::evaluate;
pub use predicate::{
    AnchorMode, EntryFilter, MessageTemplate, PathPredicate, PriorValue, RuleGroup,
};

use crate::value::Path;
use serde::Serialize;

/// A blocked change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule_id: &'static str,
    pub message: String,
    pub path: Path,
}

impl Violation {
    pub fn new(rule_id: &'static str, message: impl Into<String>, path: Path) -> Self {
        Self {
            rule_id,
            message: message.into(),
            path,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule_id, self.message)
    }
}
