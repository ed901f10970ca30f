//! Guard options.
//!
//! Options arrive from the deployment pipeline as TOML (or any serde format):
//!
//! ```toml
//! scope = "ACCOUNT"
//! target-accounts = ["dev", "NEW"]
//! execution-region = "ca-central-1"
//!
//! [overrides]
//! ov-tgw = true
//! ```

use crate::errors::{GuardError, Result};
use crate::guard::RuleGroup;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Target keyword lifting the per-account or per-OU filter.
pub const TARGET_ALL: &str = "ALL";
/// Target keyword allowing new accounts under the `ACCOUNT` scope.
pub const TARGET_NEW: &str = "NEW";

/// Which slice of the document a deployment may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ChangeScope {
    #[default]
    Full,
    NewAccounts,
    GlobalOptions,
    Account,
    Ou,
}

impl ChangeScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeScope::Full => "FULL",
            ChangeScope::NewAccounts => "NEW-ACCOUNTS",
            ChangeScope::GlobalOptions => "GLOBAL-OPTIONS",
            ChangeScope::Account => "ACCOUNT",
            ChangeScope::Ou => "OU",
        }
    }
}

impl std::fmt::Display for ChangeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GuardOptions {
    /// Override flag name to enabled
    pub overrides: BTreeMap<String, bool>,
    pub scope: ChangeScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_accounts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ous: Option<Vec<String>>,
    /// Region the deployment pipeline runs in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_region: Option<String>,
}

impl GuardOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: GuardOptions = toml::from_str(text)?;
        options.resolve_overrides()?;
        Ok(options)
    }

    pub fn with_override(mut self, flag: impl Into<String>) -> Self {
        self.overrides.insert(flag.into(), true);
        self
    }

    pub fn with_scope(mut self, scope: ChangeScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_target_accounts<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_accounts = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_target_ous<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_ous = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_execution_region(mut self, region: impl Into<String>) -> Self {
        self.execution_region = Some(region.into());
        self
    }

    /// Rule groups suppressed by enabled override flags.
    ///
    /// Flags set to `false` are accepted and suppress nothing. An unknown flag
    /// name is an error.
    pub fn resolve_overrides(&self) -> Result<Overrides> {
        let mut groups = BTreeSet::new();
        for (flag, enabled) in &self.overrides {
            let group =
                RuleGroup::from_override_flag(flag).ok_or_else(|| GuardError::UnknownOverride {
                    flag: flag.clone(),
                })?;
            if *enabled {
                groups.insert(group);
            }
        }
        Ok(Overrides(groups))
    }
}

/// Set of suppressed rule groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Overrides(BTreeSet<RuleGroup>);

impl Overrides {
    pub fn from_groups(groups: impl IntoIterator<Item = RuleGroup>) -> Self {
        Self(groups.into_iter().collect())
    }

    pub fn suppresses(&self, group: RuleGroup) -> bool {
        self.0.contains(&group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = RuleGroup> + '_ {
        self.0.iter().copied()
    }
}
