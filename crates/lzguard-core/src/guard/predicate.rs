//! Path-predicate model.
//!
//! A [`PathPredicate`] describes one protected configuration fact as data: which
//! diff entries it looks at, how its anchor segments relate to the entry path,
//! what the prior value must look like, and how the violation reads. One
//! generic matcher evaluates every predicate.

use crate::diff::engine::element_identity;
use crate::diff::model::{ArrayItemChange, DiffEntry};
use crate::value::{ConfigValue, Path};
use serde::Serialize;
use std::fmt;

/// Catalog section a predicate belongs to. Every group except
/// [`RuleGroup::Vgw`] can be suppressed by its override flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleGroup {
    GlobalOptions,
    DeleteAccounts,
    RenameAccounts,
    AccountEmail,
    AccountWarming,
    AccountOu,
    AccountVpc,
    AccountSubnets,
    Tgw,
    Mad,
    Vgw,
    OuVpc,
    OuSubnets,
    ShareToOu,
    ShareToAccounts,
    Nacls,
    OptInVpcs,
    NetworkFirewall,
}

impl RuleGroup {
    pub const ALL: &'static [RuleGroup] = &[
        RuleGroup::GlobalOptions,
        RuleGroup::DeleteAccounts,
        RuleGroup::RenameAccounts,
        RuleGroup::AccountEmail,
        RuleGroup::AccountWarming,
        RuleGroup::AccountOu,
        RuleGroup::AccountVpc,
        RuleGroup::AccountSubnets,
        RuleGroup::Tgw,
        RuleGroup::Mad,
        RuleGroup::Vgw,
        RuleGroup::OuVpc,
        RuleGroup::OuSubnets,
        RuleGroup::ShareToOu,
        RuleGroup::ShareToAccounts,
        RuleGroup::Nacls,
        RuleGroup::OptInVpcs,
        RuleGroup::NetworkFirewall,
    ];

    /// Name of the override flag that suppresses this group
    pub fn override_flag(&self) -> Option<&'static str> {
        match self {
            RuleGroup::GlobalOptions => Some("ov-global-options"),
            RuleGroup::DeleteAccounts => Some("ov-del-accts"),
            RuleGroup::RenameAccounts => Some("ov-ren-accts"),
            RuleGroup::AccountEmail => Some("ov-acct-email"),
            RuleGroup::AccountWarming => Some("ov-acct-warming"),
            RuleGroup::AccountOu => Some("ov-acct-ou"),
            RuleGroup::AccountVpc => Some("ov-acct-vpc"),
            RuleGroup::AccountSubnets => Some("ov-acct-subnet"),
            RuleGroup::Tgw => Some("ov-tgw"),
            RuleGroup::Mad => Some("ov-mad"),
            RuleGroup::Vgw => None,
            RuleGroup::OuVpc => Some("ov-ou-vpc"),
            RuleGroup::OuSubnets => Some("ov-ou-subnet"),
            RuleGroup::ShareToOu => Some("ov-share-to-ou"),
            RuleGroup::ShareToAccounts => Some("ov-share-to-accounts"),
            RuleGroup::Nacls => Some("ov-nacl"),
            RuleGroup::OptInVpcs => Some("ov-acct-vpc-optin"),
            RuleGroup::NetworkFirewall => Some("ov-nfw"),
        }
    }

    pub fn from_override_flag(flag: &str) -> Option<RuleGroup> {
        RuleGroup::ALL
            .iter()
            .copied()
            .find(|group| group.override_flag() == Some(flag))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleGroup::GlobalOptions => "global-options",
            RuleGroup::DeleteAccounts => "delete-accounts",
            RuleGroup::RenameAccounts => "rename-accounts",
            RuleGroup::AccountEmail => "account-email",
            RuleGroup::AccountWarming => "account-warming",
            RuleGroup::AccountOu => "account-ou",
            RuleGroup::AccountVpc => "account-vpc",
            RuleGroup::AccountSubnets => "account-subnets",
            RuleGroup::Tgw => "tgw",
            RuleGroup::Mad => "mad",
            RuleGroup::Vgw => "vgw",
            RuleGroup::OuVpc => "ou-vpc",
            RuleGroup::OuSubnets => "ou-subnets",
            RuleGroup::ShareToOu => "share-to-ou",
            RuleGroup::ShareToAccounts => "share-to-accounts",
            RuleGroup::Nacls => "nacls",
            RuleGroup::OptInVpcs => "opt-in-vpcs",
            RuleGroup::NetworkFirewall => "network-firewall",
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How anchor segments relate to a diff path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// The last path segment equals the single anchor segment.
    SuffixMatch,
    /// Every anchor segment appears somewhere in the path, in any order.
    ContainsAll,
    /// Every path segment is one of the anchor segments.
    PathIsSubsetOf,
}

/// Which diff entries a predicate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    Edited,
    EditedOrAdded,
    Deleted,
    /// `ArrayChanged` entries whose element was removed
    ArrayItemDeleted,
    AnyArrayChange,
}

/// Condition on the prior value of an `Edited` entry. Other entry kinds carry
/// no comparable prior value and are never filtered by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorValue {
    Ignored,
    Truthy,
    Falsy,
}

/// Violation text of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    /// `blocked changing <last anchor segment> from config path "<path>"`
    ChangedField,
    /// `blocked changing config path "<path>"`
    ChangedPath,
    /// `blocked changing account "<last anchor segment>" from config path "<path>"`
    ArrayAccount,
    /// `blocked deleting  "<terminal>" from config path "<path>"` (two spaces)
    DeletedEntry,
    FirewallDeleted,
    FirewallRenamed,
    FirewallNameDeleted,
}

/// A declarative change-policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPredicate {
    pub id: &'static str,
    pub group: RuleGroup,
    pub anchor: &'static [&'static str],
    pub mode: AnchorMode,
    pub applies_to: EntryFilter,
    pub prior: PriorValue,
    pub exact_depth: Option<usize>,
    /// Required last path segment, on top of the anchor condition
    pub terminal: Option<&'static str>,
    pub message: MessageTemplate,
}

impl PathPredicate {
    /// True when `entry` is a change this predicate blocks.
    pub fn matches(&self, entry: &DiffEntry) -> bool {
        let path = entry.path();
        self.accepts_kind(entry)
            && self.anchor_holds(path)
            && self.exact_depth.map_or(true, |depth| path.len() == depth)
            && self
                .terminal
                .map_or(true, |terminal| path.last().is_some_and(|s| s.is_key(terminal)))
            && self.prior_holds(entry)
    }

    fn accepts_kind(&self, entry: &DiffEntry) -> bool {
        match (self.applies_to, entry) {
            (EntryFilter::Edited, DiffEntry::Edited { .. }) => true,
            (EntryFilter::EditedOrAdded, DiffEntry::Edited { .. } | DiffEntry::Added { .. }) => {
                true
            }
            (EntryFilter::Deleted, DiffEntry::Deleted { .. }) => true,
            (EntryFilter::ArrayItemDeleted, DiffEntry::ArrayChanged { item, .. }) => {
                item.is_deleted()
            }
            (EntryFilter::AnyArrayChange, DiffEntry::ArrayChanged { .. }) => true,
            _ => false,
        }
    }

    fn anchor_holds(&self, path: &Path) -> bool {
        match self.mode {
            AnchorMode::SuffixMatch => match (self.anchor.first(), path.last()) {
                (Some(anchor), Some(last)) => last.is_key(anchor),
                _ => false,
            },
            AnchorMode::ContainsAll => self.anchor.iter().all(|a| path.contains_key(a)),
            AnchorMode::PathIsSubsetOf => path
                .segments()
                .iter()
                .all(|s| s.as_key().is_some_and(|k| self.anchor.contains(&k))),
        }
    }

    fn prior_holds(&self, entry: &DiffEntry) -> bool {
        let DiffEntry::Edited { lhs, .. } = entry else {
            return true;
        };
        match self.prior {
            PriorValue::Ignored => true,
            PriorValue::Truthy => lhs.is_truthy(),
            PriorValue::Falsy => !lhs.is_truthy(),
        }
    }

    /// Violation message for a matched entry.
    pub fn render(&self, entry: &DiffEntry) -> String {
        let path = entry.path().render();
        let field = self.anchor.last().copied().unwrap_or_default();
        let lhs = entry.lhs().map(ConfigValue::render).unwrap_or_default();
        let rhs = entry.rhs().map(ConfigValue::render).unwrap_or_default();
        let message = match self.message {
            MessageTemplate::ChangedField => {
                format!("ConfigCheck: blocked changing {field} from config path \"{path}\"")
            }
            MessageTemplate::ChangedPath => {
                format!("ConfigCheck: blocked changing config path \"{path}\"")
            }
            MessageTemplate::ArrayAccount => {
                format!("ConfigCheck: blocked changing account \"{field}\" from config path \"{path}\"")
            }
            MessageTemplate::DeletedEntry => format!(
                "ConfigCheck: blocked deleting  \"{}\" from config path \"{path}\"",
                self.terminal.unwrap_or(field)
            ),
            MessageTemplate::FirewallDeleted => {
                format!("Firewall has been deleted from path {path}. This is not allowed.")
            }
            MessageTemplate::FirewallRenamed => format!(
                "Firewall name has changed from {lhs} to {rhs} in {path}. \
                 Changing the firewall name will cause the replacement of the firewall."
            ),
            MessageTemplate::FirewallNameDeleted => format!(
                "Firewall name has been deleted. Previous value was {lhs} in {path}. \
                 Changing the firewall name or deleting the firewall is not allowed."
            ),
        };
        match entry.item() {
            Some((index, ArrayItemChange::Deleted { lhs })) => {
                format!("{message} (removed item {index} \"{}\")", removed_item_label(lhs))
            }
            _ => message,
        }
    }
}

fn removed_item_label(item: &ConfigValue) -> String {
    element_identity(item)
        .map(str::to_string)
        .unwrap_or_else(|| item.render())
}
