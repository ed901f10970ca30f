//! Static change-policy catalog.
//!
//! [`CATALOG`] lists every protected configuration fact in evaluation order.
//! It is read-only; [`select`] returns the view left after override flags
//! suppress whole groups.

use super::predicate::{
    AnchorMode, EntryFilter, MessageTemplate, PathPredicate, PriorValue, RuleGroup,
};
use crate::options::Overrides;
use PriorValue::{Falsy, Ignored, Truthy};
use RuleGroup::*;

const GLOBAL_OPTIONS_AOM_ACCOUNT: &[&str] = &["global-options", "aws-org-management", "account"];
const GLOBAL_OPTIONS_AOM_REGION: &[&str] = &["global-options", "aws-org-management", "region"];
const GLOBAL_OPTIONS_CLS_ACCOUNT: &[&str] = &["global-options", "central-log-services", "account"];
const GLOBAL_OPTIONS_CLS_REGION: &[&str] = &["global-options", "central-log-services", "region"];

const ACCOUNT_VPC: &[&str] = &["mandatory-account-configs", "vpc"];
const ACCOUNT_VPC_DEPLOY: &[&str] = &["mandatory-account-configs", "vpc", "deploy"];
const ACCOUNT_VPC_NAME: &[&str] = &["mandatory-account-configs", "vpc", "name"];
const ACCOUNT_VPC_CIDRS: &[&str] = &["mandatory-account-configs", "vpc", "cidr"];
const ACCOUNT_VPC_CIDR: &[&str] = &["mandatory-account-configs", "vpc", "cidr", "value"];
const ACCOUNT_VPC_REGION: &[&str] = &["mandatory-account-configs", "vpc", "region"];
const ACCOUNT_VPC_TENANCY: &[&str] = &["mandatory-account-configs", "vpc", "dedicated-tenancy"];

const ACCOUNT_SUBNETS: &[&str] = &["mandatory-account-configs", "vpc", "subnets"];
const ACCOUNT_SUBNET_NAME: &[&str] = &["mandatory-account-configs", "vpc", "subnets", "name"];
const ACCOUNT_SUBNET_DEFINITIONS: &[&str] =
    &["mandatory-account-configs", "vpc", "subnets", "definitions"];
const ACCOUNT_SUBNET_AZ: &[&str] =
    &["mandatory-account-configs", "vpc", "subnets", "definitions", "az"];
const ACCOUNT_SUBNET_CIDR: &[&str] =
    &["mandatory-account-configs", "vpc", "subnets", "definitions", "cidr", "value"];
const ACCOUNT_SUBNET_DISABLED: &[&str] =
    &["mandatory-account-configs", "vpc", "subnets", "definitions", "disabled"];

const TGW: &[&str] = &["mandatory-account-configs", "deployments", "tgw"];
const TGW_NAME: &[&str] = &["mandatory-account-configs", "deployments", "tgw", "name"];
const TGW_ASN: &[&str] = &["mandatory-account-configs", "deployments", "tgw", "asn"];
const TGW_REGION: &[&str] = &["mandatory-account-configs", "deployments", "tgw", "region"];
const TGW_FEATURES: &[&str] = &["mandatory-account-configs", "deployments", "tgw", "features"];

const MAD_DIR_ID: &[&str] = &["mandatory-account-configs", "deployments", "mad", "dir-id"];
const MAD_DEPLOY: &[&str] = &["mandatory-account-configs", "deployments", "mad", "deploy"];
const MAD_VPC_NAME: &[&str] = &["mandatory-account-configs", "deployments", "mad", "vpc-name"];
const MAD_REGION: &[&str] = &["mandatory-account-configs", "deployments", "mad", "region"];
const MAD_SUBNET: &[&str] = &["mandatory-account-configs", "deployments", "mad", "subnet"];
const MAD_SIZE: &[&str] = &["mandatory-account-configs", "deployments", "mad", "size"];
const MAD_DNS: &[&str] = &["mandatory-account-configs", "deployments", "mad", "dns-domain"];
const MAD_NETBIOS: &[&str] = &["mandatory-account-configs", "deployments", "mad", "netbios-domain"];

const VGW_ASN: &[&str] = &["mandatory-account-configs", "vpc", "vgw", "asn"];

const OU_VPC: &[&str] = &["organizational-units", "vpc"];
const OU_VPC_DEPLOY: &[&str] = &["organizational-units", "vpc", "deploy"];
const OU_VPC_NAME: &[&str] = &["organizational-units", "vpc", "name"];
const OU_VPC_CIDRS: &[&str] = &["organizational-units", "vpc", "cidr"];
const OU_VPC_CIDR: &[&str] = &["organizational-units", "vpc", "cidr", "value"];
const OU_VPC_REGION: &[&str] = &["organizational-units", "vpc", "region"];
const OU_VPC_TENANCY: &[&str] = &["organizational-units", "vpc", "dedicated-tenancy"];
const OU_VPC_OPT_IN: &[&str] = &["organizational-units", "vpc", "opt-in"];

const OU_SUBNETS: &[&str] = &["organizational-units", "vpc", "subnets"];
const OU_SUBNET_NAME: &[&str] = &["organizational-units", "vpc", "subnets", "name"];
const OU_SUBNET_DEFINITIONS: &[&str] = &["organizational-units", "vpc", "subnets", "definitions"];
const OU_SUBNET_AZ: &[&str] = &["organizational-units", "vpc", "subnets", "definitions", "az"];
const OU_SUBNET_CIDR: &[&str] =
    &["organizational-units", "vpc", "subnets", "definitions", "cidr", "value"];
const OU_SUBNET_DISABLED: &[&str] =
    &["organizational-units", "vpc", "subnets", "definitions", "disabled"];

const OU_NACLS: &[&str] = &["organizational-units", "vpc", "subnets", "nacls"];
const OU_NACLS_SUBNET: &[&str] =
    &["organizational-units", "vpc", "subnets", "nacls", "cidr-blocks", "subnet"];

const WORKLOAD_ACCOUNT_OPT_IN_VPC: &[&str] =
    &["workload-account-configs", "MyProdAccount", "opt-in-vpcs"];
const ACCOUNT_OPT_IN_VPC: &[&str] = &["mandatory-account-configs", "MyProdAccount", "opt-in-vpcs"];

const NFW: &[&str] = &["mandatory-account-configs", "vpc", "nfw"];
const NFW_NAME: &[&str] = &["mandatory-account-configs", "vpc", "nfw", "firewall-name"];

const fn predicate(
    id: &'static str,
    group: RuleGroup,
    anchor: &'static [&'static str],
    mode: AnchorMode,
    applies_to: EntryFilter,
    prior: PriorValue,
    message: MessageTemplate,
) -> PathPredicate {
    PathPredicate {
        id,
        group,
        anchor,
        mode,
        applies_to,
        prior,
        exact_depth: None,
        terminal: None,
        message,
    }
}

impl PathPredicate {
    const fn depth(self, depth: usize) -> PathPredicate {
        PathPredicate {
            exact_depth: Some(depth),
            ..self
        }
    }

    const fn ending_in(self, terminal: &'static str) -> PathPredicate {
        PathPredicate {
            terminal: Some(terminal),
            ..self
        }
    }
}

/// Edit of a field with the given name, anywhere.
const fn field_edit(
    id: &'static str,
    group: RuleGroup,
    field: &'static [&'static str],
    prior: PriorValue,
) -> PathPredicate {
    predicate(
        id,
        group,
        field,
        AnchorMode::SuffixMatch,
        EntryFilter::Edited,
        prior,
        MessageTemplate::ChangedField,
    )
}

/// Edit under every anchor segment.
const fn path_edit(
    id: &'static str,
    group: RuleGroup,
    anchor: &'static [&'static str],
    prior: PriorValue,
) -> PathPredicate {
    predicate(
        id,
        group,
        anchor,
        AnchorMode::ContainsAll,
        EntryFilter::Edited,
        prior,
        MessageTemplate::ChangedPath,
    )
}

/// Edit or first-time population under every anchor segment.
const fn path_edit_or_add(
    id: &'static str,
    group: RuleGroup,
    anchor: &'static [&'static str],
) -> PathPredicate {
    predicate(
        id,
        group,
        anchor,
        AnchorMode::ContainsAll,
        EntryFilter::EditedOrAdded,
        PriorValue::Ignored,
        MessageTemplate::ChangedPath,
    )
}

/// Edit of a set value whose path stays inside the anchor segments.
const fn section_edit(
    id: &'static str,
    group: RuleGroup,
    anchor: &'static [&'static str],
) -> PathPredicate {
    predicate(
        id,
        group,
        anchor,
        AnchorMode::PathIsSubsetOf,
        EntryFilter::Edited,
        PriorValue::Truthy,
        MessageTemplate::ChangedPath,
    )
}

/// Removal of a list element under every anchor segment.
const fn item_removal(
    id: &'static str,
    group: RuleGroup,
    anchor: &'static [&'static str],
) -> PathPredicate {
    predicate(
        id,
        group,
        anchor,
        AnchorMode::ContainsAll,
        EntryFilter::ArrayItemDeleted,
        PriorValue::Ignored,
        MessageTemplate::ChangedField,
    )
}

/// Deletion of the key named by the last anchor segment.
const fn entry_deletion(
    id: &'static str,
    group: RuleGroup,
    anchor: &'static [&'static str],
    terminal: &'static str,
) -> PathPredicate {
    predicate(
        id,
        group,
        anchor,
        AnchorMode::ContainsAll,
        EntryFilter::Deleted,
        PriorValue::Ignored,
        MessageTemplate::DeletedEntry,
    )
    .ending_in(terminal)
}

/// Every change-policy predicate, in evaluation order.
pub const CATALOG: &[PathPredicate] = &[
    // global options
    field_edit("global.alz-baseline", GlobalOptions, &["alz-baseline"], Ignored),
    field_edit("global.ct-baseline", GlobalOptions, &["ct-baseline"], Ignored),
    section_edit("global.org-management.account", GlobalOptions, GLOBAL_OPTIONS_AOM_ACCOUNT),
    section_edit("global.org-management.region", GlobalOptions, GLOBAL_OPTIONS_AOM_REGION),
    section_edit("global.log-services.account", GlobalOptions, GLOBAL_OPTIONS_CLS_ACCOUNT),
    section_edit("global.log-services.region", GlobalOptions, GLOBAL_OPTIONS_CLS_REGION),
    // accounts
    field_edit("account.rename", RenameAccounts, &["account-name"], Truthy),
    field_edit("account.email", AccountEmail, &["email"], Truthy).depth(3),
    field_edit("account.warming", AccountWarming, &["account-warming-required"], Truthy),
    field_edit("account.ou", AccountOu, &["ou"], Truthy).depth(3),
    // account VPCs
    entry_deletion("account.vpc.deleted", AccountVpc, ACCOUNT_VPC, "vpc"),
    item_removal("account.vpc.removed", AccountVpc, ACCOUNT_VPC).depth(3),
    item_removal("account.vpc.cidr.removed", AccountVpc, ACCOUNT_VPC_CIDRS).depth(5),
    path_edit("account.vpc.deploy", AccountVpc, ACCOUNT_VPC_DEPLOY, Truthy).depth(5),
    path_edit("account.vpc.name", AccountVpc, ACCOUNT_VPC_NAME, Truthy).depth(5),
    path_edit("account.vpc.cidr", AccountVpc, ACCOUNT_VPC_CIDR, Truthy).depth(7),
    path_edit("account.vpc.region", AccountVpc, ACCOUNT_VPC_REGION, Truthy).depth(5),
    path_edit_or_add("account.vpc.tenancy", AccountVpc, ACCOUNT_VPC_TENANCY).depth(5),
    // account subnets
    item_removal("account.subnet.removed", AccountSubnets, ACCOUNT_SUBNETS).depth(5),
    path_edit("account.subnet.name", AccountSubnets, ACCOUNT_SUBNET_NAME, Truthy).depth(7),
    item_removal(
        "account.subnet.definition.removed",
        AccountSubnets,
        ACCOUNT_SUBNET_DEFINITIONS,
    )
    .depth(7),
    path_edit("account.subnet.az", AccountSubnets, ACCOUNT_SUBNET_AZ, Truthy).depth(9),
    path_edit("account.subnet.cidr", AccountSubnets, ACCOUNT_SUBNET_CIDR, Truthy).depth(10),
    path_edit("account.subnet.disabled", AccountSubnets, ACCOUNT_SUBNET_DISABLED, Falsy).depth(9),
    // transit gateways
    item_removal("tgw.removed", Tgw, TGW).depth(4),
    path_edit("tgw.name", Tgw, TGW_NAME, Truthy).depth(6),
    path_edit("tgw.asn", Tgw, TGW_ASN, Truthy).depth(6),
    path_edit("tgw.region", Tgw, TGW_REGION, Truthy).depth(6),
    path_edit("tgw.features", Tgw, TGW_FEATURES, Ignored).depth(7),
    // managed directory
    path_edit("mad.dir-id", Mad, MAD_DIR_ID, Ignored).depth(5),
    path_edit("mad.deploy", Mad, MAD_DEPLOY, Ignored).depth(5),
    path_edit("mad.vpc-name", Mad, MAD_VPC_NAME, Ignored).depth(5),
    path_edit("mad.region", Mad, MAD_REGION, Ignored).depth(5),
    path_edit("mad.subnet", Mad, MAD_SUBNET, Ignored).depth(5),
    path_edit("mad.size", Mad, MAD_SIZE, Ignored).depth(5),
    path_edit("mad.dns-domain", Mad, MAD_DNS, Ignored).depth(5),
    path_edit("mad.netbios-domain", Mad, MAD_NETBIOS, Ignored).depth(5),
    // virtual private gateways
    path_edit("vgw.asn", Vgw, VGW_ASN, Truthy).depth(6),
    // OU VPCs
    entry_deletion("ou.vpc.deleted", OuVpc, OU_VPC, "vpc"),
    item_removal("ou.vpc.removed", OuVpc, OU_VPC).depth(3),
    item_removal("ou.vpc.cidr.removed", OuVpc, OU_VPC_CIDRS).depth(5),
    path_edit("ou.vpc.deploy", OuVpc, OU_VPC_DEPLOY, Truthy).depth(5),
    path_edit("ou.vpc.name", OuVpc, OU_VPC_NAME, Truthy).depth(5),
    path_edit("ou.vpc.cidr", OuVpc, OU_VPC_CIDR, Truthy).depth(7),
    path_edit("ou.vpc.region", OuVpc, OU_VPC_REGION, Truthy).depth(5),
    path_edit_or_add("ou.vpc.tenancy", OuVpc, OU_VPC_TENANCY).depth(5),
    path_edit_or_add("ou.vpc.opt-in", OuVpc, OU_VPC_OPT_IN).depth(5),
    // OU subnets
    item_removal("ou.subnet.removed", OuSubnets, OU_SUBNETS).depth(5),
    path_edit("ou.subnet.name", OuSubnets, OU_SUBNET_NAME, Truthy).depth(7),
    item_removal("ou.subnet.definition.removed", OuSubnets, OU_SUBNET_DEFINITIONS).depth(7),
    path_edit("ou.subnet.az", OuSubnets, OU_SUBNET_AZ, Truthy).depth(9),
    path_edit("ou.subnet.cidr", OuSubnets, OU_SUBNET_CIDR, Truthy).depth(10),
    path_edit("ou.subnet.disabled", OuSubnets, OU_SUBNET_DISABLED, Falsy).depth(9),
    // subnet sharing
    field_edit("share.ou-accounts", ShareToOu, &["share-to-ou-accounts"], Truthy),
    path_edit("share.specific-accounts", ShareToAccounts, &["share-to-specific-accounts"], Truthy),
    predicate(
        "share.specific-accounts.removed",
        ShareToAccounts,
        &["share-to-specific-accounts"],
        AnchorMode::SuffixMatch,
        EntryFilter::ArrayItemDeleted,
        Ignored,
        MessageTemplate::ArrayAccount,
    ),
    // NACLs
    path_edit("nacl.rules", Nacls, OU_NACLS, Truthy),
    item_removal("nacl.rules.removed", Nacls, OU_NACLS).depth(7),
    predicate(
        "nacl.subnet",
        Nacls,
        OU_NACLS_SUBNET,
        AnchorMode::ContainsAll,
        EntryFilter::AnyArrayChange,
        Ignored,
        MessageTemplate::ChangedPath,
    ),
    // opt-in VPCs
    path_edit("opt-in.workload", OptInVpcs, WORKLOAD_ACCOUNT_OPT_IN_VPC, Truthy),
    entry_deletion("opt-in.workload.deleted", OptInVpcs, WORKLOAD_ACCOUNT_OPT_IN_VPC, "opt-in-vpcs"),
    path_edit("opt-in.mandatory", OptInVpcs, ACCOUNT_OPT_IN_VPC, Truthy),
    entry_deletion("opt-in.mandatory.deleted", OptInVpcs, ACCOUNT_OPT_IN_VPC, "opt-in-vpcs"),
    // network firewall
    predicate(
        "nfw.deleted",
        NetworkFirewall,
        NFW,
        AnchorMode::ContainsAll,
        EntryFilter::Deleted,
        Ignored,
        MessageTemplate::FirewallDeleted,
    )
    .depth(5),
    predicate(
        "nfw.renamed",
        NetworkFirewall,
        NFW_NAME,
        AnchorMode::ContainsAll,
        EntryFilter::Edited,
        Ignored,
        MessageTemplate::FirewallRenamed,
    ),
    predicate(
        "nfw.name-deleted",
        NetworkFirewall,
        NFW_NAME,
        AnchorMode::ContainsAll,
        EntryFilter::Deleted,
        Ignored,
        MessageTemplate::FirewallNameDeleted,
    ),
];

/// Entries of `catalog` whose group is not suppressed, in catalog order.
pub fn select(catalog: &[PathPredicate], overrides: &Overrides) -> Vec<PathPredicate> {
    catalog
        .iter()
        .filter(|p| !overrides.suppresses(p.group))
        .copied()
        .collect()
}

/// Look a predicate up by id
pub fn find(id: &str) -> Option<&'static PathPredicate> {
    CATALOG.iter().find(|p| p.id == id)
}
