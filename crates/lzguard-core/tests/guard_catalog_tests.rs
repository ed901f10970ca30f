#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{catalog_violations, diff, endpoint_vpc, network_account, ou_with_vpc, rule_ids};
use lzguard_core::guard::catalog::select;
use lzguard_core::guard::{evaluate, prior_account_names, RuleGroup, CATALOG};
use lzguard_core::options::Overrides;
use lzguard_core::value::ConfigValue;
use serde_json::json;

// --- global options ---

#[test]
fn test_org_management_region_edit_blocked() {
    let previous = json!({"global-options": {"aws-org-management": {"account": "management", "region": "ca-central-1"}}});
    let current = json!({"global-options": {"aws-org-management": {"account": "management", "region": "us-east-1"}}});

    let violations = catalog_violations(previous, current);

    assert_eq!(rule_ids(&violations), vec!["global.org-management.region"]);
    assert_eq!(
        violations[0].message,
        "ConfigCheck: blocked changing config path \"global-options/aws-org-management/region\""
    );
}

#[test]
fn test_ct_baseline_edit_blocked_even_from_false() {
    let violations = catalog_violations(
        json!({"global-options": {"ct-baseline": false}}),
        json!({"global-options": {"ct-baseline": true}}),
    );
    assert_eq!(rule_ids(&violations), vec!["global.ct-baseline"]);
}

#[test]
fn test_unprotected_global_option_allowed() {
    let violations = catalog_violations(
        json!({"global-options": {"default-cwl-retention": 731}}),
        json!({"global-options": {"default-cwl-retention": 1827}}),
    );
    assert!(violations.is_empty());
}

// --- accounts ---

#[test]
fn test_account_email_and_ou_edits_blocked() {
    let violations = catalog_violations(
        json!({"workload-account-configs": {"dev": {"email": "dev@example.com", "ou": "dev"}}}),
        json!({"workload-account-configs": {"dev": {"email": "dev2@example.com", "ou": "core"}}}),
    );
    assert_eq!(rule_ids(&violations), vec!["account.email", "account.ou"]);
}

#[test]
fn test_nested_email_field_not_an_account_email() {
    // depth 3 only: budget alert emails live deeper
    let violations = catalog_violations(
        json!({"workload-account-configs": {"dev": {"budget": {"alerts": [{"emails": ["a@example.com"], "email": "x"}]}}}}),
        json!({"workload-account-configs": {"dev": {"budget": {"alerts": [{"emails": ["a@example.com"], "email": "y"}]}}}}),
    );
    assert!(violations.is_empty());
}

// --- account VPCs ---

#[test]
fn test_vpc_deletion_blocked() {
    let previous = network_account(endpoint_vpc());
    let mut current = previous.clone();
    current["mandatory-account-configs"]["shared-network"]
        .as_object_mut()
        .unwrap()
        .remove("vpc");

    let violations = catalog_violations(previous, current);

    assert_eq!(rule_ids(&violations), vec!["account.vpc.deleted"]);
    assert_eq!(
        violations[0].message,
        "ConfigCheck: blocked deleting  \"vpc\" from config path \"mandatory-account-configs/shared-network/vpc\""
    );
}

#[test]
fn test_vpc_region_edit_blocked() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["region"] = json!("us-east-1");

    let violations = catalog_violations(previous, network_account(vpc));

    assert_eq!(rule_ids(&violations), vec!["account.vpc.region"]);
    assert_eq!(
        violations[0].path.render(),
        "mandatory-account-configs/shared-network/vpc/0/region"
    );
}

#[test]
fn test_dedicated_tenancy_blocked_when_first_set() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["dedicated-tenancy"] = json!(true);

    let violations = catalog_violations(previous, network_account(vpc));

    assert_eq!(rule_ids(&violations), vec!["account.vpc.tenancy"]);
}

#[test]
fn test_vgw_asn_needs_truthy_prior() {
    let with_asn = |asn: i64| {
        let mut vpc = endpoint_vpc();
        vpc["vgw"] = json!({"asn": asn});
        network_account(vpc)
    };

    let violations = catalog_violations(with_asn(65000), with_asn(65001));
    assert_eq!(rule_ids(&violations), vec!["vgw.asn"]);

    assert!(catalog_violations(with_asn(0), with_asn(65001)).is_empty());
}

fn central_vpc() -> serde_json::Value {
    let mut vpc = endpoint_vpc();
    vpc["name"] = json!("Central");
    vpc["cidr"] = json!([{"value": "10.1.0.0/16"}]);
    vpc
}

#[test]
fn test_removing_first_of_two_vpcs_blocked() {
    let mut previous = network_account(endpoint_vpc());
    previous["mandatory-account-configs"]["shared-network"]["vpc"] = json!([endpoint_vpc(), central_vpc()]);
    let current = network_account(central_vpc());

    let violations = catalog_violations(previous, current);

    assert_eq!(rule_ids(&violations), vec!["account.vpc.removed"]);
    assert_eq!(
        violations[0].message,
        "ConfigCheck: blocked changing vpc from config path \
         \"mandatory-account-configs/shared-network/vpc\" (removed item 0 \"Endpoint\")"
    );
}

#[test]
fn test_removing_first_ou_vpc_blocked() {
    let mut previous = ou_with_vpc(endpoint_vpc());
    previous["organizational-units"]["dev"]["vpc"] = json!([endpoint_vpc(), central_vpc()]);

    let violations = catalog_violations(previous, ou_with_vpc(central_vpc()));

    assert_eq!(rule_ids(&violations), vec!["ou.vpc.removed"]);
}

#[test]
fn test_removing_first_vpc_cidr_blocked() {
    let mut vpc = endpoint_vpc();
    vpc["cidr"] = json!([{"value": "10.2.0.0/16"}, {"value": "100.96.252.0/23"}]);
    let previous = network_account(vpc.clone());
    vpc["cidr"].as_array_mut().unwrap().remove(0);

    let violations = catalog_violations(previous, network_account(vpc));

    assert_eq!(rule_ids(&violations), vec!["account.vpc.cidr.removed"]);
}

// --- subnets ---

#[test]
fn test_subnet_az_edit_blocked() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["subnets"][1]["definitions"][0]["az"] = json!("b");

    let violations = catalog_violations(previous, network_account(vpc));

    assert_eq!(rule_ids(&violations), vec!["account.subnet.az"]);
    assert_eq!(
        violations[0].path.render(),
        "mandatory-account-configs/shared-network/vpc/0/subnets/1/definitions/0/az"
    );
}

#[test]
fn test_subnet_disabled_blocked_only_from_falsy_prior() {
    let with_disabled = |disabled: bool| {
        let mut vpc = endpoint_vpc();
        vpc["subnets"][0]["definitions"][0]["disabled"] = json!(disabled);
        network_account(vpc)
    };

    let enabling_blocked = catalog_violations(with_disabled(false), with_disabled(true));
    assert_eq!(rule_ids(&enabling_blocked), vec!["account.subnet.disabled"]);

    assert!(catalog_violations(with_disabled(true), with_disabled(false)).is_empty());
}

#[test]
fn test_subnet_removal_names_removed_subnet() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["subnets"].as_array_mut().unwrap().remove(1);

    let violations = catalog_violations(previous, network_account(vpc));

    assert_eq!(rule_ids(&violations), vec!["account.subnet.removed"]);
    assert_eq!(
        violations[0].message,
        "ConfigCheck: blocked changing subnets from config path \
         \"mandatory-account-configs/shared-network/vpc/0/subnets\" (removed item 1 \"Web\")"
    );
}

#[test]
fn test_removing_first_subnet_definition_blocked() {
    let mut vpc = endpoint_vpc();
    vpc["subnets"][0]["definitions"] = json!([
        {"az": "a", "route-table": "Common", "cidr": {"value": "10.2.88.0/27"}},
        {"az": "b", "route-table": "Common", "cidr": {"value": "10.2.88.32/27"}}
    ]);
    let previous = network_account(vpc.clone());
    vpc["subnets"][0]["definitions"].as_array_mut().unwrap().remove(0);

    let violations = catalog_violations(previous, network_account(vpc));

    assert_eq!(rule_ids(&violations), vec!["account.subnet.definition.removed"]);
    assert_eq!(
        violations[0].path.render(),
        "mandatory-account-configs/shared-network/vpc/0/subnets/0/definitions"
    );
}

#[test]
fn test_subnet_addition_allowed() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["subnets"].as_array_mut().unwrap().push(json!({
        "name": "App",
        "definitions": [{"az": "a", "route-table": "Common", "cidr": {"value": "10.2.40.0/24"}}]
    }));

    assert!(catalog_violations(previous, network_account(vpc)).is_empty());
}

#[test]
fn test_reordered_subnets_allowed() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["subnets"].as_array_mut().unwrap().reverse();

    assert!(catalog_violations(previous, network_account(vpc)).is_empty());
}

#[test]
fn test_share_to_specific_accounts_removal_blocked() {
    let with_targets = |targets: serde_json::Value| {
        let mut vpc = endpoint_vpc();
        vpc["subnets"][1]["share-to-specific-accounts"] = targets;
        network_account(vpc)
    };

    let violations = catalog_violations(with_targets(json!(["dev", "test"])), with_targets(json!(["dev"])));

    assert_eq!(rule_ids(&violations), vec!["share.specific-accounts.removed"]);
    assert!(violations[0].message.ends_with("(removed item 1 \"test\")"));
}

// --- transit gateways and directories ---

#[test]
fn test_tgw_rename_blocked() {
    let tgw = |name: &str| {
        json!({"mandatory-account-configs": {"shared-network": {"deployments": {
            "tgw": [{"name": name, "region": "ca-central-1", "asn": 65521}]
        }}}})
    };

    let violations = catalog_violations(tgw("Main"), tgw("Core"));

    assert_eq!(rule_ids(&violations), vec!["tgw.name"]);
}

#[test]
fn test_removing_first_of_two_tgws_blocked() {
    let tgws = |names: &[&str]| {
        let list: Vec<serde_json::Value> = names
            .iter()
            .map(|name| json!({"name": name, "region": "ca-central-1", "asn": 65521}))
            .collect();
        json!({"mandatory-account-configs": {"shared-network": {"deployments": {"tgw": list}}}})
    };

    let violations = catalog_violations(tgws(&["Main", "Core"]), tgws(&["Core"]));

    assert_eq!(rule_ids(&violations), vec!["tgw.removed"]);
    assert!(violations[0].message.ends_with("(removed item 0 \"Main\")"));
}

#[test]
fn test_mad_dir_id_edit_blocked() {
    let mad = |dir_id: i64| {
        json!({"mandatory-account-configs": {"operations": {"deployments": {
            "mad": {"dir-id": dir_id, "deploy": true, "vpc-name": "Central"}
        }}}})
    };

    let violations = catalog_violations(mad(1001), mad(1002));

    assert_eq!(rule_ids(&violations), vec!["mad.dir-id"]);
}

// --- OUs ---

#[test]
fn test_ou_subnet_rename_blocked() {
    let previous = ou_with_vpc(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["subnets"][0]["name"] = json!("Transit");

    let violations = catalog_violations(previous, ou_with_vpc(vpc));

    assert_eq!(rule_ids(&violations), vec!["ou.subnet.name"]);
}

#[test]
fn test_ou_nacl_rule_and_subnet_list_changes_blocked() {
    let with_nacl = |rule: i64, subnets: serde_json::Value| {
        let mut vpc = endpoint_vpc();
        vpc["subnets"][0]["nacls"] = json!([{
            "rule": rule,
            "protocol": -1,
            "ports": -1,
            "rule-action": "deny",
            "egress": false,
            "cidr-blocks": [{"vpc": "Endpoint", "subnet": subnets}]
        }]);
        ou_with_vpc(vpc)
    };

    let rule_edit = catalog_violations(with_nacl(100, json!(["Web"])), with_nacl(110, json!(["Web"])));
    assert_eq!(rule_ids(&rule_edit), vec!["nacl.rules"]);

    let subnet_edit = catalog_violations(
        with_nacl(100, json!(["Web"])),
        with_nacl(100, json!(["Web", "TGW"])),
    );
    assert_eq!(rule_ids(&subnet_edit), vec!["nacl.subnet"]);
}

fn with_nacl_rules(rules: serde_json::Value) -> serde_json::Value {
    let mut vpc = endpoint_vpc();
    vpc["subnets"][0]["nacls"] = rules;
    ou_with_vpc(vpc)
}

#[test]
fn test_nacl_cidr_block_changing_shape_blocked() {
    let rule = |cidr_blocks: serde_json::Value| {
        with_nacl_rules(json!([{
            "rule": 100,
            "protocol": -1,
            "ports": -1,
            "rule-action": "deny",
            "egress": false,
            "cidr-blocks": cidr_blocks
        }]))
    };

    let violations = catalog_violations(
        rule(json!(["10.0.0.0/8"])),
        rule(json!([{"vpc": "Central", "subnet": ["App"]}])),
    );

    assert_eq!(rule_ids(&violations), vec!["nacl.rules"]);
    assert_eq!(
        violations[0].path.render(),
        "organizational-units/dev/vpc/0/subnets/0/nacls/0/cidr-blocks/0"
    );
}

#[test]
fn test_removing_first_nacl_rule_blocked() {
    let rule = |number: i64| {
        json!({
            "rule": number,
            "protocol": -1,
            "ports": -1,
            "rule-action": "deny",
            "egress": false,
            "cidr-blocks": ["10.0.0.0/8"]
        })
    };

    let violations = catalog_violations(
        with_nacl_rules(json!([rule(100), rule(200)])),
        with_nacl_rules(json!([rule(200)])),
    );

    assert_eq!(rule_ids(&violations), vec!["nacl.rules.removed"]);
}

// --- opt-in VPCs ---

#[test]
fn test_opt_in_vpc_edit_and_deletion_blocked() {
    let workload = |opt_in: serde_json::Value| {
        json!({"workload-account-configs": {"MyProdAccount": {"ou": "prod", "opt-in-vpcs": opt_in}}})
    };

    let edited = catalog_violations(workload(json!(["Dev"])), workload(json!(["Prod"])));
    assert_eq!(rule_ids(&edited), vec!["opt-in.workload"]);

    let deleted = catalog_violations(
        workload(json!(["Dev"])),
        json!({"workload-account-configs": {"MyProdAccount": {"ou": "prod"}}}),
    );
    assert_eq!(rule_ids(&deleted), vec!["opt-in.workload.deleted"]);
    assert_eq!(
        deleted[0].message,
        "ConfigCheck: blocked deleting  \"opt-in-vpcs\" from config path \
         \"workload-account-configs/MyProdAccount/opt-in-vpcs\""
    );
}

#[test]
fn test_mandatory_opt_in_vpc_edit_blocked() {
    let mandatory = |opt_in: &str| {
        json!({"mandatory-account-configs": {"MyProdAccount": {"opt-in-vpcs": [opt_in]}}})
    };

    let violations = catalog_violations(mandatory("Dev"), mandatory("Prod"));

    assert_eq!(rule_ids(&violations), vec!["opt-in.mandatory"]);
}

#[test]
fn test_opt_in_vpcs_of_other_accounts_unprotected() {
    let workload = |opt_in: &str| {
        json!({"workload-account-configs": {"dev": {"ou": "dev", "opt-in-vpcs": [opt_in]}}})
    };

    assert!(catalog_violations(workload("Dev"), workload("Prod")).is_empty());
}

// --- network firewall ---

#[test]
fn test_firewall_rename_and_deletion_messages() {
    let with_nfw = |nfw: serde_json::Value| {
        let mut vpc = endpoint_vpc();
        vpc["nfw"] = nfw;
        network_account(vpc)
    };
    let nfw = |name: &str| json!({"firewall-name": name, "subnet": {"name": "TGW"}});

    let renamed = catalog_violations(with_nfw(nfw("Perimeter")), with_nfw(nfw("Edge")));
    assert_eq!(rule_ids(&renamed), vec!["nfw.renamed"]);
    assert_eq!(
        renamed[0].message,
        "Firewall name has changed from Perimeter to Edge in \
         mandatory-account-configs/shared-network/vpc/0/nfw/firewall-name. \
         Changing the firewall name will cause the replacement of the firewall."
    );

    let previous = with_nfw(nfw("Perimeter"));
    let deleted = catalog_violations(previous, network_account(endpoint_vpc()));
    assert_eq!(rule_ids(&deleted), vec!["nfw.deleted"]);
    assert_eq!(
        deleted[0].message,
        "Firewall has been deleted from path mandatory-account-configs/shared-network/vpc/0/nfw. \
         This is not allowed."
    );
}

// --- account deletion ---

#[test]
fn test_account_deletion_reported_before_catalog() {
    let previous = json!({
        "mandatory-account-configs": {"shared-network": {"email": "n@example.com"}},
        "workload-account-configs": {"dev": {"email": "dev@example.com", "ou": "dev"}}
    });
    let current = json!({
        "mandatory-account-configs": {"shared-network": {"email": "network@example.com"}},
        "workload-account-configs": {}
    });
    let names = prior_account_names(&ConfigValue::from_json(&previous));

    let violations = evaluate(CATALOG, &diff(previous, current), &names);

    assert_eq!(rule_ids(&violations), vec!["account.deleted", "account.email"]);
    assert!(violations[0].message.contains("\"dev\""));
}

// --- overrides ---

#[test]
fn test_suppressed_group_contributes_nothing() {
    let previous = network_account(endpoint_vpc());
    let mut vpc = endpoint_vpc();
    vpc["region"] = json!("us-east-1");
    vpc["subnets"][1]["definitions"][0]["az"] = json!("b");
    let entries = diff(previous, network_account(vpc));

    let all = evaluate(CATALOG, &entries, &[]);
    assert_eq!(rule_ids(&all), vec!["account.vpc.region", "account.subnet.az"]);

    let predicates = select(CATALOG, &Overrides::from_groups([RuleGroup::AccountVpc]));
    let filtered = evaluate(&predicates, &entries, &[]);
    assert_eq!(rule_ids(&filtered), vec!["account.subnet.az"]);
}
