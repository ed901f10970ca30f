//! Account and organizational-unit shapes.

use super::deployments::{deployments, load_balancer};
use super::network::vpc;
use crate::schema::build::*;
use crate::schema::{DefaultValue, SchemaNode};

fn iam() -> SchemaNode {
    record(
        "IamConfig",
        vec![
            optional(
                "users",
                array(record(
                    "IamUserConfig",
                    vec![
                        required("user-ids", array(non_empty())),
                        required("group", non_empty()),
                        required("policies", array(non_empty())),
                        required("boundary-policy", non_empty()),
                    ],
                )),
            ),
            optional(
                "policies",
                array(record(
                    "IamPolicyConfig",
                    vec![
                        required("policy-name", non_empty()),
                        required("policy", non_empty()),
                    ],
                )),
            ),
            optional(
                "roles",
                array(record(
                    "IamRoleConfig",
                    vec![
                        required("role", non_empty()),
                        required("type", non_empty()),
                        required("policies", array(non_empty())),
                        required("boundary-policy", non_empty()),
                        optional("source-account", non_empty()),
                        optional("source-account-role", non_empty()),
                        optional("trust-policy", non_empty()),
                        optional("ssm-log-archive-access", boolean()),
                        optional("ssm-log-archive-write-access", boolean()),
                        optional("ssm-log-archive-read-only-access", boolean()),
                        optional("meta-data-read-only-access", boolean()),
                    ],
                )),
            ),
        ],
    )
}

fn certificate() -> SchemaNode {
    union(
        "CertificateConfig",
        vec![
            record(
                "ImportCertificateConfig",
                vec![
                    required("name", non_empty()),
                    required("type", literal("import")),
                    required("priv-key", non_empty()),
                    required("cert", non_empty()),
                    optional("chain", non_empty()),
                ],
            ),
            record(
                "RequestCertificateConfig",
                vec![
                    required("name", non_empty()),
                    required("type", literal("request")),
                    required("domain", non_empty()),
                    required("validation", enumeration("CertificateValidation", &["DNS", "EMAIL"])),
                    optional("san", array(non_empty())),
                ],
            ),
        ],
    )
}

fn budget() -> SchemaNode {
    record(
        "BudgetConfig",
        vec![
            required("name", non_empty()),
            required("period", non_empty()),
            required("amount", number()),
            required("include", array(non_empty())),
            required(
                "alerts",
                array(record(
                    "BudgetNotification",
                    vec![
                        required("type", non_empty()),
                        required("threshold-percent", number()),
                        required("emails", array(non_empty())),
                    ],
                )),
            ),
        ],
    )
}

fn ssm_share_automation() -> SchemaNode {
    record(
        "SsmShareAutomation",
        vec![
            required("account", non_empty()),
            required("regions", array(non_empty())),
            required("documents", array(non_empty())),
        ],
    )
}

pub fn account() -> SchemaNode {
    record(
        "MandatoryAccountConfig",
        vec![
            optional("gui-perm", boolean()),
            required("account-name", non_empty()),
            optional("description", non_empty()),
            required("email", non_empty()),
            required("ou", non_empty()),
            optional("ou-path", non_empty()),
            optional("share-mad-from", non_empty()),
            flag("enable-s3-public-access", false),
            optional("iam", iam()),
            defaulted(
                "limits",
                map_of(record(
                    "LimitConfig",
                    vec![
                        required("value", number()),
                        flag("customer-confirm-inplace", false),
                    ],
                )),
                DefaultValue::EmptyMap,
            ),
            optional("certificates", array(certificate())),
            optional("vpc", array(vpc())),
            optional("deployments", deployments()),
            optional("alb", array(load_balancer())),
            optional("s3-retention", number()),
            optional("budget", budget()),
            optional("account-warming-required", boolean()),
            optional("cwl-retention", number()),
            flag("deleted", false),
            required("src-filename", non_empty()),
            optional("exclude-ou-albs", boolean()),
            list("keep-default-vpc-regions", non_empty()),
            flag("populate-all-elbs-in-param-store", false),
            list("ssm-automation", ssm_share_automation()),
            optional("ssm-inventory-collection", boolean()),
            list(
                "aws-config",
                record(
                    "AwsConfigAccountConfig",
                    vec![
                        required("regions", array(non_empty())),
                        required("excl-rules", array(non_empty())),
                    ],
                ),
            ),
            optional("scps", array(non_empty())),
            optional("opt-in-vpcs", array(non_empty())),
            list(
                "key-pairs",
                record(
                    "KeyPairConfig",
                    vec![required("name", non_empty()), required("region", non_empty())],
                ),
            ),
            list(
                "secrets",
                record(
                    "SecretConfig",
                    vec![
                        required("name", non_empty()),
                        required("region", string()),
                        required("size", number()),
                    ],
                ),
            ),
        ],
    )
}

pub fn organizational_unit() -> SchemaNode {
    record(
        "OrganizationalUnitConfig",
        vec![
            optional("gui-perm", boolean()),
            optional("description", non_empty()),
            required("type", non_empty()),
            required("scps", array(non_empty())),
            optional("share-mad-from", non_empty()),
            optional("certificates", array(certificate())),
            optional("iam", iam()),
            optional("alb", array(load_balancer())),
            optional("vpc", array(vpc())),
            optional("default-budgets", budget()),
            list("ssm-automation", ssm_share_automation()),
            list(
                "aws-config",
                record(
                    "AwsConfigRules",
                    vec![
                        required("excl-regions", array(non_empty())),
                        required("rules", array(non_empty())),
                        optional("remediate-regions", array(non_empty())),
                    ],
                ),
            ),
            optional("ssm-inventory-collection", boolean()),
        ],
    )
}
