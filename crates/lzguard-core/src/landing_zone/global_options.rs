//! `global-options` section.

use crate::schema::build::*;
use crate::schema::{DefaultValue, SchemaNode};

pub const SECURITY_HUB_FINDINGS_SNS: &[&str] = &["None", "Low", "Medium", "High", "Critical"];
pub const FIREWALL_MANAGER_ALERT_LEVELS: &[&str] = &["None", "Low", "Medium", "High"];
pub const FLOW_LOGS_FILTERS: &[&str] = &["ACCEPT", "REJECT", "ALL"];
pub const FLOW_LOGS_INTERVALS: &[i64] = &[60, 600];

fn regions() -> SchemaNode {
    array(non_empty())
}

pub fn central_services() -> SchemaNode {
    record(
        "CentralServicesConfig",
        vec![
            required("account", non_empty()),
            required("region", region()),
            flag("security-hub", false),
            optional("security-hub-excl-regions", regions()),
            flag("guardduty", false),
            optional("guardduty-excl-regions", regions()),
            flag("guardduty-s3", false),
            optional("guardduty-s3-excl-regions", regions()),
            flag("access-analyzer", false),
            flag("cwl", false),
            optional("cwl-access-level", non_empty()),
            optional("cwl-glbl-exclusions", array(non_empty())),
            flag("ssm-to-s3", false),
            flag("ssm-to-cwl", false),
            optional(
                "cwl-exclusions",
                array(record(
                    "CwlExclusions",
                    vec![
                        required("account", non_empty()),
                        required("exclusions", array(non_empty())),
                    ],
                )),
            ),
            optional("kinesis-stream-shard-count", number()),
            flag("macie", false),
            optional("macie-excl-regions", regions()),
            optional("macie-frequency", non_empty()),
            optional("config-excl-regions", regions()),
            optional("config-aggr-excl-regions", regions()),
            optional("sns-excl-regions", regions()),
            defaulted(
                "sns-subscription-emails",
                map_of(array(non_empty())),
                DefaultValue::EmptyMap,
            ),
            optional("s3-retention", number()),
            flag("add-sns-topics", false),
            flag("macie-sensitive-sh", false),
            defaulted(
                "fw-mgr-alert-level",
                enumeration("FirewallManagerAlertLevelType", FIREWALL_MANAGER_ALERT_LEVELS),
                DefaultValue::Str("Medium"),
            ),
            defaulted(
                "security-hub-findings-sns",
                enumeration("SecurityHubFindingsSnsType", SECURITY_HUB_FINDINGS_SNS),
                DefaultValue::Str("None"),
            ),
            flag("config-aggr", false),
            optional(
                "dynamic-s3-log-partitioning",
                array(record(
                    "S3LogPartition",
                    vec![
                        required("logGroupPattern", non_empty()),
                        required("s3Prefix", non_empty()),
                    ],
                )),
            ),
        ],
    )
}

fn reports() -> SchemaNode {
    record(
        "ReportsConfig",
        vec![required(
            "cost-and-usage-report",
            record(
                "CostAndUsageReportConfig",
                vec![
                    required("additional-schema-elements", array(non_empty())),
                    required("compression", non_empty()),
                    required("format", non_empty()),
                    required("report-name", non_empty()),
                    required("s3-prefix", non_empty()),
                    required("time-unit", non_empty()),
                    required("additional-artifacts", array(non_empty())),
                    required("refresh-closed-reports", boolean()),
                    required("report-versioning", non_empty()),
                ],
            ),
        )],
    )
}

fn security_hub_frameworks() -> SchemaNode {
    record(
        "SecurityHubFrameworksConfig",
        vec![required(
            "standards",
            array(record(
                "SecurityHubStandard",
                vec![
                    required("name", non_empty()),
                    optional("controls-to-disable", array(non_empty())),
                ],
            )),
        )],
    )
}

fn iam_password_policy() -> SchemaNode {
    record(
        "IamAccountPasswordPolicy",
        vec![
            required("allow-users-to-change-password", boolean()),
            required("hard-expiry", boolean()),
            required("require-uppercase-characters", boolean()),
            required("require-lowercase-characters", boolean()),
            required("require-symbols", boolean()),
            required("require-numbers", boolean()),
            required("minimum-password-length", number()),
            required("password-reuse-prevention", number()),
            required("max-password-age", number()),
        ],
    )
}

fn cloudwatch() -> SchemaNode {
    let metric = record(
        "CloudWatchMetricFiltersConfig",
        vec![
            required("filter-name", non_empty()),
            required("accounts", array(non_empty())),
            required("regions", array(non_empty())),
            required("loggroup-name", non_empty()),
            required("filter-pattern", non_empty()),
            required("metric-namespace", non_empty()),
            required("metric-name", non_empty()),
            required("metric-value", non_empty()),
            optional("default-value", number()),
        ],
    );
    let alarm = record(
        "CloudWatchAlarmDefinitionConfig",
        vec![
            optional("accounts", array(non_empty())),
            optional("regions", array(non_empty())),
            optional("namespace", non_empty()),
            optional("statistic", non_empty()),
            optional("period", number()),
            optional("threshold-type", non_empty()),
            optional("comparison-operator", non_empty()),
            optional("threshold", number()),
            optional("evaluation-periods", number()),
            optional("treat-missing-data", non_empty()),
            required("alarm-name", non_empty()),
            required("metric-name", non_empty()),
            required("sns-alert-level", non_empty()),
            required("alarm-description", non_empty()),
            optional("in-org-mgmt-use-lcl-sns", boolean()),
        ],
    );
    let alarms = record(
        "CloudWatchAlarmsConfig",
        vec![
            required("default-accounts", array(non_empty())),
            required("default-regions", array(non_empty())),
            required("default-namespace", non_empty()),
            required("default-statistic", non_empty()),
            required("default-period", number()),
            required("default-threshold-type", non_empty()),
            required("default-comparison-operator", non_empty()),
            required("default-threshold", number()),
            required("default-evaluation-periods", number()),
            required("default-treat-missing-data", non_empty()),
            flag("default-in-org-mgmt-use-lcl-sns", false),
            required("definitions", array(alarm)),
        ],
    );
    record(
        "CloudWatchConfig",
        vec![required("metrics", array(metric)), required("alarms", alarms)],
    )
}

fn ssm_automation() -> SchemaNode {
    record(
        "SsmAutomation",
        vec![
            required("accounts", array(non_empty())),
            required("regions", array(non_empty())),
            required(
                "documents",
                array(record(
                    "SsmDocument",
                    vec![
                        required("name", non_empty()),
                        required("description", non_empty()),
                        required("template", non_empty()),
                    ],
                )),
            ),
        ],
    )
}

fn aws_config() -> SchemaNode {
    let rule = record(
        "AwsConfigRule",
        vec![
            required("name", non_empty()),
            optional("remediation", boolean()),
            optional("remediation-attempts", number()),
            optional("remediation-retry-seconds", number()),
            optional("remediation-concurrency", number()),
            optional("remediation-action", non_empty()),
            defaulted(
                "remediation-params",
                map_of(union(
                    "NonEmptyString | Array<NonEmptyString>",
                    vec![non_empty(), array(non_empty())],
                )),
                DefaultValue::EmptyMap,
            ),
            defaulted("parameters", map_of(non_empty()), DefaultValue::EmptyMap),
            defaulted(
                "type",
                enumeration("ConfigRuleType", &["managed", "custom"]),
                DefaultValue::Str("managed"),
            ),
            optional("max-frequency", non_empty()),
            list("resource-types", non_empty()),
            optional("runtime", non_empty()),
            optional("runtime-path", non_empty()),
        ],
    );
    record(
        "AwsConfig",
        vec![
            required(
                "defaults",
                record(
                    "AwsConfigRuleDefaults",
                    vec![
                        required("remediation", boolean()),
                        required("remediation-attempts", number()),
                        required("remediation-retry-seconds", number()),
                        required("remediation-concurrency", number()),
                    ],
                ),
            ),
            required("rules", array(rule)),
        ],
    )
}

pub fn global_options() -> SchemaNode {
    record(
        "GlobalOptionsConfig",
        vec![
            required("ct-baseline", boolean()),
            required("default-s3-retention", number()),
            required("central-bucket", non_empty()),
            required("reports", reports()),
            required("security-hub-frameworks", security_hub_frameworks()),
            required("central-security-services", central_services()),
            required("central-operations-services", central_services()),
            required("central-log-services", central_services()),
            required("aws-org-management", central_services()),
            required(
                "scps",
                array(record(
                    "ScpsConfig",
                    vec![
                        required("name", non_empty()),
                        required("description", non_empty()),
                        required("policy", non_empty()),
                    ],
                )),
            ),
            optional("organization-admin-role", non_empty()),
            required("supported-regions", array(non_empty())),
            list("keep-default-vpc-regions", non_empty()),
            optional("iam-password-policies", iam_password_policy()),
            required("default-cwl-retention", number()),
            optional("ignored-ous", array(non_empty())),
            flag("install-cloudformation-master-role", true),
            optional("workloadaccounts-prefix", non_empty()),
            optional("workloadaccounts-suffix", number()),
            required("workloadaccounts-param-filename", non_empty()),
            required(
                "vpc-flow-logs",
                record(
                    "VpcFlowLogsConfig",
                    vec![
                        required("filter", enumeration("FlowLogsFilterTypes", FLOW_LOGS_FILTERS)),
                        required(
                            "interval",
                            number_enum("FlowLogsIntervalTypes", FLOW_LOGS_INTERVALS),
                        ),
                        required("default-format", boolean()),
                        required("custom-fields", array(non_empty())),
                    ],
                ),
            ),
            defaulted(
                "additional-cwl-regions",
                map_of(record(
                    "AdditionalCwlRegion",
                    vec![optional("kinesis-stream-shard-count", number())],
                )),
                DefaultValue::EmptyMap,
            ),
            list("additional-global-output-regions", non_empty()),
            flag("separate-s3-dp-org-trail", false),
            optional("cloudwatch", cloudwatch()),
            list("ssm-automation", ssm_automation()),
            optional("aws-config", aws_config()),
            list("default-ssm-documents", non_empty()),
            optional("endpoint-port-overrides", map_of(array(non_empty()))),
            list("control-tower-supported-regions", non_empty()),
            list(
                "cidr-pools",
                record(
                    "CidrPoolConfig",
                    vec![
                        required("pool", non_empty()),
                        required("region", non_empty()),
                        required("cidr", cidr()),
                        optional("description", non_empty()),
                    ],
                ),
            ),
            flag("meta-data-collection", false),
        ],
    )
}
