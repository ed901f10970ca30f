//! Per-account deployments: transit gateways, directory services, log
//! forwarders, firewalls and load balancers.

use super::network::{security_group, tgw_attach};
use crate::schema::build::*;
use crate::schema::{DefaultValue, SchemaNode};

fn tags() -> SchemaNode {
    map_of(string())
}

fn tgw_route() -> SchemaNode {
    record(
        "TransitGatewayRouteConfig",
        vec![
            required("destination", non_empty()),
            optional("target-tgw", non_empty()),
            optional("target-vpc", non_empty()),
            optional("target-account", non_empty()),
            optional(
                "target-vpn",
                record(
                    "TransitGatewayVpnTarget",
                    vec![
                        required("name", non_empty()),
                        required("az", non_empty()),
                        required("subnet", non_empty()),
                    ],
                ),
            ),
            optional("blackhole-route", boolean()),
        ],
    )
}

pub fn tgw() -> SchemaNode {
    record(
        "TgwDeploymentConfig",
        vec![
            required("name", non_empty()),
            required("region", region()),
            optional("asn", number()),
            optional(
                "features",
                record(
                    "TgwFeatures",
                    vec![
                        required("DNS-support", boolean()),
                        required("VPN-ECMP-support", boolean()),
                        required("Default-route-table-association", boolean()),
                        required("Default-route-table-propagation", boolean()),
                        required("Auto-accept-sharing-attachments", boolean()),
                    ],
                ),
            ),
            optional("route-tables", array(non_empty())),
            optional(
                "tgw-attach",
                record(
                    "TransitGatewayAttachDeploymentConfig",
                    vec![
                        required("associate-to-tgw", non_empty()),
                        required("account", non_empty()),
                        required("region", non_empty()),
                        required("tgw-rt-associate-local", array(non_empty())),
                        required("tgw-rt-associate-remote", array(non_empty())),
                    ],
                ),
            ),
            optional(
                "tgw-routes",
                array(record(
                    "TransitGatewayRouteTablesConfig",
                    vec![
                        required("name", non_empty()),
                        optional("routes", array(tgw_route())),
                    ],
                )),
            ),
        ],
    )
}

fn ad_user() -> SchemaNode {
    record(
        "ADUserConfig",
        vec![
            required("user", non_empty()),
            required("email", non_empty()),
            required("groups", array(non_empty())),
        ],
    )
}

pub fn mad() -> SchemaNode {
    let password_policies = record(
        "PasswordPolicy",
        vec![
            required("history", number()),
            required("max-age", number()),
            required("min-age", number()),
            required("min-len", number()),
            required("complexity", boolean()),
            required("reversible", boolean()),
            required("failed-attempts", number()),
            required("lockout-duration", number()),
            required("lockout-attempts-reset", number()),
        ],
    );
    record(
        "MadConfig",
        vec![
            optional("description", non_empty()),
            required("dir-id", number()),
            required("deploy", boolean()),
            required("vpc-name", non_empty()),
            required("region", non_empty()),
            required("subnet", non_empty()),
            list("azs", non_empty()),
            required("size", non_empty()),
            required("image-path", non_empty()),
            required("dns-domain", non_empty()),
            required("netbios-domain", non_empty()),
            required("central-resolver-rule-account", non_empty()),
            required("central-resolver-rule-vpc", non_empty()),
            required("log-group-name", non_empty()),
            optional("share-to-account", non_empty()),
            required("restrict_srcips", array(cidr())),
            required("rdgw-instance-type", non_empty()),
            required("rdgw-instance-role", non_empty()),
            flag("rdgw-enforce-imdsv2", false),
            required("num-rdgw-hosts", number()),
            required("rdgw-max-instance-age", number()),
            required("min-rdgw-hosts", number()),
            required("max-rdgw-hosts", number()),
            required("password-policies", password_policies),
            required("ad-groups", array(non_empty())),
            required("ad-per-account-groups", array(non_empty())),
            required("adc-group", non_empty()),
            required("ad-users", array(ad_user())),
            required("security-groups", array(security_group())),
            optional("password-secret-name", non_empty()),
        ],
    )
}

fn rsyslog() -> SchemaNode {
    let subnet = || {
        record(
            "RsyslogSubnetConfig",
            vec![required("name", non_empty()), required("az", non_empty())],
        )
    };
    record(
        "RsyslogConfig",
        vec![
            required("deploy", boolean()),
            required("vpc-name", non_empty()),
            required("region", non_empty()),
            required("log-group-name", non_empty()),
            required("security-groups", array(security_group())),
            required("app-subnets", array(subnet())),
            required("web-subnets", array(subnet())),
            required("min-rsyslog-hosts", number()),
            required("desired-rsyslog-hosts", number()),
            required("max-rsyslog-hosts", number()),
            required("ssm-image-id", non_empty()),
            required("rsyslog-instance-type", non_empty()),
            required("rsyslog-instance-role", non_empty()),
            flag("rsyslog-enforce-imdsv2", false),
            required("rsyslog-root-volume-size", number()),
            required("rsyslog-max-instance-age", number()),
            optional("user-data", non_empty()),
        ],
    )
}

fn adc() -> SchemaNode {
    record(
        "AdcConfig",
        vec![
            required("deploy", boolean()),
            required("vpc-name", non_empty()),
            required("subnet", non_empty()),
            list("azs", non_empty()),
            required("size", non_empty()),
            required("restrict_srcips", array(cidr())),
            required("connect-account-key", non_empty()),
            required("connect-dir-id", number()),
        ],
    )
}

/// `tgw-attach` on firewalls: an attachment, a bare flag, or absent
fn firewall_tgw_attach() -> SchemaNode {
    union(
        "TransitGatewayAttachConfig | boolean",
        vec![tgw_attach(), boolean()],
    )
}

fn firewall_port() -> SchemaNode {
    record(
        "FirewallPortConfig",
        vec![
            required("name", non_empty()),
            required("subnet", non_empty()),
            required("create-eip", boolean()),
            required("create-cgw", boolean()),
            optional(
                "private-ips",
                array(record(
                    "FirewallPortConfigPrivateIp",
                    vec![required("az", string()), required("ip", string())],
                )),
            ),
        ],
    )
}

pub fn firewall() -> SchemaNode {
    tagged(
        "FirewallConfig",
        "type",
        vec![
            default_variant(
                "EC2",
                "FirewallEC2Config",
                vec![
                    defaulted("type", literal("EC2"), DefaultValue::Str("EC2")),
                    flag("deploy", true),
                    required("name", non_empty()),
                    required("instance-sizes", non_empty()),
                    required("image-id", non_empty()),
                    flag("enforce-imdsv2", false),
                    required("region", non_empty()),
                    required("vpc", non_empty()),
                    required("security-group", non_empty()),
                    required("ports", array(firewall_port())),
                    optional("license", array(non_empty())),
                    optional("config", non_empty()),
                    required("fw-instance-role", non_empty()),
                    required("fw-cgw-name", non_empty()),
                    required("fw-cgw-asn", number()),
                    required("fw-cgw-routing", non_empty()),
                    optional("tgw-attach", firewall_tgw_attach()),
                    required("block-device-mappings", array(string())),
                    optional("user-data", non_empty()),
                    optional("bootstrap", non_empty()),
                    optional("apply-tags", tags()),
                ],
            ),
            variant(
                "CGW",
                "FirewallCGWConfig",
                vec![
                    required("type", literal("CGW")),
                    flag("deploy", false),
                    required("name", non_empty()),
                    required("region", non_empty()),
                    required("fw-ips", array(non_empty())),
                    required("fw-cgw-name", non_empty()),
                    required("fw-cgw-asn", number()),
                    required("fw-cgw-routing", non_empty()),
                    optional("tgw-attach", firewall_tgw_attach()),
                    optional("apply-tags", tags()),
                ],
            ),
            variant(
                "autoscale",
                "FirewallAutoScaleConfig",
                vec![
                    required("type", literal("autoscale")),
                    flag("deploy", false),
                    required("name", non_empty()),
                    required("instance-sizes", non_empty()),
                    required("image-id", non_empty()),
                    required("region", non_empty()),
                    required("vpc", non_empty()),
                    required("subnet", non_empty()),
                    required("security-group", non_empty()),
                    flag("enforce-imdsv2", false),
                    optional("fw-instance-role", string()),
                    optional("user-data", string()),
                    optional("bootstrap", non_empty()),
                    required("root-volume-size", number()),
                    required("min-hosts", number()),
                    required("max-hosts", number()),
                    required("desired-hosts", number()),
                    required("max-instance-age", number()),
                    required("load-balancer", non_empty()),
                    optional("key-pair", non_empty()),
                    required("block-device-mappings", array(string())),
                    flag("create-eip", false),
                    optional("cpu-utilization-scale-in", number()),
                    optional("cpu-utilization-scale-out", number()),
                    optional("apply-tags", tags()),
                ],
            ),
        ],
    )
}

fn firewall_manager() -> SchemaNode {
    record(
        "FirewallManagerConfig",
        vec![
            required("name", non_empty()),
            required("instance-sizes", non_empty()),
            required("image-id", non_empty()),
            flag("enforce-imdsv2", false),
            required("region", non_empty()),
            required("vpc", non_empty()),
            required("security-group", non_empty()),
            required(
                "subnet",
                record(
                    "FirewallManagerSubnet",
                    vec![required("name", non_empty()), required("az", non_empty())],
                ),
            ),
            required("create-eip", boolean()),
            optional("user-data", string()),
            optional("bootstrap", non_empty()),
            optional("key-pair", non_empty()),
            required("block-device-mappings", array(string())),
            optional("apply-tags", tags()),
            optional("fw-instance-role", string()),
        ],
    )
}

pub fn deployments() -> SchemaNode {
    record(
        "DeploymentConfig",
        vec![
            optional("tgw", array(tgw())),
            optional("mad", mad()),
            optional("rsyslog", rsyslog()),
            optional("adc", adc()),
            optional("firewalls", array(firewall())),
            optional("firewall-manager", firewall_manager()),
        ],
    )
}

fn elb_target() -> SchemaNode {
    record(
        "ElbTargetConfig",
        vec![
            required("target-name", non_empty()),
            required("target-type", non_empty()),
            optional("protocol", non_empty()),
            optional("port", number()),
            optional("health-check-protocol", non_empty()),
            optional("health-check-path", non_empty()),
            optional("health-check-port", number()),
            optional("lambda-filename", non_empty()),
            optional(
                "target-instances",
                array(record(
                    "ElbTargetInstanceFirewallConfig",
                    vec![
                        required("target", literal("firewall")),
                        required("name", non_empty()),
                        required("az", non_empty()),
                    ],
                )),
            ),
            optional("tg-weight", number()),
        ],
    )
}

pub fn load_balancer() -> SchemaNode {
    let mut alb_fields = vec![
        defaulted("type", literal("ALB"), DefaultValue::Str("ALB")),
        required("name", string()),
        required("scheme", string()),
        required("action-type", string()),
        required("ip-type", string()),
        required("listeners", string()),
        required("ports", number()),
        required("vpc", string()),
        required("subnets", string()),
        required("cert-name", string()),
        optional("cert-arn", string()),
        required("security-policy", string()),
        required("security-group", string()),
        optional("tg-stickiness", string()),
    ];
    for alarm in [
        "target-alarms-notify",
        "target-alarms-when",
        "target-alarms-of",
        "target-alarms-is",
        "target-alarms-Count",
        "target-alarms-for",
        "target-alarms-periods-of",
    ] {
        alb_fields.push(optional(alarm, string()));
    }
    alb_fields.extend([
        flag("access-logs", false),
        required("targets", array(elb_target())),
        optional("apply-tags", tags()),
    ]);

    tagged(
        "LoadBalancerConfig",
        "type",
        vec![
            default_variant("ALB", "AlbConfig", alb_fields),
            variant(
                "GWLB",
                "GwlbConfig",
                vec![
                    required("type", literal("GWLB")),
                    required("name", non_empty()),
                    required("action-type", non_empty()),
                    required("ip-type", non_empty()),
                    required("vpc", non_empty()),
                    required("subnets", non_empty()),
                    required("targets", array(elb_target())),
                    flag("cross-zone", false),
                    required(
                        "endpoint-subnets",
                        array(record(
                            "AccountVpcConfig",
                            vec![
                                defaulted("account", non_empty(), DefaultValue::Str("local")),
                                required("vpc", non_empty()),
                                required("subnet", non_empty()),
                            ],
                        )),
                    ),
                    optional("apply-tags", tags()),
                ],
            ),
        ],
    )
}
