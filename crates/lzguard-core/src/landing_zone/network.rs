//! VPC, subnet, routing and security-group shapes.

use crate::schema::build::*;
use crate::schema::{DefaultValue, SchemaNode};

pub const FLOW_LOGS_DESTINATIONS: &[&str] = &["S3", "CWL", "BOTH", "NONE"];
pub const CIDR_SOURCES: &[&str] = &["provided", "lookup", "dynamic"];
pub const GATEWAY_ENDPOINTS: &[&str] = &["s3", "dynamodb"];
pub const NFW_LOG_TYPES: &[&str] = &["None", "S3", "CloudWatch"];
pub const TGW_ASSOCIATION_TYPES: &[&str] = &["ATTACH", "VPN"];
pub const ROUTE_TARGET_TYPES: &[&str] = &[
    "egressOnlyInternetGatewayId",
    "gatewayId",
    "instanceId",
    "localGatewayId",
    "natGatewayId",
    "networkInterfaceId",
    "transitGatewayId",
    "vpcEndpointId",
    "vpcPeeringConnectionId",
];

fn named_subnet(name: &'static str) -> SchemaNode {
    record(
        name,
        vec![
            required("name", non_empty()),
            optional("az", availability_zone()),
        ],
    )
}

pub fn cidr_config() -> SchemaNode {
    record(
        "CidrConfig",
        vec![
            optional("value", cidr()),
            optional("size", number()),
            defaulted("pool", non_empty(), DefaultValue::Str("main")),
        ],
    )
}

fn subnet_definition() -> SchemaNode {
    record(
        "SubnetDefinitionConfig",
        vec![
            required(
                "az",
                union(
                    "AvailabilityZone | NonEmptyString",
                    vec![availability_zone(), non_empty()],
                ),
            ),
            optional("outpost-arn", non_empty()),
            optional("cidr", cidr_config()),
            required("route-table", non_empty()),
            flag("disabled", false),
        ],
    )
}

pub fn subnet_source() -> SchemaNode {
    record(
        "SubnetSourceConfig",
        vec![
            optional("account", non_empty()),
            required("vpc", non_empty()),
            required("subnet", array(non_empty())),
        ],
    )
}

fn nacl() -> SchemaNode {
    record(
        "NaclConfig",
        vec![
            required("rule", sized_number(Some(1), Some(32766))),
            required("protocol", number()),
            required("ports", number()),
            required("rule-action", non_empty()),
            required("egress", boolean()),
            required(
                "cidr-blocks",
                union(
                    "Array<NonEmptyString> | Array<SubnetSourceConfig>",
                    vec![array(non_empty()), array(subnet_source())],
                ),
            ),
        ],
    )
}

pub fn subnet() -> SchemaNode {
    record(
        "SubnetConfig",
        vec![
            required("name", non_empty()),
            flag("share-to-ou-accounts", false),
            optional("share-to-specific-accounts", array(non_empty())),
            required("definitions", array(subnet_definition())),
            optional("nacls", array(nacl())),
        ],
    )
}

fn pcx_route() -> SchemaNode {
    record(
        "PcxRouteConfig",
        vec![
            required("account", non_empty()),
            required("vpc", non_empty()),
            required("subnet", non_empty()),
        ],
    )
}

fn route() -> SchemaNode {
    record(
        "RouteConfig",
        vec![
            required(
                "destination",
                union("NonEmptyString | PcxRouteConfig", vec![non_empty(), pcx_route()]),
            ),
            required("target", non_empty()),
            optional("name", non_empty()),
            optional("az", non_empty()),
            optional("port", non_empty()),
            optional("type", enumeration("RouteTargetType", ROUTE_TARGET_TYPES)),
            optional("target-id", non_empty()),
        ],
    )
}

fn route_table() -> SchemaNode {
    record(
        "RouteTableConfig",
        vec![
            required("name", non_empty()),
            optional("routes", array(route())),
        ],
    )
}

pub fn tgw_attach() -> SchemaNode {
    record(
        "TransitGatewayAttachConfig",
        vec![
            required("associate-to-tgw", non_empty()),
            required("account", non_empty()),
            optional(
                "associate-type",
                enumeration("TransitGatewayAssociationType", TGW_ASSOCIATION_TYPES),
            ),
            required("tgw-rt-associate", array(non_empty())),
            required("tgw-rt-propagate", array(non_empty())),
            optional("blackhole-route", boolean()),
            optional("attach-subnets", array(non_empty())),
            optional("options", array(non_empty())),
        ],
    )
}

fn interface_endpoints() -> SchemaNode {
    record(
        "InterfaceEndpointConfig",
        vec![
            required("subnet", non_empty()),
            required("endpoints", array(non_empty())),
            optional("allowed-cidrs", array(cidr())),
        ],
    )
}

fn resolvers() -> SchemaNode {
    record(
        "ResolversConfig",
        vec![
            required("subnet", non_empty()),
            required("outbound", boolean()),
            required("inbound", boolean()),
        ],
    )
}

fn on_premise_rule() -> SchemaNode {
    record(
        "OnPremZoneConfig",
        vec![
            required("zone", non_empty()),
            required("outbound-ips", array(non_empty())),
        ],
    )
}

fn security_group_rule() -> SchemaNode {
    let source = union(
        "SecurityGroupSource",
        vec![
            non_empty(),
            subnet_source(),
            record(
                "SecurityGroupSourceConfig",
                vec![required("security-group", array(non_empty()))],
            ),
        ],
    );
    record(
        "SecurityGroupRuleConfig",
        vec![
            optional("type", array(non_empty())),
            optional("tcp-ports", array(number())),
            optional("udp-ports", array(number())),
            optional("port", number()),
            required("description", non_empty()),
            optional("toPort", number()),
            optional("fromPort", number()),
            required("source", array(source)),
        ],
    )
}

pub fn security_group() -> SchemaNode {
    record(
        "SecurityGroupConfig",
        vec![
            required("name", non_empty()),
            required("inbound-rules", array(security_group_rule())),
            required("outbound-rules", array(security_group_rule())),
        ],
    )
}

pub fn zone_names() -> SchemaNode {
    record(
        "ZoneNamesConfig",
        vec![list("public", non_empty()), list("private", non_empty())],
    )
}

fn network_firewall() -> SchemaNode {
    record(
        "AWSNetworkFirewallConfig",
        vec![
            optional("firewall-name", non_empty()),
            required("subnet", named_subnet("NetworkFirewallSubnet")),
            optional(
                "policy",
                record(
                    "NetworkFirewallPolicy",
                    vec![required("name", non_empty()), required("path", non_empty())],
                ),
            ),
            optional("policyString", non_empty()),
            defaulted(
                "alert-dest",
                enumeration("NfwLogType", NFW_LOG_TYPES),
                DefaultValue::Str("None"),
            ),
            defaulted(
                "flow-dest",
                enumeration("NfwLogType", NFW_LOG_TYPES),
                DefaultValue::Str("None"),
            ),
        ],
    )
}

pub fn vpc() -> SchemaNode {
    record(
        "VpcConfig",
        vec![
            required("deploy", non_empty()),
            required("name", non_empty()),
            optional("description", non_empty()),
            required("region", region()),
            list("cidr", cidr_config()),
            defaulted(
                "cidr-src",
                enumeration("CidrSrcTypes", CIDR_SOURCES),
                DefaultValue::Str("provided"),
            ),
            flag("opt-in", false),
            flag("dedicated-tenancy", false),
            flag("use-central-endpoints", false),
            flag("dns-resolver-logging", false),
            defaulted(
                "flow-logs",
                enumeration("FlowLogsDestinationTypes", FLOW_LOGS_DESTINATIONS),
                DefaultValue::Str("NONE"),
            ),
            optional("log-retention", number()),
            flag("igw", false),
            optional(
                "vgw",
                record(
                    "VirtualPrivateGatewayConfig",
                    vec![optional("asn", sized_number(Some(0), Some(65535)))],
                ),
            ),
            optional(
                "pcx",
                record(
                    "PeeringConnectionConfig",
                    vec![
                        required("source", non_empty()),
                        required("source-vpc", non_empty()),
                        required("source-subnets", non_empty()),
                        required("local-subnets", non_empty()),
                    ],
                ),
            ),
            optional(
                "natgw",
                record(
                    "NatGatewayConfig",
                    vec![required("subnet", named_subnet("NatGatewaySubnet"))],
                ),
            ),
            optional("nfw", network_firewall()),
            optional("alb-forwarding", boolean()),
            optional("subnets", array(subnet())),
            optional(
                "gateway-endpoints",
                array(enumeration("GatewayEndpointType", GATEWAY_ENDPOINTS)),
            ),
            optional("route-tables", array(route_table())),
            optional("tgw-attach", tgw_attach()),
            optional("interface-endpoints", interface_endpoints()),
            optional("resolvers", resolvers()),
            optional("on-premise-rules", array(on_premise_rule())),
            optional("security-groups", array(security_group())),
            optional("zones", zone_names()),
            flag("central-endpoint", false),
            optional("lgw-route-table-id", non_empty()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::decode;
    use crate::value::ConfigValue;
    use serde_json::json;

    #[test]
    fn test_minimal_vpc_gets_defaults() {
        let decoded = decode(
            &vpc(),
            &json!({"deploy": "local", "name": "Endpoint", "region": "ca-central-1"}),
        )
        .unwrap();
        assert_eq!(decoded.get("cidr"), Some(&ConfigValue::Sequence(vec![])));
        assert_eq!(decoded.get("flow-logs").and_then(ConfigValue::as_str), Some("NONE"));
        assert_eq!(decoded.get("igw"), Some(&ConfigValue::Bool(false)));
        assert!(decoded.get("subnets").is_none());
    }

    #[test]
    fn test_subnet_definition_az_accepts_outpost_names() {
        let decoded = decode(
            &subnet(),
            &json!({
                "name": "Web",
                "definitions": [
                    {"az": "a", "route-table": "Web_Shared", "cidr": {"value": "10.2.32.0/20"}},
                    {"az": "outpost-1", "route-table": "Web_Shared"}
                ]
            }),
        )
        .unwrap();
        let defs = decoded.get("definitions").and_then(ConfigValue::as_sequence).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].get("disabled"), Some(&ConfigValue::Bool(false)));
    }

    #[test]
    fn test_nacl_cidr_blocks_union() {
        let subnet_doc = json!({
            "name": "App",
            "definitions": [],
            "nacls": [
                {"rule": 100, "protocol": -1, "ports": -1, "rule-action": "allow", "egress": true,
                 "cidr-blocks": ["0.0.0.0/0"]},
                {"rule": 200, "protocol": 6, "ports": 443, "rule-action": "deny", "egress": false,
                 "cidr-blocks": [{"vpc": "Central", "subnet": ["Web"]}]}
            ]
        });
        assert!(decode(&subnet(), &subnet_doc).is_ok());
    }

    #[test]
    fn test_vgw_asn_bounds() {
        let err = decode(
            &vpc(),
            &json!({"deploy": "local", "name": "Endpoint", "region": "ca-central-1", "vgw": {"asn": 70000}}),
        )
        .unwrap_err();
        assert_eq!(err.errors[0].path.render(), "vgw/asn");
    }
}
