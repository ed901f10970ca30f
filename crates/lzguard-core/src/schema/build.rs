//! Constructors for assembling schema graphs.

use super::{DefaultValue, Field, Presence, RecordSchema, ScalarKind, SchemaNode, Variant};

pub fn string() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::String)
}

pub fn non_empty() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::NonEmptyString)
}

pub fn number() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::Number)
}

pub fn boolean() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::Boolean)
}

pub fn cidr() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::Cidr)
}

pub fn region() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::Region)
}

pub fn availability_zone() -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::AvailabilityZone)
}

pub fn literal(value: &'static str) -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::Literal(value))
}

pub fn enumeration(name: &'static str, values: &'static [&'static str]) -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::Enum { name, values })
}

pub fn number_enum(name: &'static str, values: &'static [i64]) -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::NumberEnum { name, values })
}

pub fn sized_number(min: Option<i64>, max: Option<i64>) -> SchemaNode {
    SchemaNode::Scalar(ScalarKind::SizedNumber { min, max })
}

pub fn array(item: SchemaNode) -> SchemaNode {
    SchemaNode::Sequence(Box::new(item))
}

pub fn map_of(value: SchemaNode) -> SchemaNode {
    SchemaNode::Map(Box::new(value))
}

pub fn record(name: &'static str, fields: Vec<Field>) -> SchemaNode {
    SchemaNode::Record(RecordSchema::new(name, fields))
}

pub fn union(name: &'static str, alternatives: Vec<SchemaNode>) -> SchemaNode {
    SchemaNode::Union { name, alternatives }
}

pub fn tagged(name: &'static str, discriminant: &'static str, variants: Vec<Variant>) -> SchemaNode {
    SchemaNode::Tagged {
        name,
        discriminant,
        variants,
    }
}

pub fn variant(tag: &'static str, name: &'static str, fields: Vec<Field>) -> Variant {
    Variant {
        tag,
        record: RecordSchema::new(name, fields),
        is_default: false,
    }
}

/// Variant selected when the discriminant is missing
pub fn default_variant(tag: &'static str, name: &'static str, fields: Vec<Field>) -> Variant {
    Variant {
        is_default: true,
        ..variant(tag, name, fields)
    }
}

pub fn required(name: &'static str, node: SchemaNode) -> Field {
    Field {
        name,
        node,
        presence: Presence::Required,
    }
}

pub fn optional(name: &'static str, node: SchemaNode) -> Field {
    Field {
        name,
        node,
        presence: Presence::Optional,
    }
}

pub fn defaulted(name: &'static str, node: SchemaNode, default: DefaultValue) -> Field {
    Field {
        name,
        node,
        presence: Presence::Defaulted(default),
    }
}

/// Boolean field defaulting to `value`
pub fn flag(name: &'static str, value: bool) -> Field {
    defaulted(name, boolean(), DefaultValue::Bool(value))
}

/// Sequence field defaulting to `[]`
pub fn list(name: &'static str, item: SchemaNode) -> Field {
    defaulted(name, array(item), DefaultValue::EmptySequence)
}
