//! Schema description language.
//!
//! A [`SchemaNode`] graph describes the accepted shape of a configuration
//! document: refined scalars, records with required/optional/defaulted
//! fields, sequences, string-keyed maps and unions. Graphs are plain data,
//! built once and shared read-only by every [`decode`] call.
//!
//! ## Guarantees
//!
//! - **Accumulation**: decoding reports every field error in one pass.
//! - **Forward compatibility**: input fields a record does not declare are
//!   ignored, never rejected.
//! - **Null as absent**: `null` behaves like a missing field for optional and
//!   defaulted fields.
//! - **All or nothing**: a decode either yields a complete tree or a
//!   [`DecodeError`](crate::errors::DecodeError); there is no partial result.

pub mod build;
pub mod decode;
pub mod refine;

pub use decode::decode;

use crate::value::ConfigValue;
use serde_json::Number;

/// Scalar refinements
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarKind {
    /// Any string, including the empty one
    String,
    NonEmptyString,
    Number,
    Boolean,
    /// IPv4 network in `a.b.c.d/n` notation
    Cidr,
    /// One of the supported AWS regions
    Region,
    /// Availability zone suffix `a`..`f`
    AvailabilityZone,
    /// Closed set of strings
    Enum {
        name: &'static str,
        values: &'static [&'static str],
    },
    /// Closed set of integers
    NumberEnum {
        name: &'static str,
        values: &'static [i64],
    },
    /// Exactly this string
    Literal(&'static str),
    /// Number within inclusive bounds
    SizedNumber { min: Option<i64>, max: Option<i64> },
}

impl ScalarKind {
    pub fn describe(&self) -> String {
        match self {
            ScalarKind::String => "string".to_string(),
            ScalarKind::NonEmptyString => "NonEmptyString".to_string(),
            ScalarKind::Number => "number".to_string(),
            ScalarKind::Boolean => "boolean".to_string(),
            ScalarKind::Cidr => "Cidr".to_string(),
            ScalarKind::Region => "Region".to_string(),
            ScalarKind::AvailabilityZone => "AvailabilityZone".to_string(),
            ScalarKind::Enum { name, .. } | ScalarKind::NumberEnum { name, .. } => {
                (*name).to_string()
            }
            ScalarKind::Literal(value) => format!("\"{}\"", value),
            ScalarKind::SizedNumber { .. } => "Sized<number>".to_string(),
        }
    }
}

/// Value substituted for an absent or null defaulted field
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Str(&'static str),
    Int(i64),
    EmptySequence,
    EmptyMap,
}

impl DefaultValue {
    pub fn to_value(&self) -> ConfigValue {
        match self {
            DefaultValue::Bool(b) => ConfigValue::Bool(*b),
            DefaultValue::Str(s) => ConfigValue::String((*s).to_string()),
            DefaultValue::Int(i) => ConfigValue::Number(Number::from(*i)),
            DefaultValue::EmptySequence => ConfigValue::Sequence(Vec::new()),
            DefaultValue::EmptyMap => ConfigValue::Map(Vec::new()),
        }
    }
}

/// How a record field treats absence
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    Defaulted(DefaultValue),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub node: SchemaNode,
    pub presence: Presence,
}

/// Named record with a fixed field list, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

impl RecordSchema {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One arm of a tagged union
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Discriminant value selecting this arm
    pub tag: &'static str,
    pub record: RecordSchema,
    /// Selected when the discriminant field is absent
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Scalar(ScalarKind),
    Record(RecordSchema),
    Sequence(Box<SchemaNode>),
    /// Dynamic non-empty-string-keyed map
    Map(Box<SchemaNode>),
    /// Untagged union: alternatives are tried in order, the first that
    /// decodes cleanly wins
    Union {
        name: &'static str,
        alternatives: Vec<SchemaNode>,
    },
    /// Discriminated union committed on `discriminant`
    Tagged {
        name: &'static str,
        discriminant: &'static str,
        variants: Vec<Variant>,
    },
}

impl SchemaNode {
    /// Expected-shape text used in field errors
    pub fn describe(&self) -> String {
        match self {
            SchemaNode::Scalar(kind) => kind.describe(),
            SchemaNode::Record(record) => record.name.to_string(),
            SchemaNode::Sequence(inner) => format!("Array<{}>", inner.describe()),
            SchemaNode::Map(inner) => format!("Record<string, {}>", inner.describe()),
            SchemaNode::Union { name, .. } | SchemaNode::Tagged { name, .. } => {
                (*name).to_string()
            }
        }
    }

    /// Record schema for record nodes
    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            SchemaNode::Record(record) => Some(record),
            _ => None,
        }
    }
}
