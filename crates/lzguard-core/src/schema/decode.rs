//! Decoder: untyped JSON to a typed [`ConfigValue`] tree.

use super::refine::{check_scalar, Refusal};
use super::{Presence, RecordSchema, SchemaNode, Variant};
use crate::errors::{DecodeError, FieldError};
use crate::value::{ConfigValue, Path};
use serde_json::{Map as JsonMap, Value};

/// Decode `input` against `schema`.
///
/// Every defect in the document is collected before failing.
///
/// # Errors
///
/// Returns a [`DecodeError`] listing one [`FieldError`] per defect.
pub fn decode(schema: &SchemaNode, input: &Value) -> Result<ConfigValue, DecodeError> {
    let mut errors = Vec::new();
    let decoded = decode_node(schema, input, &Path::root(), &mut errors);
    match decoded {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(DecodeError {
            schema: schema.describe(),
            errors,
        }),
    }
}

fn decode_node(
    node: &SchemaNode,
    input: &Value,
    path: &Path,
    errors: &mut Vec<FieldError>,
) -> Option<ConfigValue> {
    match node {
        SchemaNode::Scalar(kind) => match check_scalar(kind, input) {
            Ok(value) => Some(value),
            Err(Refusal::WrongType) => {
                errors.push(FieldError::new(path.clone(), kind.describe()));
                None
            }
            Err(Refusal::Rejected(message)) => {
                errors.push(FieldError::new(path.clone(), kind.describe()).with_message(message));
                None
            }
        },
        SchemaNode::Record(record) => match input {
            Value::Object(object) => Some(decode_record(record, object, path, errors)),
            _ => {
                errors.push(FieldError::new(path.clone(), record.name));
                None
            }
        },
        SchemaNode::Sequence(item) => match input {
            Value::Array(items) => {
                let decoded = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| decode_node(item, v, &path.child(i), errors))
                    .collect();
                Some(ConfigValue::Sequence(decoded))
            }
            _ => {
                errors.push(FieldError::new(path.clone(), node.describe()));
                None
            }
        },
        SchemaNode::Map(value_node) => match input {
            Value::Object(object) => {
                let mut entries = Vec::with_capacity(object.len());
                for (key, value) in object {
                    let entry_path = path.child(key.as_str());
                    if key.is_empty() {
                        errors.push(
                            FieldError::new(entry_path, "NonEmptyString")
                                .with_message("Value can not be empty."),
                        );
                        continue;
                    }
                    if let Some(decoded) = decode_node(value_node, value, &entry_path, errors) {
                        entries.push((key.clone(), decoded));
                    }
                }
                Some(ConfigValue::Map(entries))
            }
            _ => {
                errors.push(FieldError::new(path.clone(), node.describe()));
                None
            }
        },
        SchemaNode::Union { alternatives, .. } => {
            for alternative in alternatives {
                let mut scratch = Vec::new();
                let decoded = decode_node(alternative, input, path, &mut scratch);
                if scratch.is_empty() {
                    return decoded;
                }
            }
            let attempted: Vec<String> = alternatives.iter().map(SchemaNode::describe).collect();
            errors.push(
                FieldError::new(path.clone(), node.describe())
                    .with_message(format!("no union member matched: {}", attempted.join(" | "))),
            );
            None
        }
        SchemaNode::Tagged {
            discriminant,
            variants,
            ..
        } => {
            let Value::Object(object) = input else {
                errors.push(FieldError::new(path.clone(), node.describe()));
                return None;
            };
            match select_variant(variants, object.get(*discriminant)) {
                Some(variant) => Some(decode_record(&variant.record, object, path, errors)),
                None => {
                    let tags: Vec<&str> = variants.iter().map(|v| v.tag).collect();
                    errors.push(
                        FieldError::new(path.child(*discriminant), node.describe()).with_message(
                            format!(
                                "union mismatch: {} must be one of {}",
                                discriminant,
                                tags.join(" | ")
                            ),
                        ),
                    );
                    None
                }
            }
        }
    }
}

fn select_variant<'a>(variants: &'a [Variant], tag: Option<&Value>) -> Option<&'a Variant> {
    match tag {
        None | Some(Value::Null) => variants.iter().find(|v| v.is_default),
        Some(Value::String(tag)) => variants.iter().find(|v| v.tag == tag),
        Some(_) => None,
    }
}

fn decode_record(
    record: &RecordSchema,
    object: &JsonMap<String, Value>,
    path: &Path,
    errors: &mut Vec<FieldError>,
) -> ConfigValue {
    let mut fields = Vec::with_capacity(record.fields.len());
    for field in &record.fields {
        let field_path = path.child(field.name);
        let raw = object.get(field.name).filter(|v| !v.is_null());
        match (raw, &field.presence) {
            (Some(value), _) => {
                if let Some(decoded) = decode_node(&field.node, value, &field_path, errors) {
                    fields.push((field.name.to_string(), decoded));
                }
            }
            (None, Presence::Required) => errors.push(
                FieldError::new(field_path, field.node.describe())
                    .with_message("missing required field"),
            ),
            (None, Presence::Optional) => {}
            (None, Presence::Defaulted(default)) => {
                fields.push((field.name.to_string(), default.to_value()));
            }
        }
    }
    ConfigValue::Record(fields)
}
