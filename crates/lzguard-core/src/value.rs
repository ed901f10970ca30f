//! Configuration tree model.
//!
//! [`ConfigValue`] is the tree both the decoder produces and the diff engine
//! walks. Raw JSON documents convert into it losslessly, so two revisions can
//! be compared even when the previous one predates the current schema.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map as JsonMap, Number, Value};
use std::fmt;

/// One step in a [`Path`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    /// Key text, `None` for array indices
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }

    /// True when this is a key segment equal to `key`. Index segments never
    /// equal a key, even one that spells the same digits.
    pub fn is_key(&self, key: &str) -> bool {
        self.as_key() == Some(key)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location in a configuration tree, e.g.
/// `mandatory-account-configs/shared-network/vpc/0/cidr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// New path with `segment` appended
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&PathSegment> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    pub fn get(&self, index: usize) -> Option<&PathSegment> {
        self.0.get(index)
    }

    /// Key at position `index`, `None` when absent or an array index
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(PathSegment::as_key)
    }

    /// True when any segment is the key `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|s| s.is_key(key))
    }

    /// `/`-joined rendering used in violation messages
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Build a [`Path`] from keys and indices: `path!["vpc", 0, "cidr"]`.
#[macro_export]
macro_rules! path {
    () => { $crate::value::Path::root() };
    ($($seg:expr),+ $(,)?) => {
        $crate::value::Path::from_segments(vec![$($crate::value::PathSegment::from($seg)),+])
    };
}

/// Configuration tree.
///
/// `Record` is produced by the decoder for schema-declared objects and keeps
/// fields in declaration order. `Map` holds dynamically keyed objects (account
/// and OU maps) and every object of a raw, undecoded document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Record(Vec<(String, ConfigValue)>),
    Map(Vec<(String, ConfigValue)>),
    Sequence(Vec<ConfigValue>),
}

impl ConfigValue {
    /// Convert an untyped JSON value. Objects become `Map`s in document order.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(*b),
            Value::Number(n) => ConfigValue::Number(n.clone()),
            Value::String(s) => ConfigValue::String(s.clone()),
            Value::Array(items) => {
                ConfigValue::Sequence(items.iter().map(ConfigValue::from_json).collect())
            }
            Value::Object(map) => ConfigValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), ConfigValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Encode back to untyped JSON
    pub fn to_json(&self) -> Value {
        match self {
            ConfigValue::Null => Value::Null,
            ConfigValue::Bool(b) => Value::Bool(*b),
            ConfigValue::Number(n) => Value::Number(n.clone()),
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Sequence(items) => {
                Value::Array(items.iter().map(ConfigValue::to_json).collect())
            }
            ConfigValue::Record(fields) | ConfigValue::Map(fields) => {
                let mut map = JsonMap::new();
                for (k, v) in fields {
                    map.insert(k.clone(), v.to_json());
                }
                Value::Object(map)
            }
        }
    }

    /// Truthiness of a prior value: `false`, `0`, `""` and null are falsy;
    /// every record, map and sequence is truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Null => false,
            ConfigValue::Bool(b) => *b,
            ConfigValue::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            ConfigValue::String(s) => !s.is_empty(),
            ConfigValue::Record(_) | ConfigValue::Map(_) | ConfigValue::Sequence(_) => true,
        }
    }

    /// Fields of a record or map
    pub fn entries(&self) -> Option<&[(String, ConfigValue)]> {
        match self {
            ConfigValue::Record(fields) | ConfigValue::Map(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_keyed(&self) -> bool {
        self.entries().is_some()
    }

    /// Field lookup on records and maps
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries()
            .and_then(|fields| fields.iter().find(|(k, _)| k == key).map(|(_, v)| v))
    }

    /// Follow a sequence of keys
    pub fn get_path(&self, keys: &[&str]) -> Option<&ConfigValue> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Keys of a record or map, in order
    pub fn keys(&self) -> Vec<&str> {
        self.entries()
            .map(|fields| fields.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Inline rendering for messages: scalars bare, containers as JSON
    pub fn render(&self) -> String {
        match self {
            ConfigValue::String(s) => s.clone(),
            ConfigValue::Null => "null".to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Number(n) => n.to_string(),
            other => other.to_json().to_string(),
        }
    }
}

impl From<&Value> for ConfigValue {
    fn from(value: &Value) -> Self {
        ConfigValue::from_json(value)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Number(n) => n.serialize(serializer),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigValue::Record(fields) | ConfigValue::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
