//! Scalar refinement checks and their failure messages.

use super::ScalarKind;
use crate::value::ConfigValue;
use serde_json::Value;
use std::net::Ipv4Addr;

pub const REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-north-1",
    "eu-south-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "us-west-1",
    "us-west-2",
];

pub const AVAILABILITY_ZONES: &[&str] = &["a", "b", "c", "d", "e", "f"];

/// Why a scalar failed its refinement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    /// Wrong JSON type entirely
    WrongType,
    /// Right type, refinement rejected it with this message
    Rejected(String),
}

/// Parse `a.b.c.d/n` into its address and prefix length
pub fn parse_cidr(text: &str) -> Option<(Ipv4Addr, u8)> {
    let (addr, prefix) = text.split_once('/')?;
    let addr: Ipv4Addr = addr.parse().ok()?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix: u8 = prefix.parse().ok()?;
    (prefix <= 32).then_some((addr, prefix))
}

fn one_of<T: std::fmt::Display>(values: &[T]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("Value should be one of \"{}\"", quoted.join("\", \""))
}

fn expect_str(input: &Value) -> Result<&str, Refusal> {
    input.as_str().ok_or(Refusal::WrongType)
}

fn expect_number(input: &Value) -> Result<&serde_json::Number, Refusal> {
    match input {
        Value::Number(n) => Ok(n),
        _ => Err(Refusal::WrongType),
    }
}

/// Check `input` against `kind`, producing the decoded scalar
///
/// # Errors
///
/// Returns a [`Refusal`] describing the mismatch.
pub fn check_scalar(kind: &ScalarKind, input: &Value) -> Result<ConfigValue, Refusal> {
    match kind {
        ScalarKind::String => expect_str(input).map(|s| ConfigValue::String(s.to_string())),
        ScalarKind::NonEmptyString => {
            let s = expect_str(input)?;
            if s.is_empty() {
                return Err(Refusal::Rejected("Value can not be empty.".to_string()));
            }
            Ok(ConfigValue::String(s.to_string()))
        }
        ScalarKind::Number => expect_number(input).map(|n| ConfigValue::Number(n.clone())),
        ScalarKind::Boolean => input
            .as_bool()
            .map(ConfigValue::Bool)
            .ok_or(Refusal::WrongType),
        ScalarKind::Cidr => {
            let s = expect_str(input)?;
            match parse_cidr(s) {
                Some(_) => Ok(ConfigValue::String(s.to_string())),
                None => Err(Refusal::Rejected(format!(
                    "Value {} should be a CIDR range.",
                    s
                ))),
            }
        }
        ScalarKind::Region => {
            let s = expect_str(input)?;
            if REGIONS.contains(&s) {
                Ok(ConfigValue::String(s.to_string()))
            } else {
                Err(Refusal::Rejected("Value should be an AWS region.".to_string()))
            }
        }
        ScalarKind::AvailabilityZone => {
            let s = expect_str(input).map_err(|_| Refusal::Rejected(one_of(AVAILABILITY_ZONES)))?;
            if AVAILABILITY_ZONES.contains(&s) {
                Ok(ConfigValue::String(s.to_string()))
            } else {
                Err(Refusal::Rejected(one_of(AVAILABILITY_ZONES)))
            }
        }
        ScalarKind::Enum { values, .. } => match input.as_str() {
            Some(s) if values.contains(&s) => Ok(ConfigValue::String(s.to_string())),
            _ => Err(Refusal::Rejected(one_of(values))),
        },
        ScalarKind::NumberEnum { values, .. } => match input.as_i64() {
            Some(n) if values.contains(&n) => Ok(ConfigValue::Number(n.into())),
            _ => Err(Refusal::Rejected(one_of(values))),
        },
        ScalarKind::Literal(expected) => match input.as_str() {
            Some(s) if s == *expected => Ok(ConfigValue::String(s.to_string())),
            _ => Err(Refusal::WrongType),
        },
        ScalarKind::SizedNumber { min, max } => {
            let n = expect_number(input)?;
            let value = n.as_f64().unwrap_or(f64::NAN);
            let min_ok = min.map_or(true, |m| value >= m as f64);
            let max_ok = max.map_or(true, |m| value <= m as f64);
            if min_ok && max_ok {
                Ok(ConfigValue::Number(n.clone()))
            } else {
                let lo = min.map_or("-∞".to_string(), |m| m.to_string());
                let hi = max.map_or("∞".to_string(), |m| m.to_string());
                Err(Refusal::Rejected(format!(
                    "Value should be of size [{}, {}]",
                    lo, hi
                )))
            }
        }
    }
}
