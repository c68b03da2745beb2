//! Parameter schemas and validation.
//!
//! A generator declares an ordered list of [`ExpectedParameter`]s. Concrete
//! [`Parameters`] are checked against that list before any randomness is
//! drawn, so a rejected request never depends on the seed.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::question_engine::error::ParameterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Number,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::String => write!(f, "string"),
            ParameterKind::Number => write!(f, "number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(i64),
    Text(String),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Number(_) => ParameterKind::Number,
            ParameterValue::Text(_)   => ParameterKind::String,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Number(n) => write!(f, "{n}"),
            ParameterValue::Text(s)   => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue::Text(s.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        ParameterValue::Text(s)
    }
}

impl From<i64> for ParameterValue {
    fn from(n: i64) -> Self {
        ParameterValue::Number(n)
    }
}

/// One entry of a generator's parameter schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedParameter {
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub name: String,
    /// Exhaustive set of legal values, if restricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<ParameterValue>>,
}

impl ExpectedParameter {
    /// A string parameter restricted to `allowed`.
    pub fn choice(name: &str, allowed: &[&str]) -> Self {
        ExpectedParameter {
            kind: ParameterKind::String,
            name: name.to_string(),
            allowed_values: Some(allowed.iter().map(|&v| v.into()).collect()),
        }
    }

    /// An unrestricted integer parameter.
    pub fn number(name: &str) -> Self {
        ExpectedParameter { kind: ParameterKind::Number, name: name.to_string(), allowed_values: None }
    }

    /// An unrestricted (but path-safe) string parameter.
    pub fn string(name: &str) -> Self {
        ExpectedParameter { kind: ParameterKind::String, name: name.to_string(), allowed_values: None }
    }
}

/// Concrete parameter values keyed by name. Backed by a `BTreeMap` so that
/// iteration and serialization order never depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters(BTreeMap<String, ParameterValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParameterValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    /// The value of a string parameter, if present and a string.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ParameterValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(ParameterValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Non-empty and made only of `a-z`, `0-9` and `-`.
pub fn is_path_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Check `parameters` against the schema: no unknown names, every declared
/// name present with the right type, values within `allowed_values`, and
/// string values usable as permalink segments.
pub fn validate(expected: &[ExpectedParameter], parameters: &Parameters) -> Result<(), ParameterError> {
    let result = check(expected, parameters);
    if let Err(err) = &result {
        warn!(%err, "rejected parameters");
    }
    result
}

fn check(expected: &[ExpectedParameter], parameters: &Parameters) -> Result<(), ParameterError> {
    if let Some((name, _)) = parameters.iter().find(|(name, _)| !expected.iter().any(|e| e.name == *name)) {
        return Err(ParameterError::Unknown(name.to_string()));
    }

    for param in expected {
        let value = parameters
            .get(&param.name)
            .ok_or_else(|| ParameterError::Missing(param.name.clone()))?;

        if value.kind() != param.kind {
            return Err(ParameterError::WrongType { name: param.name.clone(), expected: param.kind });
        }
        if let Some(allowed) = &param.allowed_values {
            if !allowed.contains(value) {
                return Err(ParameterError::NotAllowed {
                    name: param.name.clone(),
                    value: value.to_string(),
                });
            }
        }
        if let ParameterValue::Text(text) = value {
            if !is_path_safe(text) {
                return Err(ParameterError::NotPathSafe {
                    name: param.name.clone(),
                    value: text.clone(),
                });
            }
        }
    }
    Ok(())
}
