use crate::utils::error::{CffError, Result};
use chrono::{DateTime, NaiveDate};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Date formats accepted when a release/start/end date is given as text.
/// ISO 8601 comes first since that is what CFF files carry.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
];

/// A scalar value held by a field store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    /// Anything else read from a document (numbers, booleans, nested data),
    /// carried through untouched.
    Yaml(Value),
}

impl FieldValue {
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Date(_) => false,
            FieldValue::Yaml(v) => v.is_null(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn from_yaml(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Yaml(other),
        }
    }

    pub fn to_yaml(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::Yaml(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Yaml(v) => f.write_str(&yaml_to_string(v)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// Input accepted by the typed date setters.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl DateInput {
    pub fn into_date(self) -> Result<NaiveDate> {
        match self {
            DateInput::Date(d) => Ok(d),
            DateInput::Text(s) => parse_date(&s),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }

    Err(CffError::DateParse {
        value: input.to_string(),
    })
}

/// Maps an accessor-style name onto the field key it refers to:
/// a trailing `=` is dropped and underscores become hyphens.
pub fn normalize_field_name(name: &str) -> String {
    name.strip_suffix('=').unwrap_or(name).replace('_', "-")
}

/// String form of a YAML scalar, used for keywords and display.
pub fn yaml_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => yaml_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// An ordered field store whose named accessors only admit keys from a
/// fixed allow-list.
///
/// Rehydration through [`FieldSet::from_mapping`] keeps every entry, known
/// or not, so a document survives a read/write cycle unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    allowed: &'static [&'static str],
    // keys stay as read, so `1` and `'1'` remain distinct entries
    values: Vec<(Value, FieldValue)>,
}

impl FieldSet {
    pub fn new(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed,
            values: Vec::new(),
        }
    }

    pub fn from_mapping(allowed: &'static [&'static str], mapping: Mapping) -> Self {
        let values = mapping
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from_yaml(value)))
            .collect();
        Self { allowed, values }
    }

    /// Resolves `name` to an allow-listed key or fails with
    /// [`CffError::UnsupportedField`].
    pub fn resolve(&self, name: &str) -> Result<String> {
        let key = normalize_field_name(name);
        if self.allowed.contains(&key.as_str()) {
            Ok(key)
        } else {
            Err(CffError::unsupported_field(name))
        }
    }

    /// Getter names take no trailing `=`.
    pub fn get(&self, name: &str) -> Result<FieldValue> {
        if name.ends_with('=') {
            return Err(CffError::unsupported_field(name));
        }
        let key = self.resolve(name)?;
        Ok(self.lookup(&key).cloned().unwrap_or_else(FieldValue::empty))
    }

    pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<()> {
        let key = self.resolve(name)?;
        tracing::debug!("Setting field '{}'", key);
        self.insert(&key, value.unwrap_or_else(FieldValue::empty));
        Ok(())
    }

    /// Raw lookup by exact key, bypassing the allow-list.
    pub fn lookup(&self, key: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Raw store by exact key. Replaces in place so the original key order
    /// is kept.
    pub(crate) fn insert(&mut self, key: &str, value: FieldValue) {
        match self.values.iter_mut().find(|(k, _)| k.as_str() == Some(key)) {
            Some(slot) => slot.1 = value,
            None => self.values.push((Value::String(key.to_string()), value)),
        }
    }

    /// String keys in stored order; non-string keys are skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        for (key, value) in &self.values {
            mapping.insert(key.clone(), value.to_yaml());
        }
        mapping
    }
}
