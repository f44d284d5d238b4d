// Core structs: raw backend records, display records, errors
use serde_json::{Map, Value};
use thiserror::Error;

/// One equipment record exactly as the backend sent it.
///
/// Nothing about the shape is trusted: any key may be missing, `null` or of
/// the wrong type. Array elements that are not JSON objects become empty
/// records so that positional ids stay aligned with the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEquipmentRecord {
    fields: Map<String, Value>,
}

impl RawEquipmentRecord {
    pub fn field(&self, key: &str) -> RawField<'_> {
        match self.fields.get(key) {
            None | Some(Value::Null) => RawField::Absent,
            Some(value) => RawField::Present(value),
        }
    }

    /// Splits a decoded response body into records. Anything but a JSON array
    /// is rejected.
    pub fn collection_from_value(body: Value) -> Result<Vec<Self>, FetchError> {
        match body {
            Value::Array(items) => Ok(items.into_iter().map(Self::from).collect()),
            other => Err(FetchError::NotAnArray(json_kind(&other))),
        }
    }
}

impl From<Value> for RawEquipmentRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/// Result of looking a key up in a [`RawEquipmentRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawField<'a> {
    Present(&'a Value),
    Absent,
}

impl<'a> RawField<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            RawField::Present(value) => Some(value),
            RawField::Absent => None,
        }
    }

    /// `false`, `0`, `NaN` and `""` count as missing, like absent keys.
    pub fn is_truthy(self) -> bool {
        match self {
            RawField::Absent => false,
            RawField::Present(Value::Null) => false,
            RawField::Present(Value::Bool(flag)) => *flag,
            RawField::Present(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            RawField::Present(Value::String(s)) => !s.is_empty(),
            RawField::Present(Value::Array(_)) | RawField::Present(Value::Object(_)) => true,
        }
    }

    /// Display text of a truthy scalar. Arrays and objects never produce text.
    pub fn text(self) -> Option<String> {
        if !self.is_truthy() {
            return None;
        }
        match self.value()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(number_to_string(n)),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

/// Stable identifier of a record as used in detail URLs.
///
/// Raw ids are compared as strings, so `1`, `1.0` and `"1"` are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EquipmentId(String);

impl EquipmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Reads the `id` key. Only `null`/missing count as absent; `0` and `""`
    /// are kept.
    pub fn from_raw(field: RawField<'_>) -> Option<Self> {
        match field.value()? {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(number_to_string(n))),
            Value::Bool(flag) => Some(Self(flag.to_string())),
            _ => None,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, route_id: &str) -> bool {
        self.0 == route_id
    }
}

impl std::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card shown in the catalog grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentCard {
    pub id: EquipmentId,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Record shown on the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentDetail {
    pub id: Option<EquipmentId>,
    pub title: String,
    pub summary: String,
    /// May contain HTML. Only rendered through a `MarkupPolicy`.
    pub full_description: String,
    pub image: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    HttpError(String),
    #[error("unexpected status {0}")]
    InvalidStatus(u16),
    #[error("malformed body: {0}")]
    MalformedBody(String),
    #[error("expected a JSON array, got {0}")]
    NotAnArray(&'static str),
    #[error("fetch ended without a result")]
    Interrupted,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be an absolute http(s) URL, got {value:?}")]
    NotAbsolute { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
