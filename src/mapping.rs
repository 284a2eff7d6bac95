//! Mapping types shared by every stage of the engine
//!
//! Two representations flow through the pipeline:
//!
//! - [`UntypedMapping`]: string keys to raw string values, as produced by the
//!   flat-text parser and the table reader.
//! - [`Mapping`]: string keys to typed JSON values, as produced by the
//!   structured-text parser or by coercion.
//!
//! Both preserve insertion order so exported text reads in the same order as
//! the input. A [`ReferenceSchema`] is the type oracle extracted once from a
//! reference mapping: coercion consults the recorded [`ValueKind`] per key
//! instead of re-inspecting JSON values.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed key/value mapping, insertion ordered.
pub type Mapping = serde_json::Map<String, Value>;

/// Raw string key/value mapping, insertion ordered.
pub type UntypedMapping = IndexMap<String, String>;

/// Which of the two input records a piece of text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The record whose keys are preserved during a merge.
    Destination,
    /// The record supplying replacement values.
    Source,
}

impl Side {
    /// One-character tag appended to decoder messages.
    pub fn tag(self) -> char {
        match self {
            Side::Destination => 'T',
            Side::Source => 'F',
        }
    }

    /// Inverse of [`Side::tag`].
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'T' => Some(Side::Destination),
            'F' => Some(Side::Source),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Destination => write!(f, "destination"),
            Side::Source => write!(f, "source"),
        }
    }
}

/// Product workflow. Selects the default reference mapping, the preset list
/// and the date offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Mono,
    Double,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Mono => "mono",
            Mode::Double => "double",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mono" => Ok(Mode::Mono),
            "double" => Ok(Mode::Double),
            _ => Err(format!("Unknown mode '{}'. Use: mono or double", s)),
        }
    }
}

/// Closed set of value types a reference mapping can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Int,
            Value::Number(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Map,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-key value kinds taken from a reference mapping.
///
/// Built once when the reference is loaded; the reference itself is never
/// mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSchema {
    kinds: IndexMap<String, ValueKind>,
}

impl ReferenceSchema {
    pub fn from_mapping(reference: &Mapping) -> Self {
        let kinds = reference
            .iter()
            .map(|(key, value)| (key.clone(), ValueKind::of(value)))
            .collect();
        Self { kinds }
    }

    pub fn kind(&self, key: &str) -> Option<ValueKind> {
        self.kinds.get(key).copied()
    }
}

impl From<&Mapping> for ReferenceSchema {
    fn from(reference: &Mapping) -> Self {
        Self::from_mapping(reference)
    }
}
