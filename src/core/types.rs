use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of a stored record within one collection.
///
/// Ids are assigned by insert, strictly monotonic, and never reused.
/// `RecordId(0)` is reserved and never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Reserved id; never assigned to a record.
    pub const INVALID: RecordId = RecordId(0);

    pub fn new(id: u64) -> Self {
        RecordId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared type of a schema column.
///
/// This is the closed registry of column types the engine supports.
/// Signed integers of any width are stored as `Int`, unsigned as `UInt`;
/// the narrower widths enter through `From` conversions on [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Str,
    Bool,
    Int,
    UInt,
    Float,
    Timestamp,
    /// Homogeneous array of the given element type.
    Array(Box<FieldType>),
}

impl FieldType {
    /// Sequence types support prefix queries and prefix indexes.
    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldType::Str | FieldType::Array(_))
    }

    /// Ordered types support range queries.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            FieldType::Str | FieldType::Int | FieldType::UInt | FieldType::Float | FieldType::Timestamp
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Str => write!(f, "str"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Int => write!(f, "int"),
            FieldType::UInt => write!(f, "uint"),
            FieldType::Float => write!(f, "float"),
            FieldType::Timestamp => write!(f, "timestamp"),
            FieldType::Array(elem) => write!(f, "array<{}>", elem),
        }
    }
}

/// A stored column value.
///
/// Equality and hashing are total: floats compare and hash by IEEE-754 bit
/// pattern so every value can serve as an index key. The consequence is
/// `NaN == NaN` and `-0.0 != 0.0` inside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the value's runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Timestamp(_) => "timestamp",
            Value::Array(_) => "array",
        }
    }

    /// Order two values of the same variant; `None` when the variants
    /// differ or the variant has no order (bool, array).
    pub(crate) fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::UInt(a), Value::UInt(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            // Bit-pattern equality so floats can serve as index keys
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Str(s) => s.hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::UInt(u) => u.hash(state),
            Value::Float(x) => x.to_bits().hash(state),
            Value::Timestamp(t) => t.hash(state),
            Value::Array(vs) => vs.hash(state),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i8> for Value {
    fn from(i: i8) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i16> for Value {
    fn from(i: i16) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u8> for Value {
    fn from(u: u8) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u16> for Value {
    fn from(u: u16) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// A stored record: one value per schema column, in schema column order.
pub type Record = Vec<Value>;
