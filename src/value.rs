//! Decoded field values and records.

use indexmap::IndexMap;

/// A single decoded field value. Each variant matches one [crate::field::FieldKind].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

/// Field name to value, in field order. Records produced by reads list their
/// keys in schema order.
pub type Record = IndexMap<String, Value>;

impl Value {
    /// Returns the value as an unsigned integer, or `None` for float values.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => Some(v),
            Value::F32(_) | Value::F64(_) => None,
        }
    }

    /// Returns the value as a float. 64-bit integers above 2^53 lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::U16(v) => v.into(),
            Value::U32(v) => v.into(),
            Value::U64(v) => v as f64,
            Value::F32(v) => v.into(),
            Value::F64(v) => v,
        }
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::U16(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

/// Builds a [Record] from `name => value` pairs, keeping their order.
///
/// ```
/// use datastruct::{record, value::Value};
///
/// let r = record! { "a" => 1u32, "b" => 2.5f64 };
/// assert_eq!(r["a"], Value::U32(1));
/// assert_eq!(r.get_index(1).map(|(k, _)| k.as_str()), Some("b"));
/// ```
#[macro_export]
macro_rules! record {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut record = $crate::value::Record::new();
        $(record.insert(::std::string::String::from($name), $crate::value::Value::from($value));)*
        record
    }};
}
