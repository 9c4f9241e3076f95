//! Field kinds: the fixed-width codecs a schema is built from.

use crate::{
    buffer::ByteBuffer,
    errors::{BufferError, WriteError},
    value::Value,
};

/// Type of a single struct field. Each kind has a fixed size in bytes and reads
/// or writes through the matching [ByteBuffer] codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    U16,
    U32,
    U64,
    F32,
    F64,
}

pub fn uint16() -> FieldKind {
    FieldKind::U16
}

pub fn uint32() -> FieldKind {
    FieldKind::U32
}

pub fn uint64() -> FieldKind {
    FieldKind::U64
}

pub fn float32() -> FieldKind {
    FieldKind::F32
}

pub fn float64() -> FieldKind {
    FieldKind::F64
}

impl FieldKind {
    /// Size of an encoded value in bytes.
    pub const fn size(self) -> usize {
        match self {
            FieldKind::U16 => 2,
            FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::U64 | FieldKind::F64 => 8,
        }
    }

    /// Decodes a value of this kind at `offset`.
    pub fn read<B: ByteBuffer>(self, buffer: &B, offset: usize) -> Result<Value, BufferError> {
        Ok(match self {
            FieldKind::U16 => Value::U16(buffer.read_u16(offset)?),
            FieldKind::U32 => Value::U32(buffer.read_u32(offset)?),
            FieldKind::U64 => Value::U64(buffer.read_u64(offset)?),
            FieldKind::F32 => Value::F32(buffer.read_f32(offset)?),
            FieldKind::F64 => Value::F64(buffer.read_f64(offset)?),
        })
    }

    /// Encodes `value` as this kind at `offset`.
    ///
    /// Integer kinds accept any integer value that fits; floats are rejected with
    /// [WriteError::InvalidValue]. Float kinds accept every value.
    pub fn write<B: ByteBuffer>(
        self,
        buffer: &mut B,
        offset: usize,
        value: &Value,
    ) -> Result<(), WriteError> {
        match self {
            FieldKind::U16 => buffer.write_u16(offset, int_value(value)?)?,
            FieldKind::U32 => buffer.write_u32(offset, int_value(value)?)?,
            FieldKind::U64 => buffer.write_u64(offset, int_value(value)?)?,
            FieldKind::F32 => buffer.write_f32(offset, float32_value(value))?,
            FieldKind::F64 => buffer.write_f64(offset, value.as_f64())?,
        }

        Ok(())
    }
}

fn int_value<T: TryFrom<u64>>(value: &Value) -> Result<T, WriteError> {
    value
        .as_u64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or(WriteError::InvalidValue)
}

fn float32_value(value: &Value) -> f32 {
    match *value {
        Value::F32(v) => v,
        other => other.as_f64() as f32,
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldKindDef> for FieldKind {
    fn from(value: crate::serde::FieldKindDef) -> Self {
        match value {
            crate::serde::FieldKindDef::Uint16 => FieldKind::U16,
            crate::serde::FieldKindDef::Uint32 => FieldKind::U32,
            crate::serde::FieldKindDef::Uint64 => FieldKind::U64,
            crate::serde::FieldKindDef::Float32 => FieldKind::F32,
            crate::serde::FieldKindDef::Float64 => FieldKind::F64,
        }
    }
}
