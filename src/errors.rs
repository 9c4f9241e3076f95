//! Error types for schema mutation, buffer access, record writes and struct arrays.

use std::fmt;

/// Errors produced when building or mutating a [crate::schema::StructSchema].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field with this name already exists.
    DuplicateField(String),
    /// No field with this name exists.
    UnknownField(String),
    /// The schema has no fields, so a record occupies zero bytes.
    EmptySchema,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateField(name) => {
                write!(f, "cannot add field `{name}` since it already exists")
            }
            SchemaError::UnknownField(name) => {
                write!(f, "could not find field `{name}` to replace")
            }
            SchemaError::EmptySchema => f.write_str("schema has no fields"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors produced by a [crate::buffer::ByteBuffer] backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// `offset + width` lies beyond the accessible extent of the buffer.
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
    /// The backend cannot be resized.
    Unsupported,
    /// Growing to `requested` bytes overflows or cannot be allocated.
    AllocFailed { requested: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::OutOfRange { offset, width, len } => write!(
                f,
                "access of {width} bytes at offset {offset} exceeds buffer length {len}"
            ),
            BufferError::Unsupported => f.write_str("buffer backend cannot grow"),
            BufferError::AllocFailed { requested } => {
                write!(f, "cannot grow buffer to {requested} bytes")
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Errors produced when writing a record through a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The record has no value for a declared field.
    MissingField(String),
    /// The input is not a record, or a value does not fit its field's kind.
    InvalidValue,
    Buffer(BufferError),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::MissingField(name) => write!(f, "field `{name}` is missing in record"),
            WriteError::InvalidValue => f.write_str("value does not match the record layout"),
            WriteError::Buffer(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Buffer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BufferError> for WriteError {
    fn from(value: BufferError) -> Self {
        WriteError::Buffer(value)
    }
}

/// Errors produced by [crate::array::StructArray].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// Index is not below the number of live records.
    IndexOutOfRange { index: usize, len: usize },
    /// Growth factor must be finite and greater than 1.
    InvalidGrowthFactor(f64),
    /// The requested capacity in bytes does not fit in `usize`.
    CapacityOverflow(usize),
    Schema(SchemaError),
    Buffer(BufferError),
    Write(WriteError),
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            ArrayError::InvalidGrowthFactor(factor) => {
                write!(f, "growth factor {factor} must be finite and greater than 1")
            }
            ArrayError::CapacityOverflow(capacity) => {
                write!(f, "capacity of {capacity} records overflows the addressable size")
            }
            ArrayError::Schema(err) => err.fmt(f),
            ArrayError::Buffer(err) => err.fmt(f),
            ArrayError::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ArrayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArrayError::Schema(err) => Some(err),
            ArrayError::Buffer(err) => Some(err),
            ArrayError::Write(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for ArrayError {
    fn from(value: SchemaError) -> Self {
        ArrayError::Schema(value)
    }
}

impl From<BufferError> for ArrayError {
    fn from(value: BufferError) -> Self {
        ArrayError::Buffer(value)
    }
}

impl From<WriteError> for ArrayError {
    fn from(value: WriteError) -> Self {
        ArrayError::Write(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SchemaError::DuplicateField("age".to_string()).to_string(),
            "cannot add field `age` since it already exists"
        );
        assert_eq!(
            WriteError::MissingField("b".to_string()).to_string(),
            "field `b` is missing in record"
        );
        assert_eq!(
            BufferError::OutOfRange {
                offset: 6,
                width: 4,
                len: 8
            }
            .to_string(),
            "access of 4 bytes at offset 6 exceeds buffer length 8"
        );
    }

    #[test]
    fn test_buffer_error_lifts_into_write_and_array_errors() {
        let write: WriteError = BufferError::Unsupported.into();
        assert_eq!(write, WriteError::Buffer(BufferError::Unsupported));

        let array: ArrayError = write.into();
        assert_eq!(
            array,
            ArrayError::Write(WriteError::Buffer(BufferError::Unsupported))
        );
    }
}
