//! JSON-deserializable schema description and JSON record bridging.
//!
//! [SchemaDef] describes the layout of a record: a list of named fields, each
//! with one of the fixed-width kinds. It is meant to be loaded from JSON (for
//! example a schema file shipped next to the data) and converted into a
//! [StructSchema]:
//!
//! ```
//! use datastruct::{schema::StructSchema, serde::SchemaDef};
//!
//! let def: SchemaDef = serde_json::from_str(
//!     r#"{ "fields": [ { "name": "a", "kind": "uint32" }, { "name": "b", "kind": "uint64" } ] }"#,
//! ).unwrap();
//! let schema = StructSchema::try_from(def).unwrap();
//! assert_eq!(schema.size(), 12);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    buffer::ByteBuffer,
    errors::{BufferError, SchemaError, WriteError},
    field::FieldKind,
    schema::StructSchema,
    value::Value,
};

/// Top-level schema definition: fields in layout order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SchemaDef {
    pub fields: Vec<FieldDef>,
}

/// A single named field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Becomes the key in read records.
    pub name: String,
    pub kind: FieldKindDef,
}

/// Fixed-width field kind.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKindDef {
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl From<FieldKind> for FieldKindDef {
    fn from(value: FieldKind) -> Self {
        match value {
            FieldKind::U16 => FieldKindDef::Uint16,
            FieldKind::U32 => FieldKindDef::Uint32,
            FieldKind::U64 => FieldKindDef::Uint64,
            FieldKind::F32 => FieldKindDef::Float32,
            FieldKind::F64 => FieldKindDef::Float64,
        }
    }
}

impl TryFrom<SchemaDef> for StructSchema {
    type Error = SchemaError;

    fn try_from(value: SchemaDef) -> Result<Self, Self::Error> {
        StructSchema::from_fields(
            value
                .fields
                .into_iter()
                .map(|field| (field.name, FieldKind::from(field.kind))),
        )
    }
}

impl From<&StructSchema> for SchemaDef {
    fn from(value: &StructSchema) -> Self {
        SchemaDef {
            fields: value
                .fields()
                .map(|(name, kind)| FieldDef {
                    name: name.to_string(),
                    kind: kind.into(),
                })
                .collect(),
        }
    }
}

impl StructSchema {
    /// Writes a JSON object at `offset`.
    ///
    /// Fails with [WriteError::InvalidValue] if `value` is not an object or a
    /// field value is not a number of the right shape, and with
    /// [WriteError::MissingField] if a declared field is absent.
    pub fn write_json<B: ByteBuffer>(
        &self,
        buffer: &mut B,
        mut offset: usize,
        value: &serde_json::Value,
    ) -> Result<(), WriteError> {
        let object = value.as_object().ok_or(WriteError::InvalidValue)?;

        for (name, kind) in self.fields() {
            let json = object
                .get(name)
                .ok_or_else(|| WriteError::MissingField(name.to_string()))?;
            kind.write(buffer, offset, &json_to_value(kind, json)?)?;
            offset += kind.size();
        }

        Ok(())
    }

    /// Reads the record at `offset` as a JSON object with keys in field order.
    /// Non-finite floats become `null`.
    pub fn read_json<B: ByteBuffer>(
        &self,
        buffer: &B,
        mut offset: usize,
    ) -> Result<serde_json::Value, BufferError> {
        let mut object = serde_json::Map::with_capacity(self.len());

        for (name, kind) in self.fields() {
            let json = match kind.read(buffer, offset)? {
                Value::U16(v) => serde_json::Value::from(v),
                Value::U32(v) => serde_json::Value::from(v),
                Value::U64(v) => serde_json::Value::from(v),
                Value::F32(v) => float_to_json(f64::from(v)),
                Value::F64(v) => float_to_json(v),
            };
            object.insert(name.to_string(), json);
            offset += kind.size();
        }

        Ok(serde_json::Value::Object(object))
    }
}

fn json_to_value(kind: FieldKind, json: &serde_json::Value) -> Result<Value, WriteError> {
    let value = match kind {
        FieldKind::U16 | FieldKind::U32 | FieldKind::U64 => json.as_u64().map(Value::U64),
        FieldKind::F32 | FieldKind::F64 => json.as_f64().map(Value::F64),
    };

    value.ok_or(WriteError::InvalidValue)
}

fn float_to_json(value: f64) -> serde_json::Value {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
