//! Struct schema: an ordered set of named fixed-size fields describing one record's byte layout.

use indexmap::IndexMap;

use crate::{
    buffer::ByteBuffer,
    errors::{BufferError, SchemaError, WriteError},
    field::FieldKind,
    value::Record,
};

/// Ordered mapping of field names to [FieldKind]s.
///
/// Fields are packed in insertion order with no padding, so [StructSchema::size]
/// is always the sum of the field sizes. Cloning produces an independent schema.
#[derive(Debug, Clone, Default)]
pub struct StructSchema {
    size: usize,
    fields: IndexMap<String, FieldKind>,
}

impl StructSchema {
    /// Creates a schema without fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from `(name, kind)` pairs in order. Fails on repeated names.
    pub fn from_fields<I, N>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, FieldKind)>,
        N: Into<String>,
    {
        let mut schema = Self::new();
        schema.add_fields(fields)?;
        Ok(schema)
    }

    /// Size of one record in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in layout order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, kind)` pairs in layout order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn field(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    /// Byte offset of `name` within a record.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let index = self.fields.get_index_of(name)?;
        Some(self.fields.values().take(index).map(|kind| kind.size()).sum())
    }

    /// Appends fields after the existing ones, in the given order.
    ///
    /// Fails with [SchemaError::DuplicateField] if a name already exists or is
    /// given twice; the schema is left unchanged in that case.
    pub fn add_fields<I, N>(&mut self, fields: I) -> Result<&mut Self, SchemaError>
    where
        I: IntoIterator<Item = (N, FieldKind)>,
        N: Into<String>,
    {
        let mut added: IndexMap<String, FieldKind> = IndexMap::new();
        for (name, kind) in fields {
            let name = name.into();
            if self.fields.contains_key(&name) || added.contains_key(&name) {
                return Err(SchemaError::DuplicateField(name));
            }
            added.insert(name, kind);
        }

        let added_size: usize = added.values().map(|kind| kind.size()).sum();
        tracing::debug!(count = added.len(), added_size, "adding schema fields");

        self.fields.extend(added);
        self.size += added_size;

        Ok(self)
    }

    /// Replaces the kind of existing fields, keeping their position.
    ///
    /// Fails with [SchemaError::UnknownField] if a name does not exist; the schema
    /// is left unchanged in that case.
    pub fn replace_fields<I, N>(&mut self, fields: I) -> Result<&mut Self, SchemaError>
    where
        I: IntoIterator<Item = (N, FieldKind)>,
        N: Into<String>,
    {
        let mut replacements = Vec::new();
        for (name, kind) in fields {
            let name = name.into();
            if !self.fields.contains_key(&name) {
                return Err(SchemaError::UnknownField(name));
            }
            replacements.push((name, kind));
        }

        for (name, kind) in replacements {
            if let Some(slot) = self.fields.get_mut(&name) {
                tracing::debug!(field = %name, from = ?*slot, to = ?kind, "replacing schema field");
                self.size = self.size - slot.size() + kind.size();
                *slot = kind;
            }
        }

        Ok(self)
    }

    /// Reads one record at `offset` into `out`, inserting every field in order.
    ///
    /// Keys already in `out` are overwritten, others are kept, so one record can
    /// be reused across many reads.
    pub fn read_into<B: ByteBuffer>(
        &self,
        buffer: &B,
        mut offset: usize,
        out: &mut Record,
    ) -> Result<(), BufferError> {
        for (name, kind) in &self.fields {
            let value = kind.read(buffer, offset)?;
            match out.get_mut(name.as_str()) {
                Some(slot) => *slot = value,
                None => {
                    out.insert(name.clone(), value);
                }
            }
            offset += kind.size();
        }

        Ok(())
    }

    /// Reads one record at `offset` into a new [Record].
    pub fn read<B: ByteBuffer>(&self, buffer: &B, offset: usize) -> Result<Record, BufferError> {
        let mut record = Record::with_capacity(self.fields.len());
        self.read_into(buffer, offset, &mut record)?;
        Ok(record)
    }

    /// Writes `record` at `offset`, field by field in layout order.
    ///
    /// Fails with [WriteError::MissingField] if a declared field has no value.
    /// Extra keys in `record` are ignored. On error the bytes of fields before the
    /// failing one have already been written.
    pub fn write<B: ByteBuffer>(
        &self,
        buffer: &mut B,
        mut offset: usize,
        record: &Record,
    ) -> Result<(), WriteError> {
        for (name, kind) in &self.fields {
            let value = record
                .get(name.as_str())
                .ok_or_else(|| WriteError::MissingField(name.clone()))?;
            kind.write(buffer, offset, value)?;
            offset += kind.size();
        }

        Ok(())
    }
}

impl PartialEq for StructSchema {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.fields.iter().eq(other.fields.iter())
    }
}

impl Eq for StructSchema {}
