//! Growable, contiguous array of fixed-layout records.

use std::sync::Arc;

use crate::{
    buffer::{ByteBuffer, VecBuffer},
    endian::Endianness,
    errors::{ArrayError, SchemaError},
    schema::StructSchema,
    value::Record,
};

/// Growth factor used when none is given.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

/// Settings for creating an empty [StructArray].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrayOptions {
    /// Number of records allocated up front.
    pub initial_capacity: usize,
    /// Multiplier applied to the capacity when an append finds the array full.
    pub growth_factor: f64,
    /// Byte order of the backing buffer.
    pub endianness: Endianness,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        ArrayOptions {
            initial_capacity: 16,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            endianness: Endianness::default(),
        }
    }
}

impl ArrayOptions {
    pub fn set_initial_capacity(&mut self, initial_capacity: usize) -> &mut Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn set_growth_factor(&mut self, growth_factor: f64) -> &mut Self {
        self.growth_factor = growth_factor;
        self
    }

    pub fn set_endianness(&mut self, endianness: Endianness) -> &mut Self {
        self.endianness = endianness;
        self
    }
}

/// Records of one [StructSchema] stored back to back in a single buffer.
///
/// `len` counts live records, `capacity` counts the slots the buffer can hold.
/// Appending to a full array grows the capacity by the growth factor. Random
/// access by index is checked against `len`.
///
/// ```
/// use datastruct::{array::StructArray, field, record, schema::StructSchema};
///
/// let schema = StructSchema::from_fields([("a", field::uint32()), ("b", field::uint64())]).unwrap();
/// let mut list = StructArray::new(schema, 5, 1.5).unwrap();
/// for i in 0..6u32 {
///     list.append(&record! { "a" => i, "b" => u64::from(i) * 10 }).unwrap();
/// }
///
/// assert_eq!(list.len(), 6);
/// assert_eq!(list.capacity(), 7);
/// assert_eq!(list.to_bytes().unwrap().len(), 6 * 12);
/// ```
#[derive(Debug, Clone)]
pub struct StructArray<B = VecBuffer> {
    schema: Arc<StructSchema>,
    buffer: B,
    len: usize,
    capacity: usize,
    growth_factor: f64,
}

impl StructArray<VecBuffer> {
    /// Creates an empty array with room for `initial_capacity` records.
    pub fn new(
        schema: impl Into<Arc<StructSchema>>,
        initial_capacity: usize,
        growth_factor: f64,
    ) -> Result<Self, ArrayError> {
        Self::from_options(
            schema,
            ArrayOptions::default()
                .set_initial_capacity(initial_capacity)
                .set_growth_factor(growth_factor),
        )
    }

    /// Creates an empty array with the default growth factor.
    pub fn with_capacity(
        schema: impl Into<Arc<StructSchema>>,
        initial_capacity: usize,
    ) -> Result<Self, ArrayError> {
        Self::new(schema, initial_capacity, DEFAULT_GROWTH_FACTOR)
    }

    pub fn from_options(
        schema: impl Into<Arc<StructSchema>>,
        options: &ArrayOptions,
    ) -> Result<Self, ArrayError> {
        let schema = non_empty(schema.into())?;
        check_growth_factor(options.growth_factor)?;

        let bytes = byte_len(&schema, options.initial_capacity)?;
        let buffer = VecBuffer::with_len(bytes).with_endianness(options.endianness);

        Ok(StructArray {
            schema,
            buffer,
            len: 0,
            capacity: options.initial_capacity,
            growth_factor: options.growth_factor,
        })
    }
}

impl<B: ByteBuffer> StructArray<B> {
    /// Wraps a buffer that is assumed to be fully populated with records.
    ///
    /// Both length and capacity become `floor(buffer.len() / schema.size())`;
    /// trailing bytes that do not form a whole record are ignored.
    pub fn from_buffer(schema: impl Into<Arc<StructSchema>>, buffer: B) -> Result<Self, ArrayError> {
        let schema = non_empty(schema.into())?;
        let capacity = buffer.len() / schema.size();

        Ok(StructArray {
            schema,
            buffer,
            len: capacity,
            capacity,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        })
    }

    pub fn set_growth_factor(&mut self, growth_factor: f64) -> Result<&mut Self, ArrayError> {
        check_growth_factor(growth_factor)?;
        self.growth_factor = growth_factor;
        Ok(self)
    }

    pub fn schema(&self) -> &Arc<StructSchema> {
        &self.schema
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of records the buffer can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    /// Appends a record, growing the capacity first if the array is full.
    ///
    /// If the write fails the length is unchanged.
    pub fn append(&mut self, record: &Record) -> Result<(), ArrayError> {
        if self.len == self.capacity {
            let grown = (self.capacity as f64 * self.growth_factor).floor() as usize;
            self.grow(grown.max(self.capacity.saturating_add(1)))?;
        }

        let offset = self.len * self.schema.size();
        self.schema.write(&mut self.buffer, offset, record)?;
        self.len += 1;

        Ok(())
    }

    /// Overwrites the record at `index`. Does not grow or change the length.
    pub fn write(&mut self, index: usize, record: &Record) -> Result<(), ArrayError> {
        let offset = self.offset_of(index)?;
        self.schema.write(&mut self.buffer, offset, record)?;
        Ok(())
    }

    /// Reads the record at `index` into `out`, reusing its allocation.
    pub fn read_into(&self, index: usize, out: &mut Record) -> Result<(), ArrayError> {
        let offset = self.offset_of(index)?;
        self.schema.read_into(&self.buffer, offset, out)?;
        Ok(())
    }

    /// Reads the record at `index` into a new [Record].
    pub fn read(&self, index: usize) -> Result<Record, ArrayError> {
        let offset = self.offset_of(index)?;
        Ok(self.schema.read(&self.buffer, offset)?)
    }

    /// Grows the backing buffer to hold `capacity` records. No-op if the array
    /// can already hold that many.
    pub fn grow(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity {
            return Ok(());
        }

        let bytes = byte_len(&self.schema, capacity)?;
        tracing::trace!(from = self.capacity, to = capacity, bytes, "growing struct array");
        self.buffer.grow(bytes)?;
        self.capacity = capacity;

        Ok(())
    }

    /// Visits every live record in index order.
    ///
    /// A single scratch record is reused for all steps, so the reference passed
    /// to `visit` is only valid for that call. Use [StructArray::iter] for owned
    /// records.
    pub fn for_each<F>(&self, mut visit: F) -> Result<(), ArrayError>
    where
        F: FnMut(usize, &Record),
    {
        let mut scratch = Record::with_capacity(self.schema.len());
        for index in 0..self.len {
            self.read_into(index, &mut scratch)?;
            visit(index, &scratch);
        }

        Ok(())
    }

    /// Iterates over owned copies of the live records.
    pub fn iter(&self) -> Iter<'_, B> {
        Iter {
            array: self,
            index: 0,
        }
    }

    /// Copies exactly the live records out of the buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArrayError> {
        Ok(self.buffer.trim(self.len * self.schema.size())?)
    }

    fn offset_of(&self, index: usize) -> Result<usize, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        Ok(index * self.schema.size())
    }
}

/// Iterator over owned records of a [StructArray]. Created by [StructArray::iter].
pub struct Iter<'a, B> {
    array: &'a StructArray<B>,
    index: usize,
}

impl<B: ByteBuffer> Iterator for Iter<'_, B> {
    type Item = Result<Record, ArrayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.array.len {
            return None;
        }

        let record = self.array.read(self.index);
        self.index += 1;

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<B: ByteBuffer> ExactSizeIterator for Iter<'_, B> {}

impl<'a, B: ByteBuffer> IntoIterator for &'a StructArray<B> {
    type Item = Result<Record, ArrayError>;
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn non_empty(schema: Arc<StructSchema>) -> Result<Arc<StructSchema>, SchemaError> {
    if schema.size() == 0 {
        return Err(SchemaError::EmptySchema);
    }

    Ok(schema)
}

fn check_growth_factor(growth_factor: f64) -> Result<(), ArrayError> {
    if !growth_factor.is_finite() || growth_factor <= 1.0 {
        return Err(ArrayError::InvalidGrowthFactor(growth_factor));
    }

    Ok(())
}

fn byte_len(schema: &StructSchema, capacity: usize) -> Result<usize, ArrayError> {
    capacity
        .checked_mul(schema.size())
        .ok_or(ArrayError::CapacityOverflow(capacity))
}
