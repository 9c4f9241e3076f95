use std::sync::Arc;

use datastruct::{
    array::StructArray,
    buffer::{ByteBuffer, VecBuffer},
    endian::Endianness,
    errors::{ArrayError, BufferError, SchemaError},
    field::{float32, float64, uint16, uint32, uint64},
    record,
    schema::StructSchema,
    value::{Record, Value},
};

fn person() -> StructSchema {
    StructSchema::from_fields([
        ("age", uint16()),
        ("msAlive", uint32()),
        ("balance", float32()),
        ("moneySpentInEntireLife", float64()),
    ])
    .unwrap()
}

fn person_value() -> Record {
    record! {
        "age" => 16u16,
        "msAlive" => 26_586_522u32,
        "balance" => 500.5f32,
        "moneySpentInEntireLife" => 65656.56f64,
    }
}

#[test]
fn test_write_through_view_at_offset() {
    let schema = Arc::new(person());
    let size = schema.size();

    let view = VecBuffer::view(vec![0u8; size * 2], size, None).unwrap();
    let mut list = StructArray::from_buffer(Arc::clone(&schema), view).unwrap();
    assert_eq!(list.len(), 1);
    list.write(0, &person_value()).unwrap();

    let whole = VecBuffer::from_vec(list.into_buffer().into_inner());
    let list = StructArray::from_buffer(schema, whole).unwrap();
    assert_eq!(list.len(), 2);

    let read = list.read(1).unwrap();
    assert_eq!(read, person_value());
    assert!(read.keys().eq(person_value().keys()));
    assert_eq!(list.read(0).unwrap()["age"], Value::U16(0));
}

#[test]
fn test_view_into_shared_allocation() {
    let schema = Arc::new(person());
    let size = schema.size();

    let mut full = StructArray::with_capacity(Arc::clone(&schema), 2).unwrap();
    full.append(&record! {
        "age" => 1u16, "msAlive" => 1u32, "balance" => 1.0f32, "moneySpentInEntireLife" => 1.0f64,
    })
    .unwrap();
    full.append(&person_value()).unwrap();

    let bytes = full.to_bytes().unwrap();
    let view = VecBuffer::view(bytes, size, None).unwrap();
    let list = StructArray::from_buffer(schema, view).unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.read(0).unwrap(), person_value());
}

#[test]
fn test_length_inferred_from_view() {
    let schema = Arc::new(StructSchema::from_fields([("b", uint64())]).unwrap());
    let values = [5698u64, 236, 6559];

    let mut fill = StructArray::with_capacity(Arc::clone(&schema), values.len()).unwrap();
    for b in values {
        fill.append(&record! { "b" => b }).unwrap();
    }
    let bytes = fill.to_bytes().unwrap();
    assert_eq!(bytes.len(), schema.size() * values.len());

    let view = VecBuffer::view(bytes, schema.size(), Some(2 * schema.size())).unwrap();
    let list = StructArray::from_buffer(schema, view).unwrap();
    assert_eq!(list.len(), 2);

    let mut seen = Vec::new();
    list.for_each(|_, record| seen.push(record["b"])).unwrap();
    assert_eq!(seen, vec![Value::U64(236), Value::U64(6559)]);
}

#[test]
fn test_growing_a_view_detaches_it() {
    let schema = Arc::new(StructSchema::from_fields([("a", uint32())]).unwrap());
    let data = vec![1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0];

    let view = VecBuffer::view(data, 4, Some(4)).unwrap();
    let mut list = StructArray::from_buffer(Arc::clone(&schema), view).unwrap();
    list.append(&record! { "a" => 9u32 }).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.read(0).unwrap()["a"], Value::U32(2));
    assert_eq!(list.read(1).unwrap()["a"], Value::U32(9));
    assert_eq!(list.buffer().offset(), 0);
}

#[test]
fn test_growing_a_trailing_view_keeps_prefix() {
    let schema = Arc::new(StructSchema::from_fields([("a", uint32())]).unwrap());
    let data = vec![1, 0, 0, 0, 2, 0, 0, 0];

    let view = VecBuffer::view(data, 4, None).unwrap();
    let mut list = StructArray::from_buffer(schema, view).unwrap();
    list.append(&record! { "a" => 9u32 }).unwrap();

    assert_eq!(list.capacity(), 2);
    assert_eq!(
        list.into_buffer().into_inner(),
        vec![1, 0, 0, 0, 2, 0, 0, 0, 9, 0, 0, 0]
    );
}

#[test]
fn test_big_endian_array_layout() {
    let schema = StructSchema::from_fields([("a", uint16()), ("b", uint32())]).unwrap();
    let buffer = VecBuffer::with_len(0).with_endianness(Endianness::Big);
    let mut list = StructArray::from_buffer(schema, buffer).unwrap();
    assert_eq!(list.capacity(), 0);

    list.append(&record! { "a" => 0x0102u16, "b" => 0x0304_0506u32 }).unwrap();
    assert_eq!(list.to_bytes().unwrap(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_errors_surface_through_array() {
    let schema = StructSchema::from_fields([("a", uint16())]).unwrap();
    let mut list = StructArray::with_capacity(schema, 1).unwrap();

    let err = list.append(&record! { "a" => 1.5f64 }).unwrap_err();
    assert_eq!(err.to_string(), "value does not match the record layout");
    assert!(std::error::Error::source(&err).is_some());

    assert!(matches!(
        list.read(0),
        Err(ArrayError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn test_mutated_copy_does_not_affect_arrays() {
    let schema = Arc::new(person());
    let list = StructArray::with_capacity(Arc::clone(&schema), 1).unwrap();

    let mut extended = (*schema).clone();
    extended.add_fields([("timestamp", uint64())]).unwrap();
    assert_eq!(
        extended.replace_fields([("missing", uint16())]).unwrap_err(),
        SchemaError::UnknownField("missing".to_string())
    );

    assert_eq!(list.schema().size(), 18);
    assert_eq!(extended.size(), 26);
}

#[test]
fn test_trim_beyond_length() {
    let buffer = VecBuffer::with_len(4);
    assert_eq!(
        buffer.trim(5),
        Err(BufferError::OutOfRange {
            offset: 0,
            width: 5,
            len: 4
        })
    );
}
