//! # datastruct
//!
//! C-like structs over raw byte buffers.
//!
//! A [schema::StructSchema] lists named fixed-width fields (`u16`, `u32`, `u64`,
//! `f32`, `f64`) packed in order without padding. Records are read from and
//! written to any [buffer::ByteBuffer], whose endianness is fixed when it is
//! created. [array::StructArray] stores many records of one schema back to back
//! in a single growable buffer.
//!
//! ## Example
//!
//! ```
//! use datastruct::{
//!     buffer::{ByteBuffer, VecBuffer},
//!     endian::Endianness,
//!     field,
//!     record,
//!     schema::StructSchema,
//! };
//!
//! let schema = StructSchema::from_fields([
//!     ("age", field::uint16()),
//!     ("msAlive", field::uint32()),
//!     ("balance", field::float32()),
//!     ("moneySpentInEntireLife", field::float64()),
//!     ("timestamp", field::uint64()),
//! ])
//! .unwrap();
//! assert_eq!(schema.size(), 26);
//!
//! let value = record! {
//!     "age" => 16u16,
//!     "msAlive" => 26_586_522u32,
//!     "balance" => 500.5f32,
//!     "moneySpentInEntireLife" => 65656.56f64,
//!     "timestamp" => 1_325_704_080_000u64,
//! };
//!
//! let mut buffer = VecBuffer::with_len(schema.size()).with_endianness(Endianness::Big);
//! schema.write(&mut buffer, 0, &value).unwrap();
//! assert_eq!(buffer.read_u16(0).unwrap(), 16);
//! assert_eq!(schema.read(&buffer, 0).unwrap(), value);
//! ```

pub mod array;
pub mod buffer;
pub mod endian;
pub mod errors;
pub mod field;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;
