//! Endianness-aware byte buffers.
//!
//! [ByteBuffer] is the contract every storage backend implements. A backend only
//! exposes its accessible bytes, its endianness and how it grows; the typed
//! codecs (`read_u16`, `write_f64`, ...) are provided on top of that and are
//! always bounds-checked against [ByteBuffer::len].
//!
//! Two backends are included:
//! - [VecBuffer]: owns a `Vec<u8>`, optionally viewing it from a byte offset.
//! - [SliceBuffer]: borrows a caller-owned fixed region and cannot grow.

use crate::{endian::Endianness, errors::BufferError};

macro_rules! accessors {
    ($read:ident, $write:ident, $decode:ident, $encode:ident, $ty:ty, $width:literal) => {
        #[doc = concat!("Reads a `", stringify!($ty), "` at `offset` using the buffer's endianness.")]
        fn $read(&self, offset: usize) -> Result<$ty, BufferError> {
            let bytes = self.read_array::<$width>(offset)?;
            Ok(self.endianness().$decode(bytes))
        }

        #[doc = concat!("Writes a `", stringify!($ty), "` at `offset` using the buffer's endianness.")]
        fn $write(&mut self, offset: usize, value: $ty) -> Result<(), BufferError> {
            let bytes = self.endianness().$encode(value);
            self.write_array(offset, bytes)
        }
    };
}

/// A byte-addressable region with a logical length and a fixed endianness.
///
/// Offsets passed to the codecs are relative to the start of the region, not to
/// any larger allocation the region may live in.
pub trait ByteBuffer {
    /// Byte order used by every multi-byte codec on this instance.
    fn endianness(&self) -> Endianness;

    /// The accessible bytes, exactly [ByteBuffer::len] long.
    fn as_bytes(&self) -> &[u8];

    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Resizes the region to at least `new_len` bytes, keeping existing bytes at
    /// the same offsets. Requests not larger than the current length are no-ops.
    fn grow(&mut self, new_len: usize) -> Result<(), BufferError>;

    /// Logical length in bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an independent copy of exactly the first `size` bytes.
    fn trim(&self, size: usize) -> Result<Vec<u8>, BufferError> {
        let bytes = self.as_bytes();
        bytes.get(..size).map(<[u8]>::to_vec).ok_or(BufferError::OutOfRange {
            offset: 0,
            width: size,
            len: bytes.len(),
        })
    }

    /// Copies `N` bytes starting at `offset`.
    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], BufferError> {
        let bytes = self.as_bytes();
        let range = checked_range(offset, N, bytes.len())?;

        let mut out = [0u8; N];
        out.copy_from_slice(&bytes[range]);

        Ok(out)
    }

    /// Copies `bytes` into the region starting at `offset`.
    fn write_array<const N: usize>(&mut self, offset: usize, bytes: [u8; N]) -> Result<(), BufferError> {
        let region = self.as_bytes_mut();
        let range = checked_range(offset, N, region.len())?;
        region[range].copy_from_slice(&bytes);

        Ok(())
    }

    accessors!(read_u16, write_u16, decode_u16, encode_u16, u16, 2);
    accessors!(read_u32, write_u32, decode_u32, encode_u32, u32, 4);
    accessors!(read_u64, write_u64, decode_u64, encode_u64, u64, 8);
    accessors!(read_f32, write_f32, decode_f32, encode_f32, f32, 4);
    accessors!(read_f64, write_f64, decode_f64, encode_f64, f64, 8);
}

fn checked_range(
    offset: usize,
    width: usize,
    len: usize,
) -> Result<std::ops::Range<usize>, BufferError> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(BufferError::OutOfRange { offset, width, len }),
    }
}

/// Growable buffer backed by a `Vec<u8>`.
///
/// The buffer may be a view into a larger allocation: only the bytes in
/// `offset..offset + len` are accessible. Growing a view that does not reach the
/// end of its allocation detaches it into a fresh allocation, so bytes outside
/// the view are never touched. After detaching, the surrounding bytes are no
/// longer part of this buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecBuffer {
    data: Vec<u8>,
    offset: usize,
    len: usize,
    endianness: Endianness,
}

impl VecBuffer {
    /// Allocates `len` zeroed bytes.
    pub fn with_len(len: usize) -> Self {
        VecBuffer {
            data: vec![0u8; len],
            offset: 0,
            len,
            endianness: Endianness::default(),
        }
    }

    /// Wraps an existing allocation as a whole.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let len = data.len();
        VecBuffer {
            data,
            offset: 0,
            len,
            endianness: Endianness::default(),
        }
    }

    /// Wraps `data` starting at byte `offset`. `len` defaults to the rest of the
    /// allocation. Fails if the view does not fit inside `data`.
    pub fn view(data: Vec<u8>, offset: usize, len: Option<usize>) -> Result<Self, BufferError> {
        let len = match len {
            Some(len) => len,
            None => data.len().checked_sub(offset).ok_or(BufferError::OutOfRange {
                offset,
                width: 0,
                len: data.len(),
            })?,
        };
        checked_range(offset, len, data.len())?;

        Ok(VecBuffer {
            data,
            offset,
            len,
            endianness: Endianness::default(),
        })
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Byte displacement of this view into its allocation.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the whole underlying allocation, including bytes outside the view.
    ///
    /// If a growth detached the view, this is the fresh allocation: it starts at
    /// the view's first byte and holds nothing from before or after the view.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Returns the accessible bytes as an owned vector, dropping any bytes of the
    /// allocation outside the view.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.offset == 0 {
            self.data.truncate(self.len);
            self.data
        } else {
            self.data[self.offset..self.offset + self.len].to_vec()
        }
    }
}

impl ByteBuffer for VecBuffer {
    fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn as_bytes(&self) -> &[u8] {
        &self.data[self.offset..self.offset + self.len]
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.offset..self.offset + self.len]
    }

    fn grow(&mut self, new_len: usize) -> Result<(), BufferError> {
        if new_len <= self.len {
            return Ok(());
        }

        let alloc_failed = || BufferError::AllocFailed { requested: new_len };

        if self.offset + self.len == self.data.len() {
            let end = self.offset.checked_add(new_len).ok_or_else(alloc_failed)?;
            tracing::trace!(from = self.len, to = new_len, "growing buffer in place");
            self.data
                .try_reserve_exact(end - self.data.len())
                .map_err(|_| alloc_failed())?;
            self.data.resize(end, 0);
        } else {
            tracing::debug!(
                offset = self.offset,
                from = self.len,
                to = new_len,
                "detaching buffer view before growth"
            );
            let mut data = Vec::new();
            data.try_reserve_exact(new_len).map_err(|_| alloc_failed())?;
            data.extend_from_slice(self.as_bytes());
            data.resize(new_len, 0);
            self.data = data;
            self.offset = 0;
        }
        self.len = new_len;

        Ok(())
    }
}

/// Fixed-size buffer over a caller-owned byte region. [ByteBuffer::grow] fails
/// with [BufferError::Unsupported].
#[derive(Debug)]
pub struct SliceBuffer<'a> {
    data: &'a mut [u8],
    endianness: Endianness,
}

impl<'a> SliceBuffer<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        SliceBuffer {
            data,
            endianness: Endianness::default(),
        }
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }
}

impl ByteBuffer for SliceBuffer<'_> {
    fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn as_bytes(&self) -> &[u8] {
        &*self.data
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    fn grow(&mut self, new_len: usize) -> Result<(), BufferError> {
        if new_len <= self.data.len() {
            return Ok(());
        }

        Err(BufferError::Unsupported)
    }
}
