use crate::encoding::{byte_length, Encoding};
use crate::error::{check_bounds, BufferError, Result};
use crate::reader::BufferReader;
use crate::writer::BufferWriter;
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Bound, RangeBounds};

/// How many bytes `Debug` shows before eliding the rest.
pub const INSPECT_MAX_BYTES: usize = 50;

/// A fixed-length, mutable sequence of bytes that owns its storage.
///
/// The length is set at construction and never changes. Reading and writing go through the
/// [`BufferReader`] and [`BufferWriter`] traits, which are also implemented by the non-owning
/// [`ByteView`] and [`ByteViewMut`] windows returned by `slice` and `slice_mut`.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct ByteBuffer {
    data: Box<[u8]>,
}

impl ByteBuffer {
    /// Creates a zero-filled buffer of `len` bytes.
    pub fn from_length(len: usize) -> Self {
        Self {
            data: vec![0; len].into_boxed_slice(),
        }
    }

    /// Creates a buffer holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.into(),
        }
    }

    /// Creates a buffer from a plain sequence of numbers. Each value keeps its low 8 bits.
    pub fn from_numbers<I: IntoIterator<Item = i64>>(numbers: I) -> Self {
        Self {
            data: numbers.into_iter().map(|n| n as u8).collect(),
        }
    }

    /// Creates a buffer sized to the encoded length of `s`, then encodes `s` into it.
    pub fn from_string(s: &str, encoding: Encoding) -> Self {
        let mut buf = Self::from_length(byte_length(s, encoding));
        crate::text::encode(&mut buf.data, s, encoding);
        buf
    }

    /// Like [`ByteBuffer::from_string`], but takes an optional encoding name. `None` means
    /// `utf8`; an unrecognized name is an error.
    pub fn from_string_named(s: &str, encoding: Option<&str>) -> Result<Self> {
        Ok(Self::from_string(s, Encoding::resolve(encoding)?))
    }

    /// Concatenates buffers into a new one.
    ///
    /// Without `total_length` the result is exactly as long as all inputs together. A smaller
    /// `total_length` truncates the result; a larger one leaves zeros at the end.
    pub fn concat<B: AsRef<[u8]>>(list: &[B], total_length: Option<usize>) -> Self {
        let sum: usize = list.iter().map(|b| b.as_ref().len()).sum();
        let total = total_length.unwrap_or(sum);

        #[cfg(feature = "tracing")]
        if total != sum {
            tracing::debug!(total, sum, "concat length differs from input length");
        }

        let mut out = Self::from_length(total);
        let mut pos = 0;
        for b in list {
            let src = b.as_ref();
            let n = src.len().min(total - pos);
            out.data[pos..pos + n].copy_from_slice(&src[..n]);
            pos += n;
            if pos == total {
                break;
            }
        }
        out
    }

    /// Returns the owned bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_vec()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }
}

impl From<Box<[u8]>> for ByteBuffer {
    fn from(data: Box<[u8]>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for ByteBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl BufferReader for ByteBuffer {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl BufferWriter for ByteBuffer {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        inspect(&self.data, f)
    }
}

/// A read-only window into storage owned by someone else.
#[derive(Copy, Clone)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
    byte_offset: usize,
}

impl<'a> ByteView<'a> {
    /// A view of `memory` starting at `byte_offset` and running to its end.
    pub fn over(memory: &'a [u8], byte_offset: usize) -> Result<Self> {
        check_bounds(byte_offset, 0, memory.len())?;
        Ok(Self {
            bytes: &memory[byte_offset..],
            byte_offset,
        })
    }

    pub(crate) fn window(bytes: &'a [u8], byte_offset: usize) -> Self {
        Self { bytes, byte_offset }
    }

    /// The viewed bytes, with the lifetime of the underlying storage.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Copies the viewed bytes into a new owning buffer.
    pub fn to_buffer(&self) -> ByteBuffer {
        ByteBuffer::from_bytes(self.bytes)
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl BufferReader for ByteView<'_> {
    fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    fn byte_offset(&self) -> usize {
        self.byte_offset
    }
}

impl fmt::Debug for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        inspect(self.bytes, f)
    }
}

/// A mutable window into storage owned by someone else. Writes through it are visible to the
/// owner once the view is dropped.
pub struct ByteViewMut<'a> {
    bytes: &'a mut [u8],
    byte_offset: usize,
}

impl<'a> ByteViewMut<'a> {
    /// A mutable view of `memory` starting at `byte_offset` and running to its end.
    pub fn over(memory: &'a mut [u8], byte_offset: usize) -> Result<Self> {
        check_bounds(byte_offset, 0, memory.len())?;
        Ok(Self {
            bytes: &mut memory[byte_offset..],
            byte_offset,
        })
    }

    pub(crate) fn window(bytes: &'a mut [u8], byte_offset: usize) -> Self {
        Self { bytes, byte_offset }
    }

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> ByteView<'_> {
        ByteView::window(&*self.bytes, self.byte_offset)
    }
}

impl AsRef<[u8]> for ByteViewMut<'_> {
    fn as_ref(&self) -> &[u8] {
        &*self.bytes
    }
}

impl AsMut<[u8]> for ByteViewMut<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

impl BufferReader for ByteViewMut<'_> {
    fn as_bytes(&self) -> &[u8] {
        &*self.bytes
    }

    fn byte_offset(&self) -> usize {
        self.byte_offset
    }
}

impl BufferWriter for ByteViewMut<'_> {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

impl fmt::Debug for ByteViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        inspect(&*self.bytes, f)
    }
}

/// `<Buffer 01 02 ...>`
fn inspect(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("<Buffer")?;
    for b in bytes.iter().take(INSPECT_MAX_BYTES) {
        write!(f, " {b:02x}")?;
    }
    if bytes.len() > INSPECT_MAX_BYTES {
        f.write_str(" ...")?;
    }
    f.write_str(">")
}

/// A value to fill a buffer with.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FillValue<'a> {
    /// A number; it is stored modulo 256. NaN and infinities are rejected.
    Number(f64),
    /// A string; its first UTF-16 code unit is stored modulo 256. The empty string is rejected.
    Str(&'a str),
}

impl FillValue<'_> {
    pub(crate) fn to_byte(self) -> Result<u8> {
        match self {
            FillValue::Number(n) if n.is_finite() => Ok(n as i64 as u8),
            FillValue::Str(s) => s
                .encode_utf16()
                .next()
                .map(|unit| unit as u8)
                .ok_or(BufferError::InvalidFillValue),
            FillValue::Number(_) => Err(BufferError::InvalidFillValue),
        }
    }
}

impl From<u8> for FillValue<'_> {
    fn from(b: u8) -> Self {
        FillValue::Number(b as f64)
    }
}

impl From<i32> for FillValue<'_> {
    fn from(n: i32) -> Self {
        FillValue::Number(n as f64)
    }
}

impl From<i64> for FillValue<'_> {
    fn from(n: i64) -> Self {
        FillValue::Number(n as f64)
    }
}

impl From<f64> for FillValue<'_> {
    fn from(n: f64) -> Self {
        FillValue::Number(n)
    }
}

impl<'a> From<&'a str> for FillValue<'a> {
    fn from(s: &'a str) -> Self {
        FillValue::Str(s)
    }
}

/// Resolves a range against a length: the end is clamped to `len` and the start to the end.
pub(crate) fn clamp_range<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let (start, end) = raw_range(range, len);
    let end = end.min(len);
    (start.min(end), end)
}

/// The bounds of a range, with unbounded ends replaced by `0` and `len`.
pub(crate) fn raw_range<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    (start, end)
}
