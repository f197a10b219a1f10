use crate::args::{Arg, WriteArgs};
use crate::buffer::{clamp_range, raw_range, ByteViewMut, FillValue};
use crate::encoding::Encoding;
use crate::error::{check_bounds, BufferError, Result};
use crate::float::FloatLayout;
use crate::int::IntShape;
use crate::reader::BufferReader;
use crate::text;
use core::ops::RangeBounds;

macro_rules! int_writers {
    ($($write:ident, $write_no_assert:ident, $shape:ident, $what:literal;)*) => {$(
        #[doc = concat!("Writes `value` as ", $what, " at `offset` and returns the offset just past it.")]
        ///
        /// Only the low bits of `value` are stored; out-of-range values wrap. Fails with
        /// `BufferError::OutOfBounds`, without writing, if the value does not fit in the buffer.
        #[inline(always)]
        fn $write(&mut self, value: i64, offset: usize) -> Result<usize> {
            self.write_int(IntShape::$shape, value, offset)
        }

        #[doc = concat!("Writes `value` as ", $what, " at `offset` without a bounds check.")]
        #[inline(always)]
        fn $write_no_assert(&mut self, value: i64, offset: usize) -> usize {
            self.write_int_no_assert(IntShape::$shape, value, offset)
        }
    )*};
}

macro_rules! float_writers {
    ($($write:ident, $write_no_assert:ident, $layout:ident, $what:literal;)*) => {$(
        #[doc = concat!("Writes `value` as ", $what, " at `offset` and returns the offset just past it.")]
        ///
        /// Fails with `BufferError::OutOfBounds`, without writing, if the value does not fit in
        /// the buffer.
        #[inline(always)]
        fn $write(&mut self, value: f64, offset: usize) -> Result<usize> {
            self.write_ieee754(FloatLayout::$layout, value, offset)
        }

        #[doc = concat!("Writes `value` as ", $what, " at `offset` without a bounds check.")]
        #[inline(always)]
        fn $write_no_assert(&mut self, value: f64, offset: usize) -> usize {
            self.write_ieee754_no_assert(FloatLayout::$layout, value, offset)
        }
    )*};
}

/// Write access to a byte buffer: numeric encoding, text encoding, fill and in-place copy.
///
/// Implemented by the owning [`ByteBuffer`](crate::ByteBuffer) and by [`ByteViewMut`]. Only
/// `as_bytes_mut` is required. The `*_no_assert` accessors skip the bounds check and silently
/// drop bytes that would land past the end.
pub trait BufferWriter: BufferReader {
    /// The bytes of this buffer, mutably.
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Writes an integer of any shape at `offset` and returns the offset just past it.
    #[inline(always)]
    fn write_int(&mut self, shape: IntShape, value: i64, offset: usize) -> Result<usize> {
        let bytes = self.as_bytes_mut();
        check_bounds(offset, shape.width(), bytes.len())?;
        shape.write(bytes, offset, value);
        Ok(offset + shape.width())
    }

    /// Writes an integer of any shape at `offset` without a bounds check.
    #[inline(always)]
    fn write_int_no_assert(&mut self, shape: IntShape, value: i64, offset: usize) -> usize {
        shape.write(self.as_bytes_mut(), offset, value);
        offset.saturating_add(shape.width())
    }

    /// Writes an IEEE-754 value of any layout at `offset` and returns the offset just past it.
    #[inline(always)]
    fn write_ieee754(&mut self, layout: FloatLayout, value: f64, offset: usize) -> Result<usize> {
        let bytes = self.as_bytes_mut();
        check_bounds(offset, layout.width(), bytes.len())?;
        layout.write(bytes, offset, value);
        Ok(offset + layout.width())
    }

    /// Writes an IEEE-754 value of any layout at `offset` without a bounds check.
    #[inline(always)]
    fn write_ieee754_no_assert(
        &mut self,
        layout: FloatLayout,
        value: f64,
        offset: usize,
    ) -> usize {
        layout.write(self.as_bytes_mut(), offset, value);
        offset.saturating_add(layout.width())
    }

    int_writers! {
        write_uint8, write_uint8_no_assert, U8, "an unsigned 8-bit integer";
        write_uint16_le, write_uint16_le_no_assert, U16_LE, "a little-endian unsigned 16-bit integer";
        write_uint24_le, write_uint24_le_no_assert, U24_LE, "a little-endian unsigned 24-bit integer";
        write_uint32_le, write_uint32_le_no_assert, U32_LE, "a little-endian unsigned 32-bit integer";
        write_uint16_be, write_uint16_be_no_assert, U16_BE, "a big-endian unsigned 16-bit integer";
        write_uint24_be, write_uint24_be_no_assert, U24_BE, "a big-endian unsigned 24-bit integer";
        write_uint32_be, write_uint32_be_no_assert, U32_BE, "a big-endian unsigned 32-bit integer";
        write_int8, write_int8_no_assert, I8, "a signed 8-bit integer";
        write_int16_le, write_int16_le_no_assert, I16_LE, "a little-endian signed 16-bit integer";
        write_int24_le, write_int24_le_no_assert, I24_LE, "a little-endian signed 24-bit integer";
        write_int32_le, write_int32_le_no_assert, I32_LE, "a little-endian signed 32-bit integer";
        write_int16_be, write_int16_be_no_assert, I16_BE, "a big-endian signed 16-bit integer";
        write_int24_be, write_int24_be_no_assert, I24_BE, "a big-endian signed 24-bit integer";
        write_int32_be, write_int32_be_no_assert, I32_BE, "a big-endian signed 32-bit integer";
    }

    float_writers! {
        write_float_le, write_float_le_no_assert, F32_LE, "a little-endian binary32 float";
        write_float_be, write_float_be_no_assert, F32_BE, "a big-endian binary32 float";
        write_double_le, write_double_le_no_assert, F64_LE, "a little-endian binary64 float";
        write_double_be, write_double_be_no_assert, F64_BE, "a big-endian binary64 float";
    }

    /// Encodes `s` under `encoding` into the buffer starting at `offset`, writing at most
    /// `length` bytes (or up to the end of the buffer if `length` is `None`).
    ///
    /// Returns the number of bytes written, which can be less than the encoded length of `s`
    /// when the space runs out. A multi-byte UTF-8 sequence is never split, and `ucs2` always
    /// writes an even number of bytes. Fails with `BufferError::OutOfBounds` if `offset` is past
    /// the end of the buffer.
    fn write_str(
        &mut self,
        s: &str,
        offset: usize,
        length: Option<usize>,
        encoding: Encoding,
    ) -> Result<usize> {
        let bytes = self.as_bytes_mut();
        check_bounds(offset, 0, bytes.len())?;
        let remaining = bytes.len() - offset;
        let budget = length.map_or(remaining, |length| length.min(remaining));

        let written = text::encode(&mut bytes[offset..offset + budget], s, encoding);

        #[cfg(feature = "tracing")]
        if budget == remaining && written < crate::encoding::byte_length(s, encoding) {
            tracing::debug!(written, offset, %encoding, "text write truncated at end of buffer");
        }

        Ok(written)
    }

    /// Encodes `s` using dynamically-typed arguments, resolved by [`WriteArgs::resolve`].
    ///
    /// Both `(offset, encoding)` / `(offset, length, encoding)` and the legacy
    /// `(encoding, offset, length)` orders are accepted. An unrecognized encoding name writes
    /// raw bytes instead of failing.
    fn write_args(&mut self, s: &str, args: &[Arg<'_>]) -> Result<usize> {
        let args = WriteArgs::resolve(args)?;
        self.write_str(s, args.offset, args.length, args.encoding)
    }

    /// Sets every byte in `range` to `value`.
    ///
    /// `value` is a number (stored modulo 256) or a string (its first UTF-16 code unit, modulo
    /// 256). Fails with `BufferError::InvalidFillValue` for NaN, infinities and the empty
    /// string, and with `BufferError::InvalidRange` if the range ends before it starts. The
    /// part of the range past the end of the buffer is ignored.
    fn fill<'v, V, R>(&mut self, value: V, range: R) -> Result<&mut Self>
    where
        V: Into<FillValue<'v>>,
        R: RangeBounds<usize>,
    {
        let byte = value.into().to_byte()?;
        let bytes = self.as_bytes_mut();
        let len = bytes.len();
        let (start, end) = raw_range(range, len);
        if end < start {
            return Err(BufferError::InvalidRange { start, end });
        }
        bytes[start.min(len)..end.min(len)].fill(byte);
        Ok(self)
    }

    /// Copies the bytes in `range` to `dst_offset` within this same buffer.
    ///
    /// Overlapping source and destination are handled as `memmove` does, so no source byte is
    /// overwritten before it has been copied. The source range is clamped and the copy stops at
    /// the end of the buffer. Fails with `BufferError::OutOfBounds` if `dst_offset` is past the
    /// end.
    fn copy_within<R: RangeBounds<usize>>(
        &mut self,
        dst_offset: usize,
        range: R,
    ) -> Result<&mut Self> {
        let bytes = self.as_bytes_mut();
        let len = bytes.len();
        let (start, end) = clamp_range(range, len);
        check_bounds(dst_offset, 0, len)?;

        let n = (end - start).min(len - dst_offset);
        bytes.copy_within(start..start + n, dst_offset);
        Ok(self)
    }

    /// Returns a mutable view of `range` that shares this buffer's storage. The range is
    /// clamped.
    fn slice_mut<R: RangeBounds<usize>>(&mut self, range: R) -> ByteViewMut<'_> {
        let byte_offset = self.byte_offset();
        let bytes = self.as_bytes_mut();
        let (start, end) = clamp_range(range, bytes.len());
        ByteViewMut::window(&mut bytes[start..end], byte_offset + start)
    }
}
