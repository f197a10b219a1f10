use crate::buffer::{clamp_range, ByteView};
use crate::encoding::Encoding;
use crate::error::{check_bounds, Result};
use crate::float::FloatLayout;
use crate::int::IntShape;
use crate::text;
use crate::writer::BufferWriter;
use alloc::string::String;
use core::ops::RangeBounds;

macro_rules! int_readers {
    ($($read:ident, $read_no_assert:ident, $shape:ident, $t:ty, $what:literal;)*) => {$(
        #[doc = concat!("Reads ", $what, " at `offset`.")]
        ///
        /// Fails with `BufferError::OutOfBounds` if the value does not fit in the buffer.
        #[inline(always)]
        fn $read(&self, offset: usize) -> Result<$t> {
            Ok(self.read_int(IntShape::$shape, offset)? as $t)
        }

        #[doc = concat!("Reads ", $what, " at `offset` without a bounds check.")]
        #[inline(always)]
        fn $read_no_assert(&self, offset: usize) -> $t {
            self.read_int_no_assert(IntShape::$shape, offset) as $t
        }
    )*};
}

macro_rules! float_readers {
    ($($read:ident, $read_no_assert:ident, $layout:ident, $t:ty, $what:literal;)*) => {$(
        #[doc = concat!("Reads ", $what, " at `offset`.")]
        ///
        /// Fails with `BufferError::OutOfBounds` if the value does not fit in the buffer.
        #[inline(always)]
        fn $read(&self, offset: usize) -> Result<$t> {
            Ok(self.read_ieee754(FloatLayout::$layout, offset)? as $t)
        }

        #[doc = concat!("Reads ", $what, " at `offset` without a bounds check.")]
        #[inline(always)]
        fn $read_no_assert(&self, offset: usize) -> $t {
            self.read_ieee754_no_assert(FloatLayout::$layout, offset) as $t
        }
    )*};
}

/// Read access to a byte buffer: numeric decoding, text decoding, slicing and copying out.
///
/// Implemented by the owning [`ByteBuffer`](crate::ByteBuffer) and by the [`ByteView`] and
/// [`ByteViewMut`](crate::ByteViewMut) windows. Only `as_bytes` is required.
///
/// Checked accessors return `Err(BufferError::OutOfBounds)` when `offset + width` exceeds the
/// length. The `*_no_assert` accessors skip that check: bytes past the end read as zero.
pub trait BufferReader {
    /// The bytes of this buffer.
    fn as_bytes(&self) -> &[u8];

    /// Offset of this buffer within the storage it shares with its parent. Zero for an owning
    /// buffer.
    fn byte_offset(&self) -> usize {
        0
    }

    /// Length in bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if the buffer has no bytes.
    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Reads an integer of any shape at `offset`.
    #[inline(always)]
    fn read_int(&self, shape: IntShape, offset: usize) -> Result<i64> {
        let bytes = self.as_bytes();
        check_bounds(offset, shape.width(), bytes.len())?;
        Ok(shape.read(bytes, offset))
    }

    /// Reads an integer of any shape at `offset` without a bounds check.
    #[inline(always)]
    fn read_int_no_assert(&self, shape: IntShape, offset: usize) -> i64 {
        shape.read(self.as_bytes(), offset)
    }

    /// Reads an IEEE-754 value of any layout at `offset`.
    #[inline(always)]
    fn read_ieee754(&self, layout: FloatLayout, offset: usize) -> Result<f64> {
        let bytes = self.as_bytes();
        check_bounds(offset, layout.width(), bytes.len())?;
        Ok(layout.read(bytes, offset))
    }

    /// Reads an IEEE-754 value of any layout at `offset` without a bounds check.
    #[inline(always)]
    fn read_ieee754_no_assert(&self, layout: FloatLayout, offset: usize) -> f64 {
        layout.read(self.as_bytes(), offset)
    }

    int_readers! {
        read_uint8, read_uint8_no_assert, U8, u8, "an unsigned 8-bit integer";
        read_uint16_le, read_uint16_le_no_assert, U16_LE, u16, "a little-endian unsigned 16-bit integer";
        read_uint24_le, read_uint24_le_no_assert, U24_LE, u32, "a little-endian unsigned 24-bit integer";
        read_uint32_le, read_uint32_le_no_assert, U32_LE, u32, "a little-endian unsigned 32-bit integer";
        read_uint16_be, read_uint16_be_no_assert, U16_BE, u16, "a big-endian unsigned 16-bit integer";
        read_uint24_be, read_uint24_be_no_assert, U24_BE, u32, "a big-endian unsigned 24-bit integer";
        read_uint32_be, read_uint32_be_no_assert, U32_BE, u32, "a big-endian unsigned 32-bit integer";
        read_int8, read_int8_no_assert, I8, i8, "a signed 8-bit integer";
        read_int16_le, read_int16_le_no_assert, I16_LE, i16, "a little-endian signed 16-bit integer";
        read_int24_le, read_int24_le_no_assert, I24_LE, i32, "a little-endian signed 24-bit integer";
        read_int32_le, read_int32_le_no_assert, I32_LE, i32, "a little-endian signed 32-bit integer";
        read_int16_be, read_int16_be_no_assert, I16_BE, i16, "a big-endian signed 16-bit integer";
        read_int24_be, read_int24_be_no_assert, I24_BE, i32, "a big-endian signed 24-bit integer";
        read_int32_be, read_int32_be_no_assert, I32_BE, i32, "a big-endian signed 32-bit integer";
    }

    float_readers! {
        read_float_le, read_float_le_no_assert, F32_LE, f32, "a little-endian binary32 float";
        read_float_be, read_float_be_no_assert, F32_BE, f32, "a big-endian binary32 float";
        read_double_le, read_double_le_no_assert, F64_LE, f64, "a little-endian binary64 float";
        read_double_be, read_double_be_no_assert, F64_BE, f64, "a big-endian binary64 float";
    }

    /// Renders the bytes in `range` as a string under `encoding`.
    ///
    /// The end of the range is clamped to the length and the start is clamped to the end. An
    /// empty range gives an empty string. Decoding `utf8` fails with
    /// `BufferError::MalformedUtf8` if the bytes are not well-formed.
    fn to_string_in<R: RangeBounds<usize>>(
        &self,
        encoding: Encoding,
        range: R,
    ) -> Result<String> {
        let bytes = self.as_bytes();
        let (start, end) = clamp_range(range, bytes.len());
        text::decode(&bytes[start..end], encoding)
    }

    /// Like [`BufferReader::to_string_in`], but takes an optional encoding name. `None` means
    /// `utf8`; an unrecognized name fails with `BufferError::UnknownEncoding`.
    fn to_string_named<R: RangeBounds<usize>>(
        &self,
        encoding: Option<&str>,
        range: R,
    ) -> Result<String> {
        self.to_string_in(Encoding::resolve(encoding)?, range)
    }

    /// Decodes the bytes in `range` as UTF-8, replacing malformed sequences with U+FFFD.
    fn to_string_lossy<R: RangeBounds<usize>>(&self, range: R) -> String {
        let bytes = self.as_bytes();
        let (start, end) = clamp_range(range, bytes.len());
        String::from_utf8_lossy(&bytes[start..end]).into_owned()
    }

    /// Returns a view of `range` that shares this buffer's storage. The range is clamped.
    fn slice<R: RangeBounds<usize>>(&self, range: R) -> ByteView<'_> {
        let bytes = self.as_bytes();
        let (start, end) = clamp_range(range, bytes.len());
        ByteView::window(&bytes[start..end], self.byte_offset() + start)
    }

    /// Copies the bytes in `range` into `dst` starting at `dst_offset`.
    ///
    /// The source range is clamped, and the copy stops at the end of `dst`. Fails with
    /// `BufferError::OutOfBounds`, before writing anything, if `dst_offset` is past the end of
    /// `dst`. To copy within one buffer use [`BufferWriter::copy_within`].
    fn copy_to<W, R>(&self, dst: &mut W, dst_offset: usize, range: R) -> Result<&Self>
    where
        W: BufferWriter + ?Sized,
        R: RangeBounds<usize>,
    {
        let src = self.as_bytes();
        let (start, end) = clamp_range(range, src.len());
        let dst_bytes = dst.as_bytes_mut();
        check_bounds(dst_offset, 0, dst_bytes.len())?;

        let n = (end - start).min(dst_bytes.len() - dst_offset);
        dst_bytes[dst_offset..dst_offset + n].copy_from_slice(&src[start..start + n]);
        Ok(self)
    }

    /// The contents as a byte string, for display.
    #[cfg(feature = "bstr")]
    fn as_bstr(&self) -> &bstr::BStr {
        bstr::BStr::new(self.as_bytes())
    }
}
