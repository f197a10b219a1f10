use crate::error::{BufferError, Result};

/// Byte order of a multi-byte numeric encoding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Endian {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

/// The shape of a fixed-width integer encoding: width in bytes (1 to 4), byte order and
/// signedness.
///
/// One pair of `read` / `write` routines serves every shape; the named accessors on
/// [`BufferReader`](crate::BufferReader) and [`BufferWriter`](crate::BufferWriter) are generated
/// from the constants below.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IntShape {
    width: usize,
    endian: Endian,
    signed: bool,
}

impl IntShape {
    /// Unsigned 8-bit.
    pub const U8: IntShape = IntShape::of(1, Endian::Little, false);
    /// Unsigned 16-bit, little-endian.
    pub const U16_LE: IntShape = IntShape::of(2, Endian::Little, false);
    /// Unsigned 24-bit, little-endian.
    pub const U24_LE: IntShape = IntShape::of(3, Endian::Little, false);
    /// Unsigned 32-bit, little-endian.
    pub const U32_LE: IntShape = IntShape::of(4, Endian::Little, false);
    /// Unsigned 16-bit, big-endian.
    pub const U16_BE: IntShape = IntShape::of(2, Endian::Big, false);
    /// Unsigned 24-bit, big-endian.
    pub const U24_BE: IntShape = IntShape::of(3, Endian::Big, false);
    /// Unsigned 32-bit, big-endian.
    pub const U32_BE: IntShape = IntShape::of(4, Endian::Big, false);
    /// Signed 8-bit.
    pub const I8: IntShape = IntShape::of(1, Endian::Little, true);
    /// Signed 16-bit, little-endian.
    pub const I16_LE: IntShape = IntShape::of(2, Endian::Little, true);
    /// Signed 24-bit, little-endian.
    pub const I24_LE: IntShape = IntShape::of(3, Endian::Little, true);
    /// Signed 32-bit, little-endian.
    pub const I32_LE: IntShape = IntShape::of(4, Endian::Little, true);
    /// Signed 16-bit, big-endian.
    pub const I16_BE: IntShape = IntShape::of(2, Endian::Big, true);
    /// Signed 24-bit, big-endian.
    pub const I24_BE: IntShape = IntShape::of(3, Endian::Big, true);
    /// Signed 32-bit, big-endian.
    pub const I32_BE: IntShape = IntShape::of(4, Endian::Big, true);

    const fn of(width: usize, endian: Endian, signed: bool) -> Self {
        Self {
            width,
            endian,
            signed,
        }
    }

    /// Builds a shape, rejecting widths outside 1 to 4 bytes.
    pub fn new(width: usize, endian: Endian, signed: bool) -> Result<Self> {
        if (1..=4).contains(&width) {
            Ok(Self::of(width, endian, signed))
        } else {
            Err(BufferError::InvalidWidth(width))
        }
    }

    /// Width in bytes.
    pub fn width(self) -> usize {
        self.width
    }

    /// Byte order.
    pub fn endian(self) -> Endian {
        self.endian
    }

    /// Whether values are sign-extended on read.
    pub fn is_signed(self) -> bool {
        self.signed
    }

    /// Assembles `width` bytes starting at `off`.
    ///
    /// Bytes past the end of `bytes` read as zero; callers that need bounds checking do it first.
    pub fn read(self, bytes: &[u8], off: usize) -> i64 {
        let byte_at = |i: usize| -> u32 {
            off.checked_add(i)
                .and_then(|pos| bytes.get(pos))
                .map_or(0, |&b| b as u32)
        };

        let mut acc: u32 = 0;
        match self.endian {
            Endian::Little => {
                for i in 0..self.width {
                    acc |= byte_at(i) << (8 * i);
                }
            }
            Endian::Big => {
                for i in 0..self.width {
                    acc = (acc << 8) | byte_at(i);
                }
            }
        }

        if self.signed {
            // Move the top bit of the value to bit 31, then shift back arithmetically.
            let sext = 32 - 8 * self.width as u32;
            (((acc << sext) as i32) >> sext) as i64
        } else {
            acc as i64
        }
    }

    /// Scatters the low `8 * width` bits of `value` into `bytes` starting at `off`.
    ///
    /// Out-of-range input wraps; it is not rejected. Byte positions past the end of `bytes` are
    /// skipped.
    pub fn write(self, bytes: &mut [u8], off: usize, value: i64) {
        let v = value as u32;
        for i in 0..self.width {
            let shift = match self.endian {
                Endian::Little => 8 * i,
                Endian::Big => 8 * (self.width - 1 - i),
            };
            if let Some(slot) = off.checked_add(i).and_then(|pos| bytes.get_mut(pos)) {
                *slot = (v >> shift) as u8;
            }
        }
    }
}
