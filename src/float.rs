//! IEEE-754 binary32 / binary64 codec, parameterized by byte width, mantissa size and byte order.
//!
//! The layout is described by `(width, mantissa_bits)`; the exponent width and bias are derived
//! from it. Both directions work on the raw bit pattern so the result is bit-exact for every
//! finite value, subnormal, signed zero and infinity. Values are carried as `f64` on the Rust
//! side; binary32 results are always exactly representable in `f64`.

use crate::int::Endian;

/// Bit layout of one IEEE-754 interchange format plus the byte order used to store it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FloatLayout {
    width: usize,
    mantissa_bits: u32,
    endian: Endian,
}

const F64_MANTISSA_BITS: u32 = 52;
const F64_BIAS: i32 = 1023;

impl FloatLayout {
    /// binary32, little-endian.
    pub const F32_LE: FloatLayout = FloatLayout::of(4, 23, Endian::Little);
    /// binary32, big-endian.
    pub const F32_BE: FloatLayout = FloatLayout::of(4, 23, Endian::Big);
    /// binary64, little-endian.
    pub const F64_LE: FloatLayout = FloatLayout::of(8, 52, Endian::Little);
    /// binary64, big-endian.
    pub const F64_BE: FloatLayout = FloatLayout::of(8, 52, Endian::Big);

    const fn of(width: usize, mantissa_bits: u32, endian: Endian) -> Self {
        Self {
            width,
            mantissa_bits,
            endian,
        }
    }

    /// Width in bytes.
    pub fn width(self) -> usize {
        self.width
    }

    /// Number of explicitly stored mantissa bits.
    pub fn mantissa_bits(self) -> u32 {
        self.mantissa_bits
    }

    /// Byte order.
    pub fn endian(self) -> Endian {
        self.endian
    }

    /// Number of exponent bits: `8 * width - mantissa_bits - 1`.
    pub fn exponent_bits(self) -> u32 {
        8 * self.width as u32 - self.mantissa_bits - 1
    }

    /// Exponent bias: `2^(exponent_bits - 1) - 1`.
    pub fn bias(self) -> i32 {
        (1 << (self.exponent_bits() - 1)) - 1
    }

    fn exponent_max(self) -> u64 {
        (1 << self.exponent_bits()) - 1
    }

    fn mantissa_mask(self) -> u64 {
        (1 << self.mantissa_bits) - 1
    }

    /// Index into the stored bytes of the `i`-th most significant byte.
    fn byte_index(self, i: usize) -> usize {
        match self.endian {
            Endian::Big => i,
            Endian::Little => self.width - 1 - i,
        }
    }

    /// Decodes the value stored at `off`. Bytes past the end of `bytes` read as zero.
    pub fn read(self, bytes: &[u8], off: usize) -> f64 {
        let mut bits: u64 = 0;
        for i in 0..self.width {
            let b = off
                .checked_add(self.byte_index(i))
                .and_then(|pos| bytes.get(pos))
                .map_or(0, |&b| b as u64);
            bits = (bits << 8) | b;
        }
        self.decode_bits(bits)
    }

    /// Encodes `value` at `off`. Byte positions past the end of `bytes` are skipped.
    pub fn write(self, bytes: &mut [u8], off: usize, value: f64) {
        let bits = self.encode_bits(value);
        for i in 0..self.width {
            let shift = 8 * (self.width - 1 - i);
            if let Some(slot) = off
                .checked_add(self.byte_index(i))
                .and_then(|pos| bytes.get_mut(pos))
            {
                *slot = (bits >> shift) as u8;
            }
        }
    }

    /// Turns a bit pattern in this layout into a value.
    pub fn decode_bits(self, bits: u64) -> f64 {
        let mbits = self.mantissa_bits;
        let negative = (bits >> (8 * self.width - 1)) & 1 == 1;
        let exponent = (bits >> mbits) & self.exponent_max();
        let mantissa = bits & self.mantissa_mask();

        let magnitude = if exponent == self.exponent_max() {
            if mantissa != 0 {
                return f64::NAN;
            }
            f64::INFINITY
        } else if exponent == 0 {
            // Subnormal: no implicit leading one.
            scale_pow2(mantissa as f64, 1 - self.bias() - mbits as i32)
        } else {
            let significand = mantissa | (1 << mbits);
            scale_pow2(significand as f64, exponent as i32 - self.bias() - mbits as i32)
        };

        if negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Turns a value into a bit pattern in this layout, rounding to nearest, ties to even.
    pub fn encode_bits(self, value: f64) -> u64 {
        let mbits = self.mantissa_bits;
        let sign: u64 = if value < 0.0 || (value == 0.0 && 1.0 / value < 0.0) {
            1
        } else {
            0
        };
        let sign_bit = sign << (8 * self.width - 1);

        if value.is_nan() {
            // Canonical quiet NaN.
            return (self.exponent_max() << mbits) | (1 << (mbits - 1));
        }
        if value.is_infinite() {
            return sign_bit | (self.exponent_max() << mbits);
        }
        if value == 0.0 {
            return sign_bit;
        }

        // Exact decomposition: |value| = m * 2^e with m an integer below 2^53.
        let raw = value.to_bits();
        let raw_exponent = ((raw >> F64_MANTISSA_BITS) & 0x7ff) as i32;
        let raw_mantissa = raw & ((1 << F64_MANTISSA_BITS) - 1);
        let (m, e) = if raw_exponent == 0 {
            (raw_mantissa, 1 - F64_BIAS - F64_MANTISSA_BITS as i32)
        } else {
            (
                raw_mantissa | (1 << F64_MANTISSA_BITS),
                raw_exponent - F64_BIAS - F64_MANTISSA_BITS as i32,
            )
        };

        // floor(log2(|value|)), exact because m is an integer.
        let top_bit = 63 - m.leading_zeros() as i32;
        let mut exponent = top_bit + e;
        let bias = self.bias();

        if exponent + bias >= 1 {
            // Normal range: keep mbits + 1 significant bits.
            let mut significand = round_shift(m, top_bit - mbits as i32);
            if significand >> (mbits + 1) != 0 {
                significand >>= 1;
                exponent += 1;
            }
            let biased = (exponent + bias) as u64;
            if biased >= self.exponent_max() {
                return sign_bit | (self.exponent_max() << mbits);
            }
            sign_bit | (biased << mbits) | (significand & self.mantissa_mask())
        } else {
            // Subnormal range: units of 2^(1 - bias - mbits). A carry into bit `mbits` lands in
            // the exponent field as the smallest normal, which is the correct encoding.
            let unit_exponent = 1 - bias - mbits as i32;
            sign_bit | round_shift(m, unit_exponent - e)
        }
    }
}

/// `m / 2^shift` rounded to nearest, ties to even. Negative shifts multiply.
fn round_shift(m: u64, shift: i32) -> u64 {
    if shift <= 0 {
        return m << -shift;
    }
    if shift >= 64 {
        // m < 2^53, so it is below half of one unit.
        return 0;
    }
    let quotient = m >> shift;
    let remainder = m & ((1u64 << shift) - 1);
    let half = 1u64 << (shift - 1);
    if remainder > half || (remainder == half && quotient & 1 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// `x * 2^exp`, applied in steps that stay within the normal range so no intermediate rounds.
fn scale_pow2(mut x: f64, mut exp: i32) -> f64 {
    while exp > F64_BIAS {
        x *= pow2(F64_BIAS);
        exp -= F64_BIAS;
    }
    while exp < 1 - F64_BIAS {
        x *= pow2(1 - F64_BIAS);
        exp += F64_BIAS - 1;
    }
    x * pow2(exp)
}

/// `2^exp` for `exp` in the normal binary64 exponent range.
fn pow2(exp: i32) -> f64 {
    f64::from_bits(((exp + F64_BIAS) as u64) << F64_MANTISSA_BITS)
}
