//! Text codecs: string → bytes (into a caller-provided window) and bytes → string.

use crate::encoding::Encoding;
use crate::error::{BufferError, Result};
use alloc::string::String;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use zerocopy::byteorder::{LE, U16};
use zerocopy::{FromBytes, IntoBytes};

const BASE64_PAD: u8 = b'=';

/// Standard alphabet that accepts missing padding and non-zero trailing bits, so a prefix cut
/// anywhere but after a lone symbol still decodes.
const BASE64_PREFIX: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes `s` into `dst` and returns the number of bytes written. `dst` is the whole budget.
pub(crate) fn encode(dst: &mut [u8], s: &str, encoding: Encoding) -> usize {
    match encoding {
        Encoding::Utf8 => utf8_into(dst, s),
        Encoding::Ucs2 => ucs2_into(dst, s),
        Encoding::Hex => hex_into(dst, s),
        Encoding::Base64 => base64_into(dst, s),
        Encoding::Ascii | Encoding::Binary | Encoding::Raw => latin1_into(dst, s),
    }
}

/// Renders `bytes` as a string.
pub(crate) fn decode(bytes: &[u8], encoding: Encoding) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }
    match encoding {
        Encoding::Utf8 => utf8_from(bytes),
        Encoding::Ucs2 => Ok(ucs2_from(bytes)),
        Encoding::Hex => Ok(hex::encode(bytes)),
        Encoding::Base64 => Ok(base64_from(bytes)),
        Encoding::Ascii => Ok(bytes.iter().map(|&b| (b & 0x7f) as char).collect()),
        Encoding::Binary | Encoding::Raw => Ok(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Writes whole UTF-8 sequences only. Stops before the first character that does not fit.
fn utf8_into(dst: &mut [u8], s: &str) -> usize {
    let mut written = 0;
    for c in s.chars() {
        let n = c.len_utf8();
        if n > dst.len() - written {
            break;
        }
        c.encode_utf8(&mut dst[written..written + n]);
        written += n;
    }
    written
}

/// Two bytes per UTF-16 code unit, low byte first. An odd trailing byte of budget is unused.
fn ucs2_into(dst: &mut [u8], s: &str) -> usize {
    let mut written = 0;
    for (slot, unit) in dst.chunks_exact_mut(2).zip(s.encode_utf16()) {
        slot.copy_from_slice(U16::<LE>::new(unit).as_bytes());
        written += 2;
    }
    written
}

/// Low 8 bits of each UTF-16 code unit.
fn latin1_into(dst: &mut [u8], s: &str) -> usize {
    let mut written = 0;
    for (slot, unit) in dst.iter_mut().zip(s.encode_utf16()) {
        *slot = unit as u8;
        written += 1;
    }
    written
}

/// Parses digit pairs up to the first pair that is not two hex digits.
fn hex_into(dst: &mut [u8], s: &str) -> usize {
    let digits = s.as_bytes();
    let pairs = digits
        .chunks_exact(2)
        .take_while(|pair| pair.iter().all(u8::is_ascii_hexdigit))
        .count()
        .min(dst.len());
    match hex::decode_to_slice(&digits[..2 * pairs], &mut dst[..pairs]) {
        Ok(()) => pairs,
        Err(_) => 0,
    }
}

/// Decodes the symbols before the first pad or invalid symbol. A trailing lone symbol carries
/// no whole byte and is dropped; the bytes that do not fit in `dst` are discarded.
fn base64_into(dst: &mut [u8], s: &str) -> usize {
    let symbols = s.as_bytes();
    let mut valid = symbols
        .iter()
        .take_while(|&&c| c.is_ascii_alphanumeric() || c == b'+' || c == b'/')
        .count();
    if valid % 4 == 1 {
        valid -= 1;
    }

    let decoded = BASE64_PREFIX.decode(&symbols[..valid]).unwrap_or_default();
    let n = decoded.len().min(dst.len());
    dst[..n].copy_from_slice(&decoded[..n]);
    n
}

/// Byte count implied by a Base64 string's length and trailing padding.
pub(crate) fn base64_decoded_len(s: &str) -> usize {
    let symbols = s.as_bytes();
    let len = symbols.len();
    let tail = if len >= 2 && symbols[len - 2] == BASE64_PAD {
        2
    } else if symbols.last() == Some(&BASE64_PAD) {
        1
    } else {
        0
    };
    ((len * 3) >> 2).saturating_sub(tail)
}

fn utf8_from(bytes: &[u8]) -> Result<String> {
    core::str::from_utf8(bytes)
        .map(String::from)
        .map_err(|e| BufferError::MalformedUtf8 {
            valid_up_to: e.valid_up_to(),
        })
}

/// Little-endian code unit pairs. A trailing odd byte is dropped; lone surrogates become U+FFFD.
fn ucs2_from(bytes: &[u8]) -> String {
    // U16<LE> has alignment 1 and the element count fits, so the cast cannot fail.
    let Ok((units, _odd)) = <[U16<LE>]>::ref_from_prefix_with_elems(bytes, bytes.len() / 2)
    else {
        return String::new();
    };
    char::decode_utf16(units.iter().map(|unit| unit.get()))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Standard Base64 with `=` padding.
fn base64_from(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
