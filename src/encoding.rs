use crate::error::{BufferError, Result};
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

/// Selects one of the text codecs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Encoding {
    /// 7-bit text. Encoding keeps the low 8 bits of each code unit; decoding clears the high bit.
    Ascii,
    /// Latin-1: one byte per UTF-16 code unit, low 8 bits kept.
    Binary,
    /// Same codec as `Binary`.
    Raw,
    /// UTF-8.
    #[default]
    Utf8,
    /// UTF-16 little-endian, one code unit per two bytes. No surrogate combination on encode.
    Ucs2,
    /// Two lowercase hex digits per byte.
    Hex,
    /// Standard Base64 alphabet with `=` padding.
    Base64,
}

/// Every recognized tag, lowercase. Lookup is case-insensitive.
static ENCODING_NAMES: [(&str, Encoding); 11] = [
    ("ascii", Encoding::Ascii),
    ("binary", Encoding::Binary),
    ("raw", Encoding::Raw),
    ("utf8", Encoding::Utf8),
    ("utf-8", Encoding::Utf8),
    ("hex", Encoding::Hex),
    ("base64", Encoding::Base64),
    ("ucs2", Encoding::Ucs2),
    ("ucs-2", Encoding::Ucs2),
    ("utf16le", Encoding::Ucs2),
    ("utf-16le", Encoding::Ucs2),
];

impl Encoding {
    /// Looks up an encoding by one of its tags, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Encoding> {
        ENCODING_NAMES
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(name))
            .map(|&(_, encoding)| encoding)
    }

    /// Resolves an optional encoding name: `None` means `utf8`, an unrecognized name is an error.
    pub fn resolve(name: Option<&str>) -> Result<Encoding> {
        match name {
            None => Ok(Encoding::Utf8),
            Some(name) => name.parse(),
        }
    }

    /// The canonical tag for this encoding.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Binary => "binary",
            Encoding::Raw => "raw",
            Encoding::Utf8 => "utf8",
            Encoding::Ucs2 => "ucs2",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self> {
        Encoding::from_name(s).ok_or_else(|| BufferError::UnknownEncoding(s.to_string()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `true` if `name` is a recognized encoding tag (case-insensitive).
pub fn is_encoding(name: &str) -> bool {
    Encoding::from_name(name).is_some()
}

/// Number of bytes the text encoder produces for `s` under `encoding`.
///
/// For `base64` this is an estimate from the string length and its trailing padding, which is
/// exact for well-formed input. For `hex` it is half the string length, rounded down.
pub fn byte_length(s: &str, encoding: Encoding) -> usize {
    match encoding {
        Encoding::Ascii | Encoding::Binary | Encoding::Raw => s.encode_utf16().count(),
        Encoding::Ucs2 => s.encode_utf16().count() * 2,
        Encoding::Hex => s.len() / 2,
        Encoding::Base64 => crate::text::base64_decoded_len(s),
        Encoding::Utf8 => s.len(),
    }
}

/// Like [`byte_length`], but takes an encoding name and fails on an unrecognized one.
pub fn byte_length_named(s: &str, encoding: &str) -> Result<usize> {
    Ok(byte_length(s, encoding.parse()?))
}
