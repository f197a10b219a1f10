//! Argument resolution for loosely-typed callers of the text encoder.
//!
//! A host that forwards dynamically-typed arguments can call `write` either as
//! `(string, offset, encoding)` / `(string, offset, length, encoding)` or in the legacy order
//! `(string, encoding, offset, length)`. [`WriteArgs::resolve`] decides which form was used.

use crate::encoding::Encoding;
use crate::error::{BufferError, Result};

/// One dynamically-typed argument.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Arg<'a> {
    /// A numeric argument. May be NaN or infinite.
    Number(f64),
    /// A string argument.
    Str(&'a str),
}

impl Arg<'_> {
    fn finite_number(self) -> Option<f64> {
        match self {
            Arg::Number(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }
}

impl From<f64> for Arg<'_> {
    fn from(n: f64) -> Self {
        Arg::Number(n)
    }
}

impl From<usize> for Arg<'_> {
    fn from(n: usize) -> Self {
        Arg::Number(n as f64)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

/// Resolved arguments of a text write.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct WriteArgs {
    /// Byte offset to start writing at.
    pub offset: usize,
    /// Maximum number of bytes to write; `None` means "up to the end of the buffer".
    pub length: Option<usize>,
    /// Encoding to write with.
    pub encoding: Encoding,
}

impl WriteArgs {
    /// Resolves the optional arguments that follow the string.
    ///
    /// If the first one is a finite number it is the offset, and the encoding follows it (or
    /// follows a length, if the second one is a finite number too). Otherwise the legacy order
    /// `(encoding, offset, length)` applies.
    ///
    /// A missing or empty encoding (or a NaN or zero in its place) means `utf8`. Any other
    /// unrecognized encoding falls back to `raw`.
    pub fn resolve(args: &[Arg<'_>]) -> Result<WriteArgs> {
        let arg = |i: usize| args.get(i).copied();

        let (offset, length, encoding) = match arg(0).and_then(Arg::finite_number) {
            Some(offset) => match arg(1).and_then(Arg::finite_number) {
                Some(length) => (Some(offset), Some(length), arg(2)),
                None => (Some(offset), None, arg(1)),
            },
            None => (
                arg(1).and_then(Arg::finite_number),
                arg(2).and_then(Arg::finite_number),
                arg(0),
            ),
        };

        Ok(WriteArgs {
            offset: to_offset(offset)?,
            length: to_length(length),
            encoding: encoding_or_raw(encoding),
        })
    }
}

/// Missing → 0, fractional → truncated, negative → error.
fn to_offset(n: Option<f64>) -> Result<usize> {
    match n {
        None => Ok(0),
        Some(n) if n < 0.0 => Err(BufferError::NegativeOffset),
        Some(n) => Ok(n as usize),
    }
}

/// Missing or zero → no limit, negative → nothing.
fn to_length(n: Option<f64>) -> Option<usize> {
    match n {
        None => None,
        Some(n) if n == 0.0 => None,
        Some(n) if n < 0.0 => Some(0),
        Some(n) => Some(n as usize),
    }
}

fn encoding_or_raw(arg: Option<Arg<'_>>) -> Encoding {
    match arg {
        None | Some(Arg::Str("")) => Encoding::Utf8,
        Some(Arg::Str(name)) => Encoding::from_name(name).unwrap_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(encoding = name, "unrecognized encoding, writing raw bytes");
            Encoding::Raw
        }),
        Some(Arg::Number(n)) if n.is_nan() || n == 0.0 => Encoding::Utf8,
        Some(Arg::Number(_)) => Encoding::Raw,
    }
}
