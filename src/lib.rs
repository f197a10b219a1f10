//! A fixed-length byte buffer that converts between bytes and text or fixed-width numbers.
//!
//! * Text: `utf8`, `ucs2` (UTF-16LE), `hex`, `base64`, and `ascii` / `binary` / `raw`.
//! * Numbers: 8, 16, 24 and 32-bit integers, signed or unsigned, and IEEE-754 binary32 and
//!   binary64 floats, in either byte order.
//!
//! [`ByteBuffer`] owns its bytes. [`ByteView`] and [`ByteViewMut`] are windows into storage owned
//! elsewhere; `slice` and `slice_mut` return them without copying. All three implement
//! [`BufferReader`], and the mutable ones implement [`BufferWriter`], which is where the codecs
//! live.
//!
//! ```
//! use byte_buffer_codec::{BufferReader, BufferWriter, ByteBuffer, Encoding};
//!
//! let mut buf = ByteBuffer::from_length(8);
//! buf.write_uint16_be(0xcafe, 0).unwrap();
//! buf.write_float_le(1.5, 2).unwrap();
//! assert_eq!(buf.to_string_in(Encoding::Hex, ..).unwrap(), "cafe0000c03f0000");
//! assert_eq!(buf.read_float_le(2).unwrap(), 1.5);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod args;
mod buffer;
mod encoding;
mod error;
mod float;
mod int;
mod reader;
mod text;
mod writer;


pub use args::{Arg, WriteArgs};
pub use buffer::{ByteBuffer, ByteView, ByteViewMut, FillValue, INSPECT_MAX_BYTES};
pub use encoding::{byte_length, byte_length_named, is_encoding, Encoding};
pub use error::{BufferError, Result};
pub use float::FloatLayout;
pub use int::{Endian, IntShape};
pub use reader::BufferReader;
pub use writer::BufferWriter;
