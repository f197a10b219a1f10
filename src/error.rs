use alloc::string::String;
use thiserror::Error;

/// Shorthand for the result of a buffer operation.
pub type Result<T> = core::result::Result<T, BufferError>;

/// Error type for every fallible buffer operation.
///
/// All of these are reported synchronously at the point of the call. Operations that mutate a
/// buffer validate their arguments before writing anything, so a buffer is never left partially
/// modified by a call that returns `Err`.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum BufferError {
    /// A checked access of `width` bytes at `offset` does not fit in a buffer of `len` bytes.
    #[error("access of {width} bytes at offset {offset} is outside a buffer of {len} bytes")]
    OutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Number of bytes the access needs.
        width: usize,
        /// Length of the buffer.
        len: usize,
    },

    /// A dynamically-typed offset argument was negative.
    #[error("offset must not be negative")]
    NegativeOffset,

    /// The encoding name is not one of the recognized tags.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The bytes being decoded as UTF-8 are not well-formed.
    #[error("malformed UTF-8 sequence after {valid_up_to} valid bytes")]
    MalformedUtf8 {
        /// Number of leading bytes that were valid UTF-8.
        valid_up_to: usize,
    },

    /// A fill value was neither a finite number nor a non-empty string.
    #[error("fill value must be a number or a single character")]
    InvalidFillValue,

    /// A range whose end comes before its start.
    #[error("range end {end} is before start {start}")]
    InvalidRange {
        /// Start of the range.
        start: usize,
        /// End of the range.
        end: usize,
    },

    /// An integer shape was requested with a width other than 1 to 4 bytes.
    #[error("integer width must be 1 to 4 bytes, got {0}")]
    InvalidWidth(usize),
}

impl BufferError {
    pub(crate) fn out_of_bounds(offset: usize, width: usize, len: usize) -> Self {
        Self::OutOfBounds { offset, width, len }
    }
}

/// Checks that `width` bytes starting at `offset` lie within `len` bytes.
pub(crate) fn check_bounds(offset: usize, width: usize, len: usize) -> Result<()> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(BufferError::out_of_bounds(offset, width, len)),
    }
}
