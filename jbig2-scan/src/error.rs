//! Error types for JBIG2 stream scanning.

use core::fmt;

/// The main error type for scanning operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input ended before a read could be satisfied.
    ///
    /// Truncated reads are always an error; missing bytes are never
    /// zero-filled.
    Truncated,
    /// The data is structurally inconsistent with the JBIG2 format.
    Format(FormatError),
    /// The data uses a valid encoding that this crate does not handle.
    ///
    /// Reported separately from [`Error::Format`] so that callers can tell
    /// malformed input apart from valid-but-not-implemented input.
    Unsupported(Unsupported),
}

/// Errors related to file and segment structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The 8-byte ID string at the start of the file did not match.
    BadSignature,
    /// A segment's declared data length runs past the end of the input.
    PayloadPastEnd,
}

/// Valid encodings that the scanner does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    /// Long form of the referred-to segment count field (7.2.4).
    LongReferredToCount,
    /// Four-byte page association field (7.2.6).
    LongPageAssociation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "unexpected end of data"),
            Self::Format(e) => write!(f, "{e}"),
            Self::Unsupported(e) => write!(f, "unsupported: {e}"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSignature => write!(f, "not a JBIG2 stream"),
            Self::PayloadPastEnd => {
                write!(f, "segment data length runs past the end of the input")
            }
        }
    }
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongReferredToCount => write!(f, "long-form referred-to segment count"),
            Self::LongPageAssociation => write!(f, "long-form page association"),
        }
    }
}

impl core::error::Error for Error {}
impl core::error::Error for FormatError {}
impl core::error::Error for Unsupported {}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<Unsupported> for Error {
    fn from(e: Unsupported) -> Self {
        Self::Unsupported(e)
    }
}

/// Result type for scanning operations.
pub type Result<T> = core::result::Result<T, Error>;

macro_rules! bail {
    ($err:expr) => {
        return Err($err.into())
    };
}

pub(crate) use bail;
