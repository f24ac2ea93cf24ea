/// Unified error type for all primitives operations.
///
/// Covers cursor reads, compact-size decoding, hash construction and the
/// outer text encodings (hex / base64).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    /// A fixed-width read ran past the end of the buffer.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// A length-prefixed field declares more bytes than remain, or the
    /// compact-size prefix itself is cut short.
    #[error("buffer underflow: declared {declared} bytes, {remaining} remaining")]
    BufferUnderflow { declared: u64, remaining: usize },

    /// A compact-size integer was not encoded in its minimal form.
    #[error("non-canonical compact size encoding for value {0}")]
    NonCanonicalVarInt(u64),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

impl From<base64::DecodeError> for PrimitivesError {
    fn from(e: base64::DecodeError) -> Self {
        PrimitivesError::InvalidBase64(e.to_string())
    }
}
