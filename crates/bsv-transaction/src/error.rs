use bsv_primitives::PrimitivesError;

/// Error types for input/output codec operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The buffer is shorter than a required fixed-width field.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// A compact-size length exceeds the remaining buffer, or the length
    /// prefix itself is truncated.
    #[error("buffer underflow: declared {declared} bytes, {remaining} remaining")]
    BufferUnderflow { declared: u64, remaining: usize },
    /// A compact-size length was not written in its minimal form.
    #[error("non-canonical compact size encoding for value {0}")]
    NonCanonicalVarInt(u64),
    /// The requested text encoding is not one of none, hex or base64.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
    /// The input text is not valid for the requested encoding.
    #[error("invalid encoded data: {0}")]
    InvalidEncodedData(String),
    /// A transaction id string is not a 64-character hex hash.
    #[error("invalid txid: {0}")]
    InvalidTxid(String),
    /// An underlying script error (forwarded from `bsv-script` unmodified).
    #[error("script error: {0}")]
    Script(#[from] bsv_script::ScriptError),
}

impl TransactionError {
    /// Build a `map_err` adapter that names the field being read when a
    /// fixed-width read runs off the end of the buffer.
    pub(crate) fn reading(field: &'static str) -> impl FnOnce(PrimitivesError) -> Self {
        move |e| match e {
            PrimitivesError::UnexpectedEof => {
                TransactionError::MalformedInput(format!("reading {}: {}", field, e))
            }
            other => other.into(),
        }
    }
}

impl From<PrimitivesError> for TransactionError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::UnexpectedEof => TransactionError::MalformedInput(e.to_string()),
            PrimitivesError::BufferUnderflow { declared, remaining } => {
                TransactionError::BufferUnderflow { declared, remaining }
            }
            PrimitivesError::NonCanonicalVarInt(v) => TransactionError::NonCanonicalVarInt(v),
            PrimitivesError::UnsupportedEncoding(name) => TransactionError::UnsupportedEncoding(name),
            PrimitivesError::InvalidHex(msg) | PrimitivesError::InvalidBase64(msg) => {
                TransactionError::InvalidEncodedData(msg)
            }
            PrimitivesError::InvalidHash(msg) => TransactionError::InvalidTxid(msg),
        }
    }
}
