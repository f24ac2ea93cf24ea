//! Per-call codec configuration.
//!
//! There is no process-wide default: every parse/serialize entry point takes
//! a `CodecOptions` value, so two callers in the same process can use
//! different encodings without coordinating.

use bsv_primitives::encoding::Encoding;
use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// Options recognized by the input/output codec entry points.
///
/// Deserializes from host configuration such as `{"encoding": "hex"}`.
/// A missing `encoding` means raw binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Text encoding applied once at the outer boundary: decoded before
    /// parsing, encoded after serializing.
    pub encoding: Encoding,
}

impl CodecOptions {
    /// Raw binary in, raw binary out.
    pub fn binary() -> Self {
        Self { encoding: Encoding::None }
    }

    /// Hex text in, hex text out.
    pub fn hex() -> Self {
        Self { encoding: Encoding::Hex }
    }

    /// Base64 text in, base64 text out.
    pub fn base64() -> Self {
        Self { encoding: Encoding::Base64 }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Build options from an encoding name (`none`, `hex`, `base64`).
    ///
    /// # Returns
    /// The options, or `UnsupportedEncoding` for any other name.
    pub fn from_encoding_name(name: &str) -> Result<Self, TransactionError> {
        Ok(Self { encoding: name.parse()? })
    }

    /// Undo the outer text encoding, yielding raw wire bytes.
    pub(crate) fn decode(&self, data: &[u8]) -> Result<Vec<u8>, TransactionError> {
        Ok(self.encoding.decode(data)?)
    }

    /// Apply the outer text encoding to raw wire bytes.
    pub(crate) fn encode(&self, data: Vec<u8>) -> Vec<u8> {
        self.encoding.encode(data)
    }
}
