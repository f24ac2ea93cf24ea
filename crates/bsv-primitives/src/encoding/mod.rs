//! Outer text encodings for wire data.
//!
//! Codec entry points accept an optional text encoding that is applied once
//! at the boundary: the input is decoded from text before parsing, and the
//! output is encoded to text after serializing.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Text encoding applied around raw wire bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Raw binary, passed through unchanged.
    #[default]
    None,
    /// Lowercase hexadecimal text. Decoding accepts either case.
    Hex,
    /// Standard base64 alphabet with padding.
    Base64,
}

impl Encoding {
    /// Decode text-encoded data into raw bytes.
    ///
    /// # Arguments
    /// * `data` - The encoded input. For `Encoding::None` it is returned as is.
    ///
    /// # Returns
    /// The raw bytes, or `InvalidHex` / `InvalidBase64` if the text is malformed.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        match self {
            Encoding::None => Ok(data.to_vec()),
            Encoding::Hex => Ok(hex::decode(trim_ascii(data))?),
            Encoding::Base64 => Ok(BASE64.decode(trim_ascii(data))?),
        }
    }

    /// Encode raw bytes into this encoding's text form.
    ///
    /// # Arguments
    /// * `data` - The raw bytes, consumed to avoid a copy for `Encoding::None`.
    ///
    /// # Returns
    /// The encoded bytes (ASCII text for hex and base64).
    pub fn encode(&self, data: Vec<u8>) -> Vec<u8> {
        match self {
            Encoding::None => data,
            Encoding::Hex => hex::encode(data).into_bytes(),
            Encoding::Base64 => BASE64.encode(data).into_bytes(),
        }
    }

    /// Canonical lowercase name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::None => "none",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }
}

fn trim_ascii(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(data.len());
    let end = data.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &data[start..end]
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse an encoding by name.
///
/// Accepts `none` (aliases `binary`, `raw`), `hex` and `base64`, ignoring
/// case. Anything else is `UnsupportedEncoding`.
impl FromStr for Encoding {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "binary" | "raw" => Ok(Encoding::None),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            _ => Err(PrimitivesError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let raw = vec![0x00, 0xab, 0xff];
        let text = Encoding::Hex.encode(raw.clone());
        assert_eq!(text, b"00abff");
        assert_eq!(Encoding::Hex.decode(&text).unwrap(), raw);
        assert_eq!(Encoding::Hex.decode(b"00ABFF").unwrap(), raw);
    }

    #[test]
    fn test_base64_roundtrip() {
        let raw = b"hello".to_vec();
        let text = Encoding::Base64.encode(raw.clone());
        assert_eq!(text, b"aGVsbG8=");
        assert_eq!(Encoding::Base64.decode(&text).unwrap(), raw);
    }

    #[test]
    fn test_none_is_passthrough() {
        let raw = vec![0xde, 0xad];
        assert_eq!(Encoding::None.encode(raw.clone()), raw);
        assert_eq!(Encoding::None.decode(&raw).unwrap(), raw);
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        assert_eq!(Encoding::Hex.decode(b" 0102\n").unwrap(), vec![1, 2]);
        assert_eq!(Encoding::Hex.decode(b"  ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_invalid_text() {
        assert!(matches!(
            Encoding::Hex.decode(b"zz"),
            Err(PrimitivesError::InvalidHex(_))
        ));
        assert!(matches!(
            Encoding::Hex.decode(b"abc"),
            Err(PrimitivesError::InvalidHex(_))
        ));
        assert!(matches!(
            Encoding::Base64.decode(b"***"),
            Err(PrimitivesError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("hex".parse::<Encoding>().unwrap(), Encoding::Hex);
        assert_eq!("BASE64".parse::<Encoding>().unwrap(), Encoding::Base64);
        assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::None);
        assert_eq!(
            "utf8".parse::<Encoding>(),
            Err(PrimitivesError::UnsupportedEncoding("utf8".to_string()))
        );
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Encoding::Base64).unwrap(), r#""base64""#);
        let enc: Encoding = serde_json::from_str(r#""hex""#).unwrap();
        assert_eq!(enc, Encoding::Hex);
        assert!(serde_json::from_str::<Encoding>(r#""rot13""#).is_err());
    }
}
