//! Transaction output with satoshi value and locking script.
//!
//! Defines the spending conditions for the output's value.  Provides
//! binary serialization/deserialization following the Bitcoin wire format.

use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};
use bsv_script::Script;
use tracing::trace;

use crate::options::CodecOptions;
use crate::TransactionError;

/// Display units per satoshi (1 satoshi = 10^-8 BSV).
pub const AMOUNT_PER_SATOSHI: f64 = 0.000_000_01;

/// Size in bytes of the fixed satoshi value field.
pub const SATOSHIS_FIELD_SIZE: usize = 8;

/// Convert a satoshi value into its floating point display amount.
///
/// The result is a convenience only; not every satoshi value survives a
/// round trip through `f64`, so `satoshis` remains the value of record.
pub fn satoshis_to_amount(satoshis: u64) -> f64 {
    satoshis as f64 * AMOUNT_PER_SATOSHI
}

/// A single output in a BSV transaction.
///
/// Each output specifies a satoshi value and a locking `script`
/// (scriptPubKey) that defines the conditions under which the funds
/// may be spent.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | satoshis         | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | script           | variable       |
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TransactionOutput {
    /// The number of satoshis locked by this output.
    pub satoshis: u64,

    /// `satoshis * 10^-8`, refreshed by every constructor, setter and parse.
    /// Never read by serialization.
    pub amount: f64,

    /// The locking script (scriptPubKey). May be empty.
    pub script: Script,
}

impl TransactionOutput {
    /// Create an output paying `satoshis` to `script`.
    pub fn new(satoshis: u64, script: Script) -> Self {
        TransactionOutput {
            satoshis,
            amount: satoshis_to_amount(satoshis),
            script,
        }
    }

    /// Update the satoshi value and the derived amount together.
    pub fn set_satoshis(&mut self, satoshis: u64) {
        self.satoshis = satoshis;
        self.amount = satoshis_to_amount(satoshis);
    }

    /// Parse an output from the front of `data`.
    ///
    /// `data` is first decoded according to `options.encoding`. The returned
    /// remainder is the unconsumed tail of the decoded (raw) bytes.
    ///
    /// # Arguments
    /// * `data` - Raw or text-encoded bytes starting with an output.
    /// * `options` - Codec options for this call.
    ///
    /// # Returns
    /// The output and any trailing bytes, or `MalformedInput` when fewer than
    /// 8 bytes are available, `BufferUnderflow` when the script length
    /// overruns the buffer, or the script parser's own error.
    pub fn parse(
        data: &[u8],
        options: &CodecOptions,
    ) -> Result<(Self, Vec<u8>), TransactionError> {
        let raw = options.decode(data)?;
        let mut reader = BsvReader::new(&raw);
        let output = Self::read_from(&mut reader)?;
        let rest = reader.rest().to_vec();
        trace!(
            satoshis = output.satoshis,
            script_len = output.script.len(),
            rest_len = rest.len(),
            encoding = %options.encoding,
            "parsed transaction output"
        );
        Ok((output, rest))
    }

    /// Serialize this output and apply `options.encoding`.
    pub fn serialize(&self, options: &CodecOptions) -> Vec<u8> {
        let bytes = self.to_bytes();
        trace!(size = bytes.len(), encoding = %options.encoding, "serialized transaction output");
        options.encode(bytes)
    }

    /// Parse a hex-encoded output that must span the whole string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let (output, rest) = Self::parse(hex_str.as_bytes(), &CodecOptions::hex())?;
        if !rest.is_empty() {
            return Err(TransactionError::MalformedInput(format!(
                "trailing {} bytes after output",
                rest.len()
            )));
        }
        Ok(output)
    }

    /// Serialize this output to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Deserialize a `TransactionOutput` from a `BsvReader`.
    ///
    /// Reads 8-byte LE satoshis and a varint-prefixed script.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        let satoshis = reader
            .read_u64_le()
            .map_err(TransactionError::reading("satoshis"))?;

        let script_bytes = reader
            .read_var_bytes()
            .map_err(TransactionError::reading("locking script"))?;

        Ok(Self::new(satoshis, Script::parse(script_bytes)?))
    }

    /// Serialize this `TransactionOutput` into a `BsvWriter`.
    pub fn write_to(&self, writer: &mut BsvWriter) {
        writer.write_u64_le(self.satoshis);
        writer.write_var_bytes(self.script.to_bytes());
    }

    /// Serialize this output to wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BsvWriter::with_capacity(self.get_size());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Exact serialized size of this output in bytes.
    pub fn get_size(&self) -> usize {
        let script_len = self.script.len();
        SATOSHIS_FIELD_SIZE + VarInt::from(script_len).length() + script_len
    }
}
