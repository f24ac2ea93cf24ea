//! Transaction input referencing a previous output.
//!
//! Contains the source transaction ID, output index, unlocking script,
//! sequence number, and an optional shared reference to the output being
//! spent.  Provides binary serialization/deserialization following the
//! Bitcoin wire format, plus the pre-signing size estimate used by fee
//! calculation.

use std::sync::Arc;

use bsv_primitives::chainhash::{Hash, HASH_SIZE};
use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};
use bsv_script::Script;
use tracing::trace;

use crate::options::CodecOptions;
use crate::output::TransactionOutput;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// Bytes taken by the fixed-width fields: txid (32), index (4), sequence (4).
pub const INPUT_FIXED_SIZE: usize = HASH_SIZE + 4 + 4;

/// Assumed unlocking script size for an input that has not been signed yet.
///
/// Policy value for a single-signature, single-public-key (P2PKH) spend:
/// one DER signature push plus one public key push, length prefix included.
/// It is not measured from any real signature.
pub const ESTIMATED_UNLOCKING_SCRIPT_SIZE: usize = 108;

/// Size reported by [`TransactionInput::get_size`] for unsigned inputs.
pub const ESTIMATED_INPUT_SIZE: usize = INPUT_FIXED_SIZE + ESTIMATED_UNLOCKING_SCRIPT_SIZE;

/// A single input in a BSV transaction.
///
/// Each input references an output from a previous transaction by its
/// transaction ID (`output_txid`) and output index (`output_index`).
/// The `script` (scriptSig) supplies the data required to satisfy the
/// referenced output's locking script.
///
/// # Wire format
///
/// | Field              | Size               |
/// |--------------------|--------------------|
/// | output_txid        | 32 bytes (wire)    |
/// | output_index       | 4 bytes (LE)       |
/// | script length      | VarInt             |
/// | script             | variable           |
/// | sequence           | 4 bytes (LE)       |
#[derive(Clone, Debug)]
pub struct TransactionInput {
    /// Transaction ID of the output being spent. Stored in wire order;
    /// `Display` (and [`output_txid_hex`](Self::output_txid_hex)) gives the
    /// conventional reversed hex.
    pub output_txid: Hash,

    /// Index of the output within the source transaction.
    pub output_index: u32,

    /// The unlocking script. `None` when the input has not been signed;
    /// parsing always yields `Some`, possibly empty.
    pub script: Option<Script>,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// The output being spent, shared with whoever else holds it.
    /// Signing context only: never serialized and ignored by equality.
    utxo: Option<Arc<TransactionOutput>>,
}

impl TransactionInput {
    /// Create an unsigned input spending `output_index` of `output_txid`.
    pub fn new(output_txid: Hash, output_index: u32) -> Self {
        TransactionInput {
            output_txid,
            output_index,
            script: None,
            sequence: DEFAULT_SEQUENCE_NUMBER,
            utxo: None,
        }
    }

    /// Create an unsigned input from a display-order txid string.
    ///
    /// # Arguments
    /// * `txid_hex` - 64 hex characters, as shown by block explorers.
    /// * `output_index` - The output index being spent.
    ///
    /// # Returns
    /// The input, or `InvalidTxid` if the string is not a 32-byte hash.
    pub fn from_outpoint(txid_hex: &str, output_index: u32) -> Result<Self, TransactionError> {
        let txid = Hash::from_hex(txid_hex)
            .map_err(|e| TransactionError::InvalidTxid(format!("{}: {}", txid_hex, e)))?;
        Ok(Self::new(txid, output_index))
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Attach the output being spent.
    pub fn with_utxo(mut self, utxo: Arc<TransactionOutput>) -> Self {
        self.utxo = Some(utxo);
        self
    }

    /// Set or clear the output being spent.
    pub fn set_utxo(&mut self, utxo: Option<Arc<TransactionOutput>>) {
        self.utxo = utxo;
    }

    /// The output being spent, if a signing workflow attached one.
    pub fn utxo(&self) -> Option<&TransactionOutput> {
        self.utxo.as_deref()
    }

    /// Satoshi value of the output being spent, if known.
    pub fn utxo_satoshis(&self) -> Option<u64> {
        self.utxo().map(|o| o.satoshis)
    }

    /// The spent transaction ID as display-order hex.
    pub fn output_txid_hex(&self) -> String {
        self.output_txid.to_string()
    }

    /// Whether the sequence number is the "final" default.
    pub fn is_final(&self) -> bool {
        self.sequence == DEFAULT_SEQUENCE_NUMBER
    }

    /// Whether this input has the shape of a coinbase input (null txid and
    /// index `0xFFFFFFFF`).
    pub fn is_coinbase(&self) -> bool {
        self.output_txid.is_zero() && self.output_index == 0xFFFF_FFFF
    }

    /// Parse an input from the front of `data`.
    ///
    /// `data` is first decoded according to `options.encoding`. The returned
    /// remainder is the unconsumed tail of the decoded (raw) bytes. `utxo`
    /// is never set by parsing.
    ///
    /// # Returns
    /// The input and any trailing bytes, or `MalformedInput` when a fixed
    /// field is short (including any buffer under 40 bytes),
    /// `BufferUnderflow` when the script length overruns the buffer, or the
    /// script parser's own error.
    pub fn parse(
        data: &[u8],
        options: &CodecOptions,
    ) -> Result<(Self, Vec<u8>), TransactionError> {
        let raw = options.decode(data)?;
        let mut reader = BsvReader::new(&raw);
        let input = Self::read_from(&mut reader)?;
        let rest = reader.rest().to_vec();
        trace!(
            output_index = input.output_index,
            script_len = input.script.as_ref().map_or(0, Script::len),
            sequence = input.sequence,
            rest_len = rest.len(),
            encoding = %options.encoding,
            "parsed transaction input"
        );
        Ok((input, rest))
    }

    /// Serialize this input and apply `options.encoding`.
    ///
    /// An absent script is written as a zero-length script.
    pub fn serialize(&self, options: &CodecOptions) -> Vec<u8> {
        let bytes = self.to_bytes();
        trace!(size = bytes.len(), encoding = %options.encoding, "serialized transaction input");
        options.encode(bytes)
    }

    /// Parse a hex-encoded input that must span the whole string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let (input, rest) = Self::parse(hex_str.as_bytes(), &CodecOptions::hex())?;
        if !rest.is_empty() {
            return Err(TransactionError::MalformedInput(format!(
                "trailing {} bytes after input",
                rest.len()
            )));
        }
        Ok(input)
    }

    /// Serialize this input to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Deserialize a `TransactionInput` from a `BsvReader`.
    ///
    /// Reads the standard wire format: 32-byte txid, 4-byte output index,
    /// varint-prefixed unlocking script, and 4-byte sequence number.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        if reader.remaining() < INPUT_FIXED_SIZE {
            return Err(TransactionError::MalformedInput(format!(
                "input needs at least {} bytes, got {}",
                INPUT_FIXED_SIZE,
                reader.remaining()
            )));
        }

        let txid = reader
            .read_array::<HASH_SIZE>()
            .map_err(TransactionError::reading("output txid"))?;

        let output_index = reader
            .read_u32_le()
            .map_err(TransactionError::reading("output index"))?;

        let script_bytes = reader
            .read_var_bytes()
            .map_err(TransactionError::reading("unlocking script"))?;
        let script = Script::parse(script_bytes)?;

        let sequence = reader
            .read_u32_le()
            .map_err(TransactionError::reading("sequence number"))?;

        Ok(TransactionInput {
            output_txid: Hash::new(txid),
            output_index,
            script: Some(script),
            sequence,
            utxo: None,
        })
    }

    /// Serialize this `TransactionInput` into a `BsvWriter`.
    pub fn write_to(&self, writer: &mut BsvWriter) {
        writer.write_bytes(self.output_txid.as_bytes());
        writer.write_u32_le(self.output_index);
        writer.write_var_bytes(self.script.as_ref().map_or(&[][..], Script::to_bytes));
        writer.write_u32_le(self.sequence);
    }

    /// Serialize this input to wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BsvWriter::with_capacity(self.serialized_size());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Size of this input for fee calculation.
    ///
    /// With a non-empty script this is the exact serialized length. Without
    /// one (absent or empty) it is [`ESTIMATED_INPUT_SIZE`], i.e. 148 bytes:
    /// the fixed fields plus [`ESTIMATED_UNLOCKING_SCRIPT_SIZE`]. Callers
    /// pricing unsigned inputs should treat that figure as policy, since the
    /// real unlocking script may differ once signed.
    pub fn get_size(&self) -> usize {
        match &self.script {
            Some(script) if !script.is_empty() => self.serialized_size(),
            _ => ESTIMATED_INPUT_SIZE,
        }
    }

    fn serialized_size(&self) -> usize {
        let script_len = self.script.as_ref().map_or(0, Script::len);
        INPUT_FIXED_SIZE + VarInt::from(script_len).length() + script_len
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::new(Hash::default(), 0)
    }
}

/// Wire-level equality; the attached `utxo` is not compared.
impl PartialEq for TransactionInput {
    fn eq(&self, other: &Self) -> bool {
        self.output_txid == other.output_txid
            && self.output_index == other.output_index
            && self.script == other.script
            && self.sequence == other.sequence
    }
}

impl Eq for TransactionInput {}
