//! Script chunk parsing and encoding.
//!
//! A script chunk is either an opcode or a data push with its associated bytes.
//! This module handles decoding raw script bytes into structured chunks and
//! encoding push data with the correct OP_PUSHDATA prefix.

use bsv_primitives::util::BsvReader;

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a Bitcoin script.
///
/// Each chunk is either a standalone opcode (like OP_DUP) or a data push
/// that carries the opcode byte and the pushed data bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation. A top-level
    /// OP_RETURN carries the remainder of the script (itself included).
    pub data: Option<Vec<u8>>,
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles OP_DATA_1..OP_DATA_75 (direct push), OP_PUSHDATA1/2/4
/// (extended push), and OP_RETURN (consumes remaining bytes as data
/// unless inside a conditional block).
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// A vector of parsed chunks, or `DataTooSmall` if a push is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut reader = BsvReader::new(bytes);
    let mut conditional_block: i32 = 0;

    while reader.remaining() > 0 {
        let rest = reader.rest();
        let op = reader.read_u8().map_err(|_| ScriptError::DataTooSmall)?;

        let data = match op {
            OP_IF | OP_NOTIF | OP_VERIF | OP_VERNOTIF => {
                conditional_block += 1;
                None
            }
            OP_ENDIF => {
                conditional_block -= 1;
                None
            }
            OP_RETURN if conditional_block <= 0 => {
                let data = rest.to_vec();
                chunks.push(ScriptChunk { op, data: Some(data) });
                break;
            }
            OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4 | OP_DATA_1..=OP_DATA_75 => {
                let length = match op {
                    OP_PUSHDATA1 => reader.read_u8().map(usize::from),
                    OP_PUSHDATA2 => reader.read_u16_le().map(usize::from),
                    OP_PUSHDATA4 => reader.read_u32_le().map(|n| n as usize),
                    _ => Ok(op as usize),
                }
                .map_err(|_| ScriptError::DataTooSmall)?;
                let data = reader.read_bytes(length).map_err(|_| ScriptError::DataTooSmall)?;
                Some(data.to_vec())
            }
            _ => None,
        };
        chunks.push(ScriptChunk { op, data });
    }

    Ok(chunks)
}

/// Compute the OP_PUSHDATA prefix bytes for a data payload of the given length.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The minimal prefix for the push, or `DataTooBig` past 4 GiB.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len as u64 <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}
