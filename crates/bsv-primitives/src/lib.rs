/// BSV Blockchain SDK - Wire-format primitives.
///
/// This crate provides the foundational building blocks for the transaction
/// codec:
/// - Bounds-checked reader/writer cursors for little-endian wire data
/// - Compact-size (VarInt) integers and length-prefixed binary fields
/// - Chain hash type with reversed-hex display order
/// - Outer text encodings (hex, base64) applied at codec boundaries

pub mod chainhash;
pub mod encoding;
pub mod util;

mod error;
pub use error::PrimitivesError;
