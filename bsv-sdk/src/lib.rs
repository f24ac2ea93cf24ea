#![deny(missing_docs)]

//! BSV transaction input/output wire codec.
//!
//! Re-exports the codec components for convenient single-crate usage.

pub use bsv_primitives as primitives;
pub use bsv_script as script;
pub use bsv_transaction as transaction;

pub use bsv_transaction::{CodecOptions, TransactionError, TransactionInput, TransactionOutput};
