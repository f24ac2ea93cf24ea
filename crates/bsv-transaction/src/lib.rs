/// BSV Blockchain SDK - Transaction input/output wire codec.
///
/// Parses and serializes individual transaction inputs and outputs,
/// byte-exact, with an optional hex/base64 text layer applied per call,
/// and provides the pre-signing input size estimate used by fee logic.

pub mod input;
pub mod options;
pub mod output;

mod error;
pub use error::TransactionError;
pub use input::TransactionInput;
pub use options::CodecOptions;
pub use output::TransactionOutput;
