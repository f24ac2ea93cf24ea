/// BSV Blockchain SDK - Script values and push-data parsing.
///
/// Provides the Bitcoin Script type, the opcode constants the chunk parser
/// needs, and script chunk decoding/encoding. Script semantics (execution)
/// are not modelled here.

pub mod script;
pub mod opcodes;
pub mod chunk;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use chunk::ScriptChunk;
