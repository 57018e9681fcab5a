/// NEO SDK - Scripts, addresses and witnesses.
///
/// Provides the Script type, NEO 2 opcode definitions, script chunk parsing,
/// single- and multi-signature verification scripts, address
/// generation/validation, and the witness (invocation/verification) pair.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;
pub mod witness;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::Address;
pub use chunk::ScriptChunk;
pub use witness::Witness;
