/// Error types for script operations.
///
/// Covers parsing errors, address validation and witness construction.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Generic invalid script error.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// Attempted to append a push opcode without its data.
    #[error("use append_push_data for push opcodes: {0}")]
    InvalidOpcodeType(String),

    /// The string is not a valid NEO address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// A multi-signature script could not be built or parsed.
    #[error("invalid multisig: {0}")]
    InvalidMultisig(String),

    /// A witness could not be built or decoded.
    #[error("invalid witness: {0}")]
    InvalidWitness(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] neo_primitives::PrimitivesError),
}
