use neo_primitives::{Fixed8, UInt256};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The unspent outputs of `asset` cannot cover the amount plus fee.
    #[error("insufficient funds for asset {asset}: requested {requested}, available {available}")]
    InsufficientFunds {
        /// The asset being spent.
        asset: UInt256,
        /// Amount plus network fee.
        requested: Fixed8,
        /// Sum of the distinct unspent outputs of that asset.
        available: Fixed8,
    },
    /// A transfer amount, output value or fee is out of range.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// An attribute payload does not fit its usage's wire shape.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
    /// An address failed to decode.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The key is malformed or the signature primitive failed.
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// An underlying script error (forwarded from `neo-script`).
    #[error("script error: {0}")]
    Script(#[from] neo_script::ScriptError),
}

impl TransactionError {
    /// How much more value is needed, for [`TransactionError::InsufficientFunds`].
    pub fn shortfall(&self) -> Option<Fixed8> {
        match self {
            TransactionError::InsufficientFunds { requested, available, .. } => {
                requested.checked_sub(*available)
            }
            _ => None,
        }
    }

    pub(crate) fn from_address_error(err: neo_script::ScriptError) -> Self {
        match err {
            neo_script::ScriptError::InvalidAddress(msg) => TransactionError::InvalidAddress(msg),
            other => TransactionError::InvalidAddress(other.to_string()),
        }
    }
}

/// Decode failures in the primitives layer are malformed input.
impl From<neo_primitives::PrimitivesError> for TransactionError {
    fn from(e: neo_primitives::PrimitivesError) -> Self {
        TransactionError::SerializationError(e.to_string())
    }
}
