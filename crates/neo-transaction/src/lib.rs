/// NEO SDK - Native asset transactions.
///
/// Provides UTXO selection under a per-asset fee policy, attribute encoding,
/// assembly of unsigned contract transactions, their canonical binary codec
/// and txid, and signing into a broadcastable payload.

pub mod asset;
pub mod attribute;
pub mod fee;
pub mod input;
pub mod native_asset;
pub mod output;
pub mod signer;
pub mod template;
pub mod transaction;
pub mod utxo;

mod error;
pub use error::TransactionError;
pub use attribute::{AttributeUsage, TransactionAttribute};
pub use fee::FeePolicy;
pub use input::TransactionInput;
pub use native_asset::{assemble, NativeAsset};
pub use output::TransactionOutput;
pub use signer::{sign, SignedTransaction};
pub use transaction::{transaction_id, ContractTransaction};
pub use utxo::{select, Selection, Unspent};

#[cfg(test)]
mod tests;
