//! Witness templates.
//!
//! Provides the `WitnessTemplate` trait and the two account shapes NEO
//! wallets use: single-signature and m-of-n multi-signature.

pub mod multisig;
pub mod single_sig;

use neo_primitives::UInt160;
use neo_script::Witness;

use crate::TransactionError;

pub use multisig::MultiSig;
pub use single_sig::SingleSig;

/// Something that can authorize a transaction for one account.
///
/// Implementations sign the unsigned transaction bytes and return the
/// invocation/verification pair for their account. The signer collects one
/// witness per template and orders them by [`WitnessTemplate::script_hash`].
pub trait WitnessTemplate {
    /// Produce the witness for `unsigned`.
    ///
    /// # Arguments
    /// * `unsigned` - Canonical unsigned transaction bytes.
    ///
    /// # Returns
    /// `Ok(Witness)`, or `SigningError` if a signature cannot be produced.
    fn witness(&self, unsigned: &[u8]) -> Result<Witness, TransactionError>;

    /// Script hash of the verification script this template satisfies.
    fn script_hash(&self) -> UInt160;
}
