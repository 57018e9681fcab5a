//! m-of-n multi-signature witness template.

use neo_primitives::ec::{PrivateKey, PublicKey};
use neo_primitives::UInt160;
use neo_script::{Script, Witness};

use crate::template::WitnessTemplate;
use crate::TransactionError;

/// Signs for an m-of-n account with whichever of its keys are held.
///
/// Signatures go into the invocation script in the order their keys appear
/// in the verification script, which is the sorted key order.
pub struct MultiSig {
    verification: Script,
    m: usize,
    pub_keys: Vec<PublicKey>,
    private_keys: Vec<PrivateKey>,
}

impl MultiSig {
    /// Build the template for the m-of-n account over `pub_keys`.
    ///
    /// # Arguments
    /// * `m` - Signatures required.
    /// * `pub_keys` - Every participant, in any order.
    /// * `private_keys` - The participants' keys available for signing.
    ///
    /// # Returns
    /// The template, or `SigningError` if the script cannot be built or
    /// fewer than `m` of the private keys belong to the account.
    pub fn new(
        m: usize,
        pub_keys: &[PublicKey],
        private_keys: Vec<PrivateKey>,
    ) -> Result<Self, TransactionError> {
        let verification = Script::multisig(m, pub_keys)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        let mut sorted = pub_keys.to_vec();
        sorted.sort();

        let held = sorted
            .iter()
            .filter(|pk| private_keys.iter().any(|k| &k.pub_key() == *pk))
            .count();
        if held < m {
            return Err(TransactionError::SigningError(format!(
                "{}-of-{} account but only {} matching keys",
                m,
                sorted.len(),
                held
            )));
        }

        Ok(MultiSig { verification, m, pub_keys: sorted, private_keys })
    }

    /// The account's verification script.
    pub fn verification_script(&self) -> &Script {
        &self.verification
    }
}

impl WitnessTemplate for MultiSig {
    fn witness(&self, unsigned: &[u8]) -> Result<Witness, TransactionError> {
        let mut signatures = Vec::with_capacity(self.m);
        for pub_key in &self.pub_keys {
            if signatures.len() == self.m {
                break;
            }
            if let Some(key) = self.private_keys.iter().find(|k| &k.pub_key() == pub_key) {
                let sig = key
                    .sign(unsigned)
                    .map_err(|e| TransactionError::SigningError(e.to_string()))?;
                signatures.push(sig);
            }
        }
        Witness::multisig(&signatures, self.verification.clone())
            .map_err(|e| TransactionError::SigningError(e.to_string()))
    }

    fn script_hash(&self) -> UInt160 {
        self.verification.script_hash()
    }
}
