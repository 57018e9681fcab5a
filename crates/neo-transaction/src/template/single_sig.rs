//! Single-signature witness template.
//!
//! Verification script `PUSHBYTES33 <compressed key> CHECKSIG`, invocation
//! script `PUSHBYTES64 <r || s>`.

use neo_primitives::ec::PrivateKey;
use neo_primitives::UInt160;
use neo_script::{Script, Witness};

use crate::template::WitnessTemplate;
use crate::TransactionError;

/// Create a single-signature template for `private_key`.
pub fn unlock(private_key: PrivateKey) -> SingleSig {
    SingleSig { private_key }
}

/// Signs with one key for the standard account of that key.
pub struct SingleSig {
    private_key: PrivateKey,
}

impl SingleSig {
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

impl WitnessTemplate for SingleSig {
    /// Sign `unsigned` with RFC6979 deterministic ECDSA and pair the
    /// signature with the key's verification script.
    fn witness(&self, unsigned: &[u8]) -> Result<Witness, TransactionError> {
        let signature = self
            .private_key
            .sign(unsigned)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(Witness::single_sig(&signature, &self.private_key.pub_key()))
    }

    fn script_hash(&self) -> UInt160 {
        Script::single_sig(&self.private_key.pub_key()).script_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb";

    #[test]
    fn test_witness_verifies() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let template = unlock(key.clone());
        let witness = template.witness(b"unsigned bytes").unwrap();

        assert_eq!(witness.script_hash(), template.script_hash());
        assert_eq!(witness.invocation.len(), 65);
        assert!(witness.verification.is_single_sig());

        let sig = neo_primitives::ec::Signature::from_bytes(&witness.invocation.to_bytes()[1..])
            .unwrap();
        assert!(key.pub_key().verify(b"unsigned bytes", &sig));
    }

    #[test]
    fn test_deterministic() {
        let template = unlock(PrivateKey::from_hex(KEY_HEX).unwrap());
        assert_eq!(template.witness(b"tx").unwrap(), template.witness(b"tx").unwrap());
    }
}
