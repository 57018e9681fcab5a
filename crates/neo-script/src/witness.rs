//! Transaction witnesses.
//!
//! A witness pairs an invocation script (the signatures) with the
//! verification script they satisfy. The witness list is appended to a
//! transaction's unsigned bytes to form the broadcast payload.

use serde::{Deserialize, Serialize};

use neo_primitives::ec::{PublicKey, Signature};
use neo_primitives::util::{BinaryReader, BinaryWriter};
use neo_primitives::UInt160;

use crate::{Script, ScriptError};

/// Largest invocation or verification script accepted when decoding.
pub const MAX_WITNESS_SCRIPT_LEN: u64 = 65536;

/// An invocation/verification script pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// Pushes the signatures.
    pub invocation: Script,
    /// Checks them.
    pub verification: Script,
}

impl Witness {
    pub fn new(invocation: Script, verification: Script) -> Self {
        Witness { invocation, verification }
    }

    /// Witness for a single-signature account.
    ///
    /// Invocation `0x40 || r || s`, verification `0x21 || key || 0xac`.
    pub fn single_sig(signature: &Signature, pub_key: &PublicKey) -> Self {
        Witness {
            invocation: Script::invocation(std::slice::from_ref(signature)),
            verification: Script::single_sig(pub_key),
        }
    }

    /// Witness for a multi-signature account.
    ///
    /// `signatures` must already be in the order of the keys inside the
    /// verification script, and there must be exactly `m` of them.
    ///
    /// # Returns
    /// The witness, or [`ScriptError::InvalidMultisig`] if the verification
    /// script is not a multisig script or the signature count is not `m`.
    pub fn multisig(signatures: &[Signature], verification: Script) -> Result<Self, ScriptError> {
        let (m, n) = verification.multisig_params().ok_or_else(|| {
            ScriptError::InvalidMultisig("verification script is not multisig".to_string())
        })?;
        if signatures.len() != m {
            return Err(ScriptError::InvalidMultisig(format!(
                "{}-of-{} script needs {} signatures, got {}",
                m,
                n,
                m,
                signatures.len()
            )));
        }
        Ok(Witness {
            invocation: Script::invocation(signatures),
            verification,
        })
    }

    /// Script hash of the verification script; witnesses are ordered by it.
    pub fn script_hash(&self) -> UInt160 {
        self.verification.script_hash()
    }

    /// Append `var_bytes(invocation) || var_bytes(verification)`.
    pub fn write_to(&self, writer: &mut BinaryWriter) {
        writer.write_var_bytes(self.invocation.to_bytes());
        writer.write_var_bytes(self.verification.to_bytes());
    }

    /// Read a witness written by [`Witness::write_to`].
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self, ScriptError> {
        let invocation = reader.read_var_bytes(MAX_WITNESS_SCRIPT_LEN)?;
        let verification = reader.read_var_bytes(MAX_WITNESS_SCRIPT_LEN)?;
        Ok(Witness {
            invocation: Script::from_bytes(invocation),
            verification: Script::from_bytes(verification),
        })
    }
}
