//! Signing and the signed payload.
//!
//! The broadcast payload is the unsigned transaction bytes followed by the
//! witness list: a var-int count, then each witness as var-bytes invocation
//! and var-bytes verification. Witnesses are ordered by the script hash of
//! their verification script. The txid covers the unsigned bytes only.

use std::collections::BTreeMap;

use neo_primitives::ec::{PrivateKey, PublicKey, Signature};
use neo_primitives::util::{BinaryReader, BinaryWriter, VarInt};
use neo_primitives::{UInt160, UInt256};
use neo_script::Witness;

use crate::template::{single_sig, WitnessTemplate};
use crate::transaction::ContractTransaction;
use crate::TransactionError;

/// Most witnesses accepted when decoding a signed payload.
pub const MAX_WITNESSES: usize = 16;

/// A transaction together with the witnesses that authorize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: ContractTransaction,
    witnesses: Vec<Witness>,
    unsigned: Vec<u8>,
    txid: UInt256,
}

impl SignedTransaction {
    /// Attach `witnesses` to `transaction`.
    ///
    /// Witnesses are sorted by script hash; two witnesses for the same
    /// script hash are rejected.
    ///
    /// # Returns
    /// The signed transaction, or `SigningError` on a duplicate account,
    /// or the error of [`ContractTransaction::validate`].
    pub fn new(
        transaction: ContractTransaction,
        witnesses: Vec<Witness>,
    ) -> Result<Self, TransactionError> {
        transaction.validate()?;
        let mut by_hash: BTreeMap<UInt160, Witness> = BTreeMap::new();
        for witness in witnesses {
            let hash = witness.script_hash();
            if by_hash.insert(hash, witness).is_some() {
                return Err(TransactionError::SigningError(format!(
                    "more than one witness for script hash {}",
                    hash
                )));
            }
        }
        let unsigned = transaction.to_bytes();
        let txid = UInt256::sha256d(&unsigned);
        Ok(SignedTransaction {
            transaction,
            witnesses: by_hash.into_values().collect(),
            unsigned,
            txid,
        })
    }

    /// The unsigned transaction the witnesses cover.
    pub fn transaction(&self) -> &ContractTransaction {
        &self.transaction
    }

    /// Witnesses in payload order.
    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// The canonical unsigned bytes that were signed.
    pub fn unsigned_bytes(&self) -> &[u8] {
        &self.unsigned
    }

    /// Double SHA-256 of the unsigned bytes.
    pub fn txid(&self) -> UInt256 {
        self.txid
    }

    /// The txid as byte-reversed lowercase hex.
    pub fn txid_hex(&self) -> String {
        self.txid.to_string()
    }

    /// Encoded witness list alone.
    pub fn witness_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        write_witnesses(&self.witnesses, &mut writer);
        writer.into_bytes()
    }

    /// Unsigned bytes followed by the witness list.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.unsigned.len() + 128);
        writer.write_bytes(&self.unsigned);
        write_witnesses(&self.witnesses, &mut writer);
        writer.into_bytes()
    }

    /// Hex of [`SignedTransaction::to_bytes`], ready for `sendrawtransaction`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse a signed payload back into its transaction and witnesses.
    ///
    /// Witnesses must appear in strictly ascending script hash order, the
    /// order [`SignedTransaction::new`] produces.
    ///
    /// # Returns
    /// The signed transaction, or `SerializationError` if the payload is
    /// truncated, has trailing bytes, carries a malformed witness list, or
    /// lists witnesses out of order or twice for one account.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = BinaryReader::new(bytes);
        let transaction = ContractTransaction::read_from(&mut reader)?;
        let unsigned_len = reader.position();

        let count = reader.read_varint_max(MAX_WITNESSES as u64).map_err(|e| {
            TransactionError::SerializationError(format!("reading witness count: {}", e))
        })?;
        let mut witnesses: Vec<Witness> = Vec::with_capacity(count);
        for _ in 0..count {
            let witness = Witness::read_from(&mut reader).map_err(|e| {
                TransactionError::SerializationError(format!("reading witness: {}", e))
            })?;
            if let Some(previous) = witnesses.last() {
                if previous.script_hash() >= witness.script_hash() {
                    return Err(TransactionError::SerializationError(format!(
                        "witness for {} is out of order or repeated",
                        witness.script_hash()
                    )));
                }
            }
            witnesses.push(witness);
        }
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after witnesses",
                reader.remaining()
            )));
        }

        let unsigned = bytes[..unsigned_len].to_vec();
        let txid = UInt256::sha256d(&unsigned);
        Ok(SignedTransaction { transaction, witnesses, unsigned, txid })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Check every witness whose signatures can be checked locally.
    ///
    /// Single-signature witnesses must carry one signature valid for their
    /// key. Multi-signature witnesses must carry `m` signatures matching
    /// distinct keys in script order.
    ///
    /// # Returns
    /// `true` when every witness is well formed and verifies.
    pub fn verify(&self) -> bool {
        self.witnesses.iter().all(|w| verify_witness(w, &self.unsigned))
    }
}

fn write_witnesses(witnesses: &[Witness], writer: &mut BinaryWriter) {
    writer.write_varint(VarInt::from(witnesses.len()));
    for witness in witnesses {
        witness.write_to(writer);
    }
}

fn invocation_signatures(witness: &Witness) -> Option<Vec<Signature>> {
    let chunks = witness.invocation.chunks().ok()?;
    chunks
        .iter()
        .map(|c| c.data.as_deref().and_then(|d| Signature::from_bytes(d).ok()))
        .collect()
}

fn verify_witness(witness: &Witness, message: &[u8]) -> bool {
    let Some(signatures) = invocation_signatures(witness) else {
        return false;
    };
    let Ok(chunks) = witness.verification.chunks() else {
        return false;
    };

    if witness.verification.is_single_sig() {
        let Some(key) = chunks[0]
            .data
            .as_deref()
            .and_then(|d| PublicKey::from_bytes(d).ok())
        else {
            return false;
        };
        return signatures.len() == 1 && key.verify(message, &signatures[0]);
    }

    let Some((m, _)) = witness.verification.multisig_params() else {
        return false;
    };
    if signatures.len() != m {
        return false;
    }
    let keys: Vec<_> = chunks[1..chunks.len() - 2]
        .iter()
        .filter_map(|c| c.data.as_deref())
        .filter_map(|d| PublicKey::from_bytes(d).ok())
        .collect();

    // Each signature must match a key later than the previous match.
    let mut next_key = 0;
    for sig in &signatures {
        match keys[next_key..].iter().position(|k| k.verify(message, sig)) {
            Some(offset) => next_key += offset + 1,
            None => return false,
        }
    }
    true
}

/// Sign `transaction` for the single-signature account of `private_key`.
///
/// # Arguments
/// * `private_key` - The sender's key.
/// * `transaction` - The assembled unsigned transaction.
///
/// # Returns
/// The signed transaction, whose payload is the unsigned bytes followed by
/// a one-entry witness list and whose txid covers the unsigned bytes.
pub fn sign(
    private_key: &PrivateKey,
    transaction: ContractTransaction,
) -> Result<SignedTransaction, TransactionError> {
    sign_with(transaction, &[&single_sig::unlock(private_key.clone())])
}

/// Sign `transaction` with one witness per template.
///
/// # Returns
/// The signed transaction, or `SigningError` if a template fails or two
/// templates cover the same account.
pub fn sign_with(
    transaction: ContractTransaction,
    templates: &[&dyn WitnessTemplate],
) -> Result<SignedTransaction, TransactionError> {
    let unsigned = transaction.to_bytes();
    let witnesses = templates
        .iter()
        .map(|t| t.witness(&unsigned))
        .collect::<Result<Vec<_>, _>>()?;
    let signed = SignedTransaction::new(transaction, witnesses)?;
    tracing::debug!(
        txid = %signed.txid(),
        witnesses = signed.witnesses().len(),
        size = signed.to_bytes().len(),
        "signed transaction"
    );
    Ok(signed)
}

/// Parse a signing key given as WIF or as 64 hex characters.
///
/// # Returns
/// The key, or `SigningError` if it is neither.
pub fn parse_signing_key(key: &str) -> Result<PrivateKey, TransactionError> {
    let key = key.trim();
    let parsed = if key.len() == 64 && key.bytes().all(|b| b.is_ascii_hexdigit()) {
        PrivateKey::from_hex(key)
    } else {
        PrivateKey::from_wif(key)
    };
    parsed.map_err(|e| TransactionError::SigningError(e.to_string()))
}
