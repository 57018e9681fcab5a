//! Unsigned contract transaction and its canonical encoding.
//!
//! A `ContractTransaction` moves native assets between script hashes. The
//! unsigned encoding is what gets hashed for the txid and signed; witnesses
//! are appended after it by the signer.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use neo_primitives::util::{BinaryReader, BinaryWriter, VarInt};
use neo_primitives::{Fixed8, UInt256};

use crate::attribute::{TransactionAttribute, MAX_ATTRIBUTES};
use crate::input::{TransactionInput, INPUT_SIZE};
use crate::output::{TransactionOutput, OUTPUT_SIZE};
use crate::TransactionError;

/// Type byte of a contract transaction.
pub const CONTRACT_TRANSACTION_TYPE: u8 = 0x80;

/// The only contract transaction version in use.
pub const TRANSACTION_VERSION: u8 = 0;

/// Most outputs a transaction may carry (output indexes are 16-bit).
pub const MAX_OUTPUTS: usize = 65536;

/// An unsigned NEO contract transaction.
///
/// # Wire format
///
/// | Field           | Size                     |
/// |-----------------|--------------------------|
/// | type            | 1 byte (`0x80`)          |
/// | version         | 1 byte (`0x00`)          |
/// | attribute count | VarInt                   |
/// | attributes      | variable (per attribute) |
/// | input count     | VarInt                   |
/// | inputs          | 34 bytes each            |
/// | output count    | VarInt                   |
/// | outputs         | 60 bytes each            |
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "TransactionParts")]
pub struct ContractTransaction {
    /// Ordered attributes, encoded exactly in this order.
    pub attributes: Vec<TransactionAttribute>,

    /// Ordered inputs. No two reference the same output.
    pub inputs: Vec<TransactionInput>,

    /// Ordered outputs. Every value is positive.
    pub outputs: Vec<TransactionOutput>,
}

#[derive(Deserialize)]
struct TransactionParts {
    #[serde(default)]
    attributes: Vec<TransactionAttribute>,
    #[serde(default)]
    inputs: Vec<TransactionInput>,
    #[serde(default)]
    outputs: Vec<TransactionOutput>,
}

impl TryFrom<TransactionParts> for ContractTransaction {
    type Error = TransactionError;

    fn try_from(parts: TransactionParts) -> Result<Self, Self::Error> {
        ContractTransaction::new(parts.attributes, parts.inputs, parts.outputs)
    }
}

impl ContractTransaction {
    /// Create a transaction from its three ordered lists.
    ///
    /// # Arguments
    /// * `attributes` - Attributes in encoding order, at most 16.
    /// * `inputs` - Inputs in encoding order, no two alike.
    /// * `outputs` - Outputs in encoding order, at most 65536.
    ///
    /// # Returns
    /// The transaction, or the error of [`ContractTransaction::validate`].
    pub fn new(
        attributes: Vec<TransactionAttribute>,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
    ) -> Result<Self, TransactionError> {
        let tx = ContractTransaction { attributes, inputs, outputs };
        tx.validate()?;
        Ok(tx)
    }

    /// Check that this transaction encodes to bytes its decoder accepts.
    ///
    /// The fields are public, so a transaction edited after construction is
    /// checked again here before it is signed.
    ///
    /// # Returns
    /// `InvalidAttribute` for more than 16 attributes, `InvalidAmount` for a
    /// non-positive output, or `SerializationError` for a duplicate input or
    /// more than 65536 outputs.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.attributes.len() > MAX_ATTRIBUTES {
            return Err(TransactionError::InvalidAttribute(format!(
                "{} attributes exceed the limit of {}",
                self.attributes.len(),
                MAX_ATTRIBUTES
            )));
        }
        let mut seen = HashSet::with_capacity(self.inputs.len());
        if let Some(input) = self.inputs.iter().find(|i| !seen.insert(**i)) {
            return Err(TransactionError::SerializationError(format!(
                "duplicate input {}:{}",
                input.prev_hash, input.prev_index
            )));
        }
        if self.outputs.len() > MAX_OUTPUTS {
            return Err(TransactionError::SerializationError(format!(
                "{} outputs exceed the limit of {}",
                self.outputs.len(),
                MAX_OUTPUTS
            )));
        }
        if let Some(output) = self.outputs.iter().find(|o| !o.value.is_positive()) {
            return Err(TransactionError::InvalidAmount(format!(
                "output value must be positive, got {}",
                output.value
            )));
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - Hex of the unsigned transaction bytes.
    ///
    /// # Returns
    /// `Ok(ContractTransaction)` on success, or a `SerializationError` if
    /// the hex is invalid or the bytes do not form a valid transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must hold exactly one unsigned transaction with no
    /// trailing data.
    ///
    /// # Arguments
    /// * `bytes` - The raw unsigned transaction bytes.
    ///
    /// # Returns
    /// `Ok(ContractTransaction)` on success, or a `SerializationError` if
    /// the data is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = BinaryReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize an unsigned transaction from a `BinaryReader`.
    ///
    /// Counts are checked against both the protocol limits and the bytes
    /// left in the reader before anything is allocated.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the transaction type byte.
    ///
    /// # Returns
    /// `Ok(ContractTransaction)` on success, or a `SerializationError` on
    /// truncation, an unknown type or version, a duplicate input, or an
    /// out-of-range count.
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self, TransactionError> {
        let tx_type = reader.read_u8().map_err(|e| {
            TransactionError::SerializationError(format!("reading type: {}", e))
        })?;
        if tx_type != CONTRACT_TRANSACTION_TYPE {
            return Err(TransactionError::SerializationError(format!(
                "unsupported transaction type 0x{:02x}",
                tx_type
            )));
        }
        let version = reader.read_u8().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;
        if version != TRANSACTION_VERSION {
            return Err(TransactionError::SerializationError(format!(
                "unsupported transaction version {}",
                version
            )));
        }

        let attribute_count = reader.read_varint_max(MAX_ATTRIBUTES as u64).map_err(|e| {
            TransactionError::SerializationError(format!("reading attribute count: {}", e))
        })?;
        let mut attributes = Vec::with_capacity(attribute_count);
        for _ in 0..attribute_count {
            attributes.push(TransactionAttribute::read_from(reader)?);
        }

        let input_limit = reader.remaining() / INPUT_SIZE;
        let input_count = reader.read_varint_max(input_limit as u64).map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        let mut inputs = Vec::with_capacity(input_count);
        let mut seen = HashSet::with_capacity(input_count);
        for _ in 0..input_count {
            let input = TransactionInput::read_from(reader)?;
            if !seen.insert(input) {
                return Err(TransactionError::SerializationError(format!(
                    "duplicate input {}:{}",
                    input.prev_hash, input.prev_index
                )));
            }
            inputs.push(input);
        }

        let output_limit = (reader.remaining() / OUTPUT_SIZE).min(MAX_OUTPUTS);
        let output_count = reader.read_varint_max(output_limit as u64).map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        Ok(ContractTransaction { attributes, inputs, outputs })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction into a `BinaryWriter`.
    pub fn write_to(&self, writer: &mut BinaryWriter) {
        writer.write_u8(CONTRACT_TRANSACTION_TYPE);
        writer.write_u8(TRANSACTION_VERSION);

        writer.write_varint(VarInt::from(self.attributes.len()));
        for attribute in &self.attributes {
            attribute.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }
    }

    /// Serialize this transaction to its canonical unsigned bytes.
    ///
    /// # Returns
    /// type(1) + version(1) + varint(n_attr) + attributes + varint(n_in) +
    /// inputs + varint(n_out) + outputs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(
            16 + self.inputs.len() * INPUT_SIZE + self.outputs.len() * OUTPUT_SIZE,
        );
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize this transaction to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Size of the unsigned encoding in bytes.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Double SHA-256 of the unsigned bytes. Display it for the usual
    /// byte-reversed hex form.
    pub fn txid(&self) -> UInt256 {
        UInt256::sha256d(&self.to_bytes())
    }

    /// The txid as the 64-character hex string explorers and nodes use.
    pub fn txid_hex(&self) -> String {
        self.txid().to_string()
    }

    // -----------------------------------------------------------------
    // Accounting
    // -----------------------------------------------------------------

    /// Sum of output values for one asset.
    ///
    /// # Returns
    /// The total, or `InvalidAmount` on overflow.
    pub fn output_total(&self, asset_id: &UInt256) -> Result<Fixed8, TransactionError> {
        self.outputs
            .iter()
            .filter(|o| &o.asset_id == asset_id)
            .try_fold(Fixed8::ZERO, |acc, o| acc.checked_add(o.value))
            .ok_or_else(|| TransactionError::InvalidAmount("output total overflows".to_string()))
    }
}

impl fmt::Display for ContractTransaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Transaction id of already-serialized unsigned bytes.
///
/// # Arguments
/// * `unsigned` - Canonical unsigned transaction bytes.
///
/// # Returns
/// sha256d of the bytes, byte-reversed, as lowercase hex.
pub fn transaction_id(unsigned: &[u8]) -> String {
    UInt256::sha256d(unsigned).to_string()
}
