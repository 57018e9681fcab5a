//! Transaction output: an asset amount locked to a script hash.

use serde::{Deserialize, Serialize};

use neo_primitives::util::{BinaryReader, BinaryWriter};
use neo_primitives::{Fixed8, UInt160, UInt256};

use crate::TransactionError;

/// Encoded size of one output.
pub const OUTPUT_SIZE: usize = 60;

/// A single output in a contract transaction.
///
/// # Wire format
///
/// | Field       | Size                     |
/// |-------------|--------------------------|
/// | asset_id    | 32 bytes (storage order) |
/// | value       | 8 bytes (LE, Fixed8)     |
/// | script_hash | 20 bytes                 |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// The native asset being transferred.
    #[serde(rename = "asset")]
    pub asset_id: UInt256,

    /// Amount in minor units. Always positive.
    pub value: Fixed8,

    /// Hash of the verification script that may spend this output.
    #[serde(rename = "scripthash")]
    pub script_hash: UInt160,
}

impl TransactionOutput {
    /// Create an output, rejecting non-positive values.
    ///
    /// # Returns
    /// The output, or `InvalidAmount` if `value <= 0`.
    pub fn new(asset_id: UInt256, value: Fixed8, script_hash: UInt160) -> Result<Self, TransactionError> {
        if !value.is_positive() {
            return Err(TransactionError::InvalidAmount(format!(
                "output value must be positive, got {}",
                value
            )));
        }
        Ok(TransactionOutput { asset_id, value, script_hash })
    }

    /// Deserialize a `TransactionOutput` from a `BinaryReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `SerializationError` if the
    /// data is truncated or the value is not positive.
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self, TransactionError> {
        let asset_id = UInt256::new(reader.read_array().map_err(|e| {
            TransactionError::SerializationError(format!("reading asset id: {}", e))
        })?);
        let units = reader.read_i64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading value: {}", e))
        })?;
        if units <= 0 {
            return Err(TransactionError::SerializationError(format!(
                "non-positive output value {}",
                units
            )));
        }
        let script_hash = UInt160::new(reader.read_array().map_err(|e| {
            TransactionError::SerializationError(format!("reading script hash: {}", e))
        })?);
        Ok(TransactionOutput {
            asset_id,
            value: Fixed8::from_units(units),
            script_hash,
        })
    }

    /// Serialize this output into a `BinaryWriter`.
    pub fn write_to(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.asset_id.as_bytes());
        writer.write_i64_le(self.value.units());
        writer.write_bytes(self.script_hash.as_bytes());
    }
}
