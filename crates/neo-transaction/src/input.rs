//! Transaction input referencing a previous output.
//!
//! An input names the transaction that created the output being spent and
//! the output's index within it. Authorization lives in the witness list,
//! not in the input.

use serde::{Deserialize, Serialize};

use neo_primitives::util::{BinaryReader, BinaryWriter};
use neo_primitives::UInt256;

use crate::TransactionError;

/// Encoded size of one input.
pub const INPUT_SIZE: usize = 34;

/// A reference to an unspent output.
///
/// # Wire format
///
/// | Field      | Size                    |
/// |------------|-------------------------|
/// | prev_hash  | 32 bytes (storage order)|
/// | prev_index | 2 bytes (LE)            |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Id of the transaction that created the output.
    #[serde(rename = "txid")]
    pub prev_hash: UInt256,

    /// Index of the output within that transaction.
    #[serde(rename = "vout")]
    pub prev_index: u16,
}

impl TransactionInput {
    /// Reference output `prev_index` of the transaction `prev_hash`.
    pub fn new(prev_hash: UInt256, prev_index: u16) -> Self {
        TransactionInput { prev_hash, prev_index }
    }

    /// Deserialize a `TransactionInput` from a `BinaryReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `SerializationError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self, TransactionError> {
        let prev_hash = UInt256::new(reader.read_array().map_err(|e| {
            TransactionError::SerializationError(format!("reading prev hash: {}", e))
        })?);
        let prev_index = reader.read_u16_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading prev index: {}", e))
        })?;
        Ok(TransactionInput { prev_hash, prev_index })
    }

    /// Serialize this input into a `BinaryWriter`.
    pub fn write_to(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.prev_hash.as_bytes());
        writer.write_u16_le(self.prev_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREV: &str = "4f1b8d2e0c7a5e3f6b9d1c0a2e4f6a8b0c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f";

    #[test]
    fn test_wire_layout() {
        let input = TransactionInput::new(UInt256::from_hex(PREV).unwrap(), 1);
        let mut writer = BinaryWriter::new();
        input.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), INPUT_SIZE);
        assert_eq!(
            hex::encode(&bytes),
            "5f4e3d2c1b0a9f8e7d6c5b4a3f2e1d0c8b6a4f2e0a1c9d6b3f5e7a0c2e8d1b4f0100"
        );

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(TransactionInput::read_from(&mut reader).unwrap(), input);
    }

    #[test]
    fn test_truncated() {
        let mut reader = BinaryReader::new(&[0u8; 33]);
        assert!(matches!(
            TransactionInput::read_from(&mut reader),
            Err(TransactionError::SerializationError(_))
        ));
    }
}
