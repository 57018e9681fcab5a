//! Transaction attributes.
//!
//! An attribute is a usage byte followed by a payload whose wire shape is
//! fixed by the usage: a fixed-length blob, a one-byte length prefix, or a
//! var-int length prefix.
//!
//! # Usage table
//!
//! | Usage             | Byte        | Payload                       |
//! |-------------------|-------------|-------------------------------|
//! | ContractHash      | 0x00        | 32 bytes                      |
//! | ECDH02 / ECDH03   | 0x02 / 0x03 | 32 bytes                      |
//! | Script            | 0x20        | 20 bytes                      |
//! | Vote              | 0x30        | 32 bytes                      |
//! | DescriptionUrl    | 0x81        | 1-byte length, up to 255      |
//! | Description       | 0x90        | var-int length                |
//! | Hash1..Hash15     | 0xa1..0xaf  | 32 bytes                      |
//! | Remark..Remark15  | 0xf0..0xff  | var-int length                |

use std::fmt;

use serde::{Deserialize, Serialize};

use neo_primitives::util::{BinaryReader, BinaryWriter};

use crate::TransactionError;

/// Most attributes a transaction may carry.
pub const MAX_ATTRIBUTES: usize = 16;

/// Largest var-int-prefixed attribute payload.
pub const MAX_VARIABLE_PAYLOAD: usize = 65535;

/// Largest `DescriptionUrl` payload.
pub const MAX_DESCRIPTION_URL: usize = 255;

/// What an attribute's payload means, and therefore how it is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeUsage {
    /// `0x00`, a 32-byte contract hash.
    ContractHash,
    /// `0x02`, a 32-byte ECDH key with even Y.
    Ecdh02,
    /// `0x03`, a 32-byte ECDH key with odd Y.
    Ecdh03,
    /// `0x20`, a 20-byte script hash that must also witness the transaction.
    Script,
    /// `0x30`, a 32-byte vote.
    Vote,
    /// `0x81`, a URL of at most 255 bytes behind a one-byte length.
    DescriptionUrl,
    /// `0x90`, free text behind a var-int length.
    Description,
    /// `Hash1` through `Hash15`; the index must be 1..=15.
    Hash(u8),
    /// `Remark` (index 0) through `Remark15`; the index must be 0..=15.
    Remark(u8),
}

/// How a payload is laid out after the usage byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadShape {
    /// Exactly this many bytes, no prefix.
    Fixed(usize),
    /// One length byte, then the payload.
    ByteLength,
    /// Var-int length, then the payload.
    VarLength,
}

impl AttributeUsage {
    /// The general-purpose remark usage (`0xf0`).
    pub const REMARK: AttributeUsage = AttributeUsage::Remark(0);

    /// Decode a usage byte.
    ///
    /// # Returns
    /// The usage, or `None` for bytes with no defined meaning.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(AttributeUsage::ContractHash),
            0x02 => Some(AttributeUsage::Ecdh02),
            0x03 => Some(AttributeUsage::Ecdh03),
            0x20 => Some(AttributeUsage::Script),
            0x30 => Some(AttributeUsage::Vote),
            0x81 => Some(AttributeUsage::DescriptionUrl),
            0x90 => Some(AttributeUsage::Description),
            0xa1..=0xaf => Some(AttributeUsage::Hash(b - 0xa0)),
            0xf0..=0xff => Some(AttributeUsage::Remark(b - 0xf0)),
            _ => None,
        }
    }

    /// The usage byte.
    ///
    /// # Returns
    /// `InvalidAttribute` if a `Hash` or `Remark` index is out of range.
    pub fn to_byte(self) -> Result<u8, TransactionError> {
        match self {
            AttributeUsage::ContractHash => Ok(0x00),
            AttributeUsage::Ecdh02 => Ok(0x02),
            AttributeUsage::Ecdh03 => Ok(0x03),
            AttributeUsage::Script => Ok(0x20),
            AttributeUsage::Vote => Ok(0x30),
            AttributeUsage::DescriptionUrl => Ok(0x81),
            AttributeUsage::Description => Ok(0x90),
            AttributeUsage::Hash(n @ 1..=15) => Ok(0xa0 + n),
            AttributeUsage::Remark(n @ 0..=15) => Ok(0xf0 + n),
            other => Err(TransactionError::InvalidAttribute(format!(
                "no usage byte for {}",
                other
            ))),
        }
    }

    /// The payload shape this usage requires.
    pub fn shape(self) -> PayloadShape {
        match self {
            AttributeUsage::ContractHash
            | AttributeUsage::Ecdh02
            | AttributeUsage::Ecdh03
            | AttributeUsage::Vote
            | AttributeUsage::Hash(_) => PayloadShape::Fixed(32),
            AttributeUsage::Script => PayloadShape::Fixed(20),
            AttributeUsage::DescriptionUrl => PayloadShape::ByteLength,
            AttributeUsage::Description | AttributeUsage::Remark(_) => PayloadShape::VarLength,
        }
    }
}

impl fmt::Display for AttributeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeUsage::ContractHash => f.write_str("ContractHash"),
            AttributeUsage::Ecdh02 => f.write_str("ECDH02"),
            AttributeUsage::Ecdh03 => f.write_str("ECDH03"),
            AttributeUsage::Script => f.write_str("Script"),
            AttributeUsage::Vote => f.write_str("Vote"),
            AttributeUsage::DescriptionUrl => f.write_str("DescriptionUrl"),
            AttributeUsage::Description => f.write_str("Description"),
            AttributeUsage::Hash(n) => write!(f, "Hash{}", n),
            AttributeUsage::Remark(0) => f.write_str("Remark"),
            AttributeUsage::Remark(n) => write!(f, "Remark{}", n),
        }
    }
}

/// A validated (usage, payload) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAttribute", into = "RawAttribute")]
pub struct TransactionAttribute {
    usage: AttributeUsage,
    tag: u8,
    data: Vec<u8>,
}

impl TransactionAttribute {
    /// Pair `usage` with `data`, checking the payload against the usage's
    /// shape.
    ///
    /// # Returns
    /// The attribute, or `InvalidAttribute` if the length does not fit.
    pub fn new(usage: AttributeUsage, data: Vec<u8>) -> Result<Self, TransactionError> {
        let tag = usage.to_byte()?;
        let fits = match usage.shape() {
            PayloadShape::Fixed(len) => data.len() == len,
            PayloadShape::ByteLength => data.len() <= MAX_DESCRIPTION_URL,
            PayloadShape::VarLength => data.len() <= MAX_VARIABLE_PAYLOAD,
        };
        if !fits {
            return Err(TransactionError::InvalidAttribute(format!(
                "{} payload of {} bytes does not match {:?}",
                usage,
                data.len(),
                usage.shape()
            )));
        }
        Ok(TransactionAttribute { usage, tag, data })
    }

    /// Shorthand for a `Remark` attribute.
    pub fn remark(text: &str) -> Result<Self, TransactionError> {
        Self::new(AttributeUsage::REMARK, text.as_bytes().to_vec())
    }

    pub fn usage(&self) -> AttributeUsage {
        self.usage
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Append the usage byte and the shaped payload.
    pub fn write_to(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.tag);
        match self.usage.shape() {
            PayloadShape::Fixed(_) => writer.write_bytes(&self.data),
            PayloadShape::ByteLength => {
                writer.write_u8(self.data.len() as u8);
                writer.write_bytes(&self.data);
            }
            PayloadShape::VarLength => writer.write_var_bytes(&self.data),
        }
    }

    /// Read an attribute written by [`TransactionAttribute::write_to`].
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self, TransactionError> {
        let byte = reader.read_u8()?;
        let usage = AttributeUsage::from_byte(byte).ok_or_else(|| {
            TransactionError::SerializationError(format!("unknown attribute usage 0x{:02x}", byte))
        })?;
        let data = match usage.shape() {
            PayloadShape::Fixed(len) => reader.read_bytes(len)?,
            PayloadShape::ByteLength => {
                let len = reader.read_u8()? as usize;
                reader.read_bytes(len)?
            }
            PayloadShape::VarLength => reader.read_var_bytes(MAX_VARIABLE_PAYLOAD as u64)?,
        };
        Ok(TransactionAttribute { usage, tag: byte, data: data.to_vec() })
    }
}

/// Encode caller-supplied attributes in the order given.
///
/// # Arguments
/// * `attributes` - Ordered (usage, payload) pairs.
///
/// # Returns
/// The validated attributes, or `InvalidAttribute` on the first payload
/// that does not fit its usage or if there are more than 16.
pub fn encode_attributes(
    attributes: &[(AttributeUsage, Vec<u8>)],
) -> Result<Vec<TransactionAttribute>, TransactionError> {
    if attributes.len() > MAX_ATTRIBUTES {
        return Err(TransactionError::InvalidAttribute(format!(
            "{} attributes exceeds the limit of {}",
            attributes.len(),
            MAX_ATTRIBUTES
        )));
    }
    attributes
        .iter()
        .map(|(usage, data)| TransactionAttribute::new(*usage, data.clone()))
        .collect()
}

/// JSON form: `{"usage": 240, "data": "<hex>"}`.
#[derive(Serialize, Deserialize)]
struct RawAttribute {
    usage: u8,
    data: String,
}

impl TryFrom<RawAttribute> for TransactionAttribute {
    type Error = TransactionError;

    fn try_from(raw: RawAttribute) -> Result<Self, Self::Error> {
        let usage = AttributeUsage::from_byte(raw.usage).ok_or_else(|| {
            TransactionError::InvalidAttribute(format!("unknown usage 0x{:02x}", raw.usage))
        })?;
        let data = hex::decode(&raw.data)
            .map_err(|e| TransactionError::InvalidAttribute(e.to_string()))?;
        TransactionAttribute::new(usage, data)
    }
}

impl From<TransactionAttribute> for RawAttribute {
    fn from(attr: TransactionAttribute) -> Self {
        RawAttribute {
            usage: attr.tag,
            data: hex::encode(attr.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(attr: &TransactionAttribute) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        attr.write_to(&mut writer);
        writer.into_bytes()
    }

    #[test]
    fn test_usage_byte_table() {
        for b in 0u8..=255 {
            if let Some(usage) = AttributeUsage::from_byte(b) {
                assert_eq!(usage.to_byte().unwrap(), b, "usage {}", usage);
            }
        }
        assert_eq!(AttributeUsage::from_byte(0x01), None);
        assert_eq!(AttributeUsage::from_byte(0xa0), None);
        assert_eq!(AttributeUsage::from_byte(0xa5), Some(AttributeUsage::Hash(5)));
        assert_eq!(AttributeUsage::from_byte(0xff), Some(AttributeUsage::Remark(15)));
        assert!(AttributeUsage::Hash(0).to_byte().is_err());
        assert!(AttributeUsage::Remark(16).to_byte().is_err());
    }

    #[test]
    fn test_remark_encoding() {
        let attr = TransactionAttribute::remark("hello").unwrap();
        assert_eq!(hex::encode(encode(&attr)), "f00568656c6c6f");
    }

    #[test]
    fn test_fixed_encoding_has_no_prefix() {
        let attr = TransactionAttribute::new(AttributeUsage::Script, vec![0x11; 20]).unwrap();
        let bytes = encode(&attr);
        assert_eq!(bytes.len(), 21);
        assert_eq!(bytes[0], 0x20);
    }

    #[test]
    fn test_description_url_byte_prefix() {
        let attr =
            TransactionAttribute::new(AttributeUsage::DescriptionUrl, b"https://neo.org".to_vec())
                .unwrap();
        let bytes = encode(&attr);
        assert_eq!(bytes[0], 0x81);
        assert_eq!(bytes[1], 15);
        assert_eq!(&bytes[2..], b"https://neo.org");
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        assert!(matches!(
            TransactionAttribute::new(AttributeUsage::Script, vec![0u8; 32]),
            Err(TransactionError::InvalidAttribute(_))
        ));
        assert!(TransactionAttribute::new(AttributeUsage::Hash(1), vec![0u8; 31]).is_err());
        assert!(TransactionAttribute::new(AttributeUsage::DescriptionUrl, vec![0u8; 256]).is_err());
        assert!(TransactionAttribute::new(AttributeUsage::REMARK, vec![0u8; 65536]).is_err());
        assert!(TransactionAttribute::new(AttributeUsage::REMARK, vec![0u8; 65535]).is_ok());
    }

    #[test]
    fn test_encode_attributes_keeps_order() {
        let attrs = encode_attributes(&[
            (AttributeUsage::Remark(2), b"b".to_vec()),
            (AttributeUsage::REMARK, b"a".to_vec()),
        ])
        .unwrap();
        assert_eq!(attrs[0].usage(), AttributeUsage::Remark(2));
        assert_eq!(attrs[1].usage(), AttributeUsage::REMARK);
    }

    #[test]
    fn test_encode_attributes_limit() {
        let many: Vec<_> = (0..17).map(|_| (AttributeUsage::REMARK, vec![1u8])).collect();
        assert!(matches!(
            encode_attributes(&many),
            Err(TransactionError::InvalidAttribute(_))
        ));
        assert!(encode_attributes(&many[..16]).is_ok());
    }

    #[test]
    fn test_read_back() {
        let attr = TransactionAttribute::new(AttributeUsage::Vote, vec![7u8; 32]).unwrap();
        let bytes = encode(&attr);
        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(TransactionAttribute::read_from(&mut reader).unwrap(), attr);

        let mut unknown = BinaryReader::new(&[0x01, 0x00]);
        assert!(matches!(
            TransactionAttribute::read_from(&mut unknown),
            Err(TransactionError::SerializationError(_))
        ));
    }

    #[test]
    fn test_json_form() {
        let attr = TransactionAttribute::remark("hi").unwrap();
        let json = serde_json::to_string(&attr).unwrap();
        assert_eq!(json, r#"{"usage":240,"data":"6869"}"#);
        let back: TransactionAttribute = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attr);
        assert!(serde_json::from_str::<TransactionAttribute>(r#"{"usage":32,"data":"00"}"#).is_err());
    }
}
