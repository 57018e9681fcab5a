/// NEO address handling.
///
/// An address is the Base58Check encoding of `0x17 || script_hash`, where
/// the script hash is the Hash160 of an account's verification script.
/// Parsing validates the checksum, length and version byte.

use std::fmt;
use std::str::FromStr;

use neo_primitives::base58;
use neo_primitives::ec::PublicKey;
use neo_primitives::UInt160;

use crate::{Script, ScriptError};

/// NEO 2 address version byte. Every valid address starts with `A`.
pub const ADDRESS_VERSION: u8 = 0x17;

/// Decoded length: version byte + 20-byte script hash + 4-byte checksum.
const DECODED_LEN: usize = 25;

/// A NEO address.
///
/// Holds the 20-byte script hash it locates and the Base58Check string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// Hash160 of the verification script, in storage order.
    pub script_hash: UInt160,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// # Arguments
    /// * `addr` - The address string, e.g. `AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y`.
    ///
    /// # Returns
    /// An `Address`, or [`ScriptError::InvalidAddress`] for bad characters,
    /// a bad checksum, a decoded length other than 25 bytes, or a version
    /// byte other than `0x17`.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = base58::decode(addr)
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;
        if decoded.len() != DECODED_LEN {
            return Err(ScriptError::InvalidAddress(format!(
                "invalid decoded length {} for '{}'",
                decoded.len(),
                addr
            )));
        }

        let payload = base58::check_decode(addr)
            .map_err(|_| ScriptError::InvalidAddress(format!("checksum failed for '{}'", addr)))?;

        if payload[0] != ADDRESS_VERSION {
            return Err(ScriptError::InvalidAddress(format!(
                "unsupported version 0x{:02x} for '{}'",
                payload[0], addr
            )));
        }

        let script_hash = UInt160::from_bytes(&payload[1..])?;
        Ok(Address {
            address_string: addr.to_string(),
            script_hash,
        })
    }

    /// Create an address from a script hash.
    pub fn from_script_hash(script_hash: UInt160) -> Self {
        let mut payload = Vec::with_capacity(21);
        payload.push(ADDRESS_VERSION);
        payload.extend_from_slice(script_hash.as_bytes());
        Address {
            address_string: base58::check_encode(&payload),
            script_hash,
        }
    }

    /// Create the address of a verification script.
    pub fn from_script(verification_script: &Script) -> Self {
        Self::from_script_hash(verification_script.script_hash())
    }

    /// Create the address of a public key's single-signature account.
    pub fn from_public_key(pub_key: &PublicKey) -> Self {
        Self::from_script(&Script::single_sig(pub_key))
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address_string)
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_string(&s).map_err(serde::de::Error::custom)
    }
}
