//! secp256r1 private key with NEO-specific functionality.
//!
//! Wraps the p256 signing key and adds WIF encoding and message signing.

use std::fmt;

use p256::ecdsa::signature::Signer;
use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// WIF prefix byte.
const WIF_PREFIX: u8 = 0x80;

/// Compression flag byte appended to WIF. NEO only uses compressed keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256r1 private key for signing transactions.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey { inner: SigningKey::random(&mut OsRng) }
    }

    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256r1,
    /// or an error if the scalar is zero, out of range, or the wrong length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// The decoded payload must be `0x80 || key(32) || 0x01`.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the WIF is malformed or
    /// the checksum fails.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(wif).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => e,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?;

        if payload.len() != 1 + PRIVATE_KEY_BYTES_LEN + 1 {
            return Err(PrimitivesError::InvalidWif(format!(
                "malformed private key: invalid length {}",
                payload.len()
            )));
        }
        if payload[0] != WIF_PREFIX {
            return Err(PrimitivesError::InvalidWif(format!(
                "unexpected prefix byte 0x{:02x}",
                payload[0]
            )));
        }
        if payload[1 + PRIVATE_KEY_BYTES_LEN] != COMPRESS_MAGIC {
            return Err(PrimitivesError::InvalidWif(
                "malformed private key: invalid compression flag".to_string(),
            ));
        }

        Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])
    }

    /// Encode the private key as a compressed WIF string.
    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1);
        payload.push(WIF_PREFIX);
        payload.extend_from_slice(&self.to_bytes());
        payload.push(COMPRESS_MAGIC);
        base58::check_encode(&payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(*self.inner.verifying_key())
    }

    /// Sign a message with ECDSA over SHA-256(message).
    ///
    /// The message is hashed internally; pass the raw bytes to be
    /// authorized (for a transaction, its unsigned serialization). Nonces
    /// are derived per RFC6979, so the output is deterministic.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the signing primitive fails.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, PrimitivesError> {
        let sig: p256::ecdsa::Signature = self
            .inner
            .try_sign(message)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Signature::from_bytes(&sig.to_bytes())
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Shows the public key only; the scalar never reaches logs.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}
