//! ECDSA signature in the fixed 64-byte `r || s` form used by NEO
//! invocation scripts.

use p256::ecdsa::signature::Verifier;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Serialized signature length: 32-byte R followed by 32-byte S.
pub const SIGNATURE_LEN: usize = 64;

/// An ECDSA signature with R and S components.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Parse a 64-byte `r || s` signature.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 64 bytes.
    ///
    /// # Returns
    /// `Ok(Signature)`, or an error if the length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize as 64 bytes `r || s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Sign `message` with `priv_key`. See [`PrivateKey::sign`].
    pub fn sign(message: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        priv_key.sign(message)
    }

    /// Verify this signature against a message and public key.
    ///
    /// The message is hashed with SHA-256 before verification, mirroring
    /// [`PrivateKey::sign`].
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise (including when
    /// R or S is zero or out of range).
    pub fn verify(&self, message: &[u8], pub_key: &PublicKey) -> bool {
        let sig = match p256::ecdsa::Signature::from_slice(&self.to_bytes()) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        pub_key.verifying_key().verify(message, &sig).is_ok()
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", hex::encode(self.to_bytes()))
    }
}
