/// Elliptic curve cryptography on secp256r1 (NIST P-256).
///
/// Provides private keys, public keys and ECDSA signatures as used by NEO
/// verification scripts.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
