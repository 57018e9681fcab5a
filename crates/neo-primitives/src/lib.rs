/// NEO SDK - Cryptographic primitives, hashing, and binary encoding.
///
/// This crate provides the foundational building blocks for the NEO SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - `UInt256` / `UInt160` identifiers with reversed display hex
/// - `Fixed8` fixed-point asset values
/// - Variable-length integer encoding and a binary reader/writer
/// - Base58 and Base58Check encoding
/// - Elliptic curve keys and ECDSA signatures on secp256r1

pub mod hash;
pub mod uint;
pub mod fixed8;
pub mod util;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
pub use fixed8::Fixed8;
pub use uint::{UInt160, UInt256};
