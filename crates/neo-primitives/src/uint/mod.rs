//! Fixed-size hash identifiers: `UInt256` and `UInt160`.
//!
//! NEO stores hash-like identifiers (transaction ids, asset ids, script
//! hashes) in little-endian byte order, while explorers, RPC nodes and
//! asset registries display them as big-endian hex. The byte reversal lives
//! in exactly one place, [`storage_to_display_hex`] and
//! [`display_hex_to_storage`], and both identifier types go through it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Size of a `UInt256` in bytes.
pub const UINT256_SIZE: usize = 32;

/// Size of a `UInt160` in bytes.
pub const UINT160_SIZE: usize = 20;

/// Render storage-order bytes as display-order (byte-reversed) lowercase hex.
///
/// # Arguments
/// * `bytes` - Bytes in wire/storage (little-endian) order.
///
/// # Returns
/// The reversed bytes as a lowercase hex string.
pub fn storage_to_display_hex(bytes: &[u8]) -> String {
    let mut reversed = bytes.to_vec();
    reversed.reverse();
    hex::encode(reversed)
}

/// Parse display-order hex into storage-order bytes of a fixed width.
///
/// An optional `0x` prefix is accepted. The hex must encode exactly `N`
/// bytes.
///
/// # Arguments
/// * `hex_str` - Big-endian display hex, e.g. an asset id.
///
/// # Returns
/// The decoded bytes reversed into storage order, or an error on bad hex
/// or wrong length.
pub fn display_hex_to_storage<const N: usize>(hex_str: &str) -> Result<[u8; N], PrimitivesError> {
    let trimmed = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);
    if trimmed.len() != N * 2 {
        return Err(PrimitivesError::InvalidHash(format!(
            "invalid hash string length of {}, want {}",
            trimmed.len(),
            N * 2
        )));
    }
    let decoded = hex::decode(trimmed)?;
    let mut out = [0u8; N];
    for (dst, src) in out.iter_mut().zip(decoded.iter().rev()) {
        *dst = *src;
    }
    Ok(out)
}

macro_rules! define_uint {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name([u8; $size]);

        impl $name {
            /// Create from bytes already in storage (little-endian) order.
            pub const fn new(bytes: [u8; $size]) -> Self {
                $name(bytes)
            }

            /// Create from a storage-order byte slice of exactly the right length.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
                if bytes.len() != $size {
                    return Err(PrimitivesError::InvalidHash(format!(
                        "invalid hash length of {}, want {}",
                        bytes.len(),
                        $size
                    )));
                }
                let mut arr = [0u8; $size];
                arr.copy_from_slice(bytes);
                Ok($name(arr))
            }

            /// Parse from display-order (big-endian) hex, `0x` prefix optional.
            pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
                display_hex_to_storage::<$size>(hex_str).map($name)
            }

            /// The bytes in storage order, as written on the wire.
            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            /// Whether every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        /// Display as byte-reversed hex.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&storage_to_display_hex(&self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = PrimitivesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::from_hex(s)
            }
        }

        /// Ordered as a little-endian integer: the last stored byte is the
        /// most significant.
        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.iter().rev().cmp(other.0.iter().rev())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_uint!(
    /// A 32-byte identifier: transaction ids and native asset ids.
    UInt256,
    UINT256_SIZE
);

define_uint!(
    /// A 20-byte script hash: the recipient locator of an output.
    UInt160,
    UINT160_SIZE
);

impl UInt256 {
    /// Double SHA-256 of `data`, kept in digest (storage) order.
    ///
    /// A transaction id is this value over the unsigned transaction bytes;
    /// its `Display` form is the canonical reversed hex.
    pub fn sha256d(data: &[u8]) -> Self {
        UInt256(sha256d(data))
    }
}
