//! Native asset identifiers.
//!
//! The constants hold the storage (little-endian) bytes; `Display` renders
//! the familiar big-endian ids.

use neo_primitives::UInt256;

/// NEO, displayed as `c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b`.
pub const NEO_ASSET_ID: UInt256 = UInt256::new([
    0x9b, 0x7c, 0xff, 0xda, 0xa6, 0x74, 0xbe, 0xae, 0x0f, 0x93, 0x0e, 0xbe, 0x60, 0x85, 0xaf,
    0x90, 0x93, 0xe5, 0xfe, 0x56, 0xb3, 0x4a, 0x5c, 0x22, 0x0c, 0xcd, 0xcf, 0x6e, 0xfc, 0x33,
    0x6f, 0xc5,
]);

/// GAS, displayed as `602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7`.
pub const GAS_ASSET_ID: UInt256 = UInt256::new([
    0xe7, 0x2d, 0x28, 0x69, 0x79, 0xee, 0x6c, 0xb1, 0xb7, 0xe6, 0x5d, 0xfd, 0xdf, 0xb2, 0xe3,
    0x84, 0x10, 0x0b, 0x8d, 0x14, 0x8e, 0x77, 0x58, 0xde, 0x42, 0xe4, 0x16, 0x8b, 0x71, 0x79,
    0x2c, 0x60,
]);
