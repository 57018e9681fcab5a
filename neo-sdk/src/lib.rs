#![deny(missing_docs)]

//! NEO SDK - Complete SDK.
//!
//! Re-exports the NEO SDK components for convenient single-crate usage.
//!
//! # Example
//!
//! Build and sign a 3 NEO transfer, then hand the payload to a node:
//!
//! ```
//! use neo_sdk::primitives::ec::PrivateKey;
//! use neo_sdk::primitives::{Fixed8, UInt256};
//! use neo_sdk::transaction::{FeePolicy, NativeAsset, Unspent};
//!
//! let key = PrivateKey::from_hex(
//!     "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb",
//! )
//! .unwrap();
//! let unspent = vec![Unspent::new(
//!     UInt256::from_hex("4f1b8d2e0c7a5e3f6b9d1c0a2e4f6a8b0c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f").unwrap(),
//!     0,
//!     NativeAsset::NEO,
//!     Fixed8::from_int(10).unwrap(),
//! )];
//!
//! let native = NativeAsset::new(FeePolicy::new());
//! let signed = native
//!     .send_native_asset_raw_transaction(
//!         &key,
//!         &NativeAsset::NEO,
//!         Fixed8::from_int(3).unwrap(),
//!         "AVf4UGKevVrMR1j3UkPsuoYKSC4ocoAkKx",
//!         &unspent,
//!         &[],
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     signed.txid_hex(),
//!     "758ffbb79424c1dbe30d2574ed94cb59cff48650b79d67bd654908b088503e4e"
//! );
//! // `signed.to_hex()` goes to `neo_sdk::rpc::RpcClient::send_raw_transaction`.
//! ```

pub use neo_primitives as primitives;
pub use neo_rpc as rpc;
pub use neo_script as script;
pub use neo_transaction as transaction;
