//! # neo-rpc
//!
//! Thin JSON-RPC adapter for submitting signed NEO transactions and
//! querying their status.
//!
//! # Example
//!
//! ```no_run
//! use neo_rpc::{RpcClient, RpcConfig};
//!
//! let client = RpcClient::new(RpcConfig {
//!     endpoint: "http://seed1.neo.org:10332".to_string(),
//!     ..Default::default()
//! })
//! .unwrap();
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::RpcClient;
pub use error::RpcError;
pub use types::{AccountState, ApplicationLog, RawTransaction, RpcConfig, Vout};
