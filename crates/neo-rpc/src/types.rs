//! Client configuration, the JSON-RPC envelope and node response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use neo_primitives::{Fixed8, UInt256};

/// Default timeout for a single request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for an [`RpcClient`](crate::RpcClient).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Node URL, e.g. `http://seed1.neo.org:10332`.
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:10332".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// JSON-RPC 2.0 request body.
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    pub id: u64,
}

/// Error member of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC 2.0 response body; exactly one of the members is expected.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// An input as reported by `getrawtransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vin {
    pub txid: UInt256,
    pub vout: u16,
}

/// An output as reported by `getrawtransaction` and `gettxout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vout {
    pub n: u16,
    pub asset: UInt256,
    pub value: Fixed8,
    pub address: String,
}

/// A witness as reported by `getrawtransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPair {
    pub invocation: String,
    pub verification: String,
}

/// Verbose `getrawtransaction` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub txid: UInt256,
    pub size: u64,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub version: u8,
    #[serde(default)]
    pub attributes: Vec<Value>,
    #[serde(default)]
    pub vin: Vec<Vin>,
    #[serde(default)]
    pub vout: Vec<Vout>,
    #[serde(default)]
    pub sys_fee: Option<Fixed8>,
    #[serde(default)]
    pub net_fee: Option<Fixed8>,
    #[serde(default)]
    pub scripts: Vec<ScriptPair>,
    /// Absent while the transaction is only in the mempool.
    #[serde(default)]
    pub blockhash: Option<UInt256>,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub blocktime: Option<u64>,
}

impl RawTransaction {
    /// Whether the node has seen the transaction in a block.
    pub fn is_confirmed(&self) -> bool {
        self.confirmations.unwrap_or(0) > 0
    }
}

/// One asset balance within an account state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: UInt256,
    pub value: Fixed8,
}

/// `getaccountstate` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub version: u8,
    pub script_hash: String,
    pub frozen: bool,
    #[serde(default)]
    pub votes: Vec<Value>,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

/// A notification emitted during execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub contract: String,
    pub state: Value,
}

/// One VM execution recorded in an application log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub trigger: String,
    #[serde(default)]
    pub contract: Option<String>,
    pub vmstate: String,
    pub gas_consumed: Fixed8,
    #[serde(default)]
    pub stack: Vec<Value>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// `getapplicationlog` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLog {
    pub txid: UInt256,
    #[serde(default)]
    pub executions: Vec<Execution>,
}
