//! JSON-RPC client for submitting transactions and querying their status.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use neo_transaction::SignedTransaction;

use crate::error::RpcError;
use crate::types::{
    AccountState, ApplicationLog, RawTransaction, RpcConfig, RpcRequest, RpcResponse, Vout,
};

/// HTTP client for a NEO node's JSON-RPC interface.
///
/// Every call is a single POST; there is no retry and no node selection.
#[derive(Debug)]
pub struct RpcClient {
    /// Client configuration.
    config: RpcConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Next JSON-RPC request id.
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client for `config.endpoint` with its request timeout.
    ///
    /// # Returns
    /// The client, or `HttpError` if the HTTP stack cannot be initialised.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client, next_id: AtomicU64::new(1) })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Issue one JSON-RPC call and decode its result.
    ///
    /// A JSON-RPC `error` member becomes [`RpcError::Rpc`]; a missing
    /// result decodes as JSON `null`.
    ///
    /// # Arguments
    /// * `method` - RPC method name.
    /// * `params` - Positional parameters as a JSON array.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(endpoint = %self.config.endpoint, method, id, "rpc call");

        let request = RpcRequest { jsonrpc: "2.0", method, params, id };
        let body = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?
            .text()
            .await?;

        let response: RpcResponse = serde_json::from_str(&body)?;
        if let Some(err) = response.error {
            tracing::warn!(method, id, code = err.code, message = %err.message, "rpc error");
            return Err(RpcError::Rpc { code: err.code, message: err.message });
        }
        Ok(serde_json::from_value(response.result.unwrap_or(Value::Null))?)
    }

    /// Submit a hex-encoded signed transaction.
    ///
    /// # Returns
    /// Whether the node accepted it into its mempool.
    pub async fn send_raw_transaction(&self, raw_hex: &str) -> Result<bool, RpcError> {
        self.call("sendrawtransaction", json!([raw_hex])).await
    }

    /// Submit `tx` and return its txid.
    ///
    /// # Returns
    /// The txid to track, or [`RpcError::Rejected`] if the node answered
    /// `false`.
    pub async fn broadcast(&self, tx: &SignedTransaction) -> Result<String, RpcError> {
        let txid = tx.txid_hex();
        if self.send_raw_transaction(&tx.to_hex()).await? {
            tracing::debug!(%txid, "transaction accepted");
            Ok(txid)
        } else {
            tracing::warn!(%txid, "transaction rejected");
            Err(RpcError::Rejected(txid))
        }
    }

    /// Fetch a transaction in verbose (decoded) form.
    pub async fn get_raw_transaction(&self, txid: &str) -> Result<RawTransaction, RpcError> {
        self.call("getrawtransaction", json!([txid, 1])).await
    }

    /// Fetch a transaction's serialized hex.
    pub async fn get_raw_transaction_hex(&self, txid: &str) -> Result<String, RpcError> {
        self.call("getrawtransaction", json!([txid, 0])).await
    }

    /// Current block height plus one.
    pub async fn get_block_count(&self) -> Result<u64, RpcError> {
        self.call("getblockcount", json!([])).await
    }

    /// Balances and votes of an address.
    pub async fn get_account_state(&self, address: &str) -> Result<AccountState, RpcError> {
        self.call("getaccountstate", json!([address])).await
    }

    /// An output of a transaction.
    ///
    /// # Returns
    /// `None` once the output has been spent.
    pub async fn get_tx_out(&self, txid: &str, index: u16) -> Result<Option<Vout>, RpcError> {
        self.call("gettxout", json!([txid, index])).await
    }

    /// Execution log of a transaction, when the node runs the log plugin.
    pub async fn get_application_log(&self, txid: &str) -> Result<ApplicationLog, RpcError> {
        self.call("getapplicationlog", json!([txid])).await
    }
}
