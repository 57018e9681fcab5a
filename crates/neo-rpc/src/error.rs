//! Error types for JSON-RPC operations.

/// Errors that can occur when talking to a NEO node.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// HTTP request failed or timed out.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Node-supplied message.
        message: String,
    },

    /// `sendrawtransaction` returned `false`.
    #[error("transaction {0} rejected by node")]
    Rejected(String),
}
