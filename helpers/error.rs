use alloy::primitives::TxHash;

/// Errors raised by the deployment helpers and the procedures built on them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("No network configuration for chain id {0}")]
    UnknownChain(u64),

    #[error("Network {name} (chain {chain_id}) has no {field} configured")]
    IncompleteNetwork {
        name: String,
        chain_id: u64,
        field: &'static str,
    },

    #[error("No deployment named {name} on network {network}")]
    DeploymentNotFound { name: String, network: String },

    #[error("Artifact error for {contract}: {reason}")]
    Artifact { contract: String, reason: String },

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Receipt for {tx} has no {what}")]
    MissingReceiptData { tx: TxHash, what: &'static str },

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] alloy::transports::TransportError),

    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),

    #[error(transparent)]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    #[error(transparent)]
    Signer(#[from] alloy::signers::local::LocalSignerError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
