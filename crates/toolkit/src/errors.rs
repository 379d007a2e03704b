use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError;

/// Failure of a [`Poller`](crate::poll::Poller) run.
#[derive(Debug, thiserror::Error)]
pub enum PollError<E> {
    /// Every attempt came back empty (or failed, with the last one empty).
    #[error("{target} not available after {attempts} attempts")]
    Timeout { target: String, attempts: u32 },

    /// The probe failed on the final attempt, or with an error that is not retried.
    #[error("{target} probe failed after {attempts} attempts: {source}")]
    Probe {
        target: String,
        attempts: u32,
        #[source]
        source: E,
    },
}

impl<E> PollError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Number of probe invocations made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Timeout { attempts, .. } | Self::Probe { attempts, .. } => *attempts,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Timeout { target, .. } | Self::Probe { target, .. } => target,
        }
    }

    pub fn probe_error(&self) -> Option<&E> {
        match self {
            Self::Timeout { .. } => None,
            Self::Probe { source, .. } => Some(source),
        }
    }
}

/// Invalid or missing network / account configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(String),

    #[error("invalid URL in {var}: {source}")]
    InvalidUrl {
        var: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address {0}")]
    InvalidAddress(String),

    #[error("private key belongs to {actual}, expected {expected}")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("failed to derive account from mnemonic: {0}")]
    Mnemonic(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("RPC request failed: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Poll(#[from] PollError<TransportError>),

    #[error("failed to wait for transaction: {0}")]
    PendingTransaction(#[from] PendingTransactionError),

    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("connected to chain {actual}, expected chain {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error("transaction receipt not found for hash: {0}")]
    MissingReceipt(TxHash),

    #[error("transaction {0} has no block assigned yet")]
    NotMined(TxHash),

    #[error("transaction {0} reverted")]
    Reverted(TxHash),

    #[error("failed to decode storage value at {key}: {source}")]
    StorageDecode {
        key: Bytes,
        #[source]
        source: codec::Error,
    },

    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

pub type Result<T, E = ToolkitError> = std::result::Result<T, E>;
