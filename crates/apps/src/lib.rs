use alloy::primitives::{BlockHash, TxHash};
use alloy::providers::Provider;
use anyhow::Context;
use clap::Args;
use docs_toolkit::config::{DEV_CHAIN_ID, DEFAULT_DEV_HTTP_RPC_URL};
use docs_toolkit::{EthFinality, NetworkConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Connection settings shared by the binaries.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Ethereum JSON-RPC endpoint URL
    #[arg(long, env = "HTTP_RPC_ENDPOINT", default_value = DEFAULT_DEV_HTTP_RPC_URL)]
    pub rpc_url: Url,

    /// Endpoint for chain-native RPC calls, defaults to the Ethereum one
    #[arg(long, env = "WSS_RPC_ENDPOINT")]
    pub ws_rpc_url: Option<Url>,

    /// Expected chain id of the node
    #[arg(long, env = "CHAIN_ID", default_value_t = DEV_CHAIN_ID)]
    pub chain_id: u64,

    /// Network name used in logs
    #[arg(long, default_value = "moonbeam-development")]
    pub network_name: String,
}

impl NetworkArgs {
    pub fn network_config(&self) -> NetworkConfig {
        let config = NetworkConfig::new(&self.network_name, self.chain_id, self.rpc_url.clone());
        match &self.ws_rpc_url {
            Some(ws_rpc_url) => config.with_ws_rpc_url(ws_rpc_url.clone()),
            None => config,
        }
    }
}

/// Retry settings for lookups that wait on the node.
#[derive(Args, Debug)]
pub struct PollArgs {
    /// Attempts before giving up on a block or finalized head lookup
    #[arg(long, env = "POLL_MAX_ATTEMPTS", default_value_t = 30)]
    pub max_attempts: u32,

    /// Delay between two attempts, in milliseconds
    #[arg(long, env = "POLL_DELAY_MS", default_value_t = 2000)]
    pub delay_ms: u64,
}

impl PollArgs {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Answers of the node's own finality RPCs for a transaction and its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFinality {
    pub tx_finalized: bool,
    pub block_finalized: bool,
}

pub async fn node_finality<P: Provider>(
    finality: &EthFinality<P>,
    tx_hash: TxHash,
    block_hash: BlockHash,
) -> anyhow::Result<NodeFinality> {
    let tx_finalized = finality
        .is_tx_finalized(tx_hash)
        .await
        .context("moon_isTxFinalized failed")?;
    let block_finalized = finality
        .is_block_finalized(block_hash)
        .await
        .context("moon_isBlockFinalized failed")?;

    Ok(NodeFinality {
        tx_finalized,
        block_finalized,
    })
}

pub fn logging_init() {
    // Initialize tracing. In order to view logs, run `RUST_LOG=info cargo run`
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}
