//! Chain-native (Substrate) RPC checks.
//!
//! The node serves the `chain_*`, `state_*` and `system_*` namespaces on the same JSON-RPC
//! endpoint as the `eth_*` one, so the same transport carries both.

use crate::errors::{Result, ToolkitError};
use crate::poll::{Poller, DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::storage::{
    balance_freezes_key, balance_locks_key, foreign_asset_counter_key, last_runtime_upgrade_key,
    system_account_key, AccountInfo, BalanceFreeze, BalanceLock, LastRuntimeUpgrade,
};
use alloy::primitives::{Address, BlockHash, Bytes, TxHash, B256, U64};
use alloy::providers::Provider;
use alloy::transports::TransportError;
use codec::Decode;
use serde::Deserialize;
use std::time::Duration;

/// Block header as returned by `chain_getHeader`. Digest logs are not needed and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstrateHeader {
    pub parent_hash: B256,
    pub number: U64,
    pub state_root: B256,
    pub extrinsics_root: B256,
}

impl SubstrateHeader {
    pub fn block_number(&self) -> u64 {
        self.number.to::<u64>()
    }
}

/// Runtime version reported by `state_getRuntimeVersion`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub impl_name: String,
    pub authoring_version: u32,
    pub spec_version: u32,
    pub impl_version: u32,
    pub transaction_version: u32,
}

pub struct SubstrateChain<P> {
    provider: P,
    max_attempts: u32,
    delay: Duration,
}

impl<P: Provider> SubstrateChain<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_polling(mut self, max_attempts: u32, delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.delay = delay;
        self
    }

    /// `system_chain`
    pub async fn system_chain(&self) -> Result<String> {
        let chain = self
            .provider
            .raw_request::<_, String>("system_chain".into(), ())
            .await?;
        Ok(chain)
    }

    /// Hash of the latest finalized block (`chain_getFinalizedHead`).
    pub async fn finalized_head(&self) -> Result<BlockHash> {
        let hash = self
            .provider
            .raw_request::<_, BlockHash>("chain_getFinalizedHead".into(), ())
            .await?;
        Ok(hash)
    }

    /// Header of block `hash`, `None` when the node does not know it.
    pub async fn header(&self, hash: BlockHash) -> Result<Option<SubstrateHeader>> {
        let header = self
            .provider
            .raw_request::<_, Option<SubstrateHeader>>("chain_getHeader".into(), (hash,))
            .await?;
        Ok(header)
    }

    /// Header of the best block.
    pub async fn latest_header(&self) -> Result<SubstrateHeader> {
        let header = self
            .provider
            .raw_request::<_, SubstrateHeader>("chain_getHeader".into(), ())
            .await?;
        Ok(header)
    }

    /// Number of the latest finalized block, retried while the head or its header is
    /// unavailable.
    pub async fn finalized_block_number(&self) -> Result<u64> {
        let provider = &self.provider;
        let header = Poller::<TransportError>::new("finalized block header")
            .max_attempts(self.max_attempts)
            .delay(self.delay)
            .poll(move || async move {
                let hash = provider
                    .raw_request::<_, BlockHash>("chain_getFinalizedHead".into(), ())
                    .await?;
                provider
                    .raw_request::<_, Option<SubstrateHeader>>("chain_getHeader".into(), (hash,))
                    .await
            })
            .await?;

        log::info!("finalized block number: {}", header.block_number());
        Ok(header.block_number())
    }

    /// Block number of `tx_hash`, looked up through `eth_getTransactionReceipt`.
    pub async fn transaction_block_number(&self, tx_hash: TxHash) -> Result<u64> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or(ToolkitError::MissingReceipt(tx_hash))?;
        receipt.block_number.ok_or(ToolkitError::NotMined(tx_hash))
    }

    pub async fn runtime_version(&self) -> Result<RuntimeVersion> {
        let version = self
            .provider
            .raw_request::<_, RuntimeVersion>("state_getRuntimeVersion".into(), ())
            .await?;
        Ok(version)
    }

    /// Raw value at `key` in the best block's state, `None` for an empty entry.
    pub async fn storage(&self, key: &Bytes) -> Result<Option<Bytes>> {
        let value = self
            .provider
            .raw_request::<_, Option<Bytes>>("state_getStorage".into(), (key.clone(),))
            .await?;
        Ok(value)
    }

    async fn decode_storage<T: Decode>(&self, key: Bytes) -> Result<Option<T>> {
        let Some(raw) = self.storage(&key).await? else {
            return Ok(None);
        };
        T::decode(&mut &raw[..])
            .map(Some)
            .map_err(|source| ToolkitError::StorageDecode { key, source })
    }

    /// Nonce and balances of `address`. An account the chain has never seen reads as zero.
    pub async fn account_info(&self, address: Address) -> Result<AccountInfo> {
        let info = self.decode_storage(system_account_key(address)).await?;
        Ok(info.unwrap_or_default())
    }

    pub async fn balance_locks(&self, address: Address) -> Result<Vec<BalanceLock>> {
        let locks = self.decode_storage(balance_locks_key(address)).await?;
        Ok(locks.unwrap_or_default())
    }

    pub async fn balance_freezes(&self, address: Address) -> Result<Vec<BalanceFreeze>> {
        let freezes = self.decode_storage(balance_freezes_key(address)).await?;
        Ok(freezes.unwrap_or_default())
    }

    /// Spec version and name recorded by the last runtime upgrade.
    pub async fn last_runtime_upgrade(&self) -> Result<Option<LastRuntimeUpgrade>> {
        self.decode_storage(last_runtime_upgrade_key()).await
    }

    /// Number of foreign assets registered as XC-20s.
    pub async fn foreign_asset_count(&self) -> Result<u32> {
        let count: Option<u32> = self.decode_storage(foreign_asset_counter_key()).await?;
        log::debug!("registered foreign assets: {count:?}");
        Ok(count.unwrap_or_default())
    }
}
