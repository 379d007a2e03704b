//! Transaction finality checks over the Ethereum JSON-RPC surface.
//!
//! A freshly sent transaction sits in a block the node may not serve yet and that is not
//! finalized yet; an old one is covered by the finalized head. Both lookups go through the
//! [`Poller`] so a lagging node is retried instead of failing the check.

use crate::errors::{Result, ToolkitError};
use crate::poll::{Poller, DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::transfer::send_value;
use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, BlockHash, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::json_rpc::{RpcRecv, RpcSend};
use alloy::rpc::types::{Block, TransactionReceipt};
use alloy::transports::TransportError;
use std::borrow::Cow;
use std::time::Duration;

pub struct EthFinality<P> {
    provider: P,
    max_attempts: u32,
    delay: Duration,
}

impl<P: Provider> EthFinality<P> {
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

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn poller(&self, target: impl Into<String>) -> Poller<TransportError> {
        Poller::new(target)
            .max_attempts(self.max_attempts)
            .delay(self.delay)
    }

    /// Fetches block `number`, retrying while the node has not produced or synced it.
    pub async fn wait_for_block(&self, number: u64) -> Result<Block> {
        let provider = &self.provider;
        let block = self
            .poller(format!("block {number}"))
            .poll(move || async move {
                provider
                    .get_block_by_number(BlockNumberOrTag::Number(number))
                    .await
            })
            .await?;
        Ok(block)
    }

    /// Number of the most recently finalized block.
    pub async fn finalized_block_number(&self) -> Result<u64> {
        let provider = &self.provider;
        let block = self
            .poller("finalized block number")
            .poll(move || async move {
                provider
                    .get_block_by_number(BlockNumberOrTag::Finalized)
                    .await
            })
            .await?;

        log::info!("finalized block number: {}", block.header.number);
        Ok(block.header.number)
    }

    async fn mined_receipt(&self, tx_hash: TxHash) -> Result<(TransactionReceipt, u64)> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or(ToolkitError::MissingReceipt(tx_hash))?;
        let block_number = receipt.block_number.ok_or(ToolkitError::NotMined(tx_hash))?;

        // The receipt can show up before the block itself is served.
        self.wait_for_block(block_number).await?;
        Ok((receipt, block_number))
    }

    pub async fn transaction_block_number(&self, tx_hash: TxHash) -> Result<u64> {
        let (_, block_number) = self.mined_receipt(tx_hash).await?;
        Ok(block_number)
    }

    pub async fn transaction_block_hash(&self, tx_hash: TxHash) -> Result<BlockHash> {
        let (receipt, _) = self.mined_receipt(tx_hash).await?;
        receipt.block_hash.ok_or(ToolkitError::NotMined(tx_hash))
    }

    /// Whether the block holding `tx_hash` is at or below the finalized head.
    pub async fn is_transaction_finalized(&self, tx_hash: TxHash) -> Result<bool> {
        let finalized = self.finalized_block_number().await?;
        let tx_block = self.transaction_block_number(tx_hash).await?;
        Ok(finalized >= tx_block)
    }

    /// Issues a raw JSON-RPC request, retrying on failure. The error of the final attempt is
    /// returned to the caller.
    pub async fn custom_request<Params, Resp>(
        &self,
        method: impl Into<Cow<'static, str>>,
        params: Params,
    ) -> Result<Resp>
    where
        Params: RpcSend + Clone,
        Resp: RpcRecv,
    {
        let method = method.into();
        let provider = &self.provider;
        let response = self
            .poller(format!("{method} response"))
            .poll(move || {
                let method = method.clone();
                let params = params.clone();
                async move {
                    provider
                        .raw_request::<Params, Resp>(method, params)
                        .await
                        .map(Some)
                }
            })
            .await?;
        Ok(response)
    }

    /// `moon_isBlockFinalized`
    pub async fn is_block_finalized(&self, block_hash: BlockHash) -> Result<bool> {
        self.custom_request("moon_isBlockFinalized", (block_hash,))
            .await
    }

    /// `moon_isTxFinalized`
    pub async fn is_tx_finalized(&self, tx_hash: TxHash) -> Result<bool> {
        self.custom_request("moon_isTxFinalized", (tx_hash,)).await
    }

    /// Sends `value` to `to` from the provider's signer and waits until the including block
    /// is served. Returns the transaction hash.
    pub async fn send_and_wait(&self, to: Address, value: U256) -> Result<TxHash> {
        let receipt = send_value(&self.provider, to, value).await?;
        let block_number = receipt
            .block_number
            .ok_or(ToolkitError::NotMined(receipt.transaction_hash))?;

        self.wait_for_block(block_number).await?;
        Ok(receipt.transaction_hash)
    }
}
