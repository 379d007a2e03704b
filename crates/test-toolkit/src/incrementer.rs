use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Bytes, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolConstructor;
use anyhow::{ensure, Context};
use docs_toolkit::contracts::Incrementer::{self, IncrementerInstance};

pub type IncrementerContract = IncrementerInstance<(), DynProvider>;

/// Deploys a fresh `Incrementer` starting at `initial`.
pub async fn deploy_incrementer(
    provider: DynProvider,
    initial: u64,
) -> anyhow::Result<IncrementerContract> {
    let contract = Incrementer::deploy(provider, U256::from(initial))
        .await
        .with_context(|| "failed to deploy Incrementer")?;

    println!("Incrementer deployed at {}", contract.address());
    Ok(contract)
}

/// Creation code followed by the ABI-encoded constructor argument.
pub fn incrementer_deploy_code(initial: u64) -> Bytes {
    let args = Incrementer::constructorCall {
        _initialNumber: U256::from(initial),
    }
    .abi_encode();

    [Incrementer::BYTECODE.as_ref(), args.as_slice()].concat().into()
}

/// Deploys through a raw creation transaction and returns its receipt.
pub async fn deploy_incrementer_raw(
    provider: &DynProvider,
    initial: u64,
) -> anyhow::Result<TransactionReceipt> {
    let tx = TransactionRequest::default().with_deploy_code(incrementer_deploy_code(initial));
    let receipt = provider
        .send_transaction(tx)
        .await
        .with_context(|| "failed to send deployment")?
        .get_receipt()
        .await?;
    Ok(receipt)
}

pub async fn current_number(contract: &IncrementerContract) -> anyhow::Result<U256> {
    Ok(contract.number().call().await?._0)
}

pub async fn increment(contract: &IncrementerContract, value: u64) -> anyhow::Result<()> {
    let receipt = contract
        .increment(U256::from(value))
        .send()
        .await?
        .get_receipt()
        .await?;
    ensure!(receipt.status(), "increment reverted");
    Ok(())
}

pub async fn reset(contract: &IncrementerContract) -> anyhow::Result<()> {
    let receipt = contract.reset().send().await?.get_receipt().await?;
    ensure!(receipt.status(), "reset reverted");
    Ok(())
}
