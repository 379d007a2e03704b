use alloy::primitives::TxHash;
use anyhow::{Context, Result};
use clap::Parser;
use docs_apps::{logging_init, node_finality, NetworkArgs, PollArgs};
use docs_toolkit::rpc::{connect, connect_substrate};
use docs_toolkit::{EthFinality, SubstrateChain};
use dotenv::dotenv;

/// Reports whether a transaction is covered by the finalized head, through both the
/// Ethereum and the chain-native RPC surfaces.
#[derive(Parser)]
struct CliArgs {
    #[command(flatten)]
    network: NetworkArgs,

    #[command(flatten)]
    poll: PollArgs,

    /// Hash of the transaction to check
    #[arg(long)]
    tx_hash: TxHash,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging_init();

    let args = CliArgs::try_parse()?;
    let config = args.network.network_config();
    log::info!("checking {} on {}", args.tx_hash, config.name);

    let provider = connect(&config)
        .await
        .with_context(|| format!("failed to connect to {}", config.http_rpc_url))?;
    let finality =
        EthFinality::new(provider).with_polling(args.poll.max_attempts, args.poll.delay());

    let finalized = finality.finalized_block_number().await?;
    let tx_block = finality.transaction_block_number(args.tx_hash).await?;
    let block_hash = finality.transaction_block_hash(args.tx_hash).await?;
    println!("Finalized block: {finalized}");
    println!("Transaction block: {tx_block} ({block_hash})");
    println!("Finalized by block number: {}", finalized >= tx_block);

    let answers = node_finality(&finality, args.tx_hash, block_hash).await?;
    println!("moon_isTxFinalized: {}", answers.tx_finalized);
    println!("moon_isBlockFinalized: {}", answers.block_finalized);

    let substrate = SubstrateChain::new(connect_substrate(&config).await?)
        .with_polling(args.poll.max_attempts, args.poll.delay());
    let substrate_finalized = substrate
        .finalized_block_number()
        .await
        .context("failed to read the finalized head over chain-native RPC")?;
    println!("Finalized block (chain-native RPC): {substrate_finalized}");

    Ok(())
}
