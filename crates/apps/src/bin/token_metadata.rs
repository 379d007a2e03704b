use alloy::primitives::Address;
use anyhow::{Context, Result};
use clap::Parser;
use docs_apps::{logging_init, NetworkArgs};
use docs_toolkit::fetch_token_metadata;
use docs_toolkit::rpc::connect;
use dotenv::dotenv;

/// Prints name, symbol and decimals of an ERC-20 or XC-20 token.
#[derive(Parser)]
struct CliArgs {
    #[command(flatten)]
    network: NetworkArgs,

    /// Token contract address
    #[arg(long)]
    token: Address,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging_init();

    let args = CliArgs::try_parse()?;
    let config = args.network.network_config();

    let provider = connect(&config)
        .await
        .with_context(|| format!("failed to connect to {}", config.http_rpc_url))?;

    let metadata = fetch_token_metadata(&provider, args.token)
        .await
        .with_context(|| format!("failed to read metadata of {}", args.token))?;
    println!("{}: {metadata}", args.token);

    Ok(())
}
