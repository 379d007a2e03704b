//! Shared fixtures for the end-to-end test crate.
//!
//! * `test_env` targets a local development node (`HTTP_RPC_ENDPOINT`, default
//!   `http://127.0.0.1:9944`) and signs with the prefunded development account.
//! * `moonbase_env` targets Moonbase Alpha and needs `MOONBASE_HTTP_RPC_ENDPOINT`,
//!   `MOONBASE_TEST_PUBLIC_KEY` and `MOONBASE_TEST_PRIVATE_KEY`.
//!
//! Variables may also come from a `.env` file.

use alloy::primitives::{b256, TxHash};
use alloy::providers::DynProvider;
use docs_toolkit::rpc::{connect_substrate, connect_with_signer};
use docs_toolkit::{DevAccount, EthFinality, NetworkConfig, SubstrateChain};
use rstest::*;

/// An old Moonbase Alpha transaction, long covered by the finalized head.
pub const MOONBASE_FINALIZED_TX_HASH: TxHash =
    b256!("3ea780d2e53fc265e9d251b5f41794c3d5ec4a32e854ca6562b111ec7002057e");

pub struct TestEnv {
    pub config: NetworkConfig,
    pub alice: DevAccount,
    pub provider: DynProvider,
}

impl TestEnv {
    pub fn finality(&self) -> EthFinality<DynProvider> {
        EthFinality::new(self.provider.clone())
    }

    pub async fn substrate(&self) -> anyhow::Result<SubstrateChain<DynProvider>> {
        let provider = connect_substrate(&self.config).await?;
        Ok(SubstrateChain::new(provider))
    }
}

async fn build_env(config: NetworkConfig, alice: DevAccount) -> TestEnv {
    log::info!("connecting to {} at {}", config.name, config.http_rpc_url);

    let provider = connect_with_signer(&config, &alice)
        .await
        .expect("Failed to connect to the node");

    TestEnv {
        config,
        alice,
        provider,
    }
}

#[fixture]
pub async fn test_env() -> TestEnv {
    dotenv::dotenv().ok();

    let config = NetworkConfig::development().expect("Invalid development node configuration");
    let alice = DevAccount::alith().expect("Invalid development account");
    build_env(config, alice).await
}

#[fixture]
pub async fn moonbase_env() -> TestEnv {
    dotenv::dotenv().ok();

    let config = NetworkConfig::moonbase_alpha().expect("Invalid Moonbase Alpha configuration");
    let alice = DevAccount::from_env("MOONBASE_TEST_PUBLIC_KEY", "MOONBASE_TEST_PRIVATE_KEY")
        .expect("Invalid Moonbase Alpha test account");
    build_env(config, alice).await
}
