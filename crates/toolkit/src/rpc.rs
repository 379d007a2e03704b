use crate::config::{DevAccount, NetworkConfig};
use crate::errors::{Result, ToolkitError};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};

/// Read-only provider over the HTTP endpoint.
pub async fn connect(config: &NetworkConfig) -> Result<DynProvider> {
    let provider = ProviderBuilder::new()
        .connect(config.http_rpc_url.as_str())
        .await?
        .erased();

    ensure_chain_id(&provider, config.chain_id).await?;
    Ok(provider)
}

/// Provider over the HTTP endpoint that signs transactions with `account`.
pub async fn connect_with_signer(
    config: &NetworkConfig,
    account: &DevAccount,
) -> Result<DynProvider> {
    let provider = ProviderBuilder::new()
        .wallet(account.wallet())
        .connect(config.http_rpc_url.as_str())
        .await?
        .erased();

    ensure_chain_id(&provider, config.chain_id).await?;
    Ok(provider)
}

/// Provider for the chain-native RPC surface, over WS when configured.
pub async fn connect_substrate(config: &NetworkConfig) -> Result<DynProvider> {
    let url = config.substrate_rpc_url();
    log::debug!("connecting to {} chain-native RPC at {url}", config.name);

    let provider = ProviderBuilder::new().connect(url.as_str()).await?.erased();
    Ok(provider)
}

pub async fn ensure_chain_id<P: Provider>(provider: &P, expected: u64) -> Result<()> {
    let actual = provider.get_chain_id().await?;
    if actual != expected {
        return Err(ToolkitError::ChainIdMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEV_CHAIN_ID, MOONBASE_CHAIN_ID};
    use alloy::primitives::U64;
    use alloy::transports::mock::Asserter;

    #[tokio::test]
    async fn test_ensure_chain_id_accepts_expected_chain() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(DEV_CHAIN_ID));
        let provider = ProviderBuilder::new().on_mocked_client(asserter);

        ensure_chain_id(&provider, DEV_CHAIN_ID).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_chain_id_rejects_other_chain() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(MOONBASE_CHAIN_ID));
        let provider = ProviderBuilder::new().on_mocked_client(asserter);

        let err = ensure_chain_id(&provider, DEV_CHAIN_ID).await.unwrap_err();
        assert!(matches!(
            err,
            ToolkitError::ChainIdMismatch {
                expected: DEV_CHAIN_ID,
                actual: MOONBASE_CHAIN_ID
            }
        ));
    }
}
