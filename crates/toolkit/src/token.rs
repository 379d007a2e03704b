use crate::contracts::IERC20Metadata::{self, IERC20MetadataInstance};
use crate::errors::Result;
use alloy::primitives::Address;
use alloy::providers::Provider;
use futures_util::future::try_join3;
use std::fmt;
use std::future::IntoFuture;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl fmt::Display for TokenMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} decimals)", self.name, self.symbol, self.decimals)
    }
}

/// Reads name, symbol and decimals of an ERC-20 / XC-20 token. The three calls are issued
/// concurrently.
pub async fn fetch_token_metadata<P: Provider + Clone>(
    provider: &P,
    token_address: Address,
) -> Result<TokenMetadata> {
    let token: IERC20MetadataInstance<(), P> =
        IERC20Metadata::new(token_address, provider.clone());

    let name_call = token.name();
    let symbol_call = token.symbol();
    let decimals_call = token.decimals();
    let (name, symbol, decimals) = try_join3(
        name_call.call().into_future(),
        symbol_call.call().into_future(),
        decimals_call.call().into_future(),
    )
    .await?;

    Ok(TokenMetadata {
        name: name._0,
        symbol: symbol._0,
        decimals: decimals._0,
    })
}
