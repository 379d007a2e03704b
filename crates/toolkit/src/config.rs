//! Network endpoints and test accounts, passed explicitly into setup code.

use crate::errors::ConfigError;
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use std::str::FromStr;
use url::Url;

/// Chain id of a local development node.
pub const DEV_CHAIN_ID: u64 = 1281;

/// Chain id of the Moonbase Alpha test network.
pub const MOONBASE_CHAIN_ID: u64 = 1287;

pub const DEFAULT_DEV_HTTP_RPC_URL: &str = "http://127.0.0.1:9944";
pub const DEFAULT_DEV_WS_RPC_URL: &str = "ws://127.0.0.1:9944";

/// Address of the prefunded development account.
pub const ALITH_ADDRESS: Address =
    alloy::primitives::address!("f24FF3a9CF04c71Dbc94D0b566f7A27B94566cac");

// Well-known development key, funded in the genesis of every dev node.
const ALITH_PRIVATE_KEY: &str =
    "0x5fb92d6e98884f76de468fa3f6278f8807c48bebc13595d45af5bdc4da702133";

/// Mnemonic the development accounts are derived from.
pub const DEV_MNEMONIC: &str = "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    pub http_rpc_url: Url,
    pub ws_rpc_url: Option<Url>,
}

impl NetworkConfig {
    pub fn new(name: impl Into<String>, chain_id: u64, http_rpc_url: Url) -> Self {
        Self {
            name: name.into(),
            chain_id,
            http_rpc_url,
            ws_rpc_url: None,
        }
    }

    pub fn with_ws_rpc_url(mut self, ws_rpc_url: Url) -> Self {
        self.ws_rpc_url = Some(ws_rpc_url);
        self
    }

    /// Local development node. Endpoints come from `HTTP_RPC_ENDPOINT` (or `RPC_ENDPOINT`) and
    /// `WSS_RPC_ENDPOINT`, falling back to the node's default port.
    pub fn development() -> Result<Self, ConfigError> {
        let (var, http) = match first_var(&["HTTP_RPC_ENDPOINT", "RPC_ENDPOINT"]) {
            Some((var, value)) => (var, value),
            None => ("HTTP_RPC_ENDPOINT", DEFAULT_DEV_HTTP_RPC_URL.to_string()),
        };
        let ws = std::env::var("WSS_RPC_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_DEV_WS_RPC_URL.to_string());

        Ok(Self::new("moonbeam-development", DEV_CHAIN_ID, parse_url(var, &http)?)
            .with_ws_rpc_url(parse_url("WSS_RPC_ENDPOINT", &ws)?))
    }

    /// Moonbase Alpha. `MOONBASE_HTTP_RPC_ENDPOINT` is required,
    /// `MOONBASE_WSS_RPC_ENDPOINT` is optional.
    pub fn moonbase_alpha() -> Result<Self, ConfigError> {
        let http = required_var("MOONBASE_HTTP_RPC_ENDPOINT")?;
        let mut config = Self::new(
            "moonbase",
            MOONBASE_CHAIN_ID,
            parse_url("MOONBASE_HTTP_RPC_ENDPOINT", &http)?,
        );

        if let Ok(ws) = std::env::var("MOONBASE_WSS_RPC_ENDPOINT") {
            config = config.with_ws_rpc_url(parse_url("MOONBASE_WSS_RPC_ENDPOINT", &ws)?);
        }
        Ok(config)
    }

    /// The endpoint used for chain-native RPC calls: the WS endpoint when configured,
    /// otherwise the HTTP one (nodes serve both surfaces on the same port).
    pub fn substrate_rpc_url(&self) -> &Url {
        self.ws_rpc_url.as_ref().unwrap_or(&self.http_rpc_url)
    }
}

/// An account used as a call parameter to signing APIs.
#[derive(Debug, Clone)]
pub struct DevAccount {
    pub address: Address,
    signer: PrivateKeySigner,
}

impl DevAccount {
    /// The prefunded development account.
    pub fn alith() -> Result<Self, ConfigError> {
        Self::from_private_key(ALITH_PRIVATE_KEY)
    }

    pub fn from_private_key(private_key: &str) -> Result<Self, ConfigError> {
        let signer = PrivateKeySigner::from_str(private_key.trim())
            .map_err(|e| ConfigError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_signer(signer))
    }

    /// Derives the account at `m/44'/60'/0'/0/{index}`.
    pub fn from_mnemonic(phrase: &str, index: u32) -> Result<Self, ConfigError> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .derivation_path(format!("m/44'/60'/0'/0/{index}"))
            .map_err(|e| ConfigError::Mnemonic(e.to_string()))?
            .build()
            .map_err(|e| ConfigError::Mnemonic(e.to_string()))?;
        Ok(Self::from_signer(signer))
    }

    /// Loads the key from `key_var` and checks it against the address in `address_var`.
    pub fn from_env(address_var: &str, key_var: &str) -> Result<Self, ConfigError> {
        let account = Self::from_private_key(&required_var(key_var)?)?;
        let declared = required_var(address_var)?;
        let expected = Address::from_str(declared.trim())
            .map_err(|_| ConfigError::InvalidAddress(declared.clone()))?;

        if expected != account.address {
            return Err(ConfigError::AddressMismatch {
                expected,
                actual: account.address,
            });
        }
        Ok(account)
    }

    /// A fresh address nobody holds funds on.
    pub fn random_address() -> Address {
        PrivateKeySigner::random().address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }

    fn from_signer(signer: PrivateKeySigner) -> Self {
        Self {
            address: signer.address(),
            signer,
        }
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var.to_string()))
}

fn first_var<'a>(vars: &[&'a str]) -> Option<(&'a str, String)> {
    vars.iter()
        .find_map(|var| std::env::var(var).ok().map(|value| (*var, value)))
}

fn parse_url(var: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        var: var.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alith_matches_known_address() {
        assert_eq!(DevAccount::alith().unwrap().address, ALITH_ADDRESS);
    }

    #[test]
    fn test_mnemonic_derives_alith() {
        let account = DevAccount::from_mnemonic(DEV_MNEMONIC, 0).unwrap();
        assert_eq!(account.address, ALITH_ADDRESS);
        assert_eq!(
            account.signer().to_bytes(),
            DevAccount::alith().unwrap().signer().to_bytes()
        );
    }

    #[test]
    fn test_invalid_private_key_is_rejected() {
        let err = DevAccount::from_private_key("0x1234").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPrivateKey(_)));
    }

    #[test]
    fn test_random_addresses_differ() {
        assert_ne!(DevAccount::random_address(), DevAccount::random_address());
    }

    #[test]
    fn test_substrate_rpc_url_prefers_ws() {
        let http = Url::parse(DEFAULT_DEV_HTTP_RPC_URL).unwrap();
        let ws = Url::parse(DEFAULT_DEV_WS_RPC_URL).unwrap();

        let config = NetworkConfig::new("dev", DEV_CHAIN_ID, http.clone());
        assert_eq!(config.substrate_rpc_url(), &http);

        let config = config.with_ws_rpc_url(ws.clone());
        assert_eq!(config.substrate_rpc_url(), &ws);
    }

    // The environment is process-wide: every case that sets variables stays in this test.
    #[test]
    fn test_environment_configuration() {
        for var in [
            "HTTP_RPC_ENDPOINT",
            "RPC_ENDPOINT",
            "WSS_RPC_ENDPOINT",
            "MOONBASE_HTTP_RPC_ENDPOINT",
            "MOONBASE_WSS_RPC_ENDPOINT",
            "TEST_ACCOUNT_ADDRESS",
            "TEST_ACCOUNT_KEY",
        ] {
            std::env::remove_var(var);
        }

        let config = NetworkConfig::development().unwrap();
        assert_eq!(config.chain_id, DEV_CHAIN_ID);
        assert_eq!(config.http_rpc_url.as_str(), "http://127.0.0.1:9944/");
        assert_eq!(
            config.ws_rpc_url.as_ref().map(Url::as_str),
            Some("ws://127.0.0.1:9944/")
        );

        std::env::set_var("RPC_ENDPOINT", "http://10.0.0.2:9933");
        let config = NetworkConfig::development().unwrap();
        assert_eq!(config.http_rpc_url.as_str(), "http://10.0.0.2:9933/");

        std::env::set_var("HTTP_RPC_ENDPOINT", "http://10.0.0.1:9944");
        let config = NetworkConfig::development().unwrap();
        assert_eq!(config.http_rpc_url.as_str(), "http://10.0.0.1:9944/");

        std::env::set_var("HTTP_RPC_ENDPOINT", "not a url");
        let err = NetworkConfig::development().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl { ref var, .. } if var == "HTTP_RPC_ENDPOINT"
        ));

        let err = NetworkConfig::moonbase_alpha().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVar(ref var) if var == "MOONBASE_HTTP_RPC_ENDPOINT"
        ));

        std::env::set_var(
            "MOONBASE_HTTP_RPC_ENDPOINT",
            "https://rpc.api.moonbase.moonbeam.network",
        );
        let config = NetworkConfig::moonbase_alpha().unwrap();
        assert_eq!(config.chain_id, MOONBASE_CHAIN_ID);
        assert!(config.ws_rpc_url.is_none());

        std::env::set_var("TEST_ACCOUNT_KEY", ALITH_PRIVATE_KEY);
        std::env::set_var("TEST_ACCOUNT_ADDRESS", ALITH_ADDRESS.to_string());
        let account = DevAccount::from_env("TEST_ACCOUNT_ADDRESS", "TEST_ACCOUNT_KEY").unwrap();
        assert_eq!(account.address, ALITH_ADDRESS);

        let other = DevAccount::random_address();
        std::env::set_var("TEST_ACCOUNT_ADDRESS", other.to_string());
        let err = DevAccount::from_env("TEST_ACCOUNT_ADDRESS", "TEST_ACCOUNT_KEY").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::AddressMismatch { expected, actual }
                if expected == other && actual == ALITH_ADDRESS
        ));

        for var in [
            "HTTP_RPC_ENDPOINT",
            "RPC_ENDPOINT",
            "MOONBASE_HTTP_RPC_ENDPOINT",
            "TEST_ACCOUNT_ADDRESS",
            "TEST_ACCOUNT_KEY",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_url_reports_variable() {
        let err = parse_url("HTTP_RPC_ENDPOINT", "not a url").unwrap_err();
        assert!(err.to_string().contains("HTTP_RPC_ENDPOINT"));
    }
}
