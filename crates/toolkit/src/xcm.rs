//! Sending and executing SCALE-encoded XCM messages through the XCM Utilities precompile.

use crate::contracts::XcmUtils::{self, Multilocation, XcmUtilsInstance};
use crate::contracts::XCM_UTILS_ADDRESS;
use crate::errors::Result;
use crate::transfer::ensure_success;
use alloy::primitives::Bytes;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use alloy_sol_types::SolCall;
use std::str::FromStr;

/// A SCALE-encoded versioned XCM message. Encoding happens elsewhere (e.g. with a chain-native
/// client); this type only carries the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XcmMessage(Bytes);

impl XcmMessage {
    pub fn new(encoded: impl Into<Bytes>) -> Self {
        Self(encoded.into())
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Calldata of `xcmExecute(message, maxWeight)`.
    pub fn execute_calldata(&self, max_weight: u64) -> Bytes {
        XcmUtils::xcmExecuteCall {
            message: self.0.clone(),
            maxWeight: max_weight,
        }
        .abi_encode()
        .into()
    }

    /// Calldata of `xcmSend(dest, message)`.
    pub fn send_calldata(&self, dest: Multilocation) -> Bytes {
        XcmUtils::xcmSendCall {
            dest,
            message: self.0.clone(),
        }
        .abi_encode()
        .into()
    }
}

impl FromStr for XcmMessage {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = s.strip_prefix("0x").unwrap_or(s);
        Ok(Self(hex::decode(raw)?.into()))
    }
}

impl Multilocation {
    /// The relay chain, seen from a parachain.
    pub fn parent() -> Self {
        Self {
            parents: 1,
            interior: vec![],
        }
    }

    /// The local chain.
    pub fn here() -> Self {
        Self {
            parents: 0,
            interior: vec![],
        }
    }
}

/// Executes `message` locally with at most `max_weight` weight.
pub async fn execute_xcm<P: Provider + Clone>(
    provider: &P,
    message: &XcmMessage,
    max_weight: u64,
) -> Result<TransactionReceipt> {
    let xcm_utils: XcmUtilsInstance<(), P> =
        XcmUtils::new(XCM_UTILS_ADDRESS, provider.clone());
    let receipt = xcm_utils
        .xcmExecute(message.0.clone(), max_weight)
        .send()
        .await?
        .get_receipt()
        .await?;

    ensure_success(&receipt)?;
    log::info!("executed XCM message in {}", receipt.transaction_hash);
    Ok(receipt)
}

/// Sends `message` to `dest`.
pub async fn send_xcm<P: Provider + Clone>(
    provider: &P,
    dest: Multilocation,
    message: &XcmMessage,
) -> Result<TransactionReceipt> {
    let xcm_utils: XcmUtilsInstance<(), P> =
        XcmUtils::new(XCM_UTILS_ADDRESS, provider.clone());
    let receipt = xcm_utils
        .xcmSend(dest, message.0.clone())
        .send()
        .await?
        .get_receipt()
        .await?;

    ensure_success(&receipt)?;
    log::info!("sent XCM message in {}", receipt.transaction_hash);
    Ok(receipt)
}

/// Weight the chain charges for executing `message`.
pub async fn weigh_message<P: Provider + Clone>(
    provider: &P,
    message: &XcmMessage,
) -> Result<u64> {
    let xcm_utils: XcmUtilsInstance<(), P> =
        XcmUtils::new(XCM_UTILS_ADDRESS, provider.clone());
    let weight = xcm_utils.weightMessage(message.0.clone()).call().await?.weight;
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXECUTE_MESSAGE: &str = "0x02080004000001040300130000e8890423c78a0d010004000103003cd0a705a2dc65e5b1e1205896baa2be8a07c6e0";

    #[test]
    fn test_parse_message_with_and_without_prefix() {
        let with_prefix = XcmMessage::from_str(EXECUTE_MESSAGE).unwrap();
        let without_prefix = XcmMessage::from_str(&EXECUTE_MESSAGE[2..]).unwrap();

        assert_eq!(with_prefix, without_prefix);
        // Versioned XCM, V2.
        assert_eq!(with_prefix.as_bytes()[0], 0x02);
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        assert!(XcmMessage::from_str("0x0g").is_err());
    }

    #[test]
    fn test_execute_calldata_layout() {
        let message = XcmMessage::from_str(EXECUTE_MESSAGE).unwrap();
        let calldata = message.execute_calldata(1_000_000_000);

        assert_eq!(&calldata[..4], XcmUtils::xcmExecuteCall::SELECTOR.as_slice());
        let decoded = XcmUtils::xcmExecuteCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(decoded.maxWeight, 1_000_000_000);
        assert_eq!(decoded.message, *message.as_bytes());
    }

    #[test]
    fn test_send_calldata_targets_parent() {
        let message = XcmMessage::from_str(EXECUTE_MESSAGE).unwrap();
        let calldata = message.send_calldata(Multilocation::parent());

        let decoded = XcmUtils::xcmSendCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(decoded.dest.parents, 1);
        assert!(decoded.dest.interior.is_empty());
    }
}
