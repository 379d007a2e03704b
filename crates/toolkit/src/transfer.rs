use crate::errors::{Result, ToolkitError};
use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};

/// Sends `value` wei to `to` and waits for the receipt. A reverted transaction is an error.
pub async fn send_value<P: Provider>(
    provider: &P,
    to: Address,
    value: U256,
) -> Result<TransactionReceipt> {
    let tx = TransactionRequest::default().with_to(to).with_value(value);
    let receipt = provider.send_transaction(tx).await?.get_receipt().await?;

    ensure_success(&receipt)?;
    log::info!(
        "sent {} to {to} in transaction {}",
        format_ether(value),
        receipt.transaction_hash
    );
    Ok(receipt)
}

pub(crate) fn ensure_success(receipt: &TransactionReceipt) -> Result<()> {
    if !receipt.status() {
        return Err(ToolkitError::Reverted(receipt.transaction_hash));
    }
    Ok(())
}

/// Rounds a wei amount to the nearest whole token (18 decimals).
///
/// Balance checks that must ignore gas fees compare whole units, the way a human reads a
/// wallet balance.
pub fn whole_units(wei: U256) -> U256 {
    let unit = U256::from(10u64).pow(U256::from(18u64));
    (wei + unit / U256::from(2u64)) / unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn test_whole_units_rounds_to_nearest() {
        assert_eq!(whole_units(parse_ether("10").unwrap()), U256::from(10));
        assert_eq!(whole_units(parse_ether("9.6").unwrap()), U256::from(10));
        assert_eq!(whole_units(parse_ether("1207.49").unwrap()), U256::from(1207));
        assert_eq!(whole_units(U256::ZERO), U256::ZERO);
    }

    #[test]
    fn test_fee_does_not_change_whole_units() {
        let before = parse_ether("1200000").unwrap();
        let fee = parse_ether("0.0021").unwrap();
        let sent = parse_ether("10").unwrap();

        assert_eq!(
            whole_units(before) - U256::from(10),
            whole_units(before - sent - fee)
        );
    }
}
