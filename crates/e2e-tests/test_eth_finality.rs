//! End-to-end check: transaction finality through the Ethereum JSON-RPC surface.
//!
//! Runs against Moonbase Alpha, where finality lags block production by a few blocks.

use alloy::primitives::U256;
use docs_test_toolkit::test_env::{moonbase_env, TestEnv, MOONBASE_FINALIZED_TX_HASH};
use docs_toolkit::DevAccount;
use rstest::rstest;

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint and funded test account"]
async fn recent_transaction_is_not_finalized(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let finality = test_env.finality();

    let bob = DevAccount::random_address();
    let tx_hash = finality
        .send_and_wait(bob, U256::ZERO)
        .await
        .expect("failed to send transaction");
    println!("sent transaction {tx_hash}");

    let finalized = finality
        .finalized_block_number()
        .await
        .expect("failed to get finalized block number");
    let tx_block = finality
        .transaction_block_number(tx_hash)
        .await
        .expect("failed to get transaction block number");
    println!("finalized block {finalized}, transaction block {tx_block}");

    assert!(finalized < tx_block);
}

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint"]
async fn old_transaction_is_finalized(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let finality = test_env.finality();

    let finalized = finality
        .finalized_block_number()
        .await
        .expect("failed to get finalized block number");
    let tx_block = finality
        .transaction_block_number(MOONBASE_FINALIZED_TX_HASH)
        .await
        .expect("failed to get transaction block number");

    assert!(finalized >= tx_block);
}

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint and funded test account"]
async fn recent_block_is_not_finalized_by_custom_rpc(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let finality = test_env.finality();

    let tx_hash = finality
        .send_and_wait(DevAccount::random_address(), U256::ZERO)
        .await
        .expect("failed to send transaction");
    let block_hash = finality
        .transaction_block_hash(tx_hash)
        .await
        .expect("failed to get transaction block hash");

    let is_finalized = finality
        .is_block_finalized(block_hash)
        .await
        .expect("moon_isBlockFinalized failed");
    assert!(!is_finalized);
}

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint"]
async fn old_block_is_finalized_by_custom_rpc(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let finality = test_env.finality();

    let block_hash = finality
        .transaction_block_hash(MOONBASE_FINALIZED_TX_HASH)
        .await
        .expect("failed to get transaction block hash");

    let is_finalized = finality
        .is_block_finalized(block_hash)
        .await
        .expect("moon_isBlockFinalized failed");
    assert!(is_finalized);
}

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint and funded test account"]
async fn recent_transaction_is_not_finalized_by_custom_rpc(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let finality = test_env.finality();

    let tx_hash = finality
        .send_and_wait(DevAccount::random_address(), U256::ZERO)
        .await
        .expect("failed to send transaction");

    let is_finalized = finality
        .is_tx_finalized(tx_hash)
        .await
        .expect("moon_isTxFinalized failed");
    assert!(!is_finalized);
}

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint"]
async fn old_transaction_is_finalized_by_custom_rpc(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let finality = test_env.finality();

    let is_finalized = finality
        .is_tx_finalized(MOONBASE_FINALIZED_TX_HASH)
        .await
        .expect("moon_isTxFinalized failed");
    assert!(is_finalized);

    let by_block_numbers = finality
        .is_transaction_finalized(MOONBASE_FINALIZED_TX_HASH)
        .await
        .expect("failed to compare block numbers");
    assert_eq!(is_finalized, by_block_numbers);
}
