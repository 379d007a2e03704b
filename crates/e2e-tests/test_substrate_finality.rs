//! End-to-end check: transaction finality through the chain-native RPC surface.

use alloy::primitives::U256;
use docs_test_toolkit::test_env::{moonbase_env, test_env, TestEnv, MOONBASE_FINALIZED_TX_HASH};
use docs_toolkit::DevAccount;
use rstest::rstest;

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint and funded test account"]
async fn recent_transaction_is_not_finalized(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");

    let tx_hash = test_env
        .finality()
        .send_and_wait(DevAccount::random_address(), U256::ZERO)
        .await
        .expect("failed to send transaction");

    let finalized = substrate
        .finalized_block_number()
        .await
        .expect("failed to get finalized block number");
    let tx_block = substrate
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
    let substrate = test_env.substrate().await.expect("failed to connect");

    let finalized = substrate
        .finalized_block_number()
        .await
        .expect("failed to get finalized block number");
    let tx_block = substrate
        .transaction_block_number(MOONBASE_FINALIZED_TX_HASH)
        .await
        .expect("failed to get transaction block number");

    assert!(finalized >= tx_block);
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn development_chain_reports_name_and_head(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");

    let chain = substrate.system_chain().await.expect("system_chain failed");
    assert_eq!(chain, "Moonbase Development Testnet");

    let head = substrate.latest_header().await.expect("chain_getHeader failed");
    println!("chain head: {}", head.block_number());

    let finalized_hash = substrate
        .finalized_head()
        .await
        .expect("chain_getFinalizedHead failed");
    let finalized = substrate
        .header(finalized_hash)
        .await
        .expect("chain_getHeader failed")
        .expect("finalized header should be known");
    assert!(finalized.block_number() <= head.block_number());
}
