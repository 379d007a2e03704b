//! End-to-end check: balances and a plain value transfer on a development node.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use alloy::providers::Provider;
use docs_test_toolkit::test_env::{test_env, TestEnv};
use docs_toolkit::transfer::send_value;
use docs_toolkit::DevAccount;
use rstest::rstest;

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn alice_has_a_positive_balance(#[future] test_env: TestEnv) {
    let test_env = test_env.await;

    let balance = test_env
        .provider
        .get_balance(test_env.alice.address)
        .await
        .expect("RPC getBalance failed");

    assert!(balance > U256::ZERO, "Alice should be funded");
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn new_account_starts_at_zero(#[future] test_env: TestEnv) {
    let test_env = test_env.await;

    let balance = test_env
        .provider
        .get_balance(DevAccount::random_address())
        .await
        .expect("RPC getBalance failed");

    assert_eq!(balance, U256::ZERO);
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn transfer_updates_recipient_balance(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let bob = DevAccount::random_address();
    let amount = parse_ether("10").unwrap();

    let receipt = send_value(&test_env.provider, bob, amount)
        .await
        .expect("failed to send transaction");
    println!("transfer included in block {:?}", receipt.block_number);

    let balance = test_env
        .provider
        .get_balance(bob)
        .await
        .expect("RPC getBalance failed");
    assert_eq!(balance, amount, "Bob should have exactly 10 tokens");
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn transferred_block_is_served(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let finality = test_env.finality();

    let tx_hash = finality
        .send_and_wait(DevAccount::random_address(), parse_ether("1").unwrap())
        .await
        .expect("failed to send transaction");
    let tx_block = finality
        .transaction_block_number(tx_hash)
        .await
        .expect("failed to get transaction block number");

    let block = finality
        .wait_for_block(tx_block)
        .await
        .expect("block should be available");
    assert_eq!(block.header.number, tx_block);
}
