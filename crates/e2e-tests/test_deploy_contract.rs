//! End-to-end check: deploy the Incrementer contract and interact with it.

use alloy::network::ReceiptResponse;
use alloy::primitives::U256;
use alloy::providers::Provider;
use docs_test_toolkit::incrementer::{
    current_number, deploy_incrementer, deploy_incrementer_raw, increment, reset,
};
use docs_test_toolkit::test_env::{test_env, TestEnv};
use docs_toolkit::contracts::Incrementer;
use rstest::rstest;

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn incrementer_is_deployed_with_expected_code(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let contract = deploy_incrementer(test_env.provider.clone(), 5)
        .await
        .expect("failed to deploy");

    let code = test_env
        .provider
        .get_code_at(*contract.address())
        .await
        .expect("RPC getCode failed");

    assert_eq!(code, Incrementer::DEPLOYED_BYTECODE.clone());
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn deployment_receipt_is_successful(#[future] test_env: TestEnv) {
    let test_env = test_env.await;

    let receipt = deploy_incrementer_raw(&test_env.provider, 5)
        .await
        .expect("failed to deploy");

    assert!(receipt.status());
    assert!(receipt.contract_address.is_some());
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn initial_number_is_set_by_constructor(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let contract = deploy_incrementer(test_env.provider.clone(), 5)
        .await
        .expect("failed to deploy");

    let number = current_number(&contract).await.expect("number() failed");
    assert_eq!(number, U256::from(5));
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn increment_adds_to_number(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let contract = deploy_incrementer(test_env.provider.clone(), 5)
        .await
        .expect("failed to deploy");

    increment(&contract, 2).await.expect("increment failed");

    let number = current_number(&contract).await.expect("number() failed");
    assert_eq!(number, U256::from(7));
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn reset_sets_number_to_zero(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let contract = deploy_incrementer(test_env.provider.clone(), 5)
        .await
        .expect("failed to deploy");

    reset(&contract).await.expect("reset failed");

    let number = current_number(&contract).await.expect("number() failed");
    assert_eq!(number, U256::ZERO);
}
