//! End-to-end check: execute and send SCALE-encoded XCM messages through the precompile.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use alloy::providers::Provider;
use docs_test_toolkit::test_env::{test_env, TestEnv};
use docs_toolkit::contracts::XcmUtils::Multilocation;
use docs_toolkit::transfer::whole_units;
use docs_toolkit::xcm::{execute_xcm, send_xcm, weigh_message};
use docs_toolkit::XcmMessage;
use rstest::rstest;
use std::str::FromStr;

// Withdraws 10 DEV and deposits it to a local account.
const EXECUTE_MESSAGE: &str = "0x02080004000001040300130000e8890423c78a0d010004000103003cd0a705a2dc65e5b1e1205896baa2be8a07c6e0";

// Withdraws relay chain tokens and deposits them to an account on the relay chain.
const SEND_MESSAGE: &str = "0x020c000400010000070010a5d4e81300010000070010a5d4e8000d010004010101000c36e9ba26fa63c60ec728fe75fe57b86a450d94e7fee7f9f9eddd0d3f400d67";

const MAX_WEIGHT: u64 = 1_000_000_000;

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn execute_moves_ten_tokens(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let alice = test_env.alice.address;
    let message = XcmMessage::from_str(EXECUTE_MESSAGE).unwrap();

    let before = test_env.provider.get_balance(alice).await.expect("RPC getBalance failed");

    let receipt = execute_xcm(&test_env.provider, &message, MAX_WEIGHT)
        .await
        .expect("xcmExecute failed");
    println!("xcmExecute included in block {:?}", receipt.block_number);

    let after = test_env.provider.get_balance(alice).await.expect("RPC getBalance failed");

    // Gas fees stay below half a token, so whole units only move by the amount sent.
    assert_eq!(whole_units(before) - U256::from(10), whole_units(after));
    assert!(before - after >= parse_ether("10").unwrap());
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn send_to_relay_chain_succeeds(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let message = XcmMessage::from_str(SEND_MESSAGE).unwrap();

    let receipt = send_xcm(&test_env.provider, Multilocation::parent(), &message)
        .await
        .expect("xcmSend failed");

    assert!(receipt.block_number.is_some());
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn execute_message_has_weight(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let message = XcmMessage::from_str(EXECUTE_MESSAGE).unwrap();

    let weight = weigh_message(&test_env.provider, &message)
        .await
        .expect("weightMessage failed");

    assert!(weight > 0);
    assert!(weight <= MAX_WEIGHT);
}
