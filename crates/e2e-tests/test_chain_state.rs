//! End-to-end check: runtime storage read through the chain-native RPC surface.

use alloy::primitives::U256;
use docs_test_toolkit::test_env::{moonbase_env, test_env, TestEnv};
use docs_toolkit::storage::COLLATOR_LOCK_ID;
use docs_toolkit::transfer::send_value;
use docs_toolkit::DevAccount;
use rstest::rstest;

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn new_account_has_no_balance(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");

    let info = substrate
        .account_info(DevAccount::random_address())
        .await
        .expect("failed to query System.Account");

    assert_eq!(info.nonce, 0);
    assert_eq!(info.data.free, 0);
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn transfer_shows_up_in_account_storage(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");
    let bob = DevAccount::random_address();

    send_value(&test_env.provider, bob, U256::from(12345))
        .await
        .expect("failed to send transaction");

    let info = substrate
        .account_info(bob)
        .await
        .expect("failed to query System.Account");
    assert_eq!(info.data.free, 12345);
    assert_eq!(info.nonce, 0);

    let sender = substrate
        .account_info(test_env.alice.address)
        .await
        .expect("failed to query System.Account");
    assert!(sender.nonce > 0);
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn default_collator_stake_is_held(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");
    let alice = test_env.alice.address;

    let freezes = substrate
        .balance_freezes(alice)
        .await
        .expect("failed to query Balances.Freezes");
    let locks = substrate
        .balance_locks(alice)
        .await
        .expect("failed to query Balances.Locks");
    println!("freezes: {freezes:?}, locks: {locks:?}");

    // Older runtimes hold the bond as a lock, newer ones as a freeze.
    let frozen = freezes.iter().any(|f| f.id.is_staking_collator());
    let locked = locks.iter().any(|l| l.id == COLLATOR_LOCK_ID);
    assert!(frozen || locked, "expected a collator freeze or lock on the dev collator");
}

#[rstest]
#[tokio::test]
#[ignore = "requires a running development node"]
async fn runtime_version_matches_last_upgrade(#[future] test_env: TestEnv) {
    let test_env = test_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");

    let version = substrate
        .runtime_version()
        .await
        .expect("state_getRuntimeVersion failed");
    let upgrade = substrate
        .last_runtime_upgrade()
        .await
        .expect("failed to query System.LastRuntimeUpgrade")
        .expect("genesis records the runtime version");
    println!("runtime {} v{}", version.spec_name, version.spec_version);

    assert_eq!(upgrade.spec_version, version.spec_version);
    assert_eq!(upgrade.spec_name, version.spec_name);
}

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint"]
async fn foreign_assets_are_registered(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;
    let substrate = test_env.substrate().await.expect("failed to connect");

    let count = substrate
        .foreign_asset_count()
        .await
        .expect("failed to query EvmForeignAssets.CounterForAssetsById");
    println!("registered foreign assets: {count}");

    assert!(count > 0);
}
