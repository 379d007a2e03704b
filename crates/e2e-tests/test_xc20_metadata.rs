//! End-to-end check: metadata of a local XC-20 on Moonbase Alpha.

use alloy::primitives::{address, Address};
use docs_test_toolkit::test_env::{moonbase_env, TestEnv};
use docs_toolkit::fetch_token_metadata;
use rstest::rstest;

/// The "Jupiter" local XC-20.
const JUPITER_TOKEN: Address = address!("9Aac6FB41773af877a2Be73c99897F3DdFACf576");

#[rstest]
#[tokio::test]
#[ignore = "requires Moonbase Alpha endpoint"]
async fn local_xc20_metadata(#[future] moonbase_env: TestEnv) {
    let test_env = moonbase_env.await;

    let metadata = fetch_token_metadata(&test_env.provider, JUPITER_TOKEN)
        .await
        .expect("failed to fetch token metadata");
    println!("token metadata: {metadata}");

    assert_eq!(metadata.name, "Jupiter");
    assert_eq!(metadata.symbol, "JUP");
    assert_eq!(metadata.decimals, 18);
}
