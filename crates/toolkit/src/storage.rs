//! Runtime storage keys and the SCALE layouts of the values the tutorials read.
//!
//! A storage value lives at `twox128(pallet) ++ twox128(item)`. Map entries keyed with
//! `Blake2_128Concat` append `blake2_128(key) ++ key` to that prefix. Accounts are 20-byte
//! Ethereum addresses, so the SCALE encoding of an account id is the raw address.

use alloy::primitives::{Address, Bytes};
use codec::Decode;
use sp_crypto_hashing::{blake2_128, twox_128};

/// Lock id of the collator bond in `Balances.Locks`.
pub const COLLATOR_LOCK_ID: [u8; 8] = *b"stkngcol";

/// Index of the parachain staking pallet in the Moonbase runtime, which is also the variant
/// index of its freeze reasons.
pub const MOONBASE_PARACHAIN_STAKING_INDEX: u8 = 12;

/// Variant of the staking pallet's freeze reason held by collators.
pub const STAKING_COLLATOR_REASON: u8 = 0;

pub fn storage_prefix(pallet: &str, item: &str) -> [u8; 32] {
    let mut prefix = [0u8; 32];
    prefix[..16].copy_from_slice(&twox_128(pallet.as_bytes()));
    prefix[16..].copy_from_slice(&twox_128(item.as_bytes()));
    prefix
}

/// Key of a plain storage value.
pub fn storage_value_key(pallet: &str, item: &str) -> Bytes {
    storage_prefix(pallet, item).to_vec().into()
}

/// Key of a `Blake2_128Concat` map entry.
pub fn blake2_128_concat_key(pallet: &str, item: &str, key: &[u8]) -> Bytes {
    let mut full = storage_prefix(pallet, item).to_vec();
    full.extend_from_slice(&blake2_128(key));
    full.extend_from_slice(key);
    full.into()
}

/// `System.Account(address)`
pub fn system_account_key(address: Address) -> Bytes {
    blake2_128_concat_key("System", "Account", address.as_slice())
}

/// `Balances.Locks(address)`
pub fn balance_locks_key(address: Address) -> Bytes {
    blake2_128_concat_key("Balances", "Locks", address.as_slice())
}

/// `Balances.Freezes(address)`
pub fn balance_freezes_key(address: Address) -> Bytes {
    blake2_128_concat_key("Balances", "Freezes", address.as_slice())
}

/// `System.LastRuntimeUpgrade`
pub fn last_runtime_upgrade_key() -> Bytes {
    storage_value_key("System", "LastRuntimeUpgrade")
}

/// Counter of the registered foreign assets (`EvmForeignAssets.CounterForAssetsById`).
pub fn foreign_asset_counter_key() -> Bytes {
    storage_value_key("EvmForeignAssets", "CounterForAssetsById")
}

/// `frame_system::AccountInfo` with the runtime's nonce and balance types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Decode)]
pub struct AccountInfo {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: AccountData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Decode)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
    pub flags: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Decode)]
pub enum LockReasons {
    Fee,
    Misc,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Decode)]
pub struct BalanceLock {
    pub id: [u8; 8],
    pub amount: u128,
    pub reasons: LockReasons,
}

/// Runtime freeze reason: the owning pallet's index followed by that pallet's reason variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Decode)]
pub struct FreezeId {
    pub pallet_index: u8,
    pub reason: u8,
}

impl FreezeId {
    pub fn is_staking_collator(&self) -> bool {
        self.pallet_index == MOONBASE_PARACHAIN_STAKING_INDEX
            && self.reason == STAKING_COLLATOR_REASON
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Decode)]
pub struct BalanceFreeze {
    pub id: FreezeId,
    pub amount: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Decode)]
pub struct LastRuntimeUpgrade {
    #[codec(compact)]
    pub spec_version: u32,
    pub spec_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ALITH_ADDRESS;
    use alloy::primitives::hex;

    #[test]
    fn test_well_known_prefixes() {
        assert_eq!(
            hex::encode(storage_prefix("System", "Account")),
            "26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9"
        );
        assert_eq!(
            hex::encode(last_runtime_upgrade_key()),
            "26aa394eea5630e07c48ae0c9558cef7f9cce9c888469bb1a0dceaa129672ef8"
        );
        assert_eq!(
            hex::encode(storage_prefix("Balances", "Freezes")),
            "c2261276cc9d1f8598ea4b6a74b15c2fb1c0eb12e038e5c7f91e120ed4b7ebf1"
        );
        assert_eq!(
            hex::encode(foreign_asset_counter_key()),
            "01360ad4fe2ef0c3baf28390abea08fa84c79a92698620db66318a99174fa75d"
        );
    }

    #[test]
    fn test_account_key_ends_with_hashed_address() {
        let key = system_account_key(ALITH_ADDRESS);

        assert_eq!(key.len(), 32 + 16 + 20);
        assert_eq!(&key[..32], &storage_prefix("System", "Account"));
        assert_eq!(&key[32..48], &blake2_128(ALITH_ADDRESS.as_slice()));
        assert_eq!(&key[48..], ALITH_ADDRESS.as_slice());
    }

    #[test]
    fn test_locks_and_freezes_keys_differ() {
        let locks = balance_locks_key(ALITH_ADDRESS);
        let freezes = balance_freezes_key(ALITH_ADDRESS);

        assert_eq!(locks[..16], freezes[..16]);
        assert_ne!(locks[16..32], freezes[16..32]);
        assert_eq!(locks[32..], freezes[32..]);
    }

    #[test]
    fn test_decode_account_info() {
        let mut raw = Vec::new();
        for counter in [3u32, 0, 1, 0] {
            raw.extend_from_slice(&counter.to_le_bytes());
        }
        for balance in [10u128.pow(18), 0, 0, 1u128 << 127] {
            raw.extend_from_slice(&balance.to_le_bytes());
        }

        let info = AccountInfo::decode(&mut raw.as_slice()).unwrap();
        assert_eq!(info.nonce, 3);
        assert_eq!(info.providers, 1);
        assert_eq!(info.data.free, 10u128.pow(18));
        assert_eq!(info.data.flags, 1u128 << 127);
    }

    #[test]
    fn test_decode_collator_freeze() {
        // One entry: compact length 1, reason (pallet 12, variant 0), amount.
        let mut raw = vec![0x04, MOONBASE_PARACHAIN_STAKING_INDEX, STAKING_COLLATOR_REASON];
        raw.extend_from_slice(&1_000u128.to_le_bytes());

        let freezes = Vec::<BalanceFreeze>::decode(&mut raw.as_slice()).unwrap();
        assert_eq!(freezes.len(), 1);
        assert!(freezes[0].id.is_staking_collator());
        assert_eq!(freezes[0].amount, 1_000);
    }

    #[test]
    fn test_decode_collator_lock() {
        let mut raw = vec![0x04];
        raw.extend_from_slice(&COLLATOR_LOCK_ID);
        raw.extend_from_slice(&500u128.to_le_bytes());
        raw.push(2);

        let locks = Vec::<BalanceLock>::decode(&mut raw.as_slice()).unwrap();
        assert_eq!(locks[0].id, COLLATOR_LOCK_ID);
        assert_eq!(locks[0].amount, 500);
        assert_eq!(locks[0].reasons, LockReasons::All);
    }

    #[test]
    fn test_decode_last_runtime_upgrade() {
        // Compact 2700 takes the two-byte mode: (2700 << 2) | 1 = 0x2a31.
        let mut raw = vec![0x31, 0x2a, 8 << 2];
        raw.extend_from_slice(b"moonbase");

        let upgrade = LastRuntimeUpgrade::decode(&mut raw.as_slice()).unwrap();
        assert_eq!(upgrade.spec_version, 2700);
        assert_eq!(upgrade.spec_name, "moonbase");
    }
}
