//! `getProgramAccounts` filters used to enumerate accounts by structure.
use anchor_spl::token::spl_token;
use nft_staking_pool::state::StakeRecord;
use solana_client::rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType};
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};

/// Owner offset inside an SPL token account.
const TOKEN_ACCOUNT_OWNER_OFFSET: usize = 32;

/// StakeRecords of `owner` in `pool`, staked or not.
pub fn stake_record_filters(owner: &Pubkey, pool: &Pubkey) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::DataSize(StakeRecord::LEN as u64),
        RpcFilterType::Memcmp(Memcmp::new(
            StakeRecord::OWNER_OFFSET,
            MemcmpEncodedBytes::Bytes(owner.to_bytes().to_vec()),
        )),
        RpcFilterType::Memcmp(Memcmp::new(
            StakeRecord::POOL_OFFSET,
            MemcmpEncodedBytes::Bytes(pool.to_bytes().to_vec()),
        )),
    ]
}

/// SPL token accounts held by `owner`.
pub fn token_account_filters(owner: &Pubkey) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::DataSize(spl_token::state::Account::LEN as u64),
        RpcFilterType::Memcmp(Memcmp::new(
            TOKEN_ACCOUNT_OWNER_OFFSET,
            MemcmpEncodedBytes::Bytes(owner.to_bytes().to_vec()),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::AccountSerialize;

    fn allows(filters: &[RpcFilterType], data: &[u8]) -> bool {
        filters.iter().all(|filter| match filter {
            RpcFilterType::DataSize(size) => data.len() as u64 == *size,
            RpcFilterType::Memcmp(memcmp) => memcmp.bytes_match(data),
            _ => false,
        })
    }

    fn record(owner: Pubkey, pool: Pubkey) -> Vec<u8> {
        let record = StakeRecord {
            owner,
            pool,
            ..Default::default()
        };
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn stake_record_filters_match_only_owner_and_pool() {
        let owner = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let filters = stake_record_filters(&owner, &pool);

        let matching = record(owner, pool);
        assert!(allows(&filters, &matching));

        let other_owner = record(Pubkey::new_unique(), pool);
        assert!(!allows(&filters, &other_owner));

        let other_pool = record(owner, Pubkey::new_unique());
        assert!(!allows(&filters, &other_pool));
    }

    #[test]
    fn token_account_filters_match_owner() {
        let owner = Pubkey::new_unique();
        let account = spl_token::state::Account {
            mint: Pubkey::new_unique(),
            owner,
            amount: 1,
            state: spl_token::state::AccountState::Initialized,
            ..Default::default()
        };
        let mut data = vec![0; spl_token::state::Account::LEN];
        spl_token::state::Account::pack(account, &mut data).unwrap();

        let filters = token_account_filters(&owner);
        assert!(allows(&filters, &data));
        assert!(!allows(&token_account_filters(&Pubkey::new_unique()), &data));
        assert!(!allows(&filters, &data[..100]));
    }
}
