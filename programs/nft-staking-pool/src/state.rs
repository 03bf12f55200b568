use anchor_lang::prelude::*;
use static_assertions::const_assert_eq;

use crate::{
    accrual::{self, Accrual},
    errors::ErrorCode,
    metaplex::{self, MAX_SYMBOL_LENGTH},
};

/// Default accrual period used by the CLI when none is given: one day.
pub const SECONDS_PER_DAY: i64 = 60 * 60 * 24;
/// Seed suffix of [StakeRecord] PDAs.
pub const STAKE_RECORD_SEED: &[u8] = b"stakeRecord";

#[account]
#[derive(Debug)]
pub struct Pool {
    /// Creator of the Pool
    pub owner: Pubkey,
    /// Random key the Pool PDA is derived from. Necessary for signer seeds
    pub rand: Pubkey,
    /** Mint of the fungible token paid out as reward */
    pub reward_mint: Pubkey,
    /** Associated token account of the Pool holding the reward supply */
    pub reward_account: Pubkey,
    /** Reward units paid for every fully elapsed period */
    pub reward_amount: u64,
    /** Length of one accrual period in seconds */
    pub period: i64,
    /** Maximum number of periods a single StakeRecord can be paid for */
    pub withdrawable: u8,
    /** Metaplex symbol an NFT must carry to be staked in this Pool */
    pub stake_collection: String,
    /** Bump seed of the Pool PDA */
    pub bump: u8,
}

impl Pool {
    /// Serialized size including the discriminator. `stake_collection` is
    /// allocated at its maximum length.
    pub const LEN: usize = 8 + 32 + 32 + 32 + 32 + 8 + 8 + 1 + 4 + MAX_SYMBOL_LENGTH + 1;

    /// Throw error if the configuration can never accrue rewards correctly.
    pub fn validate_config(period: i64, stake_collection: &str) -> Result<()> {
        require!(period > 0, ErrorCode::InvalidPeriod);
        require!(
            !stake_collection.is_empty() && stake_collection.len() <= MAX_SYMBOL_LENGTH,
            ErrorCode::InvalidStakeCollection
        );
        Ok(())
    }

    /// Compare a Metaplex symbol against the Pool's collection. On-chain symbols
    /// are right padded with NUL bytes up to `MAX_SYMBOL_LENGTH`.
    pub fn is_collection_member(&self, symbol: &str) -> bool {
        metaplex::trim_padding(symbol) == self.stake_collection
    }
}

/// Bookkeeping for one staked NFT. The field order is part of the public
/// interface: clients filter on `owner` at offset 9 and `pool` at offset 41.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StakeRecord {
    /** Set once the NFT was returned to its owner. Terminal */
    pub unstaked: bool,
    /** Pubkey that staked the NFT */
    pub owner: Pubkey,
    /** Pool the NFT is staked in */
    pub pool: Pubkey,
    /** Custody token account of the Pool holding the NFT */
    pub account: Pubkey,
    /** Timestamp in seconds of when the NFT was staked */
    pub stake_time: i64,
    /** Number of periods already paid out */
    pub withdrawn_number: u8,
}

impl StakeRecord {
    pub const LEN: usize = 8 + 1 + 32 + 32 + 32 + 8 + 1;
    pub const UNSTAKED_OFFSET: usize = 8;
    pub const OWNER_OFFSET: usize = 9;
    pub const POOL_OFFSET: usize = 41;

    /// Periods earned by this record at `now`, bounded by the Pool's `withdrawable`.
    pub fn accrued(&self, pool: &Pool, now: i64) -> Result<Accrual> {
        accrual::accrued(
            now,
            self.stake_time,
            pool.period,
            pool.withdrawable,
            self.withdrawn_number,
        )
    }
}

const_assert_eq!(StakeRecord::LEN, 114);
const_assert_eq!(StakeRecord::OWNER_OFFSET, StakeRecord::UNSTAKED_OFFSET + 1);
const_assert_eq!(StakeRecord::POOL_OFFSET, StakeRecord::OWNER_OFFSET + 32);
