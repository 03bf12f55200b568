use anchor_lang::prelude::*;

pub mod accrual;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod macros;
pub mod metaplex;
pub mod pda;
pub mod state;

use crate::instructions::*;

declare_id!("8vfCrbDN1oFdvXn5RTpTJCCfAHxnsw8SBD6niLeD2HDx");

#[program]
pub mod nft_staking_pool {
    use super::*;

    /// Create a [Pool](state::Pool) at the PDA derived from `rand` and the associated
    /// token account that will custody the pool's reward supply.
    ///
    /// `period` is in seconds and must be positive. `withdrawable` caps the number of
    /// periods any single [StakeRecord](state::StakeRecord) can ever be paid for.
    pub fn init_pool(
        ctx: Context<InitPool>,
        bump: u8,
        reward_amount: u64,
        period: i64,
        withdrawable: u8,
        stake_collection: String,
    ) -> Result<()> {
        init_pool::handler(
            ctx,
            bump,
            reward_amount,
            period,
            withdrawable,
            stake_collection,
        )
    }

    /// Stake (aka lock) a single NFT into the [Pool](state::Pool).
    ///
    /// The NFT must be a 0 decimal, supply 1 mint whose Metaplex metadata symbol equals
    /// the pool's `stake_collection`. The token is moved into the pool's associated
    /// token account for the mint, which is created when absent.
    ///
    /// A new [StakeRecord](state::StakeRecord) is created at
    /// `[owner, pool, nonce, "stakeRecord"]`, so the same NFT may be staked again
    /// after it was unstaked by using a different `nonce`.
    pub fn stake(ctx: Context<Stake>, nonce: u32) -> Result<()> {
        stake::handler(ctx, nonce)
    }

    /// Unstake (aka withdraw) the NFT held in custody for a [StakeRecord](state::StakeRecord)
    /// back to an account held by the record owner.
    ///
    /// The record is marked `unstaked` and is kept as an audit trail. Periods that were
    /// earned but not claimed before unstaking are forfeited.
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        unstake::handler(ctx)
    }

    /// Claim the reward periods earned by a single [StakeRecord](state::StakeRecord)
    /// since its last claim.
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        claim::handler(ctx)
    }

    /// Claim for a batch of [StakeRecords](state::StakeRecord) owned by the signer.
    ///
    /// The first record is passed as `stake_record`, any additional records are passed
    /// as writable remaining accounts. The whole batch is validated and the total payout
    /// is checked against the pool's reward balance before any record is updated, so the
    /// batch either pays out completely or fails without effect.
    pub fn claim_all<'info>(ctx: Context<'_, '_, '_, 'info, ClaimAll<'info>>) -> Result<()> {
        claim_all::handler(ctx)
    }
}
