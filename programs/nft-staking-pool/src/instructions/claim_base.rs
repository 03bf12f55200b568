use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    accrual::ClaimPlan,
    errors::ErrorCode,
    events::RewardsClaimed,
    pool_signer_seeds,
    state::{Pool, StakeRecord},
};

#[derive(Accounts)]
pub struct ClaimBase<'info> {
    /// Owner of the StakeRecords being claimed for
    #[account(mut)]
    pub owner: Signer<'info>,

    pub pool: Account<'info, Pool>,

    /// StakeRecord of the owner to claim rewards for
    #[account(
      mut,
      has_one = owner @ ErrorCode::InvalidOwner,
      has_one = pool @ ErrorCode::InvalidPool,
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// Reward custody account of the Pool
    #[account(
      mut,
      address = pool.reward_account @ ErrorCode::InvalidTokenAccount,
    )]
    pub source_reward_account: Account<'info, TokenAccount>,

    /// Token account the rewards are paid into
    #[account(
      mut,
      constraint = dest_reward_account.mint == pool.reward_mint @ ErrorCode::InvalidTokenAccount,
      constraint = dest_reward_account.key() != pool.reward_account @ ErrorCode::InvalidTokenAccount,
    )]
    pub dest_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub clock: Sysvar<'info, Clock>,
}

impl<'info> ClaimBase<'info> {
    /// Transfer reward tokens from the Pool's custody to the owner.
    pub fn transfer_reward_from_pool_to_owner(&self, amount: u64) -> Result<()> {
        let signer_seeds: &[&[&[u8]]] = &[pool_signer_seeds!(self.pool)];
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            Transfer {
                from: self.source_reward_account.to_account_info(),
                to: self.dest_reward_account.to_account_info(),
                authority: self.pool.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(cpi_ctx, amount)
    }

    /// Deserialize and validate StakeRecords passed beyond the named `stake_record`.
    /// Every record must belong to the owner and Pool, be writable, and appear once.
    pub fn load_additional_records(
        &self,
        remaining_accounts: &[AccountInfo<'info>],
    ) -> Result<Vec<Account<'info, StakeRecord>>> {
        let mut seen = vec![self.stake_record.key()];
        let mut records = Vec::with_capacity(remaining_accounts.len());
        for (index, info) in remaining_accounts.iter().enumerate() {
            if seen.contains(info.key) {
                msg!("StakeRecord {} passed more than once", info.key);
                return err!(ErrorCode::DuplicateStakeRecord);
            }
            if !info.is_writable {
                msg!("StakeRecord at remaining account index {} is not writable", index);
                return err!(ErrorCode::InvalidStakeRecord);
            }
            let record = Account::<StakeRecord>::try_from(info).map_err(|e| {
                msg!("Remaining account index {} is not a StakeRecord", index);
                e
            })?;
            require_keys_eq!(record.owner, self.owner.key(), ErrorCode::InvalidOwner);
            require_keys_eq!(record.pool, self.pool.key(), ErrorCode::InvalidPool);
            seen.push(info.key());
            records.push(record);
        }
        Ok(records)
    }

    /// Pay out the total of a ClaimPlan. The Pool's reward balance is checked
    /// before anything moves, so an under-funded Pool fails the whole claim.
    pub fn pay_out(&self, plan: &ClaimPlan) -> Result<()> {
        if plan.total > self.source_reward_account.amount {
            msg!(
                "Pool reward balance {} cannot cover claim of {}",
                self.source_reward_account.amount,
                plan.total
            );
            return err!(ErrorCode::InsufficientRewardBalance);
        }
        if plan.total > 0 {
            self.transfer_reward_from_pool_to_owner(plan.total)?;
        }

        emit!(RewardsClaimed {
            pool: self.pool.key(),
            owner: self.owner.key(),
            records: u16::try_from(plan.withdrawn_numbers.len())
                .map_err(|_| ErrorCode::ArithmeticError)?,
            amount: plan.total,
        });
        Ok(())
    }
}
