use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{events::PoolInitialized, state::Pool};

#[derive(Accounts)]
#[instruction(bump: u8)]
pub struct InitPool<'info> {
    /// Creator of the Pool and payer of rent
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
      init,
      seeds = [rand.key().as_ref()],
      bump = bump,
      payer = owner,
      space = Pool::LEN,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: Only the key is used, as the seed of the Pool PDA.
    pub rand: UncheckedAccount<'info>,

    /// Mint of the token paid out as reward
    pub reward_mint: Account<'info, Mint>,

    /// Associated token account of the Pool that will hold the reward supply
    #[account(
      init,
      payer = owner,
      associated_token::mint = reward_mint,
      associated_token::authority = pool,
    )]
    pub reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(
    ctx: Context<InitPool>,
    bump: u8,
    reward_amount: u64,
    period: i64,
    withdrawable: u8,
    stake_collection: String,
) -> Result<()> {
    Pool::validate_config(period, &stake_collection)?;

    let pool = &mut ctx.accounts.pool;
    pool.owner = ctx.accounts.owner.key();
    pool.rand = ctx.accounts.rand.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.reward_account = ctx.accounts.reward_account.key();
    pool.reward_amount = reward_amount;
    pool.period = period;
    pool.withdrawable = withdrawable;
    pool.stake_collection = stake_collection;
    pool.bump = bump;

    msg!(
        "Pool {} pays {} every {}s for at most {} periods",
        pool.key(),
        reward_amount,
        period,
        withdrawable
    );
    emit!(PoolInitialized {
        pool: pool.key(),
        owner: pool.owner,
        reward_mint: pool.reward_mint,
        reward_amount,
        period,
        withdrawable,
        stake_collection: pool.stake_collection.clone(),
    });
    Ok(())
}
