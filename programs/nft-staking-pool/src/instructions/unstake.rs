use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    errors::ErrorCode,
    events::NftUnstaked,
    pool_signer_seeds,
    state::{Pool, StakeRecord},
};

#[derive(Accounts)]
pub struct Unstake<'info> {
    /// Owner of the StakeRecord
    #[account(mut)]
    pub owner: Signer<'info>,

    pub pool: Account<'info, Pool>,

    #[account(
      mut,
      has_one = owner @ ErrorCode::InvalidOwner,
      has_one = pool @ ErrorCode::InvalidPool,
      constraint = !stake_record.unstaked @ ErrorCode::AlreadyUnstaked,
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// Custody account of the Pool holding the NFT
    #[account(
      mut,
      address = stake_record.account @ ErrorCode::InvalidTokenAccount,
    )]
    pub source_nft_account: Account<'info, TokenAccount>,

    /// Token account of the owner the NFT is returned to
    #[account(
      mut,
      constraint = dest_nft_account.mint == source_nft_account.mint @ ErrorCode::InvalidTokenAccount,
      constraint = dest_nft_account.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
      constraint = dest_nft_account.key() != stake_record.account @ ErrorCode::InvalidTokenAccount,
    )]
    pub dest_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub clock: Sysvar<'info, Clock>,
}

impl<'info> Unstake<'info> {
    /// Transfer the NFT out of custody back to the owner.
    pub fn transfer_nft_to_owner(&self) -> Result<()> {
        let signer_seeds: &[&[&[u8]]] = &[pool_signer_seeds!(self.pool)];
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            Transfer {
                from: self.source_nft_account.to_account_info(),
                to: self.dest_nft_account.to_account_info(),
                authority: self.pool.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(cpi_ctx, 1)
    }
}

pub fn handler(ctx: Context<Unstake>) -> Result<()> {
    ctx.accounts.transfer_nft_to_owner()?;
    ctx.accounts.stake_record.unstaked = true;

    emit!(NftUnstaked {
        pool: ctx.accounts.pool.key(),
        owner: ctx.accounts.owner.key(),
        stake_record: ctx.accounts.stake_record.key(),
        nft_mint: ctx.accounts.source_nft_account.mint,
    });
    Ok(())
}
