use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

use crate::{
    errors::ErrorCode,
    events::NftStaked,
    metaplex::{self, TokenMetadata},
    pda,
    state::{Pool, StakeRecord, STAKE_RECORD_SEED},
};

#[derive(Accounts)]
#[instruction(nonce: u32)]
pub struct Stake<'info> {
    /// Holder of the NFT and payer of rent
    #[account(mut)]
    pub owner: Signer<'info>,

    pub pool: Box<Account<'info, Pool>>,

    #[account(
      init,
      seeds = [
        owner.key().as_ref(),
        pool.key().as_ref(),
        &nonce.to_le_bytes(),
        STAKE_RECORD_SEED,
      ],
      bump,
      payer = owner,
      space = StakeRecord::LEN,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    #[account(
      constraint = nft_mint.decimals == 0 && nft_mint.supply == 1 @ ErrorCode::InvalidTokenMint,
    )]
    pub nft_mint: Box<Account<'info, Mint>>,

    /// CHECK: Metaplex metadata of `nft_mint`, decoded in `validate_collection`
    #[account(
      address = pda::find_metadata_address(&nft_mint.key()).0 @ ErrorCode::InvalidMetadata,
      owner = metaplex::ID @ ErrorCode::InvalidMetadata,
    )]
    pub metadata: UncheckedAccount<'info>,

    /// Token account of the owner currently holding the NFT
    #[account(
      mut,
      constraint = source_nft_account.mint == nft_mint.key() @ ErrorCode::InvalidTokenAccount,
      constraint = source_nft_account.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
      constraint = source_nft_account.owner != pool.key() @ ErrorCode::InvalidTokenAccount,
      constraint = source_nft_account.amount == 1 @ ErrorCode::InvalidTokenAccount,
    )]
    pub source_nft_account: Box<Account<'info, TokenAccount>>,

    /// Custody account of the Pool for `nft_mint`
    #[account(
      init_if_needed,
      payer = owner,
      associated_token::mint = nft_mint,
      associated_token::authority = pool,
    )]
    pub dest_nft_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
    pub clock: Sysvar<'info, Clock>,
}

impl<'info> Stake<'info> {
    pub fn validate_collection(&self) -> Result<()> {
        let metadata = TokenMetadata::from_account_info(&self.metadata)?;
        require_keys_eq!(
            metadata.mint,
            self.nft_mint.key(),
            ErrorCode::InvalidMetadata
        );
        if !self.pool.is_collection_member(&metadata.symbol) {
            msg!(
                "NFT symbol {:?} is not part of collection {:?}",
                metaplex::trim_padding(&metadata.symbol),
                self.pool.stake_collection
            );
            return err!(ErrorCode::CollectionMismatch);
        }
        Ok(())
    }

    /// Move the NFT from the owner into the Pool's custody.
    pub fn transfer_nft_to_custody(&self) -> Result<()> {
        let cpi_ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.source_nft_account.to_account_info(),
                to: self.dest_nft_account.to_account_info(),
                authority: self.owner.to_account_info(),
            },
        );
        token::transfer(cpi_ctx, 1)
    }
}

pub fn handler(ctx: Context<Stake>, _nonce: u32) -> Result<()> {
    ctx.accounts.validate_collection()?;
    ctx.accounts.transfer_nft_to_custody()?;

    let stake_time = ctx.accounts.clock.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();
    let stake_record = &mut ctx.accounts.stake_record;
    stake_record.unstaked = false;
    stake_record.owner = ctx.accounts.owner.key();
    stake_record.pool = pool_key;
    stake_record.account = ctx.accounts.dest_nft_account.key();
    stake_record.stake_time = stake_time;
    stake_record.withdrawn_number = 0;

    emit!(NftStaked {
        pool: pool_key,
        owner: stake_record.owner,
        stake_record: stake_record.key(),
        nft_mint: ctx.accounts.nft_mint.key(),
        stake_time,
    });
    Ok(())
}
