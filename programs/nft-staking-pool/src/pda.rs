//! Address derivation shared by the program and its clients.
use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;

use crate::{metaplex, state::STAKE_RECORD_SEED};

pub const METADATA_SEED: &[u8] = b"metadata";
pub const EDITION_SEED: &[u8] = b"edition";

/// Pool PDA, derived from the random key supplied at creation.
pub fn find_pool_address(rand: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[rand.as_ref()], &crate::ID)
}

pub fn find_stake_record_address(owner: &Pubkey, pool: &Pubkey, nonce: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            owner.as_ref(),
            pool.as_ref(),
            &nonce.to_le_bytes(),
            STAKE_RECORD_SEED,
        ],
        &crate::ID,
    )
}

/// Metaplex metadata account of a mint.
pub fn find_metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            metaplex::ID.as_ref(),
            mint.as_ref(),
        ],
        &metaplex::ID,
    )
}

pub fn find_master_edition_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            metaplex::ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &metaplex::ID,
    )
}

/// Token account of the Pool that holds a staked NFT.
pub fn get_custody_address(pool: &Pubkey, nft_mint: &Pubkey) -> Pubkey {
    get_associated_token_address(pool, nft_mint)
}

/// Token account of the Pool that holds its reward supply.
pub fn get_reward_account_address(pool: &Pubkey, reward_mint: &Pubkey) -> Pubkey {
    get_associated_token_address(pool, reward_mint)
}
