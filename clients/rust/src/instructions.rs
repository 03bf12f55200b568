//! Instruction builders for every program instruction.
use anchor_lang::{InstructionData, ToAccountMetas};
use nft_staking_pool::pda;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

/// Create the Pool derived from `rand` together with its reward account.
pub fn init_pool(
    owner: &Pubkey,
    rand: &Pubkey,
    reward_mint: &Pubkey,
    reward_amount: u64,
    period: i64,
    withdrawable: u8,
    stake_collection: String,
) -> Instruction {
    let (pool, bump) = pda::find_pool_address(rand);
    Instruction {
        program_id: nft_staking_pool::ID,
        accounts: nft_staking_pool::accounts::InitPool {
            owner: *owner,
            pool,
            rand: *rand,
            reward_mint: *reward_mint,
            reward_account: pda::get_reward_account_address(&pool, reward_mint),
            token_program: anchor_spl::token::ID,
            associated_token_program: anchor_spl::associated_token::ID,
            system_program: system_program::ID,
            rent: sysvar::rent::ID,
        }
        .to_account_metas(None),
        data: nft_staking_pool::instruction::InitPool {
            bump,
            reward_amount,
            period,
            withdrawable,
            stake_collection,
        }
        .data(),
    }
}

pub fn stake(
    owner: &Pubkey,
    pool: &Pubkey,
    nft_mint: &Pubkey,
    source_nft_account: &Pubkey,
    nonce: u32,
) -> Instruction {
    Instruction {
        program_id: nft_staking_pool::ID,
        accounts: nft_staking_pool::accounts::Stake {
            owner: *owner,
            pool: *pool,
            stake_record: pda::find_stake_record_address(owner, pool, nonce).0,
            nft_mint: *nft_mint,
            metadata: pda::find_metadata_address(nft_mint).0,
            source_nft_account: *source_nft_account,
            dest_nft_account: pda::get_custody_address(pool, nft_mint),
            token_program: anchor_spl::token::ID,
            associated_token_program: anchor_spl::associated_token::ID,
            system_program: system_program::ID,
            rent: sysvar::rent::ID,
            clock: sysvar::clock::ID,
        }
        .to_account_metas(None),
        data: nft_staking_pool::instruction::Stake { nonce }.data(),
    }
}

/// Return the NFT held in `custody` to the owner's `dest_nft_account`.
pub fn unstake(
    owner: &Pubkey,
    pool: &Pubkey,
    stake_record: &Pubkey,
    custody: &Pubkey,
    dest_nft_account: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: nft_staking_pool::ID,
        accounts: nft_staking_pool::accounts::Unstake {
            owner: *owner,
            pool: *pool,
            stake_record: *stake_record,
            source_nft_account: *custody,
            dest_nft_account: *dest_nft_account,
            token_program: anchor_spl::token::ID,
            clock: sysvar::clock::ID,
        }
        .to_account_metas(None),
        data: nft_staking_pool::instruction::Unstake {}.data(),
    }
}

fn claim_base(
    owner: &Pubkey,
    pool: &Pubkey,
    reward_account: &Pubkey,
    stake_record: &Pubkey,
    dest_reward_account: &Pubkey,
) -> nft_staking_pool::accounts::ClaimBase {
    nft_staking_pool::accounts::ClaimBase {
        owner: *owner,
        pool: *pool,
        stake_record: *stake_record,
        source_reward_account: *reward_account,
        dest_reward_account: *dest_reward_account,
        token_program: anchor_spl::token::ID,
        clock: sysvar::clock::ID,
    }
}

pub fn claim(
    owner: &Pubkey,
    pool: &Pubkey,
    reward_account: &Pubkey,
    stake_record: &Pubkey,
    dest_reward_account: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: nft_staking_pool::ID,
        accounts: nft_staking_pool::accounts::Claim {
            claim_base: claim_base(
                owner,
                pool,
                reward_account,
                stake_record,
                dest_reward_account,
            ),
        }
        .to_account_metas(None),
        data: nft_staking_pool::instruction::Claim {}.data(),
    }
}

/// Claim for every record in `stake_records` in one atomic instruction.
/// Returns `None` when there is nothing to claim for.
pub fn claim_all(
    owner: &Pubkey,
    pool: &Pubkey,
    reward_account: &Pubkey,
    stake_records: &[Pubkey],
    dest_reward_account: &Pubkey,
) -> Option<Instruction> {
    let (first, rest) = stake_records.split_first()?;
    let mut accounts = nft_staking_pool::accounts::ClaimAll {
        claim_base: claim_base(owner, pool, reward_account, first, dest_reward_account),
    }
    .to_account_metas(None);
    accounts.extend(rest.iter().map(|record| AccountMeta::new(*record, false)));

    Some(Instruction {
        program_id: nft_staking_pool::ID,
        accounts,
        data: nft_staking_pool::instruction::ClaimAll {}.data(),
    })
}

/// Create `wallet`'s associated token account for `mint` unless it already exists.
pub fn create_associated_token_account(payer: &Pubkey, wallet: &Pubkey, mint: &Pubkey) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account_idempotent(
        payer,
        wallet,
        mint,
        &anchor_spl::token::ID,
    )
}
