use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_amount: u64,
    pub period: i64,
    pub withdrawable: u8,
    pub stake_collection: String,
}

#[event]
pub struct NftStaked {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub stake_record: Pubkey,
    pub nft_mint: Pubkey,
    pub stake_time: i64,
}

#[event]
pub struct NftUnstaked {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub stake_record: Pubkey,
    pub nft_mint: Pubkey,
}

#[event]
pub struct RewardsClaimed {
    pub pool: Pubkey,
    pub owner: Pubkey,
    /// Number of StakeRecords settled by the claim
    pub records: u16,
    pub amount: u64,
}
