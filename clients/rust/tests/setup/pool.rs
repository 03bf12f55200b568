use nft_staking_pool::{pda, state::StakeRecord};
use nft_staking_pool_client::{get_associated_token_address, instructions};
use solana_program_test::{BanksClientError, ProgramTestContext};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

use super::{
    fetch, funded_keypair, send,
    token::{create_associated_account, create_mint, mint_to},
};

pub const COLLECTION: &str = "Gorilla";

pub struct PoolManager {
    /// Creator of the Pool, also mint authority of the reward token
    pub creator: Keypair,
    pub pool: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_account: Pubkey,
}

impl PoolManager {
    /// Pool paying 10 per 60 second period for at most 7 periods.
    pub async fn new(context: &mut ProgramTestContext) -> Self {
        Self::with_args(context, 10, 60, 7).await
    }

    pub async fn with_args(
        context: &mut ProgramTestContext,
        reward_amount: u64,
        period: i64,
        withdrawable: u8,
    ) -> Self {
        let creator = funded_keypair(context).await;
        let reward_mint = create_mint(context, &creator, 6).await;
        let rand = Keypair::new().pubkey();
        let (pool, _) = pda::find_pool_address(&rand);

        let init_pool = instructions::init_pool(
            &creator.pubkey(),
            &rand,
            &reward_mint,
            reward_amount,
            period,
            withdrawable,
            COLLECTION.to_string(),
        );
        send(context, &[init_pool], &[&creator]).await.unwrap();

        Self {
            creator,
            pool,
            reward_mint,
            reward_account: pda::get_reward_account_address(&pool, &reward_mint),
        }
    }

    /// Top up the reward supply of the Pool.
    pub async fn fund(&self, context: &mut ProgramTestContext, amount: u64) {
        mint_to(
            context,
            &self.creator,
            &self.reward_mint,
            &self.reward_account,
            amount,
        )
        .await;
    }

    /// Reward account of `owner`, created when absent.
    pub async fn reward_account_of(&self, context: &mut ProgramTestContext, owner: &Keypair) -> Pubkey {
        create_associated_account(context, owner, &owner.pubkey(), &self.reward_mint).await
    }

    pub async fn stake(
        &self,
        context: &mut ProgramTestContext,
        owner: &Keypair,
        nft_mint: &Pubkey,
        source_nft_account: &Pubkey,
        nonce: u32,
    ) -> Result<Pubkey, BanksClientError> {
        let stake = instructions::stake(
            &owner.pubkey(),
            &self.pool,
            nft_mint,
            source_nft_account,
            nonce,
        );
        send(context, &[stake], &[owner]).await?;
        Ok(pda::find_stake_record_address(&owner.pubkey(), &self.pool, nonce).0)
    }

    /// Unstake into the owner's associated token account of `nft_mint`.
    pub async fn unstake(
        &self,
        context: &mut ProgramTestContext,
        owner: &Keypair,
        stake_record: &Pubkey,
        nft_mint: &Pubkey,
    ) -> Result<(), BanksClientError> {
        let unstake = instructions::unstake(
            &owner.pubkey(),
            &self.pool,
            stake_record,
            &pda::get_custody_address(&self.pool, nft_mint),
            &get_associated_token_address(&owner.pubkey(), nft_mint),
        );
        send(context, &[unstake], &[owner]).await
    }

    pub async fn claim(
        &self,
        context: &mut ProgramTestContext,
        owner: &Keypair,
        stake_record: &Pubkey,
    ) -> Result<(), BanksClientError> {
        let claim = instructions::claim(
            &owner.pubkey(),
            &self.pool,
            &self.reward_account,
            stake_record,
            &get_associated_token_address(&owner.pubkey(), &self.reward_mint),
        );
        send(context, &[claim], &[owner]).await
    }

    pub async fn claim_all(
        &self,
        context: &mut ProgramTestContext,
        owner: &Keypair,
        stake_records: &[Pubkey],
    ) -> Result<(), BanksClientError> {
        let claim_all = instructions::claim_all(
            &owner.pubkey(),
            &self.pool,
            &self.reward_account,
            stake_records,
            &get_associated_token_address(&owner.pubkey(), &self.reward_mint),
        )
        .unwrap();
        send(context, &[claim_all], &[owner]).await
    }

    pub async fn record(&self, context: &mut ProgramTestContext, stake_record: &Pubkey) -> StakeRecord {
        fetch(context, stake_record).await
    }
}
