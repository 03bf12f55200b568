use nft_staking_pool_client::StakingClient;
use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer};

use super::confirmed;

pub async fn process_stake(
    client: &StakingClient,
    signer: &dyn Signer,
    mint: Pubkey,
    token_account: Option<Pubkey>,
) -> Result<Signature, Box<dyn std::error::Error>> {
    let token_account = token_account.unwrap_or_else(|| {
        nft_staking_pool_client::get_associated_token_address(&signer.pubkey(), &mint)
    });
    confirmed(client.stake(signer, &mint, &token_account).await)
}

pub async fn process_unstake(
    client: &StakingClient,
    signer: &dyn Signer,
    stake_record: Pubkey,
) -> Result<Signature, Box<dyn std::error::Error>> {
    confirmed(client.unstake(signer, &stake_record).await)
}
