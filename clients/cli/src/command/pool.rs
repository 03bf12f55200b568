use std::{sync::Arc, time::Duration};

use nft_staking_pool_client::StakingClient;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer};

use super::confirmed;

pub struct InitPoolArgs {
    /// Reward token mint address.
    pub reward_mint: Pubkey,

    /// Reward units paid per fully elapsed period.
    pub reward_amount: u64,

    /// Length of one period in seconds.
    pub period: i64,

    /// Maximum number of periods a single stake is paid for.
    pub withdrawable: u8,

    /// Metaplex symbol NFTs must carry to be staked.
    pub collection: String,
}

pub async fn process_init_pool(
    rpc_client: Arc<RpcClient>,
    signer: &dyn Signer,
    deadline: Duration,
    args: InitPoolArgs,
) -> Result<(Pubkey, Signature), Box<dyn std::error::Error>> {
    let (client, outcome) = StakingClient::init_pool(
        rpc_client,
        signer,
        &args.reward_mint,
        args.reward_amount,
        args.period,
        args.withdrawable,
        args.collection,
        deadline,
    )
    .await;
    let signature = confirmed(outcome)?;
    Ok((*client.pool(), signature))
}

pub async fn process_pool_info(client: &StakingClient) -> Result<(), Box<dyn std::error::Error>> {
    let view = client.get_pool_data().await?;
    let pool = &view.pool;
    println!("Pool: {}", view.address);
    println!("Owner: {}", pool.owner);
    println!("Reward mint: {}", pool.reward_mint);
    println!("Reward account: {}", pool.reward_account);
    println!("Reward balance: {}", view.reward_balance);
    println!("Reward per period: {}", pool.reward_amount);
    println!("Period: {}s", pool.period);
    println!("Withdrawable periods: {}", pool.withdrawable);
    println!("Collection: {}", pool.stake_collection);
    Ok(())
}
