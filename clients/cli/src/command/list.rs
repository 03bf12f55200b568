use nft_staking_pool_client::StakingClient;
use solana_sdk::pubkey::Pubkey;

pub async fn process_list(
    client: &StakingClient,
    owner: Pubkey,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stakeable = client.get_stakeable_nfts(&owner).await?;
    println!("Stakeable NFTs:");
    for nft in stakeable.ok() {
        println!("  {} {} ({})", nft.mint, nft.off_chain.name, nft.token_account);
    }

    let active = client.get_active_stakes(&owner).await?;
    println!("Active stakes:");
    for stake in active.ok() {
        println!(
            "  {} {} staked at {}, {} periods claimed",
            stake.address,
            stake.name.as_deref().unwrap_or("<unknown>"),
            stake.record.stake_time,
            stake.record.withdrawn_number
        );
    }

    if verbose {
        for (account, mint, reason) in stakeable.skipped().chain(active.skipped()) {
            match mint {
                Some(mint) => println!("Skipped {account} (mint {mint}): {reason}"),
                None => println!("Skipped {account}: {reason}"),
            }
        }
    }
    Ok(())
}
