mod setup;

use nft_staking_pool::errors::ErrorCode;
use nft_staking_pool_client::{get_associated_token_address, instructions};
use setup::{
    funded_keypair, send, set_clock, start,
    pool::PoolManager,
    token::{mint_nft, token_balance},
};
use solana_program_test::{tokio, ProgramTestContext};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

const STAKE_TIME: i64 = 1_700_000_000;

/// Stake `count` collection NFTs of `owner` at [STAKE_TIME].
async fn stake_nfts(
    context: &mut ProgramTestContext,
    manager: &PoolManager,
    owner: &Keypair,
    count: u32,
) -> Vec<Pubkey> {
    set_clock(context, STAKE_TIME).await;
    let mut records = Vec::new();
    for nonce in 0..count {
        let name = format!("{nonce} - Silverback");
        let (mint, account) = mint_nft(context, owner, &name, "Gorilla").await;
        let record = manager
            .stake(context, owner, &mint, &account, nonce)
            .await
            .unwrap();
        records.push(record);
    }
    records
}

#[tokio::test]
async fn claim_pays_capped_periods_once() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 1_000).await;
    let owner = funded_keypair(&mut context).await;
    let records = stake_nfts(&mut context, &manager, &owner, 1).await;
    let reward_account = manager.reward_account_of(&mut context, &owner).await;

    // floor(650 / 60) = 10 periods, capped to 7

    set_clock(&mut context, STAKE_TIME + 650).await;
    manager.claim(&mut context, &owner, &records[0]).await.unwrap();
    assert_eq!(token_balance(&mut context, &reward_account).await, 70);
    assert_eq!(manager.record(&mut context, &records[0]).await.withdrawn_number, 7);

    // Nothing more is owed afterwards.

    set_clock(&mut context, STAKE_TIME + 700).await;
    manager.claim(&mut context, &owner, &records[0]).await.unwrap();
    assert_eq!(token_balance(&mut context, &reward_account).await, 70);
    assert_eq!(token_balance(&mut context, &manager.reward_account).await, 930);
}

#[tokio::test]
async fn claim_after_unstake_pays_nothing() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 1_000).await;
    let owner = funded_keypair(&mut context).await;
    set_clock(&mut context, STAKE_TIME).await;
    let (mint, account) = mint_nft(&mut context, &owner, "1 - Silverback", "Gorilla").await;
    let stake_record = manager
        .stake(&mut context, &owner, &mint, &account, 0)
        .await
        .unwrap();
    let reward_account = manager.reward_account_of(&mut context, &owner).await;

    // Three periods are earned but never claimed before unstaking.

    set_clock(&mut context, STAKE_TIME + 185).await;
    manager
        .unstake(&mut context, &owner, &stake_record, &mint)
        .await
        .unwrap();

    manager.claim(&mut context, &owner, &stake_record).await.unwrap();

    assert_eq!(token_balance(&mut context, &reward_account).await, 0);
    assert_eq!(token_balance(&mut context, &manager.reward_account).await, 1_000);
    assert_eq!(manager.record(&mut context, &stake_record).await.withdrawn_number, 0);
}

#[tokio::test]
async fn claim_all_settles_every_record() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 1_000).await;
    let owner = funded_keypair(&mut context).await;
    let records = stake_nfts(&mut context, &manager, &owner, 3).await;
    let reward_account = manager.reward_account_of(&mut context, &owner).await;

    set_clock(&mut context, STAKE_TIME + 125).await;
    manager.claim_all(&mut context, &owner, &records).await.unwrap();

    // 2 periods of 10 for each of the 3 records
    assert_eq!(token_balance(&mut context, &reward_account).await, 60);
    for record in &records {
        assert_eq!(manager.record(&mut context, record).await.withdrawn_number, 2);
    }
}

#[tokio::test]
async fn fail_underfunded_claim_all_changes_nothing() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 15).await;
    let owner = funded_keypair(&mut context).await;
    let records = stake_nfts(&mut context, &manager, &owner, 2).await;
    let reward_account = manager.reward_account_of(&mut context, &owner).await;

    // Each record earned 10, the pool only holds 15.

    set_clock(&mut context, STAKE_TIME + 60).await;
    let err = manager
        .claim_all(&mut context, &owner, &records)
        .await
        .unwrap_err();

    assert_program_error!(err, ErrorCode::InsufficientRewardBalance);
    assert_eq!(token_balance(&mut context, &reward_account).await, 0);
    assert_eq!(token_balance(&mut context, &manager.reward_account).await, 15);
    for record in &records {
        assert_eq!(manager.record(&mut context, record).await.withdrawn_number, 0);
    }
}

#[tokio::test]
async fn fail_claim_all_with_duplicate_record() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 1_000).await;
    let owner = funded_keypair(&mut context).await;
    let records = stake_nfts(&mut context, &manager, &owner, 2).await;
    let reward_account = manager.reward_account_of(&mut context, &owner).await;
    set_clock(&mut context, STAKE_TIME + 60).await;

    let err = manager
        .claim_all(&mut context, &owner, &[records[0], records[1], records[1]])
        .await
        .unwrap_err();
    assert_program_error!(err, ErrorCode::DuplicateStakeRecord);

    let err = manager
        .claim_all(&mut context, &owner, &[records[0], records[0]])
        .await
        .unwrap_err();
    assert_program_error!(err, ErrorCode::DuplicateStakeRecord);

    assert_eq!(token_balance(&mut context, &reward_account).await, 0);
}

#[tokio::test]
async fn fail_claim_all_with_readonly_record() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 1_000).await;
    let owner = funded_keypair(&mut context).await;
    let records = stake_nfts(&mut context, &manager, &owner, 2).await;
    manager.reward_account_of(&mut context, &owner).await;
    set_clock(&mut context, STAKE_TIME + 60).await;

    let mut claim_all = instructions::claim_all(
        &owner.pubkey(),
        &manager.pool,
        &manager.reward_account,
        &records,
        &get_associated_token_address(&owner.pubkey(), &manager.reward_mint),
    )
    .unwrap();
    if let Some(last) = claim_all.accounts.last_mut() {
        last.is_writable = false;
    }
    let err = send(&mut context, &[claim_all], &[&owner]).await.unwrap_err();

    assert_program_error!(err, ErrorCode::InvalidStakeRecord);
    assert_eq!(manager.record(&mut context, &records[0]).await.withdrawn_number, 0);
}

#[tokio::test]
async fn fail_claim_all_with_record_of_other_owner() {
    let mut context = start().await;
    let manager = PoolManager::new(&mut context).await;
    manager.fund(&mut context, 1_000).await;
    let owner = funded_keypair(&mut context).await;
    let other = funded_keypair(&mut context).await;
    let mut records = stake_nfts(&mut context, &manager, &owner, 1).await;
    records.extend(stake_nfts(&mut context, &manager, &other, 1).await);
    manager.reward_account_of(&mut context, &owner).await;
    set_clock(&mut context, STAKE_TIME + 60).await;

    let err = manager
        .claim_all(&mut context, &owner, &records)
        .await
        .unwrap_err();

    assert_program_error!(err, ErrorCode::InvalidOwner);
}
