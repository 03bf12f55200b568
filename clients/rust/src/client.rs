use std::{sync::Arc, time::Duration};

use anchor_lang::AccountDeserialize;
use anchor_spl::token::spl_token;
use futures::{stream, StreamExt, TryStreamExt};
use nft_staking_pool::{
    accrual::{self, Accrual},
    errors::ErrorCode,
    pda,
    state::{Pool, StakeRecord},
};
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    client_error::reqwest,
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::RpcFilterType,
};
use solana_sdk::{
    account::{from_account, Account},
    clock::Clock,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    sysvar,
};

use crate::{
    error::ClientError,
    filters,
    guard::SubmissionGuard,
    instructions,
    metadata::{decode_metadata, fetch_off_chain_metadata, trim_padding, OffChainMetadata},
    report::{EnumerationReport, ItemOutcome, SkipReason},
    submit::{submit, SubmissionOutcome, DEFAULT_CONFIRMATION_DEADLINE},
};

/// Most StakeRecords settled by a single `claim_all` transaction.
pub const MAX_CLAIM_BATCH: usize = 20;
/// Concurrent off-chain metadata requests.
const METADATA_FETCH_CONCURRENCY: usize = 8;
const MAX_MULTIPLE_ACCOUNTS: usize = 100;
const NONCE_BATCH: u32 = 32;
const NONCE_SEARCH_LIMIT: u32 = 1024;

/// Pool configuration together with its live reward balance.
#[derive(Debug)]
pub struct PoolView {
    pub address: Pubkey,
    pub pool: Pool,
    pub reward_balance: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StakeableNft {
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub metadata: Pubkey,
    pub name: String,
    pub uri: String,
    pub off_chain: OffChainMetadata,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveStake {
    pub address: Pubkey,
    pub record: StakeRecord,
    pub mint: Pubkey,
    /// Unavailable metadata does not prevent unstaking, so these are optional.
    pub name: Option<String>,
    pub off_chain: Option<OffChainMetadata>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEstimate {
    pub address: Pubkey,
    pub accrual: Accrual,
    pub amount: u64,
}

/// Rewards claimable at the cluster time `now`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimEstimate {
    pub now: i64,
    pub records: Vec<RecordEstimate>,
    pub total: u64,
}

impl ClaimEstimate {
    /// Estimate the payout of `records` with the same accrual the program runs.
    pub fn compute(
        pool: &Pool,
        records: &[(Pubkey, StakeRecord)],
        now: i64,
    ) -> Result<Self, ClientError> {
        let mut estimate = ClaimEstimate {
            now,
            ..Default::default()
        };
        for (address, record) in records.iter().filter(|(_, record)| !record.unstaked) {
            let accrual = record.accrued(pool, now)?;
            let amount = accrual::reward_for(accrual.payable, pool.reward_amount)?;
            estimate.total = estimate
                .total
                .checked_add(amount)
                .ok_or_else(|| anchor_lang::error!(ErrorCode::ArithmeticError))?;
            estimate.records.push(RecordEstimate {
                address: *address,
                accrual,
                amount,
            });
        }
        Ok(estimate)
    }
}

/// Client of a single Pool. Every query returns a fresh snapshot of chain state.
#[derive(Clone)]
pub struct StakingClient {
    rpc_client: Arc<RpcClient>,
    http: reqwest::Client,
    pool: Pubkey,
    guard: SubmissionGuard,
    deadline: Duration,
}

fn program_accounts_config(filters: Vec<RpcFilterType>) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(filters),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Numbered names first in numeric order, then the rest by name.
fn display_order(nft: &StakeableNft) -> (u64, String) {
    (
        nft.off_chain.ordinal().unwrap_or(u64::MAX),
        nft.off_chain.name.clone(),
    )
}

/// Token accounts holding exactly one token, as `(token account, mint)`. Larger
/// balances are not NFTs and are dropped without a report entry.
fn single_token_holdings(
    report: &mut EnumerationReport<StakeableNft>,
    token_accounts: Vec<(Pubkey, Account)>,
) -> Vec<(Pubkey, Pubkey)> {
    let mut holdings = Vec::new();
    for (address, account) in token_accounts {
        match spl_token::state::Account::unpack(&account.data) {
            Ok(token) if token.amount == 1 => holdings.push((address, token.mint)),
            Ok(_) => {}
            Err(err) => report.push_skipped(address, None, SkipReason::AccountDecode(err.to_string())),
        }
    }
    holdings
}

/// Keep the holdings whose mint has 0 decimals. `mints` is aligned with `holdings`.
fn nft_holdings(
    report: &mut EnumerationReport<StakeableNft>,
    holdings: Vec<(Pubkey, Pubkey)>,
    mints: Vec<Option<Account>>,
) -> Vec<(Pubkey, Pubkey)> {
    let mut nfts = Vec::new();
    for ((token_account, mint), mint_account) in holdings.into_iter().zip(mints) {
        let Some(mint_account) = mint_account else {
            report.push_skipped(token_account, Some(mint), SkipReason::MintMissing);
            continue;
        };
        match spl_token::state::Mint::unpack(&mint_account.data) {
            Ok(decoded) if decoded.decimals == 0 => nfts.push((token_account, mint)),
            Ok(_) => {}
            Err(err) => report.push_skipped(
                token_account,
                Some(mint),
                SkipReason::AccountDecode(err.to_string()),
            ),
        }
    }
    nfts
}

impl StakingClient {
    pub fn new(rpc_client: Arc<RpcClient>, pool: Pubkey) -> Self {
        Self {
            rpc_client,
            http: reqwest::Client::new(),
            pool,
            guard: SubmissionGuard::new(),
            deadline: DEFAULT_CONFIRMATION_DEADLINE,
        }
    }

    /// Confirmation deadline of every submitted transaction.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn pool(&self) -> &Pubkey {
        &self.pool
    }

    /// Create a new Pool at a random address and return a client bound to it.
    #[allow(clippy::too_many_arguments)]
    pub async fn init_pool(
        rpc_client: Arc<RpcClient>,
        owner: &dyn Signer,
        reward_mint: &Pubkey,
        reward_amount: u64,
        period: i64,
        withdrawable: u8,
        stake_collection: String,
        deadline: Duration,
    ) -> (Self, SubmissionOutcome) {
        let rand = Keypair::new().pubkey();
        let (pool, _) = pda::find_pool_address(&rand);
        let client = Self::new(rpc_client, pool).with_deadline(deadline);
        let instruction = instructions::init_pool(
            &owner.pubkey(),
            &rand,
            reward_mint,
            reward_amount,
            period,
            withdrawable,
            stake_collection,
        );
        let outcome = client.submit_signed(&[instruction], owner).await;
        (client, outcome)
    }

    async fn submit_signed(
        &self,
        instructions: &[solana_sdk::instruction::Instruction],
        owner: &dyn Signer,
    ) -> SubmissionOutcome {
        let no_signers: [&dyn Signer; 0] = [];
        submit(
            &self.rpc_client,
            instructions,
            owner,
            &no_signers,
            self.deadline,
        )
        .await
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Account, ClientError> {
        self.rpc_client
            .get_account_with_commitment(address, self.rpc_client.commitment())
            .await?
            .value
            .ok_or(ClientError::AccountNotFound(*address))
    }

    /// Fetch many accounts, chunked to the RPC limit.
    async fn get_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>, ClientError> {
        stream::iter(addresses.chunks(MAX_MULTIPLE_ACCOUNTS))
            .map(|chunk| async move {
                self.rpc_client
                    .get_multiple_accounts(chunk)
                    .await
                    .map_err(ClientError::from)
            })
            .buffered(5)
            .try_concat()
            .await
    }

    async fn get_token_account(
        &self,
        address: &Pubkey,
    ) -> Result<spl_token::state::Account, ClientError> {
        let account = self.get_account(address).await?;
        spl_token::state::Account::unpack(&account.data).map_err(|err| ClientError::decode(*address, err))
    }

    async fn get_cluster_time(&self) -> Result<i64, ClientError> {
        let account = self.get_account(&sysvar::clock::ID).await?;
        let clock: Clock = from_account(&account)
            .ok_or_else(|| ClientError::decode(sysvar::clock::ID, "invalid clock sysvar"))?;
        Ok(clock.unix_timestamp)
    }

    pub async fn get_pool_data(&self) -> Result<PoolView, ClientError> {
        let account = self.get_account(&self.pool).await?;
        let pool = Pool::try_deserialize(&mut account.data.as_slice())?;
        let reward_balance = self.get_token_account(&pool.reward_account).await?.amount;
        Ok(PoolView {
            address: self.pool,
            pool,
            reward_balance,
        })
    }

    /// Every StakeRecord of `owner` in the Pool, staked or not.
    pub async fn get_stake_records(
        &self,
        owner: &Pubkey,
    ) -> Result<EnumerationReport<(Pubkey, StakeRecord)>, ClientError> {
        let accounts = self
            .rpc_client
            .get_program_accounts_with_config(
                &nft_staking_pool::ID,
                program_accounts_config(filters::stake_record_filters(owner, &self.pool)),
            )
            .await?;

        let mut report = EnumerationReport::default();
        for (address, account) in accounts {
            match StakeRecord::try_deserialize(&mut account.data.as_slice()) {
                Ok(record) => report.push_ok((address, record)),
                Err(err) => {
                    report.push_skipped(address, None, SkipReason::RecordDecode(err.to_string()))
                }
            }
        }
        Ok(report)
    }

    /// NFTs held by `owner` that can be staked in the Pool, in display order.
    pub async fn get_stakeable_nfts(
        &self,
        owner: &Pubkey,
    ) -> Result<EnumerationReport<StakeableNft>, ClientError> {
        let pool = self.get_pool_data().await?.pool;
        let token_accounts = self
            .rpc_client
            .get_program_accounts_with_config(
                &spl_token::ID,
                program_accounts_config(filters::token_account_filters(owner)),
            )
            .await?;

        let mut report = EnumerationReport::default();
        let holdings = single_token_holdings(&mut report, token_accounts);
        let mint_keys: Vec<Pubkey> = holdings.iter().map(|(_, mint)| *mint).collect();
        let mints = self.get_accounts(&mint_keys).await?;
        let holdings = nft_holdings(&mut report, holdings, mints);

        let metadata_keys: Vec<Pubkey> = holdings
            .iter()
            .map(|(_, mint)| pda::find_metadata_address(mint).0)
            .collect();
        let metadata_accounts = self.get_accounts(&metadata_keys).await?;

        let mut candidates = Vec::new();
        for (((token_account, mint), metadata_key), metadata_account) in holdings
            .into_iter()
            .zip(metadata_keys)
            .zip(metadata_accounts)
        {
            let Some(metadata_account) = metadata_account else {
                report.push_skipped(token_account, Some(mint), SkipReason::MetadataMissing);
                continue;
            };
            let metadata = match decode_metadata(&metadata_key, &metadata_account.data) {
                Ok(metadata) => metadata,
                Err(err) => {
                    report.push_skipped(
                        token_account,
                        Some(mint),
                        SkipReason::AccountDecode(err.to_string()),
                    );
                    continue;
                }
            };
            if !pool.is_collection_member(&metadata.symbol) {
                continue;
            }
            candidates.push(StakeableNft {
                mint,
                token_account,
                metadata: metadata_key,
                name: trim_padding(&metadata.name).to_string(),
                uri: trim_padding(&metadata.uri).to_string(),
                off_chain: OffChainMetadata::default(),
            });
        }

        let fetched: Vec<_> = stream::iter(candidates)
            .map(|nft| async move {
                let off_chain = fetch_off_chain_metadata(&self.http, &nft.uri).await;
                (nft, off_chain)
            })
            .buffered(METADATA_FETCH_CONCURRENCY)
            .collect()
            .await;
        for (mut nft, off_chain) in fetched {
            match off_chain {
                Ok(off_chain) => {
                    nft.off_chain = off_chain;
                    report.push_ok(nft);
                }
                Err(err) => report.push_skipped(
                    nft.token_account,
                    Some(nft.mint),
                    SkipReason::OffChainMetadata(err.to_string()),
                ),
            }
        }
        report.sort_ok_by_key(display_order);
        Ok(report)
    }

    /// StakeRecords of `owner` whose NFT is still in custody.
    pub async fn get_active_stakes(
        &self,
        owner: &Pubkey,
    ) -> Result<EnumerationReport<ActiveStake>, ClientError> {
        let records = self.get_stake_records(owner).await?;
        let mut report = EnumerationReport::default();
        let mut staked = Vec::new();
        for item in records.items {
            match item {
                ItemOutcome::Ok((address, record)) => {
                    if !record.unstaked {
                        staked.push((address, record));
                    }
                }
                ItemOutcome::Skipped {
                    account,
                    mint,
                    reason,
                } => report.items.push(ItemOutcome::Skipped {
                    account,
                    mint,
                    reason,
                }),
            }
        }

        let custody_keys: Vec<Pubkey> = staked.iter().map(|(_, record)| record.account).collect();
        let custody_accounts = self.get_accounts(&custody_keys).await?;
        let mut resolved = Vec::new();
        for ((address, record), custody) in staked.into_iter().zip(custody_accounts) {
            let Some(custody) = custody else {
                report.push_skipped(address, None, SkipReason::CustodyMissing);
                continue;
            };
            match spl_token::state::Account::unpack(&custody.data) {
                Ok(token) => resolved.push((address, record, token.mint)),
                Err(err) => {
                    report.push_skipped(address, None, SkipReason::AccountDecode(err.to_string()))
                }
            }
        }

        let metadata_keys: Vec<Pubkey> = resolved
            .iter()
            .map(|(_, _, mint)| pda::find_metadata_address(mint).0)
            .collect();
        let metadata_accounts = self.get_accounts(&metadata_keys).await?;
        let stakes: Vec<ActiveStake> = stream::iter(resolved.into_iter().zip(metadata_keys).zip(metadata_accounts))
            .map(|(((address, record, mint), metadata_key), metadata_account)| async move {
                let metadata = metadata_account
                    .ok_or(ClientError::AccountNotFound(metadata_key))
                    .and_then(|account| decode_metadata(&metadata_key, &account.data));
                let (name, off_chain) = match metadata {
                    Ok(metadata) => {
                        let off_chain = fetch_off_chain_metadata(&self.http, &metadata.uri)
                            .await
                            .map_err(|err| log::warn!("off-chain metadata of {mint}: {err}"))
                            .ok();
                        (Some(trim_padding(&metadata.name).to_string()), off_chain)
                    }
                    Err(err) => {
                        log::warn!("metadata of {mint}: {err}");
                        (None, None)
                    }
                };
                ActiveStake {
                    address,
                    record,
                    mint,
                    name,
                    off_chain,
                }
            })
            .buffered(METADATA_FETCH_CONCURRENCY)
            .collect()
            .await;
        for stake in stakes {
            report.push_ok(stake);
        }
        Ok(report)
    }

    /// Rewards `owner` could claim now, computed against the cluster clock.
    pub async fn get_claimable_amount(&self, owner: &Pubkey) -> Result<ClaimEstimate, ClientError> {
        let pool = self.get_pool_data().await?.pool;
        let records = self.get_stake_records(owner).await?.into_ok();
        let now = self.get_cluster_time().await?;
        ClaimEstimate::compute(&pool, &records, now)
    }

    async fn next_free_nonce(&self, owner: &Pubkey) -> Result<u32, ClientError> {
        for start in (0..NONCE_SEARCH_LIMIT).step_by(NONCE_BATCH as usize) {
            let addresses: Vec<Pubkey> = (start..start + NONCE_BATCH)
                .map(|nonce| pda::find_stake_record_address(owner, &self.pool, nonce).0)
                .collect();
            let accounts = self.rpc_client.get_multiple_accounts(&addresses).await?;
            if let Some(offset) = accounts.iter().position(Option::is_none) {
                return Ok(start + offset as u32);
            }
        }
        Err(ClientError::NonceExhausted)
    }

    /// Stake the NFT `nft_mint` held in `source_nft_account`.
    pub async fn stake(
        &self,
        owner: &dyn Signer,
        nft_mint: &Pubkey,
        source_nft_account: &Pubkey,
    ) -> SubmissionOutcome {
        let owner_key = owner.pubkey();
        let nonce = match self.next_free_nonce(&owner_key).await {
            Ok(nonce) => nonce,
            Err(err) => return err.into(),
        };
        let (stake_record, _) = pda::find_stake_record_address(&owner_key, &self.pool, nonce);
        let _submission = match self.guard.acquire(&[stake_record]) {
            Ok(submission) => submission,
            Err(err) => return err.into(),
        };

        let instruction = instructions::stake(
            &owner_key,
            &self.pool,
            nft_mint,
            source_nft_account,
            nonce,
        );
        self.submit_signed(&[instruction], owner).await
    }

    /// Return the NFT of `stake_record` to the owner's associated token account.
    pub async fn unstake(&self, owner: &dyn Signer, stake_record: &Pubkey) -> SubmissionOutcome {
        let _submission = match self.guard.acquire(&[*stake_record]) {
            Ok(submission) => submission,
            Err(err) => return err.into(),
        };
        let instructions = match self.unstake_instructions(&owner.pubkey(), stake_record).await {
            Ok(instructions) => instructions,
            Err(err) => return err.into(),
        };
        self.submit_signed(&instructions, owner).await
    }

    async fn unstake_instructions(
        &self,
        owner: &Pubkey,
        stake_record: &Pubkey,
    ) -> Result<Vec<solana_sdk::instruction::Instruction>, ClientError> {
        let record = StakeRecord::try_deserialize(
            &mut self.get_account(stake_record).await?.data.as_slice(),
        )?;
        let mint = self.get_token_account(&record.account).await?.mint;
        let dest_nft_account =
            anchor_spl::associated_token::get_associated_token_address(owner, &mint);
        Ok(vec![
            instructions::create_associated_token_account(owner, owner, &mint),
            instructions::unstake(
                owner,
                &self.pool,
                stake_record,
                &record.account,
                &dest_nft_account,
            ),
        ])
    }

    pub async fn claim(&self, owner: &dyn Signer, stake_record: &Pubkey) -> SubmissionOutcome {
        let _submission = match self.guard.acquire(&[*stake_record]) {
            Ok(submission) => submission,
            Err(err) => return err.into(),
        };
        let pool = match self.get_pool_data().await {
            Ok(view) => view.pool,
            Err(err) => return err.into(),
        };
        let owner_key = owner.pubkey();
        let dest_reward_account =
            anchor_spl::associated_token::get_associated_token_address(&owner_key, &pool.reward_mint);
        let instructions = [
            instructions::create_associated_token_account(&owner_key, &owner_key, &pool.reward_mint),
            instructions::claim(
                &owner_key,
                &self.pool,
                &pool.reward_account,
                stake_record,
                &dest_reward_account,
            ),
        ];
        self.submit_signed(&instructions, owner).await
    }

    /// Claim for every active StakeRecord of the owner, [MAX_CLAIM_BATCH] records
    /// per transaction. Each transaction pays out completely or not at all.
    pub async fn claim_all(&self, owner: &dyn Signer) -> Result<Vec<SubmissionOutcome>, ClientError> {
        let owner_key = owner.pubkey();
        let pool = self.get_pool_data().await?.pool;
        let records: Vec<Pubkey> = self
            .get_stake_records(&owner_key)
            .await?
            .into_ok()
            .into_iter()
            .filter(|(_, record)| !record.unstaked)
            .map(|(address, _)| address)
            .collect();
        let dest_reward_account =
            anchor_spl::associated_token::get_associated_token_address(&owner_key, &pool.reward_mint);

        let mut outcomes = Vec::new();
        for batch in records.chunks(MAX_CLAIM_BATCH) {
            let _submission = match self.guard.acquire(batch) {
                Ok(submission) => submission,
                Err(err) => {
                    outcomes.push(err.into());
                    continue;
                }
            };
            let Some(claim_all) = instructions::claim_all(
                &owner_key,
                &self.pool,
                &pool.reward_account,
                batch,
                &dest_reward_account,
            ) else {
                continue;
            };
            let instructions = [
                instructions::create_associated_token_account(
                    &owner_key,
                    &owner_key,
                    &pool.reward_mint,
                ),
                claim_all,
            ];
            outcomes.push(self.submit_signed(&instructions, owner).await);
        }
        Ok(outcomes)
    }
}
