pub mod claim;
pub mod list;
pub mod pool;
pub mod stake;

use clap::{Parser, Subcommand};
use nft_staking_pool_client::state::SECONDS_PER_DAY;
use solana_sdk::pubkey::Pubkey;

#[derive(Parser)]
#[clap(about, author, version)]
#[rustfmt::skip]
pub struct Arguments {
    /// Configuration file to use [default: system configuration file].
    #[clap(
        short,
        long = "config",
        global = true,
        value_name = "PATH",
    )]
    pub config_file: Option<String>,

    /// Filepath or URL to a keypair [default: client keypair].
    #[clap(
        long,
        global = true,
        value_name = "PATH",
    )]
    pub keypair: Option<String>,

    /// Show additional information.
    #[clap(
        short,
        long,
        global = true
    )]
    pub verbose: bool,

    /// JSON RPC URL or moniker for the cluster [default: value from configuration file].
    #[clap(
        short,
        long = "url",
        global = true,
        value_name = "URL",
    )]
    pub json_rpc_url: Option<String>,

    /// Pool address.
    #[clap(
        long,
        global = true,
        value_name = "POOL",
    )]
    pub pool: Option<Pubkey>,

    /// Seconds to wait for a transaction to be confirmed.
    #[clap(
        long,
        global = true,
        value_name = "SECONDS",
        default_value = "60",
    )]
    pub timeout: u64,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
#[rustfmt::skip]
pub enum Commands {
    /// Creates a Pool paying a reward token for NFTs of one collection.
    InitPool {
        /// Reward token mint address.
        #[clap(
            value_name = "REWARD_MINT",
        )]
        reward_mint: Pubkey,

        /// Reward units paid per fully elapsed period.
        #[clap(
            value_name = "REWARD_AMOUNT",
        )]
        reward_amount: u64,

        /// Metaplex symbol NFTs must carry to be staked.
        #[clap(
            value_name = "COLLECTION",
        )]
        collection: String,

        /// Length of one period in seconds.
        #[clap(
            long,
            value_name = "SECONDS",
            default_value_t = SECONDS_PER_DAY,
        )]
        period: i64,

        /// Maximum number of periods a single stake is paid for.
        #[clap(
            long,
            value_name = "PERIODS",
            default_value = "7",
        )]
        withdrawable: u8,
    },

    /// Shows the Pool configuration and reward balance.
    PoolInfo,

    /// Lists stakeable NFTs and active stakes of an owner.
    List {
        /// Owner address [default: client keypair address].
        #[clap(
            long,
            value_name = "OWNER",
        )]
        owner: Option<Pubkey>,
    },

    /// Stakes an NFT into the Pool.
    Stake {
        /// NFT mint address.
        #[clap(
            value_name = "MINT",
        )]
        mint: Pubkey,

        /// Token account holding the NFT [default: associated token account].
        #[clap(
            long,
            value_name = "TOKEN_ACCOUNT",
        )]
        token_account: Option<Pubkey>,
    },

    /// Returns a staked NFT to its owner.
    Unstake {
        /// StakeRecord address.
        #[clap(
            value_name = "STAKE_RECORD",
        )]
        stake_record: Pubkey,
    },

    /// Claims rewards of one StakeRecord, or of all active stakes when omitted.
    Claim {
        /// StakeRecord address.
        #[clap(
            value_name = "STAKE_RECORD",
        )]
        stake_record: Option<Pubkey>,
    },

    /// Shows the rewards an owner could claim now.
    Claimable {
        /// Owner address [default: client keypair address].
        #[clap(
            long,
            value_name = "OWNER",
        )]
        owner: Option<Pubkey>,
    },
}

/// Turn a submission into the signature to print, or the error to report.
pub fn confirmed(
    outcome: nft_staking_pool_client::SubmissionOutcome,
) -> Result<solana_sdk::signature::Signature, Box<dyn std::error::Error>> {
    use nft_staking_pool_client::SubmissionOutcome;

    match outcome {
        SubmissionOutcome::Confirmed(signature) => Ok(signature),
        SubmissionOutcome::Failed(err) => Err(err.into()),
        SubmissionOutcome::Unknown(signature) => Err(format!(
            "transaction {signature} was not confirmed in time, query the pool before retrying"
        )
        .into()),
    }
}
