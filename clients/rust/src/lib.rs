//! Client library of the NFT staking pool program: account queries, instruction
//! builders and transaction submission with a confirmation deadline.
pub mod client;
pub mod error;
pub mod filters;
pub mod guard;
pub mod instructions;
pub mod metadata;
pub mod report;
pub mod submit;

pub use anchor_spl::associated_token::get_associated_token_address;
pub use client::{ActiveStake, ClaimEstimate, PoolView, StakeableNft, StakingClient};
pub use error::ClientError;
pub use guard::SubmissionGuard;
pub use metadata::OffChainMetadata;
pub use nft_staking_pool::{pda, state, ID};
pub use report::{EnumerationReport, ItemOutcome, SkipReason};
pub use submit::{SubmissionError, SubmissionOutcome, DEFAULT_CONFIRMATION_DEADLINE};
