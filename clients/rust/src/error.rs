use solana_client::client_error::reqwest;
use solana_sdk::{pubkey::Pubkey, signer::SignerError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    RpcError(Box<solana_client::client_error::ClientError>),
    #[error("Anchor error: {0}")]
    AnchorError(#[from] anchor_lang::error::Error),
    #[error("Failed to sign transaction: {0}")]
    SignerError(#[from] SignerError),
    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("Failed to decode account {address}: {reason}")]
    AccountDecode { address: Pubkey, reason: String },
    #[error("Failed to fetch off-chain metadata: {0}")]
    MetadataFetch(#[from] reqwest::Error),
    #[error("Failed to parse off-chain metadata: {0}")]
    MetadataParse(#[from] serde_json::Error),
    #[error("StakeRecord {0} already has a request in flight")]
    SubmissionInFlight(Pubkey),
    #[error("No free StakeRecord nonce found")]
    NonceExhausted,
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(value: solana_client::client_error::ClientError) -> Self {
        Self::RpcError(Box::new(value))
    }
}

impl ClientError {
    pub fn decode(address: Pubkey, reason: impl ToString) -> Self {
        Self::AccountDecode {
            address,
            reason: reason.to_string(),
        }
    }
}
