//! On-chain Metaplex metadata and the off-chain JSON document it points to.
pub use nft_staking_pool::metaplex::trim_padding;
use nft_staking_pool::metaplex::TokenMetadata;
use serde::{Deserialize, Serialize};
use solana_client::client_error::reqwest;
use solana_sdk::pubkey::Pubkey;

use crate::error::ClientError;

/// Off-chain metadata document referenced by a metadata account's `uri`.
/// Fields other than `name`, `symbol` and `image` are kept as-is.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct OffChainMetadata {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OffChainMetadata {
    pub fn from_slice(data: &[u8]) -> Result<Self, ClientError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Number a name of the form `"<prefix><number> - <rest>"` carries, used for
    /// display ordering only. Leading non digits are skipped.
    pub fn ordinal(&self) -> Option<u64> {
        self.name
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .split(" - ")
            .next()
            .and_then(|number| number.trim().parse().ok())
    }
}

/// Decode a Metaplex metadata account.
pub fn decode_metadata(address: &Pubkey, data: &[u8]) -> Result<TokenMetadata, ClientError> {
    TokenMetadata::from_bytes(data).map_err(|err| ClientError::decode(*address, err))
}

pub async fn fetch_off_chain_metadata(
    http: &reqwest::Client,
    uri: &str,
) -> Result<OffChainMetadata, ClientError> {
    let body = http
        .get(trim_padding(uri))
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    OffChainMetadata::from_slice(&body)
}
