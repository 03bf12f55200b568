//! Read side of the Metaplex token metadata account.
//!
//! Only the leading fields up to `uri` are decoded. Everything after them varies
//! between metadata versions and is never needed for staking.
use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

anchor_lang::declare_id!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// Account tag of a v1 metadata account.
pub const METADATA_V1_KEY: u8 = 4;
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenMetadata {
    pub key: u8,
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    /// Right padded with NUL bytes up to [MAX_NAME_LENGTH]
    pub name: String,
    /// Right padded with NUL bytes up to [MAX_SYMBOL_LENGTH]
    pub symbol: String,
    /// Right padded with NUL bytes up to [MAX_URI_LENGTH]
    pub uri: String,
}

impl TokenMetadata {
    /// Decode the leading fields of a metadata account, ignoring trailing data.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut buf = data;
        let metadata =
            Self::deserialize(&mut buf).map_err(|_| error!(ErrorCode::InvalidMetadata))?;
        require!(
            metadata.key == METADATA_V1_KEY,
            ErrorCode::InvalidMetadata
        );
        Ok(metadata)
    }

    /// Decode the metadata held by `info`, which must be owned by the metadata program.
    pub fn from_account_info(info: &AccountInfo) -> Result<Self> {
        require_keys_eq!(*info.owner, ID, ErrorCode::InvalidMetadata);
        let data = info.try_borrow_data()?;
        Self::from_bytes(&data)
    }
}

/// Strip the NUL padding Metaplex stores fixed width strings with.
pub fn trim_padding(value: &str) -> &str {
    value.trim_end_matches(char::from(0))
}
