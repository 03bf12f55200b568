use std::fmt;

use solana_sdk::pubkey::Pubkey;

/// Why an enumerated item was left out of the results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The mint of a held token account does not exist.
    MintMissing,
    /// The metadata PDA of the mint does not exist.
    MetadataMissing,
    /// An account was found but could not be decoded.
    AccountDecode(String),
    /// The StakeRecord data could not be decoded.
    RecordDecode(String),
    /// The custody token account of a StakeRecord does not exist.
    CustodyMissing,
    /// The off-chain metadata document could not be fetched or parsed.
    OffChainMetadata(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MintMissing => write!(f, "mint account not found"),
            Self::MetadataMissing => write!(f, "metadata account not found"),
            Self::AccountDecode(reason) => write!(f, "account decode failed: {reason}"),
            Self::RecordDecode(reason) => write!(f, "stake record decode failed: {reason}"),
            Self::CustodyMissing => write!(f, "custody account not found"),
            Self::OffChainMetadata(reason) => write!(f, "off-chain metadata: {reason}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemOutcome<T> {
    Ok(T),
    Skipped {
        /// Account being enumerated, a token account or a StakeRecord
        account: Pubkey,
        /// Mint of the item when it was known before the failure
        mint: Option<Pubkey>,
        reason: SkipReason,
    },
}

/// Per item results of an enumeration. A failing item never aborts the others.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumerationReport<T> {
    pub items: Vec<ItemOutcome<T>>,
}

impl<T> Default for EnumerationReport<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EnumerationReport<T> {
    pub fn push_ok(&mut self, item: T) {
        self.items.push(ItemOutcome::Ok(item));
    }

    pub fn push_skipped(&mut self, account: Pubkey, mint: Option<Pubkey>, reason: SkipReason) {
        log::warn!("skipping {account}: {reason}");
        self.items.push(ItemOutcome::Skipped {
            account,
            mint,
            reason,
        });
    }

    pub fn ok(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(|item| match item {
            ItemOutcome::Ok(item) => Some(item),
            ItemOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&Pubkey, Option<&Pubkey>, &SkipReason)> {
        self.items.iter().filter_map(|item| match item {
            ItemOutcome::Ok(_) => None,
            ItemOutcome::Skipped {
                account,
                mint,
                reason,
            } => Some((account, mint.as_ref(), reason)),
        })
    }

    pub fn into_ok(self) -> Vec<T> {
        self.items
            .into_iter()
            .filter_map(|item| match item {
                ItemOutcome::Ok(item) => Some(item),
                ItemOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    /// Sort the successful items, keeping skipped items after them.
    pub fn sort_ok_by_key<K: Ord>(&mut self, mut key: impl FnMut(&T) -> K) {
        self.items.sort_by(|a, b| match (a, b) {
            (ItemOutcome::Ok(a), ItemOutcome::Ok(b)) => key(a).cmp(&key(b)),
            (ItemOutcome::Ok(_), ItemOutcome::Skipped { .. }) => std::cmp::Ordering::Less,
            (ItemOutcome::Skipped { .. }, ItemOutcome::Ok(_)) => std::cmp::Ordering::Greater,
            (ItemOutcome::Skipped { .. }, ItemOutcome::Skipped { .. }) => {
                std::cmp::Ordering::Equal
            }
        });
    }
}
