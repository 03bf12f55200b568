pub mod claim;
pub mod claim_all;
pub mod claim_base;
pub mod init_pool;
pub mod stake;
pub mod unstake;

pub use claim::*;
pub use claim_all::*;
pub use claim_base::*;
pub use init_pool::*;
pub use stake::*;
pub use unstake::*;
