use anchor_lang::error_code;

#[error_code]
pub enum ErrorCode {
  #[msg("Period must be greater than zero")]
  InvalidPeriod, // 6000
  #[msg("Stake collection must be between 1 and 10 bytes")]
  InvalidStakeCollection, // 6001
  #[msg("Invalid token account")]
  InvalidTokenAccount, // 6002
  #[msg("Mint is not a single edition NFT")]
  InvalidTokenMint, // 6003
  #[msg("Invalid metadata account")]
  InvalidMetadata, // 6004
  #[msg("NFT does not belong to the pool collection")]
  CollectionMismatch, // 6005
  #[msg("Invalid StakeRecord owner")]
  InvalidOwner, // 6006
  #[msg("StakeRecord belongs to another Pool")]
  InvalidPool, // 6007
  #[msg("StakeRecord is already unstaked")]
  AlreadyUnstaked, // 6008
  #[msg("Invalid StakeRecord account")]
  InvalidStakeRecord, // 6009
  #[msg("StakeRecord passed more than once")]
  DuplicateStakeRecord, // 6010
  #[msg("Pool reward account cannot cover the claim")]
  InsufficientRewardBalance, // 6011
  #[msg("Bad math")]
  ArithmeticError, // 6012
}
