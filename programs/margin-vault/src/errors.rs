use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Unauthorized signer for this operation")]
    Unauthorized,

    #[msg("Vault name is empty or too long")]
    InvalidName,

    #[msg("Amount must be non-zero unless max is set")]
    InvalidAmount,

    #[msg("Stake request already active")]
    StakeRequestActive,

    #[msg("Unstake request already active")]
    UnstakeRequestActive,

    #[msg("No active request to update")]
    NoActiveRequest,

    #[msg("Request queue is full")]
    QueueFull,

    #[msg("Request queue does not belong to this vault")]
    QueueMismatch,

    #[msg("Account does not belong to this vault")]
    VaultMismatch,

    #[msg("Vault deposit limit exceeded")]
    MaxVaultLimit,

    #[msg("User deposit limit exceeded")]
    MaxDepositLimit,

    #[msg("Insufficient custody deposit")]
    InsufficientDeposit,

    #[msg("Insufficient equity")]
    InsufficientEquity,

    #[msg("User balances from the last vault update are still pending")]
    SettlementInProgress,

    #[msg("User already settled for the current epoch")]
    UserAlreadySettled,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid margin account")]
    InvalidMarginAccount,
}
