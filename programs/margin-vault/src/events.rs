use anchor_lang::prelude::*;

#[event]
pub struct VaultCreated {
    pub vault: Pubkey,
    pub name: String,
    pub manager: Pubkey,
    pub limit: u64,
    pub timestamp: i64,
}

#[event]
pub struct UserAccountCreated {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub authority: Pubkey,
    pub deposit_limit: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundsDeposited {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundsWithdrawn {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct StakeRequested {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub amount: u64,
    pub max: bool,
    pub queue_position: u32,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeRequested {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub amount: u64,
    pub max: bool,
    pub queue_position: u32,
    pub timestamp: i64,
}

#[event]
pub struct StakeRequestRevised {
    pub user_account: Pubkey,
    pub amount: u64,
    pub max: bool,
    pub cancel: bool,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeRequestRevised {
    pub user_account: Pubkey,
    pub amount: u64,
    pub max: bool,
    pub cancel: bool,
    pub timestamp: i64,
}

#[event]
pub struct StakeSettled {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub amount: u64,
    pub equity_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeSettled {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub amount: u64,
    pub equity_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct StakeBatchProcessed {
    pub vault: Pubkey,
    pub settled: u32,
    pub cancelled: u32,
    pub skipped: u32,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeBatchProcessed {
    pub vault: Pubkey,
    pub settled: u32,
    pub cancelled: u32,
    pub skipped: u32,
    pub total_unstaked: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultBalanceUpdated {
    pub vault: Pubkey,
    pub previous_equity: u64,
    pub current_balance: u64,
    pub day_pnl_bps: i64,
    pub users_pending: u32,
    pub timestamp: i64,
}

#[event]
pub struct UserBalanceUpdated {
    pub vault: Pubkey,
    pub user_account: Pubkey,
    pub equity_before: u64,
    pub equity_after: u64,
    pub day_pnl_bps: i64,
    pub timestamp: i64,
}

#[event]
pub struct QueueCleared {
    pub vault: Pubkey,
    pub queue: Pubkey,
    pub dropped: u32,
    pub timestamp: i64,
}
