use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod margin_integration;
pub mod state;

use instructions::*;

declare_id!("Cg3eSuYK4cb5KjCbLrSFNXjZdHGCshkMwy9bNi6AK7q8");

#[program]
pub mod margin_vault {
    use super::*;

    /// Create a vault: ledger, both request queues and the pooled custody
    /// account, wired to an account at the external margin venue
    pub fn create_vault(ctx: Context<CreateVault>, name: String, limit: u64) -> Result<()> {
        instructions::create_vault(ctx, name, limit)
    }

    /// Create a depositor's ledger under a vault
    pub fn create_user_account(
        ctx: Context<CreateUserAccount>,
        deposit_limit: u64,
    ) -> Result<()> {
        instructions::create_user_account(ctx, deposit_limit)
    }

    /// Move funds from the depositor's wallet into vault custody
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Move un-staked custody funds back to the depositor's wallet
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    /// Queue an intent to stake custody funds into the margin position
    pub fn request_to_stake(ctx: Context<RequestToStake>, amount: u64, max: bool) -> Result<()> {
        instructions::request_to_stake(ctx, amount, max)
    }

    /// Queue an intent to unstake position equity back into custody
    pub fn request_to_unstake(
        ctx: Context<RequestToUnstake>,
        amount: u64,
        max: bool,
    ) -> Result<()> {
        instructions::request_to_unstake(ctx, amount, max)
    }

    /// Revise or cancel a still-queued stake intent
    pub fn update_stake_request(
        ctx: Context<UpdateStakeRequest>,
        amount: u64,
        max: bool,
        cancel: bool,
    ) -> Result<()> {
        instructions::update_stake_request(ctx, amount, max, cancel)
    }

    /// Revise or cancel a still-queued unstake intent
    pub fn update_unstake_request(
        ctx: Context<UpdateUnstakeRequest>,
        amount: u64,
        max: bool,
        cancel: bool,
    ) -> Result<()> {
        instructions::update_unstake_request(ctx, amount, max, cancel)
    }

    /// Settle the whole stake queue against the margin position (manager)
    pub fn process_stake<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessStake<'info>>,
    ) -> Result<()> {
        instructions::process_stake(ctx)
    }

    /// Settle the whole unstake queue against the margin position (manager)
    pub fn process_unstake<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessUnstake<'info>>,
    ) -> Result<()> {
        instructions::process_unstake(ctx)
    }

    /// Snapshot the venue balance and open a new settlement epoch (manager)
    pub fn update_vault_balance(ctx: Context<UpdateVaultBalance>) -> Result<()> {
        instructions::update_vault_balance(ctx)
    }

    /// Propagate the current epoch's PnL to one user (manager)
    pub fn update_user_balance(ctx: Context<UpdateUserBalance>) -> Result<()> {
        instructions::update_user_balance(ctx)
    }

    /// Drop all queued stake references without settling them (manager)
    pub fn clear_stake_queue(ctx: Context<ClearStakeQueue>) -> Result<()> {
        instructions::clear_stake_queue(ctx)
    }

    /// Drop all queued unstake references without settling them (manager)
    pub fn clear_unstake_queue(ctx: Context<ClearUnstakeQueue>) -> Result<()> {
        instructions::clear_unstake_queue(ctx)
    }
}
