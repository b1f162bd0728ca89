use anchor_lang::prelude::*;

use crate::{
    errors::VaultError,
    events::QueueCleared,
    state::{RequestQueue, Vault},
};

#[derive(Accounts)]
pub struct ClearStakeQueue<'info> {
    #[account(has_one = manager @ VaultError::Unauthorized)]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        address = vault.stake_queue @ VaultError::QueueMismatch
    )]
    pub stake_queue: AccountLoader<'info, RequestQueue>,

    pub manager: Signer<'info>,
}

/// Manager recovery path: drops queued references without settling them.
/// The affected users' intents stay as submitted and settle (or cancel) in
/// a later batch once re-queued.
pub fn clear_stake_queue(ctx: Context<ClearStakeQueue>) -> Result<()> {
    let mut queue = ctx.accounts.stake_queue.load_mut()?;
    let dropped = queue.count;
    queue.clear();

    emit!(QueueCleared {
        vault: ctx.accounts.vault.key(),
        queue: ctx.accounts.stake_queue.key(),
        dropped,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
