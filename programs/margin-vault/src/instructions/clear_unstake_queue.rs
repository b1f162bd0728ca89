use anchor_lang::prelude::*;

use crate::{
    errors::VaultError,
    events::QueueCleared,
    state::{RequestQueue, Vault},
};

#[derive(Accounts)]
pub struct ClearUnstakeQueue<'info> {
    #[account(has_one = manager @ VaultError::Unauthorized)]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        address = vault.unstake_queue @ VaultError::QueueMismatch
    )]
    pub unstake_queue: AccountLoader<'info, RequestQueue>,

    pub manager: Signer<'info>,
}

pub fn clear_unstake_queue(ctx: Context<ClearUnstakeQueue>) -> Result<()> {
    let mut queue = ctx.accounts.unstake_queue.load_mut()?;
    let dropped = queue.count;
    queue.clear();

    emit!(QueueCleared {
        vault: ctx.accounts.vault.key(),
        queue: ctx.accounts.unstake_queue.key(),
        dropped,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
