use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::UnstakeRequested,
    state::{RequestQueue, UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct RequestToUnstake<'info> {
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump = user_account.bump,
        has_one = vault @ VaultError::VaultMismatch,
        has_one = authority @ VaultError::Unauthorized
    )]
    pub user_account: Box<Account<'info, UserVaultAccount>>,

    #[account(
        mut,
        address = vault.unstake_queue @ VaultError::QueueMismatch
    )]
    pub unstake_queue: AccountLoader<'info, RequestQueue>,

    pub authority: Signer<'info>,
}

pub fn request_to_unstake(ctx: Context<RequestToUnstake>, amount: u64, max: bool) -> Result<()> {
    let user = &mut ctx.accounts.user_account;

    user.begin_unstake_request(amount, max)?;

    let mut queue = ctx.accounts.unstake_queue.load_mut()?;
    let queue_position = queue.count;
    queue.push(user.key())?;

    emit!(UnstakeRequested {
        vault: ctx.accounts.vault.key(),
        user_account: user.key(),
        amount,
        max,
        queue_position,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
