use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::StakeRequested,
    state::{RequestQueue, UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct RequestToStake<'info> {
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
        address = vault.stake_queue @ VaultError::QueueMismatch
    )]
    pub stake_queue: AccountLoader<'info, RequestQueue>,

    pub authority: Signer<'info>,
}

pub fn request_to_stake(ctx: Context<RequestToStake>, amount: u64, max: bool) -> Result<()> {
    let user = &mut ctx.accounts.user_account;

    user.begin_stake_request(amount, max)?;

    let mut queue = ctx.accounts.stake_queue.load_mut()?;
    let queue_position = queue.count;
    queue.push(user.key())?;

    emit!(StakeRequested {
        vault: ctx.accounts.vault.key(),
        user_account: user.key(),
        amount,
        max,
        queue_position,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
