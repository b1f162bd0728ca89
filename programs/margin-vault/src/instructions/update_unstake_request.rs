use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::UnstakeRequestRevised,
    state::{UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct UpdateUnstakeRequest<'info> {
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump = user_account.bump,
        has_one = vault @ VaultError::VaultMismatch,
        has_one = authority @ VaultError::Unauthorized
    )]
    pub user_account: Box<Account<'info, UserVaultAccount>>,

    pub authority: Signer<'info>,
}

pub fn update_unstake_request(
    ctx: Context<UpdateUnstakeRequest>,
    amount: u64,
    max: bool,
    cancel: bool,
) -> Result<()> {
    let user = &mut ctx.accounts.user_account;

    user.revise_unstake_request(amount, max, cancel)?;

    emit!(UnstakeRequestRevised {
        user_account: user.key(),
        amount: user.user_unstake.amount,
        max: user.user_unstake.max,
        cancel: user.user_unstake.cancel,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
