use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::StakeRequestRevised,
    state::{UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct UpdateStakeRequest<'info> {
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

pub fn update_stake_request(
    ctx: Context<UpdateStakeRequest>,
    amount: u64,
    max: bool,
    cancel: bool,
) -> Result<()> {
    let user = &mut ctx.accounts.user_account;

    user.revise_stake_request(amount, max, cancel)?;

    emit!(StakeRequestRevised {
        user_account: user.key(),
        amount: user.user_stake.amount,
        max: user.user_stake.max,
        cancel: user.user_stake.cancel,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
