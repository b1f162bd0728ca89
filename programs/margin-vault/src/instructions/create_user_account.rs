use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::UserAccountCreated,
    state::{UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct CreateUserAccount<'info> {
    #[account(
        mut,
        has_one = manager @ VaultError::Unauthorized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init,
        payer = manager,
        space = UserVaultAccount::LEN,
        seeds = [USER_ACCOUNT_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub user_account: Box<Account<'info, UserVaultAccount>>,

    /// The depositor this ledger is created for
    /// CHECK: recorded as the account authority, never read
    pub authority: AccountInfo<'info>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create_user_account(ctx: Context<CreateUserAccount>, deposit_limit: u64) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let user = &mut ctx.accounts.user_account;

    user.vault = vault.key();
    user.authority = ctx.accounts.authority.key();
    user.deposit_limit = deposit_limit;
    // a user joining after a snapshot is not owed that snapshot's PnL
    user.settled_epoch = vault.settlement_epoch;
    user.bump = ctx.bumps.user_account;

    vault.user_count = vault
        .user_count
        .checked_add(1)
        .ok_or(VaultError::MathOverflow)?;

    emit!(UserAccountCreated {
        vault: vault.key(),
        user_account: user.key(),
        authority: user.authority,
        deposit_limit,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
