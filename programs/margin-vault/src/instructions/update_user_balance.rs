use anchor_lang::prelude::*;

use crate::{
    errors::VaultError,
    events::UserBalanceUpdated,
    state::{UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct UpdateUserBalance<'info> {
    #[account(
        mut,
        has_one = manager @ VaultError::Unauthorized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        has_one = vault @ VaultError::VaultMismatch
    )]
    pub user_account: Box<Account<'info, UserVaultAccount>>,

    pub manager: Signer<'info>,
}

pub fn update_user_balance(ctx: Context<UpdateUserBalance>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let user = &mut ctx.accounts.user_account;
    let equity_before = user.equity;

    vault.settle_user_balance(user)?;

    emit!(UserBalanceUpdated {
        vault: vault.key(),
        user_account: user.key(),
        equity_before,
        equity_after: user.equity,
        day_pnl_bps: vault.day_pnl_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
