use anchor_lang::prelude::*;

use crate::{
    errors::VaultError, events::VaultBalanceUpdated, margin_integration, state::Vault,
};

#[derive(Accounts)]
pub struct UpdateVaultBalance<'info> {
    #[account(
        mut,
        has_one = manager @ VaultError::Unauthorized,
        has_one = margin_account @ VaultError::InvalidMarginAccount
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: venue account, read-only balance source
    pub margin_account: AccountInfo<'info>,

    pub manager: Signer<'info>,
}

pub fn update_vault_balance(ctx: Context<UpdateVaultBalance>) -> Result<()> {
    let current_balance = margin_integration::available_balance(&ctx.accounts.margin_account)?;

    let vault = &mut ctx.accounts.vault;
    let previous_equity = vault.total_equity;

    vault.begin_settlement(current_balance)?;

    emit!(VaultBalanceUpdated {
        vault: vault.key(),
        previous_equity,
        current_balance,
        day_pnl_bps: vault.day_pnl_bps,
        users_pending: vault.users_pending_update,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
