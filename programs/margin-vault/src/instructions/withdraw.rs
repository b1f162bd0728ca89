use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::VaultError,
    events::FundsWithdrawn,
    state::{UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
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
        associated_token::mint = vault.mint,
        associated_token::authority = authority
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = vault.custody @ VaultError::VaultMismatch
    )]
    pub custody: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA signing the custody transfer
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump
    )]
    pub vault_authority: AccountInfo<'info>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let user = &mut ctx.accounts.user_account;
    let vault_key = vault.key();

    vault.record_withdrawal(user, amount)?;

    let signer_seeds: &[&[&[u8]]] = &[&[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[vault.authority_bump],
    ]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.custody.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(FundsWithdrawn {
        vault: vault_key,
        user_account: user.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
