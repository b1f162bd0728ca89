use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::VaultError,
    events::VaultCreated,
    state::{RequestQueue, Vault},
};

#[derive(Accounts)]
#[instruction(name: String)]
pub struct CreateVault<'info> {
    #[account(
        init,
        payer = manager,
        space = Vault::LEN,
        seeds = [VAULT_SEED, name.as_bytes()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init,
        payer = manager,
        space = RequestQueue::LEN,
        seeds = [STAKE_QUEUE_SEED, vault.key().as_ref()],
        bump
    )]
    pub stake_queue: AccountLoader<'info, RequestQueue>,

    #[account(
        init,
        payer = manager,
        space = RequestQueue::LEN,
        seeds = [UNSTAKE_QUEUE_SEED, vault.key().as_ref()],
        bump
    )]
    pub unstake_queue: AccountLoader<'info, RequestQueue>,

    /// Pooled custody token account, owned by the vault authority PDA
    #[account(
        init,
        payer = manager,
        seeds = [CUSTODY_SEED, vault.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = vault_authority,
    )]
    pub custody: Box<Account<'info, TokenAccount>>,

    /// PDA signing custody and venue transfers on the vault's behalf
    /// CHECK: derived and used as authority only
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump
    )]
    pub vault_authority: AccountInfo<'info>,

    /// The vault's account at the external margin venue
    /// CHECK: opaque venue account, validated on every settlement read
    pub margin_account: AccountInfo<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn create_vault(ctx: Context<CreateVault>, name: String, limit: u64) -> Result<()> {
    require!(
        !name.is_empty() && name.len() <= MAX_NAME_LEN,
        VaultError::InvalidName
    );

    let vault = &mut ctx.accounts.vault;
    let vault_key = vault.key();

    vault.name = name.clone();
    vault.manager = ctx.accounts.manager.key();
    vault.mint = ctx.accounts.mint.key();
    vault.custody = ctx.accounts.custody.key();
    vault.margin_account = ctx.accounts.margin_account.key();
    vault.stake_queue = ctx.accounts.stake_queue.key();
    vault.unstake_queue = ctx.accounts.unstake_queue.key();
    vault.limit = limit;
    vault.bump = ctx.bumps.vault;
    vault.authority_bump = ctx.bumps.vault_authority;

    let mut stake_queue = ctx.accounts.stake_queue.load_init()?;
    stake_queue.vault = vault_key;
    stake_queue.capacity = MAX_REQUESTS as u32;

    let mut unstake_queue = ctx.accounts.unstake_queue.load_init()?;
    unstake_queue.vault = vault_key;
    unstake_queue.capacity = MAX_REQUESTS as u32;

    emit!(VaultCreated {
        vault: vault_key,
        name,
        manager: vault.manager,
        limit,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
