use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::VaultError,
    events::{UnstakeBatchProcessed, UnstakeSettled},
    margin_integration::{self, MarginTransfer},
    state::{RequestQueue, UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct ProcessUnstake<'info> {
    #[account(
        mut,
        has_one = manager @ VaultError::Unauthorized,
        has_one = margin_account @ VaultError::InvalidMarginAccount
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        address = vault.unstake_queue @ VaultError::QueueMismatch
    )]
    pub unstake_queue: AccountLoader<'info, RequestQueue>,

    #[account(
        mut,
        address = vault.custody @ VaultError::VaultMismatch
    )]
    pub custody: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA signing the venue withdrawal
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump
    )]
    pub vault_authority: AccountInfo<'info>,

    /// CHECK: venue account, matched against the vault record
    #[account(mut)]
    pub margin_account: AccountInfo<'info>,

    /// CHECK: venue token vault releasing the unstaked funds
    #[account(mut)]
    pub margin_vault: AccountInfo<'info>,

    /// CHECK: external margin program
    #[account(address = MARGIN_PROGRAM_ID)]
    pub margin_program: AccountInfo<'info>,

    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // Remaining accounts: the queued user vault accounts, writable
}

pub fn process_unstake<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProcessUnstake<'info>>,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.assert_settlement_idle()?;

    let vault_key = vault.key();
    let timestamp = Clock::get()?.unix_timestamp;

    let queued: Vec<Pubkey> = ctx.accounts.unstake_queue.load()?.entries().to_vec();

    let mut total_unstaked = 0u64;
    let mut settled = 0u32;
    let mut cancelled = 0u32;
    let mut skipped = 0u32;

    for entry in &queued {
        let account_info = match ctx
            .remaining_accounts
            .iter()
            .find(|info| info.key == entry && info.is_writable)
        {
            Some(info) => info,
            None => {
                msg!("unstake entry {} has no writable account, skipping", entry);
                skipped += 1;
                continue;
            }
        };

        let mut user: Account<UserVaultAccount> = match Account::try_from(account_info) {
            Ok(user) => user,
            Err(_) => {
                msg!("unstake entry {} is not a live user account, skipping", entry);
                skipped += 1;
                continue;
            }
        };
        if user.vault != vault_key {
            msg!("unstake entry {} belongs to another vault, skipping", entry);
            skipped += 1;
            continue;
        }
        if !user.user_unstake.active {
            skipped += 1;
            continue;
        }

        let was_cancel = user.user_unstake.cancel;
        let amount = vault.settle_unstake(&mut user)?;
        if was_cancel {
            cancelled += 1;
        } else {
            total_unstaked = total_unstaked
                .checked_add(amount)
                .ok_or(VaultError::MathOverflow)?;
            settled += 1;
            emit!(UnstakeSettled {
                vault: vault_key,
                user_account: user.key(),
                amount,
                equity_after: user.equity,
                timestamp,
            });
        }

        user.exit(ctx.program_id)?;
    }

    if total_unstaked > 0 {
        let custody_info = ctx.accounts.custody.to_account_info();
        let token_program_info = ctx.accounts.token_program.to_account_info();
        let signer_seeds: &[&[&[u8]]] = &[&[
            VAULT_AUTHORITY_SEED,
            vault_key.as_ref(),
            &[vault.authority_bump],
        ]];

        margin_integration::withdraw(
            &MarginTransfer {
                margin_program: &ctx.accounts.margin_program,
                margin_account: &ctx.accounts.margin_account,
                margin_vault: &ctx.accounts.margin_vault,
                custody: &custody_info,
                authority: &ctx.accounts.vault_authority,
                token_program: &token_program_info,
            },
            signer_seeds,
            total_unstaked,
        )?;
    }

    ctx.accounts.unstake_queue.load_mut()?.clear();

    emit!(UnstakeBatchProcessed {
        vault: vault_key,
        settled,
        cancelled,
        skipped,
        total_unstaked,
        timestamp,
    });

    Ok(())
}
