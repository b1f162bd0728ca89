use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::VaultError,
    events::{StakeBatchProcessed, StakeSettled},
    margin_integration::{self, MarginTransfer},
    state::{RequestQueue, UserVaultAccount, Vault},
};

#[derive(Accounts)]
pub struct ProcessStake<'info> {
    #[account(
        mut,
        has_one = manager @ VaultError::Unauthorized,
        has_one = margin_account @ VaultError::InvalidMarginAccount
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        address = vault.stake_queue @ VaultError::QueueMismatch
    )]
    pub stake_queue: AccountLoader<'info, RequestQueue>,

    #[account(
        mut,
        address = vault.custody @ VaultError::VaultMismatch
    )]
    pub custody: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA signing the venue deposit
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump
    )]
    pub vault_authority: AccountInfo<'info>,

    /// CHECK: venue account, matched against the vault record
    #[account(mut)]
    pub margin_account: AccountInfo<'info>,

    /// CHECK: venue token vault receiving the staked funds
    #[account(mut)]
    pub margin_vault: AccountInfo<'info>,

    /// CHECK: external margin program
    #[account(address = MARGIN_PROGRAM_ID)]
    pub margin_program: AccountInfo<'info>,

    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // Remaining accounts: the queued user vault accounts, writable
}

pub fn process_stake<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProcessStake<'info>>,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.assert_settlement_idle()?;

    let vault_key = vault.key();
    let timestamp = Clock::get()?.unix_timestamp;

    let queued: Vec<Pubkey> = ctx.accounts.stake_queue.load()?.entries().to_vec();

    let mut total_staked = 0u64;
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
                msg!("stake entry {} has no writable account, skipping", entry);
                skipped += 1;
                continue;
            }
        };

        let mut user: Account<UserVaultAccount> = match Account::try_from(account_info) {
            Ok(user) => user,
            Err(_) => {
                msg!("stake entry {} is not a live user account, skipping", entry);
                skipped += 1;
                continue;
            }
        };
        if user.vault != vault_key {
            msg!("stake entry {} belongs to another vault, skipping", entry);
            skipped += 1;
            continue;
        }
        if !user.user_stake.active {
            skipped += 1;
            continue;
        }

        let was_cancel = user.user_stake.cancel;
        let amount = vault.settle_stake(&mut user)?;
        if was_cancel {
            cancelled += 1;
        } else {
            total_staked = total_staked
                .checked_add(amount)
                .ok_or(VaultError::MathOverflow)?;
            settled += 1;
            emit!(StakeSettled {
                vault: vault_key,
                user_account: user.key(),
                amount,
                equity_after: user.equity,
                timestamp,
            });
        }

        user.exit(ctx.program_id)?;
    }

    if total_staked > 0 {
        let custody_info = ctx.accounts.custody.to_account_info();
        let token_program_info = ctx.accounts.token_program.to_account_info();
        let signer_seeds: &[&[&[u8]]] = &[&[
            VAULT_AUTHORITY_SEED,
            vault_key.as_ref(),
            &[vault.authority_bump],
        ]];

        margin_integration::deposit(
            &MarginTransfer {
                margin_program: &ctx.accounts.margin_program,
                margin_account: &ctx.accounts.margin_account,
                margin_vault: &ctx.accounts.margin_vault,
                custody: &custody_info,
                authority: &ctx.accounts.vault_authority,
                token_program: &token_program_info,
            },
            signer_seeds,
            total_staked,
        )?;
    }

    ctx.accounts.stake_queue.load_mut()?.clear();

    emit!(StakeBatchProcessed {
        vault: vault_key,
        settled,
        cancelled,
        skipped,
        total_staked,
        timestamp,
    });

    Ok(())
}
