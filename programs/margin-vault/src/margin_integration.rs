use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use bytemuck::{Pod, Zeroable};

use crate::constants::MARGIN_PROGRAM_ID;
use crate::errors::VaultError;

/// Margin venue account state (the prefix this program relies on). The venue
/// treats the rest of its layout as private; only the deposit bookkeeping and
/// the settled available balance are read here.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MarginAccount {
    pub owner: Pubkey,
    pub delegate: Pubkey,
    pub deposited: u64,
    pub withdrawn: u64,
    pub available_balance: u64,
    pub _reserved: [u8; 64],
}

const MARGIN_ACCOUNT_DISCRIMINATOR: usize = 8;

/// Venue instruction tags
const IX_DEPOSIT: u8 = 2;
const IX_WITHDRAW: u8 = 3;

/// Accounts shared by the venue's deposit and withdraw instructions.
pub struct MarginTransfer<'a, 'info> {
    pub margin_program: &'a AccountInfo<'info>,
    pub margin_account: &'a AccountInfo<'info>,
    pub margin_vault: &'a AccountInfo<'info>,
    pub custody: &'a AccountInfo<'info>,
    pub authority: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
}

/// Read the position's current available balance from the venue account.
pub fn available_balance(margin_account: &AccountInfo) -> Result<u64> {
    require_keys_eq!(
        *margin_account.owner,
        MARGIN_PROGRAM_ID,
        VaultError::InvalidMarginAccount
    );
    let data = margin_account.try_borrow_data()?;
    let end = MARGIN_ACCOUNT_DISCRIMINATOR + std::mem::size_of::<MarginAccount>();
    require!(data.len() >= end, VaultError::InvalidMarginAccount);

    let state: MarginAccount =
        bytemuck::pod_read_unaligned(&data[MARGIN_ACCOUNT_DISCRIMINATOR..end]);
    Ok(state.available_balance)
}

/// Move `amount` from the custody token account into the margin position.
pub fn deposit(
    accounts: &MarginTransfer,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    invoke_margin(accounts, signer_seeds, IX_DEPOSIT, amount)
}

/// Move `amount` out of the margin position back into custody.
pub fn withdraw(
    accounts: &MarginTransfer,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    invoke_margin(accounts, signer_seeds, IX_WITHDRAW, amount)
}

fn invoke_margin(
    accounts: &MarginTransfer,
    signer_seeds: &[&[&[u8]]],
    tag: u8,
    amount: u64,
) -> Result<()> {
    let mut data = Vec::with_capacity(9);
    data.push(tag);
    data.extend_from_slice(&amount.to_le_bytes());

    let ix = Instruction {
        program_id: MARGIN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*accounts.margin_account.key, false),
            AccountMeta::new(*accounts.margin_vault.key, false),
            AccountMeta::new(*accounts.custody.key, false),
            AccountMeta::new_readonly(*accounts.authority.key, true),
            AccountMeta::new_readonly(*accounts.token_program.key, false),
        ],
        data,
    };

    invoke_signed(
        &ix,
        &[
            accounts.margin_account.clone(),
            accounts.margin_vault.clone(),
            accounts.custody.clone(),
            accounts.authority.clone(),
            accounts.token_program.clone(),
        ],
        signer_seeds,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_account_layout() {
        assert_eq!(std::mem::size_of::<MarginAccount>(), 32 + 32 + 8 + 8 + 8 + 64);
    }
}
