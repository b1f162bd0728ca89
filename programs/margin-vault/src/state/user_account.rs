use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Lifecycle of a stake or unstake request, kept for auditability after the
/// request leaves the queue.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Inactive,
    Pending,
    Settled,
    Cancelled,
}

/// The single outstanding intent a user may hold per direction.
///
/// `max` means "use the entire eligible balance at settlement time, ignore
/// `amount`". `cancel` means "clear the intent at settlement without moving
/// funds". The submitted `amount`/`max` survive cancellation as an audit
/// trail of what was asked for.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingRequest {
    pub amount: u64,
    pub max: bool,
    pub cancel: bool,
    pub active: bool,
    pub status: RequestStatus,
}

/// Snapshot of a user's lifetime totals written at each balance update.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradeStat {
    pub user_total_stake: u64,
    pub user_total_unstake: u64,
    pub realised_pnl_bps: i64,
}

#[account]
#[derive(Default)]
pub struct UserVaultAccount {
    /// Vault this account belongs to
    pub vault: Pubkey,

    /// Depositor allowed to submit requests and withdraw
    pub authority: Pubkey,

    /// Custody-held funds, not yet staked into the position
    pub deposit: u64,

    /// Maximum custody deposit for this user
    pub deposit_limit: u64,

    /// Lifetime amount withdrawn back to the user's wallet
    pub withdrawal: u64,

    /// Current share of the vault's trading position
    pub equity: u64,

    /// Fractional return applied at the last user-balance update
    pub user_pnl_bps: i64,

    /// Lifetime amounts actually settled into/out of the position.
    /// Cancelled requests never count.
    pub user_total_stake: u64,
    pub user_total_unstake: u64,

    pub user_stake: PendingRequest,
    pub user_unstake: PendingRequest,

    /// Audit trail of the most recent balance update
    pub last_trade_stat: TradeStat,

    /// Last vault settlement epoch propagated to this user
    pub settled_epoch: u64,

    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl UserVaultAccount {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // authority
        8 + // deposit
        8 + // deposit_limit
        8 + // withdrawal
        8 + // equity
        8 + // user_pnl_bps
        8 + // user_total_stake
        8 + // user_total_unstake
        (8 + 1 + 1 + 1 + 1) + // user_stake
        (8 + 1 + 1 + 1 + 1) + // user_unstake
        (8 + 8 + 8) + // last_trade_stat
        8 + // settled_epoch
        1 + // bump
        32; // _reserved

    /// Record a new stake intent. At most one may be outstanding.
    pub fn begin_stake_request(&mut self, amount: u64, max: bool) -> Result<()> {
        require!(!self.user_stake.active, VaultError::StakeRequestActive);
        require!(amount > 0 || max, VaultError::InvalidAmount);

        self.user_stake = PendingRequest {
            amount,
            max,
            cancel: false,
            active: true,
            status: RequestStatus::Pending,
        };
        Ok(())
    }

    /// Record a new unstake intent. At most one may be outstanding.
    pub fn begin_unstake_request(&mut self, amount: u64, max: bool) -> Result<()> {
        require!(!self.user_unstake.active, VaultError::UnstakeRequestActive);
        require!(amount > 0 || max, VaultError::InvalidAmount);

        self.user_unstake = PendingRequest {
            amount,
            max,
            cancel: false,
            active: true,
            status: RequestStatus::Pending,
        };
        Ok(())
    }

    /// Mutate a live stake intent before it is processed. A cancellation
    /// keeps the submitted amount and flags so the audit trail shows what
    /// was originally asked for.
    pub fn revise_stake_request(&mut self, amount: u64, max: bool, cancel: bool) -> Result<()> {
        require!(self.user_stake.active, VaultError::NoActiveRequest);

        if cancel {
            self.user_stake.cancel = true;
        } else {
            require!(amount > 0 || max, VaultError::InvalidAmount);
            self.user_stake.amount = amount;
            self.user_stake.max = max;
            self.user_stake.cancel = false;
        }
        Ok(())
    }

    /// Mutate a live unstake intent before it is processed.
    pub fn revise_unstake_request(&mut self, amount: u64, max: bool, cancel: bool) -> Result<()> {
        require!(self.user_unstake.active, VaultError::NoActiveRequest);

        if cancel {
            self.user_unstake.cancel = true;
        } else {
            require!(amount > 0 || max, VaultError::InvalidAmount);
            self.user_unstake.amount = amount;
            self.user_unstake.max = max;
            self.user_unstake.cancel = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_stake_request() {
        let mut user = UserVaultAccount::default();
        user.begin_stake_request(100, false).unwrap();
        assert_eq!(
            user.begin_stake_request(50, false),
            Err(VaultError::StakeRequestActive.into())
        );
        // an unstake intent is tracked independently
        user.begin_unstake_request(50, false).unwrap();
    }

    #[test]
    fn rejects_zero_amount_without_max() {
        let mut user = UserVaultAccount::default();
        assert_eq!(
            user.begin_stake_request(0, false),
            Err(VaultError::InvalidAmount.into())
        );
        user.begin_stake_request(0, true).unwrap();
        assert!(user.user_stake.max);
    }

    #[test]
    fn revise_requires_active_request() {
        let mut user = UserVaultAccount::default();
        assert_eq!(
            user.revise_stake_request(10, false, false),
            Err(VaultError::NoActiveRequest.into())
        );
        assert_eq!(
            user.revise_unstake_request(10, false, true),
            Err(VaultError::NoActiveRequest.into())
        );
    }

    #[test]
    fn revise_replaces_amount_and_flags() {
        let mut user = UserVaultAccount::default();
        user.begin_stake_request(100, false).unwrap();
        user.revise_stake_request(250, true, false).unwrap();
        assert_eq!(user.user_stake.amount, 250);
        assert!(user.user_stake.max);
        assert!(user.user_stake.active);
    }

    #[test]
    fn cancel_preserves_submitted_fields() {
        let mut user = UserVaultAccount::default();
        user.begin_stake_request(100, false).unwrap();
        user.revise_stake_request(0, false, true).unwrap();
        assert_eq!(user.user_stake.amount, 100);
        assert!(user.user_stake.cancel);
        assert!(user.user_stake.active);
        assert_eq!(user.user_stake.status, RequestStatus::Pending);
    }
}
