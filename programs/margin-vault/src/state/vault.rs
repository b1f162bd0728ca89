use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, PNL_BPS_SCALE};
use crate::errors::VaultError;
use crate::state::user_account::{RequestStatus, UserVaultAccount};

#[account]
#[derive(Default)]
pub struct Vault {
    /// Immutable identifier chosen at creation, also a PDA seed
    pub name: String,

    /// Sole authority permitted to trigger settlement operations
    pub manager: Pubkey,

    /// Collateral mint for all custody accounts under this vault
    pub mint: Pubkey,

    /// Pooled custody token account, owned by the vault authority PDA
    pub custody: Pubkey,

    /// Opaque account at the external margin venue
    pub margin_account: Pubkey,

    pub stake_queue: Pubkey,
    pub unstake_queue: Pubkey,

    /// Maximum aggregate custody deposit across all users
    pub limit: u64,

    /// Aggregate custody-held funds, not yet staked
    pub deposit: u64,

    /// Vault's current claim on the margin position, summed across users
    pub total_equity: u64,

    /// Snapshot of `total_equity` taken at the last vault-balance update,
    /// the base for the day PnL fraction
    pub total_equity_before_settlements: u64,

    /// Signed fractional return of the last vault-balance update, in bps
    pub day_pnl_bps: i64,

    /// Incremented by each vault-balance update; users carry the epoch they
    /// were last propagated at
    pub settlement_epoch: u64,

    /// Users still owed a balance update for the current epoch. Stake and
    /// unstake batches are rejected while this is non-zero.
    pub users_pending_update: u32,

    pub user_count: u32,

    pub bump: u8,
    pub authority_bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl Vault {
    pub const LEN: usize = 8 + // discriminator
        (4 + MAX_NAME_LEN) + // name
        32 + // manager
        32 + // mint
        32 + // custody
        32 + // margin_account
        32 + // stake_queue
        32 + // unstake_queue
        8 + // limit
        8 + // deposit
        8 + // total_equity
        8 + // total_equity_before_settlements
        8 + // day_pnl_bps
        8 + // settlement_epoch
        4 + // users_pending_update
        4 + // user_count
        1 + // bump
        1 + // authority_bump
        32; // _reserved

    /// Custody-side deposit bookkeeping; enforces the vault and per-user caps.
    pub fn record_deposit(&mut self, user: &mut UserVaultAccount, amount: u64) -> Result<()> {
        let vault_total = self
            .deposit
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        require!(vault_total <= self.limit, VaultError::MaxVaultLimit);

        let user_total = user
            .deposit
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        require!(user_total <= user.deposit_limit, VaultError::MaxDepositLimit);

        self.deposit = vault_total;
        user.deposit = user_total;
        Ok(())
    }

    /// Withdrawal draws only from the un-staked custody pool; equity must
    /// first be unstaked through the batch path.
    pub fn record_withdrawal(&mut self, user: &mut UserVaultAccount, amount: u64) -> Result<()> {
        require!(amount <= user.deposit, VaultError::InsufficientDeposit);

        user.deposit = user
            .deposit
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        user.withdrawal = user
            .withdrawal
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.deposit = self
            .deposit
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Batches may not run while users are still owed a balance update.
    pub fn assert_settlement_idle(&self) -> Result<()> {
        require!(self.users_pending_update == 0, VaultError::SettlementInProgress);
        Ok(())
    }

    /// Settle one drained stake intent against the ledger. Returns the
    /// amount to move from custody into the position (zero for cancelled or
    /// already-cleared intents). The ledger is untouched on error.
    pub fn settle_stake(&mut self, user: &mut UserVaultAccount) -> Result<u64> {
        if !user.user_stake.active {
            return Ok(0);
        }
        if user.user_stake.cancel {
            user.user_stake.active = false;
            user.user_stake.status = RequestStatus::Cancelled;
            return Ok(0);
        }

        let amount = if user.user_stake.max {
            user.deposit
        } else {
            user.user_stake.amount
        };
        require!(amount <= user.deposit, VaultError::InsufficientDeposit);

        user.deposit = user
            .deposit
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        user.equity = user
            .equity
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        user.user_total_stake = user
            .user_total_stake
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.deposit = self
            .deposit
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.total_equity = self
            .total_equity
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;

        user.user_stake.active = false;
        user.user_stake.status = RequestStatus::Settled;
        Ok(amount)
    }

    /// Settle one drained unstake intent. Returns the amount to move from
    /// the position back into custody. `max` drains the user's entire
    /// current equity.
    pub fn settle_unstake(&mut self, user: &mut UserVaultAccount) -> Result<u64> {
        if !user.user_unstake.active {
            return Ok(0);
        }
        if user.user_unstake.cancel {
            user.user_unstake.active = false;
            user.user_unstake.status = RequestStatus::Cancelled;
            return Ok(0);
        }

        let amount = if user.user_unstake.max {
            user.equity
        } else {
            user.user_unstake.amount
        };
        require!(amount <= user.equity, VaultError::InsufficientEquity);

        user.equity = user
            .equity
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        user.deposit = user
            .deposit
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        user.user_total_unstake = user
            .user_total_unstake
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.total_equity = self
            .total_equity
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.deposit = self
            .deposit
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;

        user.user_unstake.active = false;
        user.user_unstake.status = RequestStatus::Settled;
        Ok(amount)
    }

    /// Snapshot the PnL base from the venue's reported balance and restart
    /// the per-user propagation cycle. A zero equity base is reported and
    /// skipped rather than treated as an error.
    pub fn begin_settlement(&mut self, current_balance: u64) -> Result<()> {
        self.total_equity_before_settlements = self.total_equity;

        self.day_pnl_bps = if self.total_equity_before_settlements == 0 {
            msg!("vault has no equity base, day pnl reported as zero");
            0
        } else {
            let base = self.total_equity_before_settlements as i128;
            let delta = (current_balance as i128) - base;
            let bps = delta
                .checked_mul(PNL_BPS_SCALE)
                .ok_or(VaultError::MathOverflow)?
                / base;
            i64::try_from(bps).map_err(|_| error!(VaultError::MathOverflow))?
        };

        self.total_equity = current_balance;
        self.settlement_epoch = self
            .settlement_epoch
            .checked_add(1)
            .ok_or(VaultError::MathOverflow)?;
        self.users_pending_update = self.user_count;
        Ok(())
    }

    /// Apply the vault-wide return to one user. Every user absorbs the same
    /// ratio, so the distribution is pro-rata by construction; the exact
    /// u128 ratio is used rather than the rounded bps figure.
    pub fn settle_user_balance(&mut self, user: &mut UserVaultAccount) -> Result<()> {
        require!(
            user.settled_epoch != self.settlement_epoch,
            VaultError::UserAlreadySettled
        );

        let base = self.total_equity_before_settlements;
        if base > 0 {
            let scaled = (user.equity as u128)
                .checked_mul(self.total_equity as u128)
                .ok_or(VaultError::MathOverflow)?
                .checked_div(base as u128)
                .ok_or(VaultError::MathOverflow)?;
            user.equity = u64::try_from(scaled).map_err(|_| error!(VaultError::MathOverflow))?;
        }

        user.user_pnl_bps = self.day_pnl_bps;
        user.last_trade_stat.user_total_stake = user.user_total_stake;
        user.last_trade_stat.user_total_unstake = user.user_total_unstake;
        user.last_trade_stat.realised_pnl_bps = self.day_pnl_bps;
        user.settled_epoch = self.settlement_epoch;
        self.users_pending_update = self.users_pending_update.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::user_account::{PendingRequest, TradeStat};

    fn vault_with_limit(limit: u64) -> Vault {
        Vault {
            limit,
            ..Default::default()
        }
    }

    fn funded_user(vault: &mut Vault, amount: u64) -> UserVaultAccount {
        let mut user = UserVaultAccount {
            deposit_limit: u64::MAX,
            ..Default::default()
        };
        vault.record_deposit(&mut user, amount).unwrap();
        user
    }

    #[test]
    fn deposit_respects_vault_limit() {
        let mut vault = vault_with_limit(1_000);
        let mut user = UserVaultAccount {
            deposit_limit: u64::MAX,
            ..Default::default()
        };
        vault.record_deposit(&mut user, 600).unwrap();
        assert_eq!(
            vault.record_deposit(&mut user, 500),
            Err(VaultError::MaxVaultLimit.into())
        );
        assert_eq!(vault.deposit, 600);
        assert_eq!(user.deposit, 600);
    }

    #[test]
    fn deposit_respects_user_limit() {
        let mut vault = vault_with_limit(u64::MAX);
        let mut user = UserVaultAccount {
            deposit_limit: 100,
            ..Default::default()
        };
        assert_eq!(
            vault.record_deposit(&mut user, 101),
            Err(VaultError::MaxDepositLimit.into())
        );
        vault.record_deposit(&mut user, 100).unwrap();
    }

    #[test]
    fn withdrawal_draws_only_from_custody() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(400, false).unwrap();
        vault.settle_stake(&mut user).unwrap();

        // equity is not withdrawable without unstaking first
        assert_eq!(
            vault.record_withdrawal(&mut user, 200),
            Err(VaultError::InsufficientDeposit.into())
        );
        vault.record_withdrawal(&mut user, 100).unwrap();
        assert_eq!(user.deposit, 0);
        assert_eq!(user.withdrawal, 100);
        assert_eq!(vault.deposit, 0);
    }

    #[test]
    fn stake_moves_fixed_amount() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(300, false).unwrap();

        let moved = vault.settle_stake(&mut user).unwrap();
        assert_eq!(moved, 300);
        assert_eq!(user.deposit, 200);
        assert_eq!(user.equity, 300);
        assert_eq!(user.user_total_stake, 300);
        assert_eq!(vault.deposit, 200);
        assert_eq!(vault.total_equity, 300);
        assert!(!user.user_stake.active);
        assert_eq!(user.user_stake.status, RequestStatus::Settled);
    }

    #[test]
    fn stake_uses_full_deposit_when_max() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        // the submitted amount is ignored once max is set
        user.begin_stake_request(42, true).unwrap();

        let moved = vault.settle_stake(&mut user).unwrap();
        assert_eq!(moved, 500);
        assert_eq!(user.deposit, 0);
        assert_eq!(user.equity, 500);
    }

    #[test]
    fn stake_fails_on_insufficient_deposit() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 100);
        user.begin_stake_request(200, false).unwrap();

        assert_eq!(
            vault.settle_stake(&mut user),
            Err(VaultError::InsufficientDeposit.into())
        );
        // ledger untouched on error
        assert_eq!(user.deposit, 100);
        assert_eq!(user.equity, 0);
        assert_eq!(vault.total_equity, 0);
        assert!(user.user_stake.active);
    }

    #[test]
    fn cancelled_stake_is_a_noop() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(200, false).unwrap();
        user.revise_stake_request(0, false, true).unwrap();

        let moved = vault.settle_stake(&mut user).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(user.deposit, 500);
        assert_eq!(user.user_total_stake, 0);
        assert_eq!(
            user.user_stake,
            PendingRequest {
                amount: 200,
                max: false,
                cancel: true,
                active: false,
                status: RequestStatus::Cancelled,
            }
        );
    }

    #[test]
    fn inactive_request_settles_nothing() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        let moved = vault.settle_stake(&mut user).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(user.deposit, 500);
    }

    #[test]
    fn unstake_max_drains_equity() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(0, true).unwrap();
        vault.settle_stake(&mut user).unwrap();

        user.begin_unstake_request(10, true).unwrap();
        let moved = vault.settle_unstake(&mut user).unwrap();
        assert_eq!(moved, 500);
        assert_eq!(user.equity, 0);
        assert_eq!(user.deposit, 500);
        assert_eq!(user.user_total_unstake, 500);
        assert_eq!(vault.total_equity, 0);
        assert_eq!(vault.deposit, 500);
    }

    #[test]
    fn unstake_fails_on_insufficient_equity() {
        let mut vault = vault_with_limit(1_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(100, false).unwrap();
        vault.settle_stake(&mut user).unwrap();

        user.begin_unstake_request(200, false).unwrap();
        assert_eq!(
            vault.settle_unstake(&mut user),
            Err(VaultError::InsufficientEquity.into())
        );
        assert_eq!(user.equity, 100);
        assert!(user.user_unstake.active);
    }

    #[test]
    fn conservation_across_settlements() {
        let mut vault = vault_with_limit(10_000);
        let mut alice = funded_user(&mut vault, 3_000);
        let mut bob = funded_user(&mut vault, 2_000);

        alice.begin_stake_request(1_500, false).unwrap();
        bob.begin_stake_request(0, true).unwrap();
        vault.settle_stake(&mut alice).unwrap();
        vault.settle_stake(&mut bob).unwrap();
        assert_eq!(vault.total_equity, alice.equity + bob.equity);

        bob.begin_unstake_request(700, false).unwrap();
        vault.settle_unstake(&mut bob).unwrap();
        assert_eq!(vault.total_equity, alice.equity + bob.equity);

        // a profitable day, propagated to both users
        vault.begin_settlement(4_200).unwrap();
        vault.settle_user_balance(&mut alice).unwrap();
        vault.settle_user_balance(&mut bob).unwrap();
        let dust = vault.total_equity - (alice.equity + bob.equity);
        assert!(dust <= 1, "rounding dust exceeded tolerance: {dust}");
    }

    #[test]
    fn day_pnl_gain_and_loss() {
        let mut vault = vault_with_limit(10_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(0, true).unwrap();
        vault.settle_stake(&mut user).unwrap();

        vault.begin_settlement(700).unwrap();
        assert_eq!(vault.day_pnl_bps, 4_000);
        assert_eq!(vault.total_equity_before_settlements, 500);
        assert_eq!(vault.total_equity, 700);

        vault.settle_user_balance(&mut user).unwrap();
        vault.begin_settlement(350).unwrap();
        assert_eq!(vault.day_pnl_bps, -5_000);
        assert_eq!(vault.total_equity, 350);
    }

    #[test]
    fn day_pnl_with_zero_base_is_reported_as_zero() {
        let mut vault = vault_with_limit(10_000);
        vault.begin_settlement(900).unwrap();
        assert_eq!(vault.day_pnl_bps, 0);
        assert_eq!(vault.total_equity, 900);
    }

    #[test]
    fn pro_rata_distribution_is_exact() {
        let mut vault = vault_with_limit(10_000);
        let mut alice = funded_user(&mut vault, 300);
        let mut bob = funded_user(&mut vault, 200);
        alice.begin_stake_request(0, true).unwrap();
        bob.begin_stake_request(0, true).unwrap();
        vault.settle_stake(&mut alice).unwrap();
        vault.settle_stake(&mut bob).unwrap();

        vault.begin_settlement(600).unwrap();
        assert_eq!(vault.day_pnl_bps, 2_000);
        vault.settle_user_balance(&mut alice).unwrap();
        vault.settle_user_balance(&mut bob).unwrap();

        assert_eq!(alice.equity, 360);
        assert_eq!(bob.equity, 240);
        assert_eq!(alice.user_pnl_bps, 2_000);
        assert_eq!(bob.user_pnl_bps, 2_000);
    }

    #[test]
    fn user_balance_snapshots_trade_stats() {
        let mut vault = vault_with_limit(10_000);
        let mut user = funded_user(&mut vault, 1_000);
        user.begin_stake_request(800, false).unwrap();
        vault.settle_stake(&mut user).unwrap();
        user.begin_unstake_request(300, false).unwrap();
        vault.settle_unstake(&mut user).unwrap();

        vault.begin_settlement(550).unwrap();
        vault.settle_user_balance(&mut user).unwrap();
        assert_eq!(
            user.last_trade_stat,
            TradeStat {
                user_total_stake: 800,
                user_total_unstake: 300,
                realised_pnl_bps: vault.day_pnl_bps,
            }
        );

        // the snapshot is independent of subsequent activity
        user.begin_stake_request(100, false).unwrap();
        vault.settle_stake(&mut user).unwrap();
        assert_eq!(user.last_trade_stat.user_total_stake, 800);
    }

    #[test]
    fn rejects_double_settlement_in_epoch() {
        let mut vault = vault_with_limit(10_000);
        let mut user = funded_user(&mut vault, 500);
        user.begin_stake_request(0, true).unwrap();
        vault.settle_stake(&mut user).unwrap();

        vault.begin_settlement(700).unwrap();
        vault.settle_user_balance(&mut user).unwrap();
        assert_eq!(
            vault.settle_user_balance(&mut user),
            Err(VaultError::UserAlreadySettled.into())
        );
        assert_eq!(user.equity, 700);
    }

    #[test]
    fn batches_are_gated_until_users_are_updated() {
        let mut vault = vault_with_limit(10_000);
        vault.user_count = 2;
        let mut alice = funded_user(&mut vault, 500);
        let mut bob = funded_user(&mut vault, 500);
        alice.begin_stake_request(0, true).unwrap();
        bob.begin_stake_request(0, true).unwrap();
        vault.settle_stake(&mut alice).unwrap();
        vault.settle_stake(&mut bob).unwrap();

        vault.begin_settlement(1_100).unwrap();
        assert_eq!(vault.users_pending_update, 2);
        assert_eq!(
            vault.assert_settlement_idle(),
            Err(VaultError::SettlementInProgress.into())
        );

        vault.settle_user_balance(&mut alice).unwrap();
        vault.settle_user_balance(&mut bob).unwrap();
        vault.assert_settlement_idle().unwrap();
    }

    // the end-to-end ledger walk from the protocol description: deposit 500,
    // stake everything, venue reports 700, unstake 300
    #[test]
    fn single_user_lifecycle() {
        let mut vault = vault_with_limit(5_000);
        let mut user = funded_user(&mut vault, 500);

        user.begin_stake_request(500, true).unwrap();
        vault.settle_stake(&mut user).unwrap();
        assert_eq!(user.equity, 500);
        assert_eq!(user.deposit, 0);

        vault.begin_settlement(700).unwrap();
        assert_eq!(vault.day_pnl_bps, 4_000);
        vault.settle_user_balance(&mut user).unwrap();
        assert_eq!(user.equity, 700);
        assert_eq!(user.user_pnl_bps, 4_000);

        user.begin_unstake_request(300, false).unwrap();
        vault.settle_unstake(&mut user).unwrap();
        assert_eq!(user.equity, 400);
        assert_eq!(user.user_total_unstake, 300);
        assert_eq!(user.deposit, 300);
        assert_eq!(vault.total_equity, 400);
    }
}
