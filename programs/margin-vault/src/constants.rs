use anchor_lang::prelude::*;

/// PDA seeds
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const CUSTODY_SEED: &[u8] = b"custody";
pub const USER_ACCOUNT_SEED: &[u8] = b"user";
pub const STAKE_QUEUE_SEED: &[u8] = b"stake_queue";
pub const UNSTAKE_QUEUE_SEED: &[u8] = b"unstake_queue";

/// Longest vault name accepted at creation (also a PDA seed)
pub const MAX_NAME_LEN: usize = 32;

/// Request queue capacity, fixed when the vault is created
pub const MAX_REQUESTS: usize = 64;

/// Basis-point scale used for day PnL fractions
pub const PNL_BPS_SCALE: i128 = 10_000;

/// External margin venue program ID (mainnet)
pub const MARGIN_PROGRAM_ID: Pubkey = solana_program::pubkey!("6fsa1DEZPWUan3uaL7AbLjpSuCotHDKeCNJLB2obXYRZ");
