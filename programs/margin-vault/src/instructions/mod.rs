pub mod clear_stake_queue;
pub mod clear_unstake_queue;
pub mod create_user_account;
pub mod create_vault;
pub mod deposit;
pub mod process_stake;
pub mod process_unstake;
pub mod request_to_stake;
pub mod request_to_unstake;
pub mod update_stake_request;
pub mod update_unstake_request;
pub mod update_user_balance;
pub mod update_vault_balance;
pub mod withdraw;

pub use clear_stake_queue::*;
pub use clear_unstake_queue::*;
pub use create_user_account::*;
pub use create_vault::*;
pub use deposit::*;
pub use process_stake::*;
pub use process_unstake::*;
pub use request_to_stake::*;
pub use request_to_unstake::*;
pub use update_stake_request::*;
pub use update_unstake_request::*;
pub use update_user_balance::*;
pub use update_vault_balance::*;
pub use withdraw::*;
