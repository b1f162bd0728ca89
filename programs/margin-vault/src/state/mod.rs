pub mod request_queue;
pub mod user_account;
pub mod vault;

pub use request_queue::*;
pub use user_account::*;
pub use vault::*;
