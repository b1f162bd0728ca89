use anchor_lang::prelude::*;

use crate::constants::MAX_REQUESTS;
use crate::errors::VaultError;

/// Fixed-capacity FIFO of user vault accounts awaiting batch settlement.
///
/// One account serves each direction (stake / unstake), distinguished by its
/// PDA seed. Entries are appended in submission order and processed in that
/// order; slots at or beyond `count` hold the default pubkey sentinel.
#[account(zero_copy)]
pub struct RequestQueue {
    pub vault: Pubkey,
    pub capacity: u32,
    pub count: u32,
    pub orders: [Pubkey; MAX_REQUESTS],
}

impl RequestQueue {
    pub const LEN: usize = 8 + std::mem::size_of::<Self>();

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Append a user account reference in submission order.
    pub fn push(&mut self, user_account: Pubkey) -> Result<()> {
        require!(!self.is_full(), VaultError::QueueFull);
        self.orders[self.count as usize] = user_account;
        self.count += 1;
        Ok(())
    }

    /// The queued references, earliest submitter first.
    pub fn entries(&self) -> &[Pubkey] {
        &self.orders[..self.count as usize]
    }

    /// Reset to empty, sentinel-filling the consumed slots.
    pub fn clear(&mut self) {
        self.orders[..self.count as usize].fill(Pubkey::default());
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_queue() -> RequestQueue {
        RequestQueue {
            vault: Pubkey::new_unique(),
            capacity: MAX_REQUESTS as u32,
            count: 0,
            orders: [Pubkey::default(); MAX_REQUESTS],
        }
    }

    #[test]
    fn struct_size() {
        assert_eq!(std::mem::size_of::<RequestQueue>(), 32 + 4 + 4 + 32 * MAX_REQUESTS);
    }

    #[test]
    fn preserves_submission_order() {
        let mut queue = empty_queue();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        queue.push(first).unwrap();
        queue.push(second).unwrap();
        assert_eq!(queue.count, 2);
        assert_eq!(queue.entries(), &[first, second]);
    }

    #[test]
    fn rejects_push_at_capacity() {
        let mut queue = empty_queue();
        queue.capacity = 2;
        queue.push(Pubkey::new_unique()).unwrap();
        queue.push(Pubkey::new_unique()).unwrap();
        assert_eq!(
            queue.push(Pubkey::new_unique()),
            Err(VaultError::QueueFull.into())
        );
        assert_eq!(queue.count, 2);
    }

    #[test]
    fn clear_resets_and_sentinel_fills() {
        let mut queue = empty_queue();
        queue.push(Pubkey::new_unique()).unwrap();
        queue.push(Pubkey::new_unique()).unwrap();
        queue.clear();
        assert_eq!(queue.count, 0);
        assert!(queue.entries().is_empty());
        assert!(queue.orders.iter().all(|k| *k == Pubkey::default()));
    }
}
