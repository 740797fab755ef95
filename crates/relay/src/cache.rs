use std::{collections::HashMap, num::NonZeroUsize};

use alloy_eips::eip2718::Eip2718Error;
use alloy_primitives::{Bytes, TxHash};
use lru::LruCache;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::normalize::normalize_transaction;

/// Transactions promised for a slot, keyed by canonical hash and stored in
/// their normalized (sidecar-less) encoding.
pub type TransactionHashMap = HashMap<TxHash, Bytes>;

/// Default number of slots to remember constraints for. Two epochs.
pub const DEFAULT_SLOT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => panic!("slot capacity is non-zero"),
};

#[derive(Debug, Error)]
pub enum ConstraintsCacheError {
    /// A transaction entry in a non-empty batch was absent (zero-length).
    #[error("cannot add empty transaction")]
    MalformedInput,

    #[error("failed to decode transaction: {0}")]
    Decode(#[from] Eip2718Error),
}

/// Bounded, slot-keyed store of the transactions proposers have committed to.
///
/// Slots are evicted least-recently-used once `capacity` distinct slots are
/// tracked; reads and writes both count as a use. A single lock covers every
/// operation because recency bookkeeping mutates on read.
#[derive(Debug)]
pub struct ConstraintsCache {
    constraints: Mutex<LruCache<u64, TransactionHashMap>>,
}

impl Default for ConstraintsCache {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_CAPACITY)
    }
}

impl ConstraintsCache {
    /// `capacity` is the maximum number of slots to store constraints for.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { constraints: Mutex::new(LruCache::new(capacity)) }
    }

    /// Normalizes `transactions` and stores them under `slot`.
    ///
    /// An empty batch is a no-op and does not touch recency. A malformed or
    /// undecodable element aborts the call; elements already accepted by this
    /// call stay cached, and a previously unknown slot is only created once
    /// its first element has been accepted. Inserting a fresh slot at
    /// capacity evicts the least-recently-used slot, even if a later element
    /// of the same call fails.
    pub fn add_inclusion_constraints(
        &self,
        slot: u64,
        transactions: &[Bytes],
    ) -> Result<(), ConstraintsCacheError> {
        if transactions.is_empty() {
            return Ok(());
        }

        let mut constraints = self.constraints.lock();
        let mut inserted = 0usize;
        for raw in transactions {
            if raw.is_empty() {
                return Err(ConstraintsCacheError::MalformedInput);
            }
            let (hash, normalized) = normalize_transaction(raw)?;

            if inserted == 0
                && !constraints.contains(&slot)
                && constraints.len() == constraints.cap().get()
            {
                if let Some((&lru_slot, _)) = constraints.peek_lru() {
                    debug!(slot = lru_slot, "evicting constraints for least-recently-used slot");
                }
            }
            constraints.get_or_insert_mut(slot, TransactionHashMap::new).insert(hash, normalized);
            trace!(%hash, slot, "cached constraint transaction");
            inserted += 1;
        }
        debug!(slot, transactions = inserted, "added inclusion constraints");
        Ok(())
    }

    /// Returns all promised transactions for `slot`, or `None` if the slot
    /// was never populated or has been evicted. Counts as a use.
    pub fn get(&self, slot: u64) -> Option<TransactionHashMap> {
        self.constraints.lock().get(&slot).cloned()
    }

    /// Scans the cached slots for `hash` in the cache's enumeration order
    /// and returns the first match. Does not disturb recency.
    pub fn find_transaction_by_hash(&self, hash: &TxHash) -> Option<Bytes> {
        self.constraints
            .lock()
            .iter()
            .find_map(|(_, transactions)| transactions.get(hash).cloned())
    }
}
