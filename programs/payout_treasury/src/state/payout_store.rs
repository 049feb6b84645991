use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::constants::{ARCHIVE_CAPACITY, MAX_PENDING_PAYOUTS};
use crate::error::{TreasuryError, TreasuryResult};
use crate::state::{Payout, PayoutStatus};

/// Live payouts, their index, the pending queue and the recent archive.
/// Every collection is bounded: live entries by `MAX_PENDING_PAYOUTS`, the
/// archive by `ARCHIVE_CAPACITY` (events carry the full history).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PayoutStore {
    /// Arena of live records; freed slots are reused.
    slots: Vec<Option<Payout>>,
    free_slots: Vec<u32>,
    /// Live payout id → arena slot.
    index: BTreeMap<u32, u32>,
    /// Lowest id that may still be registered.
    next_id: u32,
    /// Settlement order.
    pending: Vec<u32>,
    /// Always `pending.len()`.
    pending_count: u32,
    /// Most recently completed or cancelled payouts, oldest first.
    archive: Vec<Payout>,
}

impl PayoutStore {
    /// Borsh upper bound of a store at capacity.
    pub const MAX_LEN: usize = 4 + MAX_PENDING_PAYOUTS * (1 + Payout::MAX_LEN) // slots
        + 4 + MAX_PENDING_PAYOUTS * 4 // free_slots
        + 4 + MAX_PENDING_PAYOUTS * 8 // index
        + 4 // next_id
        + 4 + MAX_PENDING_PAYOUTS * 4 // pending
        + 4 // pending_count
        + 4 + ARCHIVE_CAPACITY * Payout::MAX_LEN; // archive

    /// Store a new Pending payout, index it and enqueue it.
    pub fn register(&mut self, payout: Payout) -> TreasuryResult<u32> {
        let id = payout.id();
        if id < self.next_id {
            return Err(TreasuryError::DuplicatePayoutId);
        }
        if self.index.len() >= MAX_PENDING_PAYOUTS {
            return Err(TreasuryError::PendingQueueFull);
        }
        let next_id = id.checked_add(1).ok_or(TreasuryError::MathOverflow)?;
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(payout);
                slot
            }
            None => {
                let slot =
                    u32::try_from(self.slots.len()).map_err(|_| TreasuryError::MathOverflow)?;
                self.slots.push(Some(payout));
                slot
            }
        };
        self.index.insert(id, slot);
        self.next_id = next_id;
        self.enqueue(id)?;
        Ok(slot)
    }

    pub fn lookup(&self, id: u32) -> Option<u32> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: u32) -> Option<&Payout> {
        let slot = self.lookup(id)?;
        self.slots.get(slot as usize)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: u32) -> Option<&mut Payout> {
        let slot = self.lookup(id)?;
        self.slots.get_mut(slot as usize)?.as_mut()
    }

    /// Live record first, recent archive second.
    pub fn find(&self, id: u32) -> Option<&Payout> {
        self.get(id)
            .or_else(|| self.archive.iter().find(|p| p.id() == id))
    }

    pub fn archive_iter(&self) -> impl Iterator<Item = &Payout> {
        self.archive.iter()
    }

    pub fn archive_len(&self) -> usize {
        self.archive.len()
    }

    pub fn pending_ids(&self) -> &[u32] {
        &self.pending
    }

    pub fn pending_count(&self) -> u32 {
        self.pending_count
    }

    pub fn live_count(&self) -> usize {
        self.index.len()
    }

    fn enqueue(&mut self, id: u32) -> TreasuryResult<()> {
        self.pending.push(id);
        self.pending_count = self
            .pending_count
            .checked_add(1)
            .ok_or(TreasuryError::MathOverflow)?;
        Ok(())
    }

    /// Linear in the queue length, which `MAX_PENDING_PAYOUTS` caps.
    fn dequeue(&mut self, id: u32) -> TreasuryResult<()> {
        let pos = self
            .pending
            .iter()
            .position(|p| *p == id)
            .ok_or(TreasuryError::PayoutNotFound)?;
        self.pending.remove(pos);
        self.pending_count = self
            .pending_count
            .checked_sub(1)
            .ok_or(TreasuryError::MathOverflow)?;
        Ok(())
    }

    /// Replace the queue wholesale (settlement rebuilds it in one pass).
    pub(crate) fn set_pending(&mut self, ids: Vec<u32>) -> TreasuryResult<()> {
        self.pending_count = u32::try_from(ids.len()).map_err(|_| TreasuryError::MathOverflow)?;
        self.pending = ids;
        Ok(())
    }

    /// Drop the index entry and free the slot, returning the record.
    fn remove(&mut self, id: u32) -> Option<Payout> {
        let slot = self.index.remove(&id)?;
        let payout = self.slots.get_mut(slot as usize)?.take()?;
        self.free_slots.push(slot);
        Some(payout)
    }

    /// Move a live payout into the archive with its final status, evicting
    /// the oldest entry when full. The caller is responsible for queue
    /// membership.
    pub(crate) fn retire(&mut self, id: u32, status: PayoutStatus) -> TreasuryResult<Payout> {
        let mut payout = self.remove(id).ok_or(TreasuryError::PayoutNotFound)?;
        payout.set_status(status);
        if self.archive.len() >= ARCHIVE_CAPACITY {
            self.archive.remove(0);
        }
        self.archive.push(payout.clone());
        Ok(payout)
    }

    /// Pending → Cancelled → archived.
    pub fn cancel(&mut self, id: u32) -> TreasuryResult<Payout> {
        match self.get(id) {
            Some(p) if p.status() == PayoutStatus::Pending => {}
            _ => return Err(TreasuryError::PayoutNotFound),
        }
        self.dequeue(id)?;
        self.retire(id, PayoutStatus::Cancelled)
    }

    /// Every queued id is indexed, live and Pending exactly once, and the
    /// cached count matches the queue.
    pub fn is_consistent(&self) -> bool {
        if self.pending_count as usize != self.pending.len() {
            return false;
        }
        if self.index.len() != self.pending.len() {
            return false;
        }
        if self.slots.len() != self.index.len() + self.free_slots.len() {
            return false;
        }
        let mut seen = std::collections::BTreeSet::new();
        for id in &self.pending {
            if !seen.insert(*id) {
                return false;
            }
            match self.get(*id) {
                Some(p) if p.id() == *id && p.status() == PayoutStatus::Pending => {}
                _ => return false,
            }
        }
        true
    }
}
