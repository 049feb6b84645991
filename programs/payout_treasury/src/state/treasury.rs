use anchor_lang::prelude::*;

use crate::constants::MAX_TREASURERS;
use crate::error::{TreasuryError, TreasuryResult};
use crate::state::PayoutStore;

/// Singleton treasury PDA. The held balance is not cached here; it is the
/// account's lamports above its rent-exempt reserve.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Treasury {
    pub owner: Pubkey,
    /// Owner first, then every added treasurer.
    pub treasurers: Vec<Pubkey>,
    /// Minimum seconds between settlement runs.
    pub payout_frequency: u64,
    pub last_settlement_time: i64,
    pub next_payout_id: u32,
    /// Set only while a settlement is in flight.
    pub is_processing: bool,
    /// Payouts that received a transfer, across all runs.
    pub processed_count: u64,
    pub total_disbursed: u64,
    pub bump: u8,
    pub payouts: PayoutStore,
}

impl Treasury {
    /// Account size (discriminator included) with every collection full.
    pub const MAX_SPACE: usize = 8 // discriminator
        + 32 // owner
        + 4 + 32 * MAX_TREASURERS
        + 8 // payout_frequency
        + 8 // last_settlement_time
        + 4 // next_payout_id
        + 1 // is_processing
        + 8 // processed_count
        + 8 // total_disbursed
        + 1 // bump
        + PayoutStore::MAX_LEN;

    pub fn new(owner: Pubkey, payout_frequency: u64, now: i64, bump: u8) -> Self {
        Self {
            owner,
            treasurers: vec![owner],
            payout_frequency,
            last_settlement_time: now,
            next_payout_id: 0,
            is_processing: false,
            processed_count: 0,
            total_disbursed: 0,
            bump,
            payouts: PayoutStore::default(),
        }
    }

    pub fn is_owner(&self, addr: &Pubkey) -> bool {
        self.owner == *addr
    }

    pub fn is_treasurer(&self, addr: &Pubkey) -> bool {
        self.is_owner(addr) || self.treasurers.contains(addr)
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> TreasuryResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(TreasuryError::NotOwner)
        }
    }

    pub fn ensure_treasurer(&self, caller: &Pubkey) -> TreasuryResult<()> {
        if self.is_treasurer(caller) {
            Ok(())
        } else {
            Err(TreasuryError::NotTreasurer)
        }
    }

    pub(crate) fn insert_treasurer(&mut self, addr: Pubkey) -> TreasuryResult<()> {
        if addr == Pubkey::default() {
            return Err(TreasuryError::InvalidRecipient);
        }
        if self.is_treasurer(&addr) {
            return Err(TreasuryError::TreasurerExists);
        }
        if self.treasurers.len() >= MAX_TREASURERS {
            return Err(TreasuryError::TreasurerListFull);
        }
        self.treasurers.push(addr);
        Ok(())
    }

    pub(crate) fn drop_treasurer(&mut self, addr: &Pubkey) -> TreasuryResult<()> {
        if self.is_owner(addr) {
            return Err(TreasuryError::CannotRemoveOwner);
        }
        let pos = self
            .treasurers
            .iter()
            .position(|t| t == addr)
            .ok_or(TreasuryError::TreasurerNotFound)?;
        self.treasurers.remove(pos);
        Ok(())
    }

    /// Hand out the next payout id.
    pub(crate) fn allocate_payout_id(&mut self) -> TreasuryResult<u32> {
        let id = self.next_payout_id;
        self.next_payout_id = id.checked_add(1).ok_or(TreasuryError::MathOverflow)?;
        Ok(id)
    }
}
