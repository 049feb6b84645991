//! Read-only views over the treasury. Nothing here mutates state.

use anchor_lang::prelude::*;

use crate::error::{TreasuryError, TreasuryResult};
use crate::host::TreasuryHost;
use crate::state::{Payout, Treasury};
use crate::utils::time;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreasuryStats {
    pub balance: u64,
    pub payout_frequency: u64,
    pub last_settlement_time: i64,
    /// Seconds until the next settlement may run.
    pub next_settlement_in: u64,
    pub pending_count: u32,
    /// Pending payouts with a non-zero due amount right now.
    pub ready_count: u32,
    /// Sum a settlement at `now` would disburse.
    pub ready_amount: u64,
    pub processed_count: u64,
    pub archived_count: u32,
    pub total_disbursed: u64,
    pub treasurer_count: u32,
}

/// One slot of a batch lookup; `payout` is `None` for unknown ids.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PayoutLookup {
    pub id: u32,
    pub payout: Option<Payout>,
}

pub fn balance<H: TreasuryHost>(host: &H) -> u64 {
    host.balance()
}

pub fn treasurers(treasury: &Treasury) -> &[Pubkey] {
    &treasury.treasurers
}

pub fn payout_frequency(treasury: &Treasury) -> u64 {
    treasury.payout_frequency
}

/// Live payouts in settlement order.
pub fn pending_payouts(treasury: &Treasury) -> Vec<&Payout> {
    treasury
        .payouts
        .pending_ids()
        .iter()
        .filter_map(|id| treasury.payouts.get(*id))
        .collect()
}

pub fn pending_payout_ids(treasury: &Treasury) -> &[u32] {
    treasury.payouts.pending_ids()
}

/// Live record, falling back to the archive.
pub fn payout_by_id(treasury: &Treasury, id: u32) -> Option<&Payout> {
    treasury.payouts.find(id)
}

pub fn payouts_batch(treasury: &Treasury, ids: &[u32]) -> Vec<PayoutLookup> {
    ids.iter()
        .map(|id| PayoutLookup {
            id: *id,
            payout: payout_by_id(treasury, *id).cloned(),
        })
        .collect()
}

pub fn archived_payouts(treasury: &Treasury) -> Vec<&Payout> {
    treasury.payouts.archive_iter().collect()
}

/// Seconds until the frequency gate opens; zero when a run is allowed now.
pub fn next_payout_block_difference(treasury: &Treasury, now: i64) -> TreasuryResult<u64> {
    let opens_at = time::advance(treasury.last_settlement_time, treasury.payout_frequency)?;
    Ok(time::remaining_until(opens_at, now))
}

/// What a live payout would receive if settled at `now`.
pub fn due_amount(treasury: &Treasury, id: u32, now: i64) -> TreasuryResult<u64> {
    treasury
        .payouts
        .get(id)
        .ok_or(TreasuryError::PayoutNotFound)?
        .due_at(now)
}

pub fn next_due_at(treasury: &Treasury, id: u32) -> TreasuryResult<Option<i64>> {
    Ok(treasury
        .payouts
        .get(id)
        .ok_or(TreasuryError::PayoutNotFound)?
        .next_due_at())
}

pub fn treasury_stats(treasury: &Treasury, now: i64, balance: u64) -> TreasuryResult<TreasuryStats> {
    let mut ready_count: u32 = 0;
    let mut ready_amount: u64 = 0;
    for payout in pending_payouts(treasury) {
        let due = payout.due_at(now)?;
        if due > 0 {
            ready_count = ready_count.checked_add(1).ok_or(TreasuryError::MathOverflow)?;
            ready_amount = ready_amount
                .checked_add(due)
                .ok_or(TreasuryError::MathOverflow)?;
        }
    }
    Ok(TreasuryStats {
        balance,
        payout_frequency: treasury.payout_frequency,
        last_settlement_time: treasury.last_settlement_time,
        next_settlement_in: next_payout_block_difference(treasury, now)?,
        pending_count: treasury.payouts.pending_count(),
        ready_count,
        ready_amount,
        processed_count: treasury.processed_count,
        archived_count: u32::try_from(treasury.payouts.archive_len())
            .map_err(|_| TreasuryError::MathOverflow)?,
        total_disbursed: treasury.total_disbursed,
        treasurer_count: treasury.treasurers.len() as u32,
    })
}
