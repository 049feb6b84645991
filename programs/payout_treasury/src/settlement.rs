//! Batch settlement of due payouts.
//! - one run per `payout_frequency` window, inclusive at the boundary
//! - the whole due total must fit in the balance or nothing moves
//! - amounts are aggregated per recipient: one transfer each
//! - recurring pays at most one cycle per run; vested pays what unlocked since the last claim

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};

use anchor_lang::prelude::*;

use crate::error::{TreasuryError, TreasuryResult};
use crate::events::{PayoutFrequencyChanged, PayoutsProcessed, TreasuryEvent};
use crate::host::TreasuryHost;
use crate::state::{Disposition, PayoutStatus, Treasury};
use crate::utils::time;

/// Holds the reentrancy flag for as long as it lives.
pub struct ProcessingGuard<'a> {
    treasury: &'a mut Treasury,
}

impl<'a> ProcessingGuard<'a> {
    pub fn acquire(treasury: &'a mut Treasury) -> TreasuryResult<Self> {
        if treasury.is_processing {
            return Err(TreasuryError::Reentrancy);
        }
        treasury.is_processing = true;
        Ok(Self { treasury })
    }
}

impl Deref for ProcessingGuard<'_> {
    type Target = Treasury;

    fn deref(&self) -> &Treasury {
        self.treasury
    }
}

impl DerefMut for ProcessingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Treasury {
        self.treasury
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.treasury.is_processing = false;
    }
}

/// Outcome of one settlement run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementReport {
    /// Payouts that received a transfer, in queue order.
    pub processed_ids: Vec<u32>,
    /// Subset of `processed_ids` that reached Completed and were archived.
    pub completed_ids: Vec<u32>,
    pub total_amount: u64,
    pub recipients_paid: u32,
}

struct DueEntry {
    id: u32,
    recipient: Pubkey,
    amount: u64,
}

/// Treasurer-only: settle everything due at `now`.
pub fn process_pending_payouts<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    now: i64,
    host: &mut H,
) -> TreasuryResult<SettlementReport> {
    treasury.ensure_treasurer(caller)?;
    let mut t = ProcessingGuard::acquire(treasury)?;

    if !time::gate_open(t.last_settlement_time, t.payout_frequency, now)? {
        return Err(TreasuryError::TooEarlyToProcess);
    }

    let mut due = Vec::new();
    let mut total: u64 = 0;
    for id in t.payouts.pending_ids() {
        let payout = t.payouts.get(*id).ok_or(TreasuryError::PayoutNotFound)?;
        let amount = payout.due_at(now)?;
        if amount == 0 {
            continue;
        }
        total = total.checked_add(amount).ok_or(TreasuryError::MathOverflow)?;
        due.push(DueEntry {
            id: *id,
            recipient: payout.recipient(),
            amount,
        });
    }

    if total > host.balance() {
        return Err(TreasuryError::InsufficientBalance);
    }

    let mut by_recipient: BTreeMap<Pubkey, u64> = BTreeMap::new();
    for d in &due {
        let sum = by_recipient.entry(d.recipient).or_insert(0);
        *sum = sum.checked_add(d.amount).ok_or(TreasuryError::MathOverflow)?;
    }
    let processed_count = t
        .processed_count
        .checked_add(due.len() as u64)
        .ok_or(TreasuryError::MathOverflow)?;
    let total_disbursed = t
        .total_disbursed
        .checked_add(total)
        .ok_or(TreasuryError::MathOverflow)?;
    let payouts_count = u32::try_from(due.len()).map_err(|_| TreasuryError::MathOverflow)?;
    let recipients_paid =
        u32::try_from(by_recipient.len()).map_err(|_| TreasuryError::MathOverflow)?;

    set_status(&mut t, &due, PayoutStatus::Processing)?;
    for (to, amount) in &by_recipient {
        if let Err(e) = host.transfer(to, *amount) {
            set_status(&mut t, &due, PayoutStatus::Pending)?;
            return Err(e);
        }
    }

    let mut report = SettlementReport {
        total_amount: total,
        recipients_paid,
        ..SettlementReport::default()
    };
    let mut requeued = Vec::new();
    for d in &due {
        let disposition = {
            let payout = t.payouts.get_mut(d.id).ok_or(TreasuryError::PayoutNotFound)?;
            payout.set_status(PayoutStatus::Pending);
            payout.apply_settlement(d.amount)?
        };
        match disposition {
            Disposition::Complete => {
                t.payouts.retire(d.id, PayoutStatus::Completed)?;
                report.completed_ids.push(d.id);
            }
            Disposition::Requeue => requeued.push(d.id),
        }
        report.processed_ids.push(d.id);
    }

    // Untouched entries keep their order; settled survivors go to the tail.
    let settled: BTreeSet<u32> = due.iter().map(|d| d.id).collect();
    let mut queue: Vec<u32> = t
        .payouts
        .pending_ids()
        .iter()
        .copied()
        .filter(|id| !settled.contains(id))
        .collect();
    queue.extend(requeued);
    t.payouts.set_pending(queue)?;

    t.last_settlement_time = now;
    t.processed_count = processed_count;
    t.total_disbursed = total_disbursed;

    msg!(
        "settled {} payouts to {} recipients, total {}",
        payouts_count,
        recipients_paid,
        total
    );
    host.emit(TreasuryEvent::PayoutsProcessed(PayoutsProcessed {
        total_amount: total,
        payouts_count,
    }));
    Ok(report)
}

fn set_status(t: &mut Treasury, due: &[DueEntry], status: PayoutStatus) -> TreasuryResult<()> {
    for d in due {
        t.payouts
            .get_mut(d.id)
            .ok_or(TreasuryError::PayoutNotFound)?
            .set_status(status);
    }
    Ok(())
}

/// Owner-only: change the minimum spacing between settlement runs.
pub fn set_payout_frequency<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    new_frequency: u64,
    host: &mut H,
) -> TreasuryResult<()> {
    treasury.ensure_owner(caller)?;
    if new_frequency == 0 {
        return Err(TreasuryError::InvalidFrequency);
    }
    let old_frequency = treasury.payout_frequency;
    treasury.payout_frequency = new_frequency;
    msg!("payout frequency {} -> {}", old_frequency, new_frequency);
    host.emit(TreasuryEvent::PayoutFrequencyChanged(PayoutFrequencyChanged {
        old_frequency,
        new_frequency,
    }));
    Ok(())
}
