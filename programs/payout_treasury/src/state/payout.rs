use anchor_lang::prelude::*;

use crate::error::{TreasuryError, TreasuryResult};
use crate::utils::time;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutKind {
    OneTime,
    Recurring,
    Vested,
}

/// Paid in full at the next settlement.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OneTimePayout {
    pub id: u32,
    pub recipient: Pubkey,
    pub amount: u64,
    pub created_at: i64,
    pub status: PayoutStatus,
}

/// One `amount_per_cycle` per settlement once `next_due_at` is reached.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RecurringPayout {
    pub id: u32,
    pub recipient: Pubkey,
    pub amount_per_cycle: u64,
    /// Seconds between cycles.
    pub interval: u64,
    pub next_due_at: i64,
    /// `None` runs until cancelled.
    pub remaining_cycles: Option<u32>,
    pub cycles_paid: u32,
    pub created_at: i64,
    pub status: PayoutStatus,
}

/// Linear unlock of `total_amount` over `vesting_duration` seconds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestedPayout {
    pub id: u32,
    pub recipient: Pubkey,
    pub total_amount: u64,
    pub vesting_start: i64,
    pub vesting_duration: u64,
    /// Seconds after `vesting_start` before anything unlocks.
    pub cliff: u64,
    pub claimed_amount: u64,
    pub created_at: i64,
    pub status: PayoutStatus,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum Payout {
    OneTime(OneTimePayout),
    Recurring(RecurringPayout),
    Vested(VestedPayout),
}

/// What happens to a payout after its due amount has been transferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    Complete,
    Requeue,
}

impl Payout {
    /// Borsh length of the largest variant (tag + `VestedPayout`).
    pub const MAX_LEN: usize = 1 + 4 + 32 + 8 * 6 + 1;

    pub fn id(&self) -> u32 {
        match self {
            Payout::OneTime(p) => p.id,
            Payout::Recurring(p) => p.id,
            Payout::Vested(p) => p.id,
        }
    }

    pub fn recipient(&self) -> Pubkey {
        match self {
            Payout::OneTime(p) => p.recipient,
            Payout::Recurring(p) => p.recipient,
            Payout::Vested(p) => p.recipient,
        }
    }

    pub fn status(&self) -> PayoutStatus {
        match self {
            Payout::OneTime(p) => p.status,
            Payout::Recurring(p) => p.status,
            Payout::Vested(p) => p.status,
        }
    }

    pub fn set_status(&mut self, status: PayoutStatus) {
        match self {
            Payout::OneTime(p) => p.status = status,
            Payout::Recurring(p) => p.status = status,
            Payout::Vested(p) => p.status = status,
        }
    }

    pub fn kind(&self) -> PayoutKind {
        match self {
            Payout::OneTime(_) => PayoutKind::OneTime,
            Payout::Recurring(_) => PayoutKind::Recurring,
            Payout::Vested(_) => PayoutKind::Vested,
        }
    }

    pub fn created_at(&self) -> i64 {
        match self {
            Payout::OneTime(p) => p.created_at,
            Payout::Recurring(p) => p.created_at,
            Payout::Vested(p) => p.created_at,
        }
    }

    /// Amount owed if the payout were settled at `now`.
    pub fn due_at(&self, now: i64) -> TreasuryResult<u64> {
        match self {
            Payout::OneTime(p) => Ok(p.amount),
            Payout::Recurring(p) => {
                if p.remaining_cycles == Some(0) || p.next_due_at > now {
                    Ok(0)
                } else {
                    Ok(p.amount_per_cycle)
                }
            }
            Payout::Vested(p) => {
                let vested = time::linear_vested(
                    p.total_amount,
                    p.vesting_start,
                    p.vesting_duration,
                    p.cliff,
                    now,
                )?;
                let remaining = p
                    .total_amount
                    .checked_sub(p.claimed_amount)
                    .ok_or(TreasuryError::MathOverflow)?;
                Ok(vested.saturating_sub(p.claimed_amount).min(remaining))
            }
        }
    }

    /// When the next amount becomes owed. Vested payouts accrue continuously,
    /// so this is the cliff end (or start) until fully claimed.
    pub fn next_due_at(&self) -> Option<i64> {
        match self {
            Payout::OneTime(p) => Some(p.created_at),
            Payout::Recurring(p) => {
                if p.remaining_cycles == Some(0) {
                    None
                } else {
                    Some(p.next_due_at)
                }
            }
            Payout::Vested(p) => {
                if p.claimed_amount >= p.total_amount {
                    None
                } else {
                    time::advance(p.vesting_start, p.cliff).ok()
                }
            }
        }
    }

    /// Record that `paid` was transferred at a settlement.
    pub fn apply_settlement(&mut self, paid: u64) -> TreasuryResult<Disposition> {
        match self {
            Payout::OneTime(_) => Ok(Disposition::Complete),
            Payout::Recurring(p) => {
                p.cycles_paid = p
                    .cycles_paid
                    .checked_add(1)
                    .ok_or(TreasuryError::MathOverflow)?;
                p.next_due_at = time::advance(p.next_due_at, p.interval)?;
                match p.remaining_cycles {
                    Some(left) => {
                        let left = left.checked_sub(1).ok_or(TreasuryError::MathOverflow)?;
                        p.remaining_cycles = Some(left);
                        if left == 0 {
                            Ok(Disposition::Complete)
                        } else {
                            Ok(Disposition::Requeue)
                        }
                    }
                    None => Ok(Disposition::Requeue),
                }
            }
            Payout::Vested(p) => {
                let claimed = p
                    .claimed_amount
                    .checked_add(paid)
                    .ok_or(TreasuryError::MathOverflow)?;
                if claimed > p.total_amount {
                    return Err(TreasuryError::MathOverflow);
                }
                p.claimed_amount = claimed;
                if claimed == p.total_amount {
                    Ok(Disposition::Complete)
                } else {
                    Ok(Disposition::Requeue)
                }
            }
        }
    }
}

/// Instruction input describing a payout to create.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum PayoutRequest {
    OneTime {
        recipient: Pubkey,
        amount: u64,
    },
    Recurring {
        recipient: Pubkey,
        amount_per_cycle: u64,
        interval: u64,
        /// Defaults to the creation time.
        first_due_at: Option<i64>,
        /// `None` runs until cancelled.
        cycles: Option<u32>,
    },
    Vested {
        recipient: Pubkey,
        total_amount: u64,
        /// Defaults to the creation time.
        start: Option<i64>,
        duration: u64,
        cliff: u64,
    },
}

impl PayoutRequest {
    pub fn recipient(&self) -> Pubkey {
        match self {
            PayoutRequest::OneTime { recipient, .. }
            | PayoutRequest::Recurring { recipient, .. }
            | PayoutRequest::Vested { recipient, .. } => *recipient,
        }
    }

    /// Headline amount reported in `PayoutAdded`.
    pub fn amount(&self) -> u64 {
        match self {
            PayoutRequest::OneTime { amount, .. } => *amount,
            PayoutRequest::Recurring { amount_per_cycle, .. } => *amount_per_cycle,
            PayoutRequest::Vested { total_amount, .. } => *total_amount,
        }
    }

    pub fn validate(&self) -> TreasuryResult<()> {
        if self.recipient() == Pubkey::default() {
            return Err(TreasuryError::InvalidRecipient);
        }
        if self.amount() == 0 {
            return Err(TreasuryError::InvalidAmount);
        }
        match self {
            PayoutRequest::OneTime { .. } => Ok(()),
            PayoutRequest::Recurring { interval, cycles, .. } => {
                if *interval == 0 {
                    return Err(TreasuryError::InvalidFrequency);
                }
                if *cycles == Some(0) {
                    return Err(TreasuryError::InvalidAmount);
                }
                Ok(())
            }
            PayoutRequest::Vested { duration, cliff, .. } => {
                if *duration == 0 || cliff > duration {
                    return Err(TreasuryError::InvalidFrequency);
                }
                Ok(())
            }
        }
    }

    /// The treasury itself can never be paid out of itself.
    pub fn ensure_recipient_not(&self, treasury: &Pubkey) -> TreasuryResult<()> {
        if self.recipient() == *treasury {
            return Err(TreasuryError::InvalidRecipient);
        }
        Ok(())
    }

    /// Build the Pending record. Call `validate` first.
    pub fn into_payout(self, id: u32, now: i64) -> Payout {
        match self {
            PayoutRequest::OneTime { recipient, amount } => Payout::OneTime(OneTimePayout {
                id,
                recipient,
                amount,
                created_at: now,
                status: PayoutStatus::Pending,
            }),
            PayoutRequest::Recurring {
                recipient,
                amount_per_cycle,
                interval,
                first_due_at,
                cycles,
            } => Payout::Recurring(RecurringPayout {
                id,
                recipient,
                amount_per_cycle,
                interval,
                next_due_at: first_due_at.unwrap_or(now),
                remaining_cycles: cycles,
                cycles_paid: 0,
                created_at: now,
                status: PayoutStatus::Pending,
            }),
            PayoutRequest::Vested {
                recipient,
                total_amount,
                start,
                duration,
                cliff,
            } => Payout::Vested(VestedPayout {
                id,
                recipient,
                total_amount,
                vesting_start: start.unwrap_or(now),
                vesting_duration: duration,
                cliff,
                claimed_amount: 0,
                created_at: now,
                status: PayoutStatus::Pending,
            }),
        }
    }
}
