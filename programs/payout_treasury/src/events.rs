use anchor_lang::prelude::*;

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasuryInitialized {
    pub owner: Pubkey,
    pub payout_frequency: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposited {
    pub depositor: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasurerAdded {
    pub treasurer: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasurerRemoved {
    pub treasurer: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutAdded {
    pub payout_id: u32,
    pub to: Pubkey,
    /// One-time amount, per-cycle amount, or vested total.
    pub amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutCancelled {
    pub payout_id: u32,
    pub to: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutsProcessed {
    pub total_amount: u64,
    pub payouts_count: u32,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutFrequencyChanged {
    pub old_frequency: u64,
    pub new_frequency: u64,
}

/// Every event the core state machine can raise, handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreasuryEvent {
    TreasurerAdded(TreasurerAdded),
    TreasurerRemoved(TreasurerRemoved),
    PayoutAdded(PayoutAdded),
    PayoutCancelled(PayoutCancelled),
    PayoutsProcessed(PayoutsProcessed),
    PayoutFrequencyChanged(PayoutFrequencyChanged),
}

impl TreasuryEvent {
    /// Write the event to the program log.
    pub fn emit_log(&self) {
        match self {
            TreasuryEvent::TreasurerAdded(e) => emit!(e.clone()),
            TreasuryEvent::TreasurerRemoved(e) => emit!(e.clone()),
            TreasuryEvent::PayoutAdded(e) => emit!(e.clone()),
            TreasuryEvent::PayoutCancelled(e) => emit!(e.clone()),
            TreasuryEvent::PayoutsProcessed(e) => emit!(e.clone()),
            TreasuryEvent::PayoutFrequencyChanged(e) => emit!(e.clone()),
        }
    }
}
