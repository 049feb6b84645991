use anchor_lang::prelude::*;

/// Custom error codes for the payout treasury program.
#[error_code]
pub enum TreasuryError {
    #[msg("Unauthorized: owner signature required")]
    NotOwner,

    #[msg("Unauthorized: treasurer signature required")]
    NotTreasurer,

    #[msg("Treasurer already exists")]
    TreasurerExists,

    #[msg("Treasurer not found")]
    TreasurerNotFound,

    #[msg("The owner is always a treasurer and cannot be removed")]
    CannotRemoveOwner,

    #[msg("Treasurer list is full")]
    TreasurerListFull,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Invalid frequency, interval or duration (must be > 0)")]
    InvalidFrequency,

    #[msg("Invalid recipient")]
    InvalidRecipient,

    #[msg("Settlement called before the payout frequency has elapsed")]
    TooEarlyToProcess,

    #[msg("Insufficient treasury balance")]
    InsufficientBalance,

    #[msg("Payout not found or not pending")]
    PayoutNotFound,

    #[msg("Settlement already in progress")]
    Reentrancy,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Pending payout queue is full")]
    PendingQueueFull,

    #[msg("Payout id already in use")]
    DuplicatePayoutId,

    #[msg("Recipient account missing or not writable")]
    RecipientAccountMissing,

    #[msg("Lamport transfer failed")]
    TransferFailed,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Treasury account growth exceeds the per-instruction limit")]
    AccountGrowthTooLarge,
}

pub type TreasuryResult<T> = core::result::Result<T, TreasuryError>;
