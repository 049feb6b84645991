//! Program-wide constants.

/// PDA seed of the singleton treasury account.
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Max treasurers, owner included.
pub const MAX_TREASURERS: usize = 32;

/// Max live payouts. Settlement walks the whole queue in one instruction and
/// cancellation scans it linearly, so this bounds both, along with the
/// treasury's deserialized heap footprint.
pub const MAX_PENDING_PAYOUTS: usize = 64;

/// Completed or cancelled payouts kept on chain, oldest evicted first.
/// Events carry the full history.
pub const ARCHIVE_CAPACITY: usize = 16;

/// Max entries accepted by `add_payout_batch` / `cancel_payouts`.
pub const MAX_PAYOUT_BATCH: usize = 16;

/// Max ids accepted by `get_payouts_batch` (return data is capped at 1024 bytes).
pub const MAX_VIEW_BATCH: usize = 8;

/// Space allocated for the treasury account at initialization.
pub const TREASURY_INITIAL_SPACE: usize = 8 + 1_024;

/// Max bytes a treasury account may grow by in a single instruction.
pub const MAX_ACCOUNT_GROWTH: usize = 10_240;
