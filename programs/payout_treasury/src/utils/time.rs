//! Ledger-time arithmetic (Unix seconds, UTC).
//! - timestamps are `i64` (Clock::unix_timestamp), spans are `u64` seconds
//! - every operation is checked; overflow surfaces as `MathOverflow`
//! - linear vesting: vested(t) = total * (t - start) / duration, zero before the cliff

use crate::error::{TreasuryError, TreasuryResult};

/// `ts + span`, checked.
pub fn advance(ts: i64, span: u64) -> TreasuryResult<i64> {
    let span = i64::try_from(span).map_err(|_| TreasuryError::MathOverflow)?;
    ts.checked_add(span).ok_or(TreasuryError::MathOverflow)
}

/// Seconds elapsed from `start` to `now`, zero if `now` is not after `start`.
pub fn elapsed(start: i64, now: i64) -> u64 {
    let diff = (now as i128) - (start as i128);
    if diff <= 0 {
        0
    } else {
        u64::try_from(diff).unwrap_or(u64::MAX)
    }
}

/// Seconds left until `target`, zero once reached.
pub fn remaining_until(target: i64, now: i64) -> u64 {
    elapsed(now, target)
}

/// True once `now >= last + frequency`. Inclusive at the boundary.
pub fn gate_open(last: i64, frequency: u64, now: i64) -> TreasuryResult<bool> {
    Ok(now >= advance(last, frequency)?)
}

/// Amount unlocked by linear vesting at `now`, clamped to `total`.
pub fn linear_vested(
    total: u64,
    start: i64,
    duration: u64,
    cliff: u64,
    now: i64,
) -> TreasuryResult<u64> {
    if duration == 0 {
        return Err(TreasuryError::InvalidFrequency);
    }
    let passed = elapsed(start, now);
    if passed < cliff || passed == 0 {
        return Ok(0);
    }
    if passed >= duration {
        return Ok(total);
    }
    let v = (total as u128)
        .checked_mul(passed as u128)
        .ok_or(TreasuryError::MathOverflow)?
        / (duration as u128);
    u64::try_from(v).map_err(|_| TreasuryError::MathOverflow)
}
