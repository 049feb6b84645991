use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::constants::{MAX_PAYOUT_BATCH, MAX_PENDING_PAYOUTS};
use crate::error::{TreasuryError, TreasuryResult};
use crate::events::{PayoutAdded, PayoutCancelled, TreasuryEvent};
use crate::host::TreasuryHost;
use crate::state::{PayoutRequest, PayoutStatus, Treasury};

fn ensure_room(treasury: &Treasury, extra: usize) -> TreasuryResult<()> {
    let pending = treasury.payouts.pending_count() as usize;
    match pending.checked_add(extra) {
        Some(n) if n <= MAX_PENDING_PAYOUTS => Ok(()),
        _ => Err(TreasuryError::PendingQueueFull),
    }
}

fn register<H: TreasuryHost>(
    treasury: &mut Treasury,
    request: PayoutRequest,
    now: i64,
    host: &mut H,
) -> TreasuryResult<u32> {
    let to = request.recipient();
    let amount = request.amount();
    let id = treasury.allocate_payout_id()?;
    treasury.payouts.register(request.into_payout(id, now))?;
    msg!("payout {} added: to={} amount={}", id, to, amount);
    host.emit(TreasuryEvent::PayoutAdded(PayoutAdded {
        payout_id: id,
        to,
        amount,
    }));
    Ok(id)
}

/// Treasurer-only: create one payout and enqueue it. No balance check here;
/// solvency is checked at settlement.
pub fn add_payout<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    request: PayoutRequest,
    now: i64,
    host: &mut H,
) -> TreasuryResult<u32> {
    treasury.ensure_treasurer(caller)?;
    request.validate()?;
    ensure_room(treasury, 1)?;
    register(treasury, request, now, host)
}

/// Treasurer-only: all requests are validated before any is registered.
pub fn add_payout_batch<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    requests: Vec<PayoutRequest>,
    now: i64,
    host: &mut H,
) -> TreasuryResult<Vec<u32>> {
    treasury.ensure_treasurer(caller)?;
    if requests.is_empty() {
        return Err(TreasuryError::EmptyBatch);
    }
    if requests.len() > MAX_PAYOUT_BATCH {
        return Err(TreasuryError::BatchTooLarge);
    }
    for r in &requests {
        r.validate()?;
    }
    ensure_room(treasury, requests.len())?;
    if treasury
        .next_payout_id
        .checked_add(requests.len() as u32)
        .is_none()
    {
        return Err(TreasuryError::MathOverflow);
    }

    let mut ids = Vec::with_capacity(requests.len());
    for r in requests {
        ids.push(register(treasury, r, now, host)?);
    }
    Ok(ids)
}

/// Treasurer-only: Pending → Cancelled, then archived.
pub fn cancel_payout<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    id: u32,
    host: &mut H,
) -> TreasuryResult<()> {
    treasury.ensure_treasurer(caller)?;
    let cancelled = treasury.payouts.cancel(id)?;
    msg!("payout {} cancelled", id);
    host.emit(TreasuryEvent::PayoutCancelled(PayoutCancelled {
        payout_id: id,
        to: cancelled.recipient(),
    }));
    Ok(())
}

/// Treasurer-only: every id must be live and Pending (and listed once)
/// before any is cancelled.
pub fn cancel_payouts<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    ids: &[u32],
    host: &mut H,
) -> TreasuryResult<()> {
    treasury.ensure_treasurer(caller)?;
    if ids.is_empty() {
        return Err(TreasuryError::EmptyBatch);
    }
    if ids.len() > MAX_PAYOUT_BATCH {
        return Err(TreasuryError::BatchTooLarge);
    }
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(TreasuryError::PayoutNotFound);
        }
        match treasury.payouts.get(*id) {
            Some(p) if p.status() == PayoutStatus::Pending => {}
            _ => return Err(TreasuryError::PayoutNotFound),
        }
    }
    for id in ids {
        cancel_payout(treasury, caller, *id, host)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn one_time(amount: u64) -> PayoutRequest {
        PayoutRequest::OneTime {
            recipient: Pubkey::new_unique(),
            amount,
        }
    }

    fn setup() -> (Treasury, Pubkey, MemoryHost) {
        let owner = Pubkey::new_unique();
        (Treasury::new(owner, 100, 0, 255), owner, MemoryHost::default())
    }

    #[test]
    fn add_payout_allocates_sequential_ids() {
        let (mut t, owner, mut host) = setup();
        let a = add_payout(&mut t, &owner, one_time(10), 0, &mut host).unwrap();
        let b = add_payout(&mut t, &owner, one_time(20), 0, &mut host).unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(t.payouts.pending_ids(), &[0, 1]);
        assert_eq!(t.payouts.pending_count(), 2);
        assert_eq!(host.events.len(), 2);
        assert!(t.payouts.is_consistent());
    }

    #[test]
    fn non_treasurer_cannot_add() {
        let (mut t, _, mut host) = setup();
        let stranger = Pubkey::new_unique();
        assert!(matches!(
            add_payout(&mut t, &stranger, one_time(10), 0, &mut host),
            Err(TreasuryError::NotTreasurer)
        ));
        assert_eq!(t.payouts.pending_count(), 0);
        assert_eq!(t.next_payout_id, 0);
    }

    #[test]
    fn invalid_request_leaves_state_untouched() {
        let (mut t, owner, mut host) = setup();
        assert!(matches!(
            add_payout(&mut t, &owner, one_time(0), 0, &mut host),
            Err(TreasuryError::InvalidAmount)
        ));
        assert_eq!(t.next_payout_id, 0);
        assert!(host.events.is_empty());
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let (mut t, owner, mut host) = setup();
        let before = t.clone();
        let res = add_payout_batch(
            &mut t,
            &owner,
            vec![one_time(5), one_time(6), one_time(0)],
            0,
            &mut host,
        );
        assert!(matches!(res, Err(TreasuryError::InvalidAmount)));
        assert_eq!(t, before);

        let ids = add_payout_batch(&mut t, &owner, vec![one_time(5), one_time(6)], 0, &mut host).unwrap();
        assert_eq!(ids, vec![0, 1]);
        assert!(matches!(
            add_payout_batch(&mut t, &owner, vec![], 0, &mut host),
            Err(TreasuryError::EmptyBatch)
        ));
        let too_many = (0..=MAX_PAYOUT_BATCH).map(|_| one_time(1)).collect();
        assert!(matches!(
            add_payout_batch(&mut t, &owner, too_many, 0, &mut host),
            Err(TreasuryError::BatchTooLarge)
        ));
    }

    #[test]
    fn pending_capacity_is_enforced() {
        let (mut t, owner, mut host) = setup();
        for _ in 0..MAX_PENDING_PAYOUTS {
            add_payout(&mut t, &owner, one_time(1), 0, &mut host).unwrap();
        }
        assert!(matches!(
            add_payout(&mut t, &owner, one_time(1), 0, &mut host),
            Err(TreasuryError::PendingQueueFull)
        ));
    }

    #[test]
    fn cancel_moves_payout_to_archive() {
        let (mut t, owner, mut host) = setup();
        let id = add_payout(&mut t, &owner, one_time(10), 0, &mut host).unwrap();
        cancel_payout(&mut t, &owner, id, &mut host).unwrap();
        assert_eq!(t.payouts.pending_count(), 0);
        assert_eq!(t.payouts.lookup(id), None);
        assert_eq!(
            t.payouts.find(id).map(|p| p.status()),
            Some(PayoutStatus::Cancelled)
        );
        assert!(matches!(
            cancel_payout(&mut t, &owner, id, &mut host),
            Err(TreasuryError::PayoutNotFound)
        ));
        assert!(t.payouts.is_consistent());
    }

    #[test]
    fn cancel_batch_validates_first() {
        let (mut t, owner, mut host) = setup();
        let ids = add_payout_batch(&mut t, &owner, vec![one_time(1), one_time(2)], 0, &mut host).unwrap();
        let before = t.clone();
        assert!(matches!(
            cancel_payouts(&mut t, &owner, &[ids[0], 99], &mut host),
            Err(TreasuryError::PayoutNotFound)
        ));
        assert!(matches!(
            cancel_payouts(&mut t, &owner, &[ids[0], ids[0]], &mut host),
            Err(TreasuryError::PayoutNotFound)
        ));
        assert_eq!(t, before);

        cancel_payouts(&mut t, &owner, &ids, &mut host).unwrap();
        assert_eq!(t.payouts.pending_count(), 0);
        assert_eq!(t.payouts.archive_len(), 2);
    }
}
