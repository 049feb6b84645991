use anchor_lang::prelude::Pubkey;

use payout_treasury::authority;
use payout_treasury::error::{TreasuryError, TreasuryResult};
use payout_treasury::events::TreasuryEvent;
use payout_treasury::host::TreasuryHost;
use payout_treasury::ledger;
use payout_treasury::query;
use payout_treasury::settlement;
use payout_treasury::{PayoutRequest, PayoutStatus, Treasury};

#[derive(Default)]
struct Ledger {
    balance: u64,
    paid: Vec<(Pubkey, u64)>,
    events: Vec<TreasuryEvent>,
}

impl Ledger {
    fn paid_to(&self, who: &Pubkey) -> u64 {
        self.paid.iter().filter(|(to, _)| to == who).map(|(_, a)| a).sum()
    }
}

impl TreasuryHost for Ledger {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> TreasuryResult<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TreasuryError::InsufficientBalance)?;
        self.paid.push((*to, amount));
        Ok(())
    }

    fn emit(&mut self, event: TreasuryEvent) {
        self.events.push(event);
    }
}

#[test]
fn one_time_payout_lifecycle() {
    let owner = Pubkey::new_unique();
    let r = Pubkey::new_unique();
    let mut t = Treasury::new(owner, 100, 0, 255);
    let mut host = Ledger {
        balance: 200,
        ..Ledger::default()
    };

    let id = ledger::add_payout(
        &mut t,
        &owner,
        PayoutRequest::OneTime { recipient: r, amount: 50 },
        0,
        &mut host,
    )
    .unwrap();

    assert!(matches!(
        settlement::process_pending_payouts(&mut t, &owner, 99, &mut host),
        Err(TreasuryError::TooEarlyToProcess)
    ));

    settlement::process_pending_payouts(&mut t, &owner, 100, &mut host).unwrap();
    assert_eq!(host.paid_to(&r), 50);
    assert_eq!(query::balance(&host), 150);
    assert_eq!(
        query::payout_by_id(&t, id).map(|p| p.status()),
        Some(PayoutStatus::Completed)
    );
    assert_eq!(t.payouts.pending_count(), 0);
    assert!(t.payouts.is_consistent());
}

#[test]
fn delegated_treasurer_runs_the_cycle() {
    let owner = Pubkey::new_unique();
    let ops = Pubkey::new_unique();
    let mut t = Treasury::new(owner, 60, 0, 255);
    let mut host = Ledger {
        balance: 10_000,
        ..Ledger::default()
    };

    assert!(matches!(
        ledger::add_payout(
            &mut t,
            &ops,
            PayoutRequest::OneTime { recipient: Pubkey::new_unique(), amount: 1 },
            0,
            &mut host,
        ),
        Err(TreasuryError::NotTreasurer)
    ));
    authority::add_treasurer(&mut t, &owner, ops, &mut host).unwrap();

    let salary = Pubkey::new_unique();
    let grant = Pubkey::new_unique();
    let ids = ledger::add_payout_batch(
        &mut t,
        &ops,
        vec![
            PayoutRequest::Recurring {
                recipient: salary,
                amount_per_cycle: 300,
                interval: 60,
                first_due_at: Some(60),
                cycles: Some(2),
            },
            PayoutRequest::Vested {
                recipient: grant,
                total_amount: 1_200,
                start: Some(0),
                duration: 120,
                cliff: 30,
            },
        ],
        0,
        &mut host,
    )
    .unwrap();

    let first = settlement::process_pending_payouts(&mut t, &ops, 60, &mut host).unwrap();
    assert_eq!(first.total_amount, 300 + 600);
    assert!(first.completed_ids.is_empty());

    let stats = query::treasury_stats(&t, 90, query::balance(&host)).unwrap();
    assert_eq!(stats.pending_count, 2);
    assert_eq!(stats.next_settlement_in, 30);

    let second = settlement::process_pending_payouts(&mut t, &ops, 120, &mut host).unwrap();
    assert_eq!(second.completed_ids, ids);
    assert_eq!(host.paid_to(&salary), 600);
    assert_eq!(host.paid_to(&grant), 1_200);
    assert_eq!(t.total_disbursed, 1_800);
    assert_eq!(query::archived_payouts(&t).len(), 2);
    assert!(query::pending_payouts(&t).is_empty());

    // Revoked treasurers lose access immediately.
    authority::remove_treasurer(&mut t, &owner, ops, &mut host).unwrap();
    assert!(matches!(
        settlement::process_pending_payouts(&mut t, &ops, 500, &mut host),
        Err(TreasuryError::NotTreasurer)
    ));
}

#[test]
fn underfunded_run_can_be_retried_after_deposit() {
    let owner = Pubkey::new_unique();
    let mut t = Treasury::new(owner, 10, 0, 255);
    let mut host = Ledger {
        balance: 70,
        ..Ledger::default()
    };
    for _ in 0..2 {
        ledger::add_payout(
            &mut t,
            &owner,
            PayoutRequest::OneTime { recipient: Pubkey::new_unique(), amount: 50 },
            0,
            &mut host,
        )
        .unwrap();
    }
    let snapshot = t.clone();
    assert!(matches!(
        settlement::process_pending_payouts(&mut t, &owner, 10, &mut host),
        Err(TreasuryError::InsufficientBalance)
    ));
    assert_eq!(t, snapshot);
    assert!(host.paid.is_empty());

    host.balance += 30;
    let report = settlement::process_pending_payouts(&mut t, &owner, 10, &mut host).unwrap();
    assert_eq!(report.total_amount, 100);
    assert_eq!(report.completed_ids.len(), 2);
    assert_eq!(query::balance(&host), 0);
}
