//! The ledger the treasury runs on: spendable balance, lamport transfers and
//! the event log. The core state machine only talks to this trait.

use anchor_lang::prelude::*;

use crate::error::{TreasuryError, TreasuryResult};
use crate::events::TreasuryEvent;

pub trait TreasuryHost {
    /// Spendable balance held by the treasury.
    fn balance(&self) -> u64;

    /// Move `amount` from the treasury to `to`.
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> TreasuryResult<()>;

    fn emit(&mut self, event: TreasuryEvent);
}

/// On-chain host: the treasury PDA's lamports, recipients supplied as
/// writable remaining accounts, and Anchor events.
pub struct ProgramHost<'a, 'info> {
    treasury: AccountInfo<'info>,
    accounts: &'a [AccountInfo<'info>],
    rent_reserve: u64,
}

impl<'a, 'info> ProgramHost<'a, 'info> {
    pub fn new(treasury: AccountInfo<'info>, accounts: &'a [AccountInfo<'info>]) -> Result<Self> {
        let rent_reserve = Rent::get()?.minimum_balance(treasury.data_len());
        Ok(Self::with_reserve(treasury, accounts, rent_reserve))
    }

    /// `rent_reserve` lamports stay locked in the treasury.
    pub fn with_reserve(
        treasury: AccountInfo<'info>,
        accounts: &'a [AccountInfo<'info>],
        rent_reserve: u64,
    ) -> Self {
        Self {
            treasury,
            accounts,
            rent_reserve,
        }
    }

    fn recipient(&self, key: &Pubkey) -> TreasuryResult<&AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|a| a.key == key && a.is_writable)
            .ok_or(TreasuryError::RecipientAccountMissing)
    }
}

impl TreasuryHost for ProgramHost<'_, '_> {
    fn balance(&self) -> u64 {
        self.treasury.lamports().saturating_sub(self.rent_reserve)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> TreasuryResult<()> {
        // Debit and credit would land on the same account and mint lamports.
        if to == self.treasury.key {
            return Err(TreasuryError::InvalidRecipient);
        }
        if amount > self.balance() {
            return Err(TreasuryError::InsufficientBalance);
        }
        let recipient = self.recipient(to)?;

        // The treasury PDA is program-owned, so lamports move directly.
        let from_lamports = self.treasury.lamports();
        let to_lamports = recipient.lamports();
        let debited = from_lamports
            .checked_sub(amount)
            .ok_or(TreasuryError::MathOverflow)?;
        let credited = to_lamports
            .checked_add(amount)
            .ok_or(TreasuryError::MathOverflow)?;
        **self
            .treasury
            .try_borrow_mut_lamports()
            .map_err(|_| TreasuryError::TransferFailed)? = debited;
        **recipient
            .try_borrow_mut_lamports()
            .map_err(|_| TreasuryError::TransferFailed)? = credited;
        Ok(())
    }

    fn emit(&mut self, event: TreasuryEvent) {
        event.emit_log();
    }
}

/// In-memory host used by the unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub balance: u64,
    pub transfers: Vec<(Pubkey, u64)>,
    pub events: Vec<TreasuryEvent>,
    /// Recipients whose transfer should fail.
    pub rejecting: Vec<Pubkey>,
}

#[cfg(test)]
impl MemoryHost {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    pub fn received(&self, who: &Pubkey) -> u64 {
        self.transfers
            .iter()
            .filter(|(to, _)| to == who)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

#[cfg(test)]
impl TreasuryHost for MemoryHost {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> TreasuryResult<()> {
        if self.rejecting.contains(to) {
            return Err(TreasuryError::TransferFailed);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TreasuryError::InsufficientBalance)?;
        self.transfers.push((*to, amount));
        Ok(())
    }

    fn emit(&mut self, event: TreasuryEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        key: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl Fixture {
        fn new(lamports: u64, len: usize) -> Self {
            Self {
                key: Pubkey::new_unique(),
                lamports,
                data: vec![0; len],
            }
        }

        fn info<'a>(&'a mut self, owner: &'a Pubkey, writable: bool) -> AccountInfo<'a> {
            AccountInfo::new(
                &self.key,
                false,
                writable,
                &mut self.lamports,
                &mut self.data,
                owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn balance_excludes_the_rent_reserve() {
        let program = crate::ID;
        let mut treasury = Fixture::new(1_000, 16);
        let mut poor = Fixture::new(100, 16);
        {
            let none = Vec::new();
            let host = ProgramHost::with_reserve(treasury.info(&program, true), &none, 300);
            assert_eq!(host.balance(), 700);
        }
        let none = Vec::new();
        let host = ProgramHost::with_reserve(poor.info(&program, true), &none, 300);
        assert_eq!(host.balance(), 0);
    }

    #[test]
    fn transfer_moves_lamports_to_the_recipient() {
        let program = crate::ID;
        let system = Pubkey::default();
        let mut treasury = Fixture::new(1_000, 16);
        let mut alice = Fixture::new(5, 0);
        let alice_key = alice.key;
        {
            let accounts = vec![alice.info(&system, true)];
            let mut host = ProgramHost::with_reserve(treasury.info(&program, true), &accounts, 300);
            host.transfer(&alice_key, 200).unwrap();
            assert_eq!(host.balance(), 500);
            assert!(matches!(
                host.transfer(&alice_key, 501),
                Err(TreasuryError::InsufficientBalance)
            ));
        }
        assert_eq!(treasury.lamports, 800);
        assert_eq!(alice.lamports, 205);
    }

    #[test]
    fn recipient_must_be_supplied_and_writable() {
        let program = crate::ID;
        let system = Pubkey::default();
        let mut treasury = Fixture::new(1_000, 16);
        let mut frozen = Fixture::new(0, 0);
        let frozen_key = frozen.key;
        {
            let accounts = vec![frozen.info(&system, false)];
            let mut host = ProgramHost::with_reserve(treasury.info(&program, true), &accounts, 0);
            assert!(matches!(
                host.transfer(&Pubkey::new_unique(), 10),
                Err(TreasuryError::RecipientAccountMissing)
            ));
            assert!(matches!(
                host.transfer(&frozen_key, 10),
                Err(TreasuryError::RecipientAccountMissing)
            ));
        }
        assert_eq!(treasury.lamports, 1_000);
        assert_eq!(frozen.lamports, 0);
    }

    #[test]
    fn paying_the_treasury_itself_is_rejected() {
        let program = crate::ID;
        let mut treasury = Fixture::new(1_000, 16);
        let treasury_key = treasury.key;
        let info = treasury.info(&program, true);
        let accounts = vec![info.clone()];
        let mut host = ProgramHost::with_reserve(info, &accounts, 0);
        assert!(matches!(
            host.transfer(&treasury_key, 400),
            Err(TreasuryError::InvalidRecipient)
        ));
        assert_eq!(host.balance(), 1_000);
    }
}
