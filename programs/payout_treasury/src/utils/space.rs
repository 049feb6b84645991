use std::io::{self, Write};

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::MAX_ACCOUNT_GROWTH;
use crate::error::{TreasuryError, TreasuryResult};
use crate::state::Treasury;

/// Sink that only counts the bytes written to it.
#[derive(Default)]
struct ByteCounter(usize);

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Account bytes the treasury needs right now, discriminator included.
pub fn serialized_len(treasury: &Treasury) -> Result<usize> {
    let mut counter = ByteCounter::default();
    AccountSerialize::try_serialize(treasury, &mut counter)?;
    Ok(counter.0)
}

/// New length and rent top-up when `current` bytes cannot hold `needed`;
/// `None` when the account already fits.
pub fn growth_plan(
    current: usize,
    needed: usize,
    rent: &Rent,
) -> TreasuryResult<Option<(usize, u64)>> {
    if needed <= current {
        return Ok(None);
    }
    if needed - current > MAX_ACCOUNT_GROWTH {
        return Err(TreasuryError::AccountGrowthTooLarge);
    }
    let top_up = rent
        .minimum_balance(needed)
        .checked_sub(rent.minimum_balance(current))
        .ok_or(TreasuryError::MathOverflow)?;
    Ok(Some((needed, top_up)))
}

/// Grow the treasury account when its serialized state no longer fits.
/// `payer` funds the extra rent so the spendable balance is unchanged.
pub fn ensure_capacity<'info>(
    treasury: &Account<'info, Treasury>,
    payer: &Signer<'info>,
    system_program: &Program<'info, System>,
) -> Result<()> {
    let info = treasury.to_account_info();
    let current = info.data_len();
    let needed = serialized_len(treasury)?;
    let Some((new_len, top_up)) = growth_plan(current, needed, &Rent::get()?)? else {
        return Ok(());
    };

    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                system_program::Transfer {
                    from: payer.to_account_info(),
                    to: info.clone(),
                },
            ),
            top_up,
        )?;
    }

    #[allow(deprecated)]
    info.realloc(new_len, false)?;
    msg!("treasury grown {} -> {} bytes (rent +{})", current, new_len, top_up);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PayoutRequest;

    #[test]
    fn fitting_state_needs_no_growth() {
        let rent = Rent::default();
        assert_eq!(growth_plan(1_032, 1_032, &rent).unwrap(), None);
        assert_eq!(growth_plan(1_032, 200, &rent).unwrap(), None);
    }

    #[test]
    fn growth_is_funded_by_the_rent_delta() {
        let rent = Rent::default();
        let (len, top_up) = growth_plan(1_032, 1_500, &rent).unwrap().unwrap();
        assert_eq!(len, 1_500);
        assert_eq!(top_up, rent.minimum_balance(1_500) - rent.minimum_balance(1_032));
        assert!(top_up > 0);
    }

    #[test]
    fn growth_is_capped_per_instruction() {
        let rent = Rent::default();
        assert!(growth_plan(100, 100 + MAX_ACCOUNT_GROWTH, &rent).unwrap().is_some());
        assert!(matches!(
            growth_plan(100, 101 + MAX_ACCOUNT_GROWTH, &rent),
            Err(TreasuryError::AccountGrowthTooLarge)
        ));
    }

    #[test]
    fn counted_length_matches_the_serialized_account() {
        let owner = Pubkey::new_unique();
        let mut t = Treasury::new(owner, 60, 0, 255);
        for _ in 0..3 {
            let id = t.allocate_payout_id().unwrap();
            let payout = PayoutRequest::OneTime {
                recipient: Pubkey::new_unique(),
                amount: 9,
            }
            .into_payout(id, 0);
            t.payouts.register(payout).unwrap();
        }
        let mut buf = Vec::new();
        t.try_serialize(&mut buf).unwrap();
        assert_eq!(serialized_len(&t).unwrap(), buf.len());
        assert!(buf.len() <= Treasury::MAX_SPACE);
    }
}
