use anchor_lang::prelude::*;

use crate::error::TreasuryResult;
use crate::events::{TreasurerAdded, TreasurerRemoved, TreasuryEvent};
use crate::host::TreasuryHost;
use crate::state::Treasury;

/// Owner-only: grant treasurer rights to `addr`.
pub fn add_treasurer<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    addr: Pubkey,
    host: &mut H,
) -> TreasuryResult<()> {
    treasury.ensure_owner(caller)?;
    treasury.insert_treasurer(addr)?;
    msg!("treasurer added: {}", addr);
    host.emit(TreasuryEvent::TreasurerAdded(TreasurerAdded { treasurer: addr }));
    Ok(())
}

/// Owner-only: revoke treasurer rights. The owner itself cannot be removed.
pub fn remove_treasurer<H: TreasuryHost>(
    treasury: &mut Treasury,
    caller: &Pubkey,
    addr: Pubkey,
    host: &mut H,
) -> TreasuryResult<()> {
    treasury.ensure_owner(caller)?;
    treasury.drop_treasurer(&addr)?;
    msg!("treasurer removed: {}", addr);
    host.emit(TreasuryEvent::TreasurerRemoved(TreasurerRemoved { treasurer: addr }));
    Ok(())
}
