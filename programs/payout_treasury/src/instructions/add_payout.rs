use anchor_lang::prelude::*;

use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::ledger;
use crate::state::{PayoutRequest, Treasury};
use crate::utils::space::ensure_capacity;

#[derive(Accounts)]
pub struct AddPayout<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    /// Must be a treasurer; funds any account growth.
    #[account(mut)]
    pub treasurer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Register one payout. Its id is written to return data.
pub fn add_payout<'info>(
    ctx: Context<'_, '_, '_, 'info, AddPayout<'info>>,
    request: PayoutRequest,
) -> Result<u32> {
    request.ensure_recipient_not(&ctx.accounts.treasury.key())?;
    let caller = ctx.accounts.treasurer.key();
    let now = Clock::get()?.unix_timestamp;
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    let id = ledger::add_payout(&mut ctx.accounts.treasury, &caller, request, now, &mut host)?;
    ensure_capacity(
        &ctx.accounts.treasury,
        &ctx.accounts.treasurer,
        &ctx.accounts.system_program,
    )?;
    Ok(id)
}
