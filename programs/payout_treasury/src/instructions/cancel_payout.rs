use anchor_lang::prelude::*;

use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::ledger;
use crate::state::Treasury;
use crate::utils::space::ensure_capacity;

/// Shared by `cancel_payout` and `cancel_payouts`.
#[derive(Accounts)]
pub struct CancelPayout<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    /// Must be a treasurer; funds archive growth.
    #[account(mut)]
    pub treasurer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn cancel_payout<'info>(
    ctx: Context<'_, '_, '_, 'info, CancelPayout<'info>>,
    payout_id: u32,
) -> Result<()> {
    let caller = ctx.accounts.treasurer.key();
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    ledger::cancel_payout(&mut ctx.accounts.treasury, &caller, payout_id, &mut host)?;
    ensure_capacity(
        &ctx.accounts.treasury,
        &ctx.accounts.treasurer,
        &ctx.accounts.system_program,
    )
}

pub fn cancel_payouts<'info>(
    ctx: Context<'_, '_, '_, 'info, CancelPayout<'info>>,
    payout_ids: Vec<u32>,
) -> Result<()> {
    let caller = ctx.accounts.treasurer.key();
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    ledger::cancel_payouts(&mut ctx.accounts.treasury, &caller, &payout_ids, &mut host)?;
    ensure_capacity(
        &ctx.accounts.treasury,
        &ctx.accounts.treasurer,
        &ctx.accounts.system_program,
    )
}
