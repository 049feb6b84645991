use anchor_lang::prelude::*;

use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::settlement;
use crate::state::Treasury;
use crate::utils::space::ensure_capacity;

#[derive(Accounts)]
pub struct ProcessPendingPayouts<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    /// Must be a treasurer; funds archive growth.
    #[account(mut)]
    pub treasurer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Settle every due payout.
///
/// Accounts:
/// 0. `[writable]` treasury
/// 1. `[writable, signer]` treasurer
/// 2. `[]` system_program
/// 3.. `[writable]` one account per distinct recipient with a due amount
pub fn process_pending_payouts<'info>(
    ctx: Context<'_, '_, '_, 'info, ProcessPendingPayouts<'info>>,
) -> Result<()> {
    let caller = ctx.accounts.treasurer.key();
    let now = Clock::get()?.unix_timestamp;
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    let report =
        settlement::process_pending_payouts(&mut ctx.accounts.treasury, &caller, now, &mut host)?;
    msg!(
        "processed ids {:?}, completed {:?}",
        report.processed_ids,
        report.completed_ids
    );
    ensure_capacity(
        &ctx.accounts.treasury,
        &ctx.accounts.treasurer,
        &ctx.accounts.system_program,
    )
}
