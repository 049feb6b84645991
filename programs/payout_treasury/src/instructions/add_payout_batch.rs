use anchor_lang::prelude::*;

use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::ledger;
use crate::state::{PayoutRequest, Treasury};
use crate::utils::space::ensure_capacity;

#[derive(Accounts)]
pub struct AddPayoutBatch<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub treasurer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// All-or-nothing: one invalid request rejects the whole batch.
pub fn add_payout_batch<'info>(
    ctx: Context<'_, '_, '_, 'info, AddPayoutBatch<'info>>,
    requests: Vec<PayoutRequest>,
) -> Result<Vec<u32>> {
    let treasury_key = ctx.accounts.treasury.key();
    for request in &requests {
        request.ensure_recipient_not(&treasury_key)?;
    }
    let caller = ctx.accounts.treasurer.key();
    let now = Clock::get()?.unix_timestamp;
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    let ids = ledger::add_payout_batch(&mut ctx.accounts.treasury, &caller, requests, now, &mut host)?;
    ensure_capacity(
        &ctx.accounts.treasury,
        &ctx.accounts.treasurer,
        &ctx.accounts.system_program,
    )?;
    Ok(ids)
}
