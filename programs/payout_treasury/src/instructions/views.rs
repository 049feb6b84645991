use anchor_lang::prelude::*;

use crate::constants::{MAX_VIEW_BATCH, TREASURY_SEED};
use crate::error::TreasuryError;
use crate::host::ProgramHost;
use crate::query::{self, PayoutLookup, TreasuryStats};
use crate::state::{Payout, Treasury};

/// Read-only access for the view instructions; results go to return data.
#[derive(Accounts)]
pub struct TreasuryView<'info> {
    #[account(seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,
}

pub fn treasury_stats<'info>(
    ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
) -> Result<TreasuryStats> {
    let now = Clock::get()?.unix_timestamp;
    let host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    let stats = query::treasury_stats(&ctx.accounts.treasury, now, query::balance(&host))?;
    Ok(stats)
}

pub fn payout_by_id<'info>(
    ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
    payout_id: u32,
) -> Result<Payout> {
    let payout = query::payout_by_id(&ctx.accounts.treasury, payout_id)
        .cloned()
        .ok_or(TreasuryError::PayoutNotFound)?;
    Ok(payout)
}

pub fn payouts_batch<'info>(
    ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
    payout_ids: Vec<u32>,
) -> Result<Vec<PayoutLookup>> {
    require!(!payout_ids.is_empty(), TreasuryError::EmptyBatch);
    require!(payout_ids.len() <= MAX_VIEW_BATCH, TreasuryError::BatchTooLarge);
    Ok(query::payouts_batch(&ctx.accounts.treasury, &payout_ids))
}

pub fn next_payout_block_difference<'info>(
    ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let diff = query::next_payout_block_difference(&ctx.accounts.treasury, now)?;
    Ok(diff)
}
