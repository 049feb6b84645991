use anchor_lang::prelude::*;

use crate::constants::{TREASURY_INITIAL_SPACE, TREASURY_SEED};
use crate::error::TreasuryError;
use crate::events::TreasuryInitialized;
use crate::state::Treasury;

#[derive(Accounts)]
pub struct InitializeTreasury<'info> {
    #[account(
        init,
        payer = owner,
        space = TREASURY_INITIAL_SPACE,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Create the singleton treasury with the signer as owner and first treasurer.
///
/// Accounts:
/// 0. `[writable]` treasury: The treasury PDA to create
/// 1. `[writable, signer]` owner: Pays for the account and becomes owner
/// 2. `[]` system_program
///
/// Data:
/// - payout_frequency: [u64] Minimum seconds between settlement runs
pub fn initialize_treasury<'info>(
    ctx: Context<'_, '_, '_, 'info, InitializeTreasury<'info>>,
    payout_frequency: u64,
) -> Result<()> {
    require!(payout_frequency > 0, TreasuryError::InvalidFrequency);

    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();
    ctx.accounts
        .treasury
        .set_inner(Treasury::new(owner, payout_frequency, now, ctx.bumps.treasury));

    msg!("treasury initialized: owner={} frequency={}", owner, payout_frequency);
    emit!(TreasuryInitialized {
        owner,
        payout_frequency,
        timestamp: now,
    });
    Ok(())
}
