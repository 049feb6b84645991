use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::TREASURY_SEED;
use crate::error::TreasuryError;
use crate::events::Deposited;
use crate::state::Treasury;

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Fund the treasury. Anyone may deposit.
pub fn deposit<'info>(ctx: Context<'_, '_, '_, 'info, Deposit<'info>>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::InvalidAmount);

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(Deposited {
        depositor: ctx.accounts.depositor.key(),
        amount,
    });
    Ok(())
}
