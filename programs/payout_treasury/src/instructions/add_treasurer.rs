use anchor_lang::prelude::*;

use crate::authority;
use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::state::Treasury;
use crate::utils::space::ensure_capacity;

#[derive(Accounts)]
pub struct AddTreasurer<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    /// Must be the treasury owner; funds any account growth.
    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_treasurer<'info>(
    ctx: Context<'_, '_, '_, 'info, AddTreasurer<'info>>,
    treasurer: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    authority::add_treasurer(&mut ctx.accounts.treasury, &caller, treasurer, &mut host)?;
    ensure_capacity(
        &ctx.accounts.treasury,
        &ctx.accounts.owner,
        &ctx.accounts.system_program,
    )
}
