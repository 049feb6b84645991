use anchor_lang::prelude::*;

use crate::authority;
use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::state::Treasury;

#[derive(Accounts)]
pub struct RemoveTreasurer<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    pub owner: Signer<'info>,
}

pub fn remove_treasurer<'info>(
    ctx: Context<'_, '_, '_, 'info, RemoveTreasurer<'info>>,
    treasurer: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    authority::remove_treasurer(&mut ctx.accounts.treasury, &caller, treasurer, &mut host)?;
    Ok(())
}
