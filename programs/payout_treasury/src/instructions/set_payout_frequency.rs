use anchor_lang::prelude::*;

use crate::constants::TREASURY_SEED;
use crate::host::ProgramHost;
use crate::settlement;
use crate::state::Treasury;

#[derive(Accounts)]
pub struct SetPayoutFrequency<'info> {
    #[account(mut, seeds = [TREASURY_SEED], bump = treasury.bump)]
    pub treasury: Account<'info, Treasury>,

    pub owner: Signer<'info>,
}

pub fn set_payout_frequency<'info>(
    ctx: Context<'_, '_, '_, 'info, SetPayoutFrequency<'info>>,
    new_frequency: u64,
) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let mut host = ProgramHost::new(ctx.accounts.treasury.to_account_info(), ctx.remaining_accounts)?;
    settlement::set_payout_frequency(&mut ctx.accounts.treasury, &caller, new_frequency, &mut host)?;
    Ok(())
}
