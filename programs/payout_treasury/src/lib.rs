use anchor_lang::prelude::*;

pub mod authority;
pub mod constants;
pub mod error;
pub mod events;
pub mod host;
pub mod instructions;
pub mod ledger;
pub mod query;
pub mod settlement;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use query::{PayoutLookup, TreasuryStats};
pub use state::*;

declare_id!("4CQUHiFRozEAbanjpm8t21dD3GAeo89koXaCSDip58ij");

#[program]
pub mod payout_treasury {
    use super::*;

    pub fn initialize_treasury<'info>(
        ctx: Context<'_, '_, '_, 'info, InitializeTreasury<'info>>,
        payout_frequency: u64,
    ) -> Result<()> {
        instructions::initialize_treasury::initialize_treasury(ctx, payout_frequency)
    }

    pub fn deposit<'info>(
        ctx: Context<'_, '_, '_, 'info, Deposit<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::deposit::deposit(ctx, amount)
    }

    pub fn add_treasurer<'info>(
        ctx: Context<'_, '_, '_, 'info, AddTreasurer<'info>>,
        treasurer: Pubkey,
    ) -> Result<()> {
        instructions::add_treasurer::add_treasurer(ctx, treasurer)
    }

    pub fn remove_treasurer<'info>(
        ctx: Context<'_, '_, '_, 'info, RemoveTreasurer<'info>>,
        treasurer: Pubkey,
    ) -> Result<()> {
        instructions::remove_treasurer::remove_treasurer(ctx, treasurer)
    }

    pub fn add_payout<'info>(
        ctx: Context<'_, '_, '_, 'info, AddPayout<'info>>,
        request: PayoutRequest,
    ) -> Result<u32> {
        instructions::add_payout::add_payout(ctx, request)
    }

    pub fn add_payout_batch<'info>(
        ctx: Context<'_, '_, '_, 'info, AddPayoutBatch<'info>>,
        requests: Vec<PayoutRequest>,
    ) -> Result<Vec<u32>> {
        instructions::add_payout_batch::add_payout_batch(ctx, requests)
    }

    pub fn cancel_payout<'info>(
        ctx: Context<'_, '_, '_, 'info, CancelPayout<'info>>,
        payout_id: u32,
    ) -> Result<()> {
        instructions::cancel_payout::cancel_payout(ctx, payout_id)
    }

    pub fn cancel_payouts<'info>(
        ctx: Context<'_, '_, '_, 'info, CancelPayout<'info>>,
        payout_ids: Vec<u32>,
    ) -> Result<()> {
        instructions::cancel_payout::cancel_payouts(ctx, payout_ids)
    }

    pub fn process_pending_payouts<'info>(
        ctx: Context<'_, '_, '_, 'info, ProcessPendingPayouts<'info>>,
    ) -> Result<()> {
        instructions::process_pending_payouts::process_pending_payouts(ctx)
    }

    pub fn set_payout_frequency<'info>(
        ctx: Context<'_, '_, '_, 'info, SetPayoutFrequency<'info>>,
        new_frequency: u64,
    ) -> Result<()> {
        instructions::set_payout_frequency::set_payout_frequency(ctx, new_frequency)
    }

    pub fn get_treasury_stats<'info>(
        ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
    ) -> Result<TreasuryStats> {
        instructions::views::treasury_stats(ctx)
    }

    pub fn get_payout_by_id<'info>(
        ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
        payout_id: u32,
    ) -> Result<Payout> {
        instructions::views::payout_by_id(ctx, payout_id)
    }

    pub fn get_payouts_batch<'info>(
        ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
        payout_ids: Vec<u32>,
    ) -> Result<Vec<PayoutLookup>> {
        instructions::views::payouts_batch(ctx, payout_ids)
    }

    pub fn get_next_payout_block_difference<'info>(
        ctx: Context<'_, '_, '_, 'info, TreasuryView<'info>>,
    ) -> Result<u64> {
        instructions::views::next_payout_block_difference(ctx)
    }
}
