pub mod initialize_treasury;
pub mod deposit;
pub mod add_treasurer;
pub mod remove_treasurer;
pub mod add_payout;
pub mod add_payout_batch;
pub mod cancel_payout;
pub mod process_pending_payouts;
pub mod set_payout_frequency;
pub mod views;

pub use initialize_treasury::*;
pub use deposit::*;
pub use add_treasurer::*;
pub use remove_treasurer::*;
pub use add_payout::*;
pub use add_payout_batch::*;
pub use cancel_payout::*;
pub use process_pending_payouts::*;
pub use set_payout_frequency::*;
pub use views::*;
