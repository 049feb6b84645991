mod payout;
mod payout_store;
mod treasury;

pub use payout::*;
pub use payout_store::*;
pub use treasury::*;
