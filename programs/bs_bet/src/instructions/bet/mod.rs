pub mod open_bet;
pub mod resolve_bet;

pub use open_bet::*;
pub use resolve_bet::*;
