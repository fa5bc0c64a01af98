pub mod bet_config;
pub mod user_profile;
pub mod user_auth_state;
pub mod active_bet;

pub use bet_config::*;
pub use user_profile::*;
pub use user_auth_state::*;
pub use active_bet::*;
