pub mod admin;
pub mod bet;
pub mod create_user_profile;
pub mod manage_delegation;
pub mod delegation;

pub use admin::*;
pub use bet::*;
pub use create_user_profile::*;
pub use manage_delegation::*;
pub use delegation::*;
