pub const SEED_BET_CONFIG: &[u8] = b"bet_config";
pub const SEED_PROFILE: &[u8] = b"profile";
pub const SEED_AUTH_STATE: &[u8] = b"auth_state";

pub const DISCRIMINATOR_SIZE: usize = 8;
pub const STRING_LENGTH_PREFIX: usize = 4;
pub const MAX_ASSET_NAME_LENGTH: usize = 20;
pub const MAX_ASSETS: usize = 8;

// Policy defaults, stored into BetConfig when no override is given.
pub const DEFAULT_PAYOUT_MULTIPLIER: u64 = 2;
pub const DEFAULT_INITIAL_POINTS: u64 = 1000;
pub const DEFAULT_MAX_PRICE_AGE_SECONDS: u64 = 3600 * 2;
pub const DEFAULT_ASSET_SYMBOL: &str = "SOL/USD";
pub const SOL_USD_FEED_ID_HEX: &str =
    "0xef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d";

/// Prices are stored with this many fixed decimals regardless of the feed exponent.
pub const PRICE_DECIMALS: i32 = 6;

pub const DELEGATION_MESSAGE_PREFIX: &str = "BSBET_DELEGATE_AUTH";

pub use ephemeral_rollups_sdk::consts::DELEGATION_PROGRAM_ID;
