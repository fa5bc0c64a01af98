use anchor_lang::prelude::*;
use crate::state::{BetDirection, BetStatus};

// --- CONFIG & PROFILE ---
#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub payout_multiplier: u64,
    pub initial_points: u64,
    pub max_price_age_seconds: u64,
    pub asset_count: u8,
}

#[event]
pub struct ProfileCreated {
    pub authority: Pubkey,
    pub profile: Pubkey,
    pub points: u64,
}

// --- BETTING ---
#[event]
pub struct BetOpened {
    pub bet_address: Pubkey,
    pub user: Pubkey,
    pub asset_name: String,
    pub direction: BetDirection,
    pub amount: u64,
    pub entry_price: u64,
    pub expiry_timestamp: i64,
}

#[event]
pub struct BetResolved {
    pub bet_address: Pubkey,
    pub user: Pubkey,
    pub resolver: Pubkey,
    pub entry_price: u64,
    pub resolved_price: u64,
    pub status: BetStatus,
    pub payout: u64,
}

// --- DELEGATION ---
#[event]
pub struct DelegationFlagChanged {
    pub user: Pubkey,
    pub is_delegated: bool,
    pub nonce: u64,
    pub timestamp: i64,
}

#[event]
pub struct AuthStateDelegated {
    pub auth_state: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct AuthStateUndelegationRequested {
    pub auth_state: Pubkey,
    pub user: Pubkey,
}
