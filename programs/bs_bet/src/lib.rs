use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::ephemeral;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("FQLt6TZ1r15Pvj8ibh8u7RMcFz2MGeKfNnHm5QsWisdg");

#[ephemeral]
#[program]
pub mod bs_bet {
    use super::*;

    // --- CONFIG ---

    pub fn initialize_config(ctx: Context<InitializeConfig>, params: BetConfigParams) -> Result<()> {
        admin::initialize_config(ctx, params)
    }

    // --- PROFILE ---

    pub fn create_user_profile(ctx: Context<CreateUserProfile>) -> Result<()> {
        instructions::create_user_profile::create_user_profile(ctx)
    }

    // --- BETS ---

    pub fn open_bet(
        ctx: Context<OpenBet>,
        asset_name: String,
        direction: u8,
        amount: u64,
        duration_seconds: i64,
    ) -> Result<()> {
        bet::open_bet(ctx, asset_name, direction, amount, duration_seconds)
    }

    pub fn resolve_bet(ctx: Context<ResolveBet>) -> Result<()> {
        bet::resolve_bet(ctx)
    }

    // --- DELEGATION ---

    pub fn manage_delegation(
        ctx: Context<ManageDelegation>,
        action: u8,
        signed_message: Vec<u8>,
        signature: [u8; 64],
    ) -> Result<()> {
        instructions::manage_delegation::manage_delegation(ctx, action, signed_message, signature)
    }

    pub fn delegate_auth_state(ctx: Context<DelegateAuthState>) -> Result<()> {
        instructions::delegation::delegate_auth_state(ctx)
    }

    pub fn undelegate_from_magicblock(ctx: Context<UndelegateFromMagicblock>) -> Result<()> {
        instructions::delegation::undelegate_from_magicblock(ctx)
    }
}
