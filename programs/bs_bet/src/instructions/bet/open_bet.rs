use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;
use crate::constants::{SEED_BET_CONFIG, SEED_PROFILE};
use crate::errors::BetError;
use crate::events::BetOpened;
use crate::state::{ActiveBet, BetConfig, BetDirection, UserProfile};
use crate::utils::pyth::get_asset_price;

#[derive(Accounts)]
pub struct OpenBet<'info> {
    #[account(
        init,
        payer = user_signer,
        space = ActiveBet::SPACE,
    )]
    pub bet_account: Account<'info, ActiveBet>,

    #[account(mut)]
    pub user_signer: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_PROFILE, user_signer.key().as_ref()],
        bump = user_profile.bump,
        constraint = user_profile.authority == user_signer.key() @ BetError::UserProfileAuthorityMismatch
    )]
    pub user_profile: Account<'info, UserProfile>,

    #[account(
        seeds = [SEED_BET_CONFIG],
        bump = bet_config.bump
    )]
    pub bet_config: Account<'info, BetConfig>,

    pub pyth_price_feed: Account<'info, PriceUpdateV2>,
    pub system_program: Program<'info, System>,
}

pub fn open_bet(
    ctx: Context<OpenBet>,
    asset_name: String,
    direction: u8,
    amount: u64,
    duration_seconds: i64,
) -> Result<()> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.bet_config;

    // 1-4. Request shape
    let direction = validate_bet_request(config, &asset_name, direction, amount, duration_seconds)?;

    // 5. Oracle
    let entry = get_asset_price(config, &asset_name, &ctx.accounts.pyth_price_feed, &clock)?;

    // 6. Balance
    let user_profile = &mut ctx.accounts.user_profile;
    let points_before = user_profile.points;
    user_profile.debit(amount)?;

    let user = ctx.accounts.user_signer.key();
    let bet = ActiveBet::open(
        user,
        asset_name,
        direction,
        amount,
        duration_seconds,
        entry.price,
        clock.unix_timestamp,
    )?;
    let expiry_timestamp = bet.expiry_timestamp()?;

    msg!("User {} points before bet: {}", user, points_before);
    msg!(
        "Points deducted: {}. New points balance: {}",
        amount,
        user_profile.points
    );
    msg!(
        "Entry price {} observed at {}",
        entry.price,
        entry.observed_at
    );

    emit!(BetOpened {
        bet_address: ctx.accounts.bet_account.key(),
        user,
        asset_name: bet.asset_name.clone(),
        direction,
        amount,
        entry_price: entry.price,
        expiry_timestamp,
    });

    ctx.accounts.bet_account.set_inner(bet);

    Ok(())
}

/// Input checks that need no oracle or balance, in the order callers see them fail.
pub fn validate_bet_request(
    config: &BetConfig,
    asset_name: &str,
    direction: u8,
    amount: u64,
    duration_seconds: i64,
) -> Result<BetDirection> {
    require!(config.is_supported(asset_name), BetError::UnsupportedAsset);
    let direction = BetDirection::try_from(direction)?;
    require!(amount > 0, BetError::ZeroAmount);
    require!(duration_seconds > 0, BetError::InvalidDuration);
    Ok(direction)
}
