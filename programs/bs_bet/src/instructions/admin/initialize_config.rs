use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::get_feed_id_from_hex;
use crate::constants::{
    SEED_BET_CONFIG, DEFAULT_ASSET_SYMBOL, DEFAULT_INITIAL_POINTS,
    DEFAULT_MAX_PRICE_AGE_SECONDS, DEFAULT_PAYOUT_MULTIPLIER, SOL_USD_FEED_ID_HEX,
};
use crate::errors::BetError;
use crate::program::BsBet;
use crate::events::ConfigInitialized;
use crate::state::{AssetFeed, BetConfig};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct AssetFeedParams {
    pub symbol: String,
    /// Hex feed id, with or without the 0x prefix
    pub feed_id_hex: String,
}

/// Every field falls back to the program default when omitted.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default)]
pub struct BetConfigParams {
    pub payout_multiplier: Option<u64>,
    pub initial_points: Option<u64>,
    pub max_price_age_seconds: Option<u64>,
    pub assets: Option<Vec<AssetFeedParams>>,
}

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = BetConfig::LEN,
        seeds = [SEED_BET_CONFIG],
        bump
    )]
    pub bet_config: Account<'info, BetConfig>,

    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key()) @ BetError::Unauthorized
    )]
    pub program: Program<'info, BsBet>,

    /// Only the upgrade authority may pick the policy.
    #[account(
        constraint = is_upgrade_authority(program_data.upgrade_authority_address, &admin.key()) @ BetError::Unauthorized
    )]
    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}

pub fn is_upgrade_authority(upgrade_authority: Option<Pubkey>, admin: &Pubkey) -> bool {
    upgrade_authority.as_ref() == Some(admin)
}

pub fn initialize_config(ctx: Context<InitializeConfig>, params: BetConfigParams) -> Result<()> {
    let bet_config = &mut ctx.accounts.bet_config;

    bet_config.admin = ctx.accounts.admin.key();
    bet_config.payout_multiplier = params.payout_multiplier.unwrap_or(DEFAULT_PAYOUT_MULTIPLIER);
    bet_config.initial_points = params.initial_points.unwrap_or(DEFAULT_INITIAL_POINTS);
    bet_config.max_price_age_seconds = params
        .max_price_age_seconds
        .unwrap_or(DEFAULT_MAX_PRICE_AGE_SECONDS);
    bet_config.assets = build_asset_feeds(params.assets)?;
    bet_config.bump = ctx.bumps.bet_config;

    bet_config.validate()?;

    emit!(ConfigInitialized {
        admin: bet_config.admin,
        payout_multiplier: bet_config.payout_multiplier,
        initial_points: bet_config.initial_points,
        max_price_age_seconds: bet_config.max_price_age_seconds,
        asset_count: bet_config.assets.len() as u8,
    });

    msg!(
        "Bet config initialized: {} asset(s), payout x{}",
        bet_config.assets.len(),
        bet_config.payout_multiplier
    );

    Ok(())
}

pub fn build_asset_feeds(assets: Option<Vec<AssetFeedParams>>) -> Result<Vec<AssetFeed>> {
    let assets = assets.unwrap_or_else(|| {
        vec![AssetFeedParams {
            symbol: DEFAULT_ASSET_SYMBOL.to_string(),
            feed_id_hex: SOL_USD_FEED_ID_HEX.to_string(),
        }]
    });

    assets
        .into_iter()
        .map(|asset| {
            let feed_id = get_feed_id_from_hex(&asset.feed_id_hex)
                .map_err(|_| error!(BetError::InvalidPythFeedIdFormat))?;
            Ok(AssetFeed { symbol: asset.symbol, feed_id })
        })
        .collect()
}
