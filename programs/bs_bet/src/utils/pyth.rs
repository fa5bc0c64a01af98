use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::error::GetPriceError;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;
use crate::constants::PRICE_DECIMALS;
use crate::errors::BetError;
use crate::state::BetConfig;

pub struct OraclePrice {
    /// Fixed-point, `PRICE_DECIMALS` decimals
    pub price: u64,
    pub observed_at: i64,
}

/// Resolves `asset_name` through the allow-list and reads a fresh price for it.
pub fn get_asset_price(
    config: &BetConfig,
    asset_name: &str,
    price_update: &Account<PriceUpdateV2>,
    clock: &Clock,
) -> Result<OraclePrice> {
    let feed_id = config.feed_for(asset_name)?;
    get_pyth_price(price_update, &feed_id, clock, config.max_price_age_seconds)
}

pub fn get_pyth_price(
    price_update: &Account<PriceUpdateV2>,
    feed_id: &[u8; 32],
    clock: &Clock,
    maximum_age: u64,
) -> Result<OraclePrice> {
    let price = price_update
        .get_price_no_older_than(clock, maximum_age, feed_id)
        .map_err(|err: GetPriceError| {
            msg!("Pyth get_price_no_older_than error: {:?}", err);
            match err {
                GetPriceError::PriceTooOld => error!(BetError::StalePriceFeed),
                GetPriceError::MismatchedFeedId => error!(BetError::PriceFeedMismatch),
                _ => error!(BetError::PriceFeedError),
            }
        })?;

    Ok(OraclePrice {
        price: scale_price(price.price, price.exponent)?,
        observed_at: price.publish_time,
    })
}

/// Rescales a raw `price * 10^exponent` feed value to `PRICE_DECIMALS` fixed decimals.
pub fn scale_price(price: i64, exponent: i32) -> Result<u64> {
    require!(price > 0, BetError::InvalidOraclePrice);
    let raw = price as u64;

    let shift = PRICE_DECIMALS
        .checked_add(exponent)
        .ok_or_else(|| error!(BetError::PriceCalculationOverflow))?;
    let factor = 10u64
        .checked_pow(shift.unsigned_abs())
        .ok_or_else(|| error!(BetError::PriceCalculationOverflow))?;

    if shift >= 0 {
        raw.checked_mul(factor)
            .ok_or_else(|| error!(BetError::PriceCalculationOverflow))
    } else {
        Ok(raw / factor)
    }
}
