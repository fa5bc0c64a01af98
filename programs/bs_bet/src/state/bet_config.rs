use anchor_lang::prelude::*;
use crate::constants::{MAX_ASSETS, MAX_ASSET_NAME_LENGTH, STRING_LENGTH_PREFIX, DISCRIMINATOR_SIZE};
use crate::errors::BetError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssetFeed {
    /// E.g., "SOL/USD"
    pub symbol: String,
    /// Pyth price feed id (not the account address)
    pub feed_id: [u8; 32],
}

impl AssetFeed {
    pub const LEN: usize = STRING_LENGTH_PREFIX + MAX_ASSET_NAME_LENGTH + 32;
}

#[account]
pub struct BetConfig {
    /// Signer that initialized the config
    pub admin: Pubkey,

    /// Payout on a win is `amount_staked * payout_multiplier`
    pub payout_multiplier: u64,

    /// Balance granted on first profile creation
    pub initial_points: u64,

    /// Oldest acceptable oracle observation, in seconds
    pub max_price_age_seconds: u64,

    /// Tradable assets and their feeds
    pub assets: Vec<AssetFeed>,

    pub bump: u8,
}

impl BetConfig {
    pub const LEN: usize = DISCRIMINATOR_SIZE
        + 32
        + 8
        + 8
        + 8
        + 4 + MAX_ASSETS * AssetFeed::LEN
        + 1;

    pub fn feed_for(&self, symbol: &str) -> Result<[u8; 32]> {
        self.assets
            .iter()
            .find(|asset| asset.symbol == symbol)
            .map(|asset| asset.feed_id)
            .ok_or_else(|| error!(BetError::UnsupportedAsset))
    }

    pub fn is_supported(&self, symbol: &str) -> bool {
        self.assets.iter().any(|asset| asset.symbol == symbol)
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.payout_multiplier >= 1, BetError::InvalidConfig);
        require!(self.initial_points > 0, BetError::InvalidConfig);
        require!(self.max_price_age_seconds > 0, BetError::InvalidConfig);
        require!(
            !self.assets.is_empty() && self.assets.len() <= MAX_ASSETS,
            BetError::InvalidConfig
        );

        for (i, asset) in self.assets.iter().enumerate() {
            require!(
                !asset.symbol.is_empty() && asset.symbol.len() <= MAX_ASSET_NAME_LENGTH,
                BetError::InvalidConfig
            );
            require!(
                !self.assets[..i].iter().any(|prev| prev.symbol == asset.symbol),
                BetError::InvalidConfig
            );
        }

        Ok(())
    }
}
