use anchor_lang::prelude::*;
use crate::constants::{DISCRIMINATOR_SIZE, MAX_ASSET_NAME_LENGTH, STRING_LENGTH_PREFIX};
use crate::errors::BetError;
use crate::utils::outcome::{is_winning, payout_for};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetDirection {
    Down,
    Up,
}

impl TryFrom<u8> for BetDirection {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(BetDirection::Down),
            1 => Ok(BetDirection::Up),
            _ => Err(error!(BetError::InvalidDirection)),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetStatus {
    Active,
    ResolvedWon,
    ResolvedLost,
}

#[account]
#[derive(Debug)]
pub struct ActiveBet {
    pub user: Pubkey,
    pub asset_name: String,
    pub direction: BetDirection,
    pub amount_staked: u64,

    pub open_timestamp: i64,
    pub duration_seconds: i64,

    pub entry_price: u64,
    /// Zero until resolved
    pub resolved_price: u64,

    pub status: BetStatus,
}

impl ActiveBet {
    pub const SPACE: usize = DISCRIMINATOR_SIZE
        + 32
        + STRING_LENGTH_PREFIX + MAX_ASSET_NAME_LENGTH
        + 1
        + 8
        + 8
        + 8
        + 8
        + 8
        + 1;

    pub fn open(
        user: Pubkey,
        asset_name: String,
        direction: BetDirection,
        amount_staked: u64,
        duration_seconds: i64,
        entry_price: u64,
        now: i64,
    ) -> Result<Self> {
        let bet = ActiveBet {
            user,
            asset_name,
            direction,
            amount_staked,
            open_timestamp: now,
            duration_seconds,
            entry_price,
            resolved_price: 0,
            status: BetStatus::Active,
        };
        // Reject windows that can never be resolved.
        bet.expiry_timestamp()?;
        Ok(bet)
    }

    pub fn expiry_timestamp(&self) -> Result<i64> {
        self.open_timestamp
            .checked_add(self.duration_seconds)
            .ok_or_else(|| error!(BetError::TimestampOverflow))
    }

    /// Status and expiry gates, checked before the oracle is read.
    pub fn ensure_resolvable(&self, now: i64) -> Result<()> {
        require!(
            self.status == BetStatus::Active,
            BetError::BetNotActiveOrAlreadyResolved
        );
        require!(now >= self.expiry_timestamp()?, BetError::BetNotYetExpired);
        Ok(())
    }

    /// Records the outcome and returns the amount owed to the bettor (zero on a loss).
    pub fn apply_resolution(&mut self, resolved_price: u64, payout_multiplier: u64) -> Result<u64> {
        require!(
            self.status == BetStatus::Active,
            BetError::BetNotActiveOrAlreadyResolved
        );

        let won = is_winning(self.direction, self.entry_price, resolved_price);
        let payout = if won {
            payout_for(self.amount_staked, payout_multiplier)?
        } else {
            0
        };

        self.resolved_price = resolved_price;
        self.status = if won { BetStatus::ResolvedWon } else { BetStatus::ResolvedLost };

        Ok(payout)
    }
}
