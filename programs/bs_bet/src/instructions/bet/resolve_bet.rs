use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;
use crate::constants::{SEED_BET_CONFIG, SEED_PROFILE};
use crate::errors::BetError;
use crate::events::BetResolved;
use crate::state::{ActiveBet, BetConfig, BetStatus, UserProfile};
use crate::utils::pyth::get_asset_price;

#[derive(Accounts)]
pub struct ResolveBet<'info> {
    /// CHECK: Ownership and layout are verified in the handler so a missing
    /// bet surfaces as BetNotFound.
    #[account(mut)]
    pub bet_account: UncheckedAccount<'info>,

    /// Anyone may resolve; payouts only ever go to the bet's own profile.
    pub resolver: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_PROFILE, user_profile.authority.as_ref()],
        bump = user_profile.bump,
    )]
    pub user_profile: Account<'info, UserProfile>,

    #[account(
        seeds = [SEED_BET_CONFIG],
        bump = bet_config.bump
    )]
    pub bet_config: Account<'info, BetConfig>,

    pub pyth_price_feed: Account<'info, PriceUpdateV2>,
}

pub fn resolve_bet(ctx: Context<ResolveBet>) -> Result<()> {
    let clock = Clock::get()?;
    let bet_info = ctx.accounts.bet_account.to_account_info();

    // 1. Load
    let mut bet = load_bet(&bet_info)?;
    require_keys_eq!(
        ctx.accounts.user_profile.authority,
        bet.user,
        BetError::UserProfileBetUserMismatch
    );

    // 2-3. Status and expiry
    bet.ensure_resolvable(clock.unix_timestamp)?;

    // 4. Oracle
    let config = &ctx.accounts.bet_config;
    let resolved = get_asset_price(config, &bet.asset_name, &ctx.accounts.pyth_price_feed, &clock)?;

    // 5-6. Outcome
    let payout = bet.apply_resolution(resolved.price, config.payout_multiplier)?;

    // 7. Credit
    let user_profile = &mut ctx.accounts.user_profile;
    if payout > 0 {
        user_profile.credit(payout)?;
        msg!(
            "Bet WON! Payout: {}. New points balance: {}",
            payout,
            user_profile.points
        );
    } else {
        msg!("Bet LOST. Points balance remains: {}", user_profile.points);
    }

    store_bet(&bet_info, &bet)?;

    emit!(BetResolved {
        bet_address: bet_info.key(),
        user: bet.user,
        resolver: ctx.accounts.resolver.key(),
        entry_price: bet.entry_price,
        resolved_price: bet.resolved_price,
        status: bet.status,
        payout,
    });

    msg!("Bet resolved for user: {}", bet.user);

    Ok(())
}

fn load_bet(bet_info: &AccountInfo) -> Result<ActiveBet> {
    require_keys_eq!(*bet_info.owner, crate::ID, BetError::BetNotFound);

    let data = bet_info.try_borrow_data()?;
    require!(!data.is_empty(), BetError::BetNotFound);

    let mut data_slice: &[u8] = &data;
    ActiveBet::try_deserialize(&mut data_slice).map_err(|_| error!(BetError::BetNotFound))
}

fn store_bet(bet_info: &AccountInfo, bet: &ActiveBet) -> Result<()> {
    let mut data = bet_info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    bet.try_serialize(&mut writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BetDirection;

    fn serialized_bet() -> (ActiveBet, Vec<u8>) {
        let bet = ActiveBet::open(
            Pubkey::new_unique(),
            "SOL/USD".to_string(),
            BetDirection::Up,
            100,
            60,
            100_000_000,
            1_000,
        )
        .unwrap();
        let mut data = vec![0u8; ActiveBet::SPACE];
        let mut writer: &mut [u8] = &mut data[..];
        bet.try_serialize(&mut writer).unwrap();
        (bet, data)
    }

    #[test]
    fn test_load_and_store_round_trip_through_account() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1_000_000u64;
        let (bet, mut data) = serialized_bet();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let mut loaded = load_bet(&info).unwrap();
        assert_eq!(loaded.user, bet.user);
        assert_eq!(loaded.status, BetStatus::Active);

        loaded.apply_resolution(95_000_000, 2).unwrap();
        store_bet(&info, &loaded).unwrap();

        let reloaded = load_bet(&info).unwrap();
        assert_eq!(reloaded.status, BetStatus::ResolvedLost);
        assert_eq!(reloaded.resolved_price, 95_000_000);
    }

    #[test]
    fn test_missing_bet() {
        let key = Pubkey::new_unique();
        let mut lamports = 0u64;

        // Never created: still owned by the system program.
        let system = anchor_lang::system_program::ID;
        let mut empty: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut empty, &system, false, 0);
        assert_eq!(load_bet(&info).unwrap_err(), BetError::BetNotFound.into());
    }

    #[test]
    fn test_not_a_bet() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1u64;

        let mut garbage = vec![3u8; ActiveBet::SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut garbage, &owner, false, 0);
        assert_eq!(load_bet(&info).unwrap_err(), BetError::BetNotFound.into());
    }
}
