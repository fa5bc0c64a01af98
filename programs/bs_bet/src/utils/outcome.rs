use anchor_lang::prelude::*;
use crate::errors::BetError;
use crate::state::BetDirection;

/// A tie never wins: there is no push.
pub fn is_winning(direction: BetDirection, entry_price: u64, resolved_price: u64) -> bool {
    match direction {
        BetDirection::Up => resolved_price > entry_price,
        BetDirection::Down => resolved_price < entry_price,
    }
}

/// Stake returned plus winnings.
pub fn payout_for(amount_staked: u64, payout_multiplier: u64) -> Result<u64> {
    amount_staked
        .checked_mul(payout_multiplier)
        .ok_or_else(|| error!(BetError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winning() {
        assert!(is_winning(BetDirection::Up, 100, 101));
        assert!(!is_winning(BetDirection::Up, 100, 99));
        assert!(is_winning(BetDirection::Down, 100, 99));
        assert!(!is_winning(BetDirection::Down, 100, 101));
    }

    #[test]
    fn test_tie_never_wins() {
        for price in [0u64, 1, 100_000_000, u64::MAX] {
            assert!(!is_winning(BetDirection::Up, price, price));
            assert!(!is_winning(BetDirection::Down, price, price));
        }
    }

    #[test]
    fn test_payout() {
        assert_eq!(payout_for(100, 2).unwrap(), 200);
        assert_eq!(payout_for(100, 1).unwrap(), 100);
        assert_eq!(payout_for(u64::MAX / 2 + 1, 2).unwrap_err(), BetError::MathOverflow.into());
    }
}
