use anchor_lang::prelude::*;
use crate::constants::DISCRIMINATOR_SIZE;
use crate::errors::BetError;

#[account]
#[derive(Default)]
pub struct UserProfile {
    pub authority: Pubkey,
    pub points: u64,
    pub bump: u8,
}

impl UserProfile {
    pub const LEN: usize = DISCRIMINATOR_SIZE + 32 + 8 + 1;

    /// Fills a freshly allocated profile. Returns false (and changes nothing)
    /// when the profile was already set up by an earlier call.
    pub fn initialize_if_new(&mut self, authority: Pubkey, initial_points: u64, bump: u8) -> bool {
        if self.authority != Pubkey::default() {
            return false;
        }

        self.authority = authority;
        self.points = initial_points;
        self.bump = bump;
        true
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.points = self
            .points
            .checked_sub(amount)
            .ok_or_else(|| error!(BetError::InsufficientPoints))?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.points = self
            .points
            .checked_add(amount)
            .ok_or_else(|| error!(BetError::MathOverflow))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        let authority = Pubkey::new_unique();
        let mut profile = UserProfile::default();

        assert!(profile.initialize_if_new(authority, 1000, 254));
        assert_eq!(profile.points, 1000);

        profile.debit(300).unwrap();

        // Second creation must not reset the balance.
        assert!(!profile.initialize_if_new(authority, 1000, 254));
        assert_eq!(profile.points, 700);
        assert_eq!(profile.authority, authority);
        assert_eq!(profile.bump, 254);
    }

    #[test]
    fn test_debit_rejects_overdraw() {
        let mut profile = UserProfile { authority: Pubkey::new_unique(), points: 50, bump: 1 };

        assert_eq!(profile.debit(100).unwrap_err(), BetError::InsufficientPoints.into());
        assert_eq!(profile.points, 50);

        profile.debit(50).unwrap();
        assert_eq!(profile.points, 0);
    }

    #[test]
    fn test_credit_overflow() {
        let mut profile = UserProfile { authority: Pubkey::new_unique(), points: u64::MAX - 1, bump: 1 };

        assert_eq!(profile.credit(2).unwrap_err(), BetError::MathOverflow.into());
        assert_eq!(profile.points, u64::MAX - 1);

        profile.credit(1).unwrap();
        assert_eq!(profile.points, u64::MAX);
    }
}
