use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::constants::{DELEGATION_PROGRAM_ID, DISCRIMINATOR_SIZE};
use crate::errors::BetError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegationAction {
    Disable,
    Enable,
}

impl TryFrom<u8> for DelegationAction {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(DelegationAction::Disable),
            1 => Ok(DelegationAction::Enable),
            _ => Err(error!(BetError::InvalidDelegationAction)),
        }
    }
}

/// Where the auth state record currently lives, as seen from the base layer.
///
/// Derived from the real account owner first and the local flag second: once the
/// delegation program owns the account the flag can no longer be trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthCustody {
    /// Owned by this program, `is_delegated == false`.
    Local,
    /// Owned by this program, `is_delegated == true`. Either the handover has not
    /// happened yet, or the venue already returned the record.
    PendingHandover,
    /// Owned by the delegation program.
    Delegated,
}

impl AuthCustody {
    pub fn observe(owner: &Pubkey, is_delegated: bool) -> Result<Self> {
        if *owner == DELEGATION_PROGRAM_ID {
            return Ok(AuthCustody::Delegated);
        }

        require_keys_eq!(*owner, crate::ID, BetError::DelegationStateMismatch);

        Ok(if is_delegated {
            AuthCustody::PendingHandover
        } else {
            AuthCustody::Local
        })
    }

    /// Whether a flag toggle must first create the record. A record that does not exist
    /// yet can only be enabled, and one held by the delegation program cannot be toggled.
    pub fn needs_creation(owner: &Pubkey, data_is_empty: bool, action: DelegationAction) -> Result<bool> {
        if *owner == system_program::ID && data_is_empty {
            require!(action == DelegationAction::Enable, BetError::DelegationStateMismatch);
            return Ok(true);
        }

        require!(
            AuthCustody::observe(owner, false)? != AuthCustody::Delegated,
            BetError::DelegationStateMismatch
        );
        Ok(false)
    }

    /// Whether the handover CPI still has to run. Already delegated is a no-op.
    pub fn handover_required(self) -> Result<bool> {
        match self {
            AuthCustody::PendingHandover => Ok(true),
            AuthCustody::Delegated => Ok(false),
            AuthCustody::Local => err!(BetError::DelegationStateMismatch),
        }
    }
}

#[account]
#[derive(Default, Debug)]
pub struct UserAuthState {
    pub user_authority: Pubkey,
    pub is_delegated: bool,
    /// Bumped on every completed flag transition; embedded in the signed message.
    pub nonce: u64,
    pub delegation_timestamp: i64,
    pub bump: u8,
}

impl UserAuthState {
    pub const LEN: usize = DISCRIMINATOR_SIZE + 32 + 1 + 8 + 8 + 1;

    pub fn new(user_authority: Pubkey, bump: u8) -> Self {
        UserAuthState {
            user_authority,
            is_delegated: false,
            nonce: 0,
            delegation_timestamp: 0,
            bump,
        }
    }

    /// Applies a flag transition given the custody observed for this record.
    pub fn transition(&mut self, action: DelegationAction, custody: AuthCustody, now: i64) -> Result<()> {
        let allowed = matches!(
            (action, custody),
            (DelegationAction::Enable, AuthCustody::Local)
                | (DelegationAction::Disable, AuthCustody::PendingHandover)
        );
        require!(allowed, BetError::DelegationStateMismatch);

        let next_nonce = self
            .nonce
            .checked_add(1)
            .ok_or_else(|| error!(BetError::MathOverflow))?;

        self.is_delegated = action == DelegationAction::Enable;
        self.nonce = next_nonce;
        self.delegation_timestamp = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_custody() {
        assert_eq!(AuthCustody::observe(&crate::ID, false).unwrap(), AuthCustody::Local);
        assert_eq!(AuthCustody::observe(&crate::ID, true).unwrap(), AuthCustody::PendingHandover);

        // Ownership wins over the flag.
        assert_eq!(AuthCustody::observe(&DELEGATION_PROGRAM_ID, false).unwrap(), AuthCustody::Delegated);
        assert_eq!(AuthCustody::observe(&DELEGATION_PROGRAM_ID, true).unwrap(), AuthCustody::Delegated);

        assert_eq!(
            AuthCustody::observe(&Pubkey::new_unique(), false).unwrap_err(),
            BetError::DelegationStateMismatch.into()
        );
    }

    #[test]
    fn test_toggle_on_missing_record() {
        let system = system_program::ID;
        assert!(AuthCustody::needs_creation(&system, true, DelegationAction::Enable).unwrap());

        // Nothing to turn off yet.
        assert_eq!(
            AuthCustody::needs_creation(&system, true, DelegationAction::Disable).unwrap_err(),
            BetError::DelegationStateMismatch.into()
        );
    }

    #[test]
    fn test_toggle_on_existing_record() {
        assert!(!AuthCustody::needs_creation(&crate::ID, false, DelegationAction::Enable).unwrap());
        assert!(!AuthCustody::needs_creation(&crate::ID, false, DelegationAction::Disable).unwrap());

        // The venue holds the record: neither direction may touch it.
        for action in [DelegationAction::Enable, DelegationAction::Disable] {
            assert_eq!(
                AuthCustody::needs_creation(&DELEGATION_PROGRAM_ID, false, action).unwrap_err(),
                BetError::DelegationStateMismatch.into()
            );
        }

        // Foreign owner, or system-owned but carrying data.
        assert!(AuthCustody::needs_creation(&Pubkey::new_unique(), false, DelegationAction::Enable).is_err());
        assert!(AuthCustody::needs_creation(&system_program::ID, false, DelegationAction::Enable).is_err());
    }

    #[test]
    fn test_handover_required() {
        assert!(AuthCustody::PendingHandover.handover_required().unwrap());
        assert!(!AuthCustody::Delegated.handover_required().unwrap());
        assert_eq!(
            AuthCustody::Local.handover_required().unwrap_err(),
            BetError::DelegationStateMismatch.into()
        );
    }

    #[test]
    fn test_action_from_u8() {
        assert_eq!(DelegationAction::try_from(0).unwrap(), DelegationAction::Disable);
        assert_eq!(DelegationAction::try_from(1).unwrap(), DelegationAction::Enable);
        assert_eq!(
            DelegationAction::try_from(7).unwrap_err(),
            BetError::InvalidDelegationAction.into()
        );
    }

    #[test]
    fn test_full_cycle_increments_nonce() {
        let mut state = UserAuthState::new(Pubkey::new_unique(), 253);

        // 1. enable intent
        let custody = AuthCustody::observe(&crate::ID, state.is_delegated).unwrap();
        state.transition(DelegationAction::Enable, custody, 100).unwrap();
        assert!(state.is_delegated);
        assert_eq!(state.nonce, 1);
        assert_eq!(state.delegation_timestamp, 100);

        // 2/3. handed over and returned; the venue keeps the flag set
        assert_eq!(
            AuthCustody::observe(&DELEGATION_PROGRAM_ID, state.is_delegated).unwrap(),
            AuthCustody::Delegated
        );

        // 4. disable once custody is back
        let custody = AuthCustody::observe(&crate::ID, state.is_delegated).unwrap();
        state.transition(DelegationAction::Disable, custody, 200).unwrap();
        assert!(!state.is_delegated);
        assert_eq!(state.nonce, 2);
        assert_eq!(state.delegation_timestamp, 200);
    }

    #[test]
    fn test_out_of_order_transitions_rejected() {
        let mut state = UserAuthState::new(Pubkey::new_unique(), 253);

        // Disable before anything was enabled.
        assert_eq!(
            state.transition(DelegationAction::Disable, AuthCustody::Local, 1).unwrap_err(),
            BetError::DelegationStateMismatch.into()
        );

        state.transition(DelegationAction::Enable, AuthCustody::Local, 2).unwrap();

        // Enable twice.
        assert_eq!(
            state.transition(DelegationAction::Enable, AuthCustody::PendingHandover, 3).unwrap_err(),
            BetError::DelegationStateMismatch.into()
        );

        // Disable while the venue still holds the record.
        assert_eq!(
            state.transition(DelegationAction::Disable, AuthCustody::Delegated, 4).unwrap_err(),
            BetError::DelegationStateMismatch.into()
        );

        // Failed attempts leave the record untouched.
        assert!(state.is_delegated);
        assert_eq!(state.nonce, 1);
        assert_eq!(state.delegation_timestamp, 2);
    }

    #[test]
    fn test_nonce_overflow() {
        let mut state = UserAuthState::new(Pubkey::new_unique(), 1);
        state.nonce = u64::MAX;
        assert_eq!(
            state.transition(DelegationAction::Enable, AuthCustody::Local, 1).unwrap_err(),
            BetError::MathOverflow.into()
        );
        assert!(!state.is_delegated);
    }
}
