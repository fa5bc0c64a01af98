use anchor_lang::prelude::*;
use crate::state::{AuthCustody, UserAuthState};
use crate::constants::SEED_AUTH_STATE;
use crate::errors::BetError;
use crate::events::{AuthStateDelegated, AuthStateUndelegationRequested};
use ephemeral_rollups_sdk::anchor::{delegate, commit};
use ephemeral_rollups_sdk::cpi::DelegateConfig;
use ephemeral_rollups_sdk::ephem::commit_and_undelegate_accounts;

// --- HANDOVER ---

#[delegate]
#[derive(Accounts)]
pub struct DelegateAuthState<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: Owner decides custody; layout is checked in the handler while we still own it.
    #[account(
        mut,
        del,
        seeds = [SEED_AUTH_STATE, user.key().as_ref()],
        bump
    )]
    pub user_auth_state: AccountInfo<'info>,
}

pub fn delegate_auth_state(ctx: Context<DelegateAuthState>) -> Result<()> {
    let user_key = ctx.accounts.user.key();

    let custody = {
        let info = &ctx.accounts.user_auth_state;
        if *info.owner == crate::ID {
            let auth_state = read_auth_state(info)?;
            require_keys_eq!(auth_state.user_authority, user_key, BetError::Unauthorized);
            AuthCustody::observe(info.owner, auth_state.is_delegated)?
        } else {
            AuthCustody::observe(info.owner, false)?
        }
    };

    if !custody.handover_required()? {
        msg!("Auth state for {} already delegated", user_key);
        return Ok(());
    }

    let seeds_for_sdk = &[SEED_AUTH_STATE, user_key.as_ref()];

    ctx.accounts.delegate_user_auth_state(
        &ctx.accounts.user,
        seeds_for_sdk,
        DelegateConfig::default(),
    )?;

    emit!(AuthStateDelegated {
        auth_state: ctx.accounts.user_auth_state.key(),
        user: user_key,
    });

    msg!("Auth state delegated for {}", user_key);
    Ok(())
}

// --- RETURN ---

#[commit]
#[derive(Accounts)]
pub struct UndelegateFromMagicblock<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: Deserialized and checked in the handler.
    #[account(
        mut,
        seeds = [SEED_AUTH_STATE, user.key().as_ref()],
        bump
    )]
    pub user_auth_state: AccountInfo<'info>,
}

pub fn undelegate_from_magicblock(ctx: Context<UndelegateFromMagicblock>) -> Result<()> {
    let user_key = ctx.accounts.user.key();

    let auth_state = read_auth_state(&ctx.accounts.user_auth_state)?;
    require_keys_eq!(auth_state.user_authority, user_key, BetError::Unauthorized);
    require!(auth_state.is_delegated, BetError::DelegationStateMismatch);

    commit_and_undelegate_accounts(
        &ctx.accounts.user,
        vec![&ctx.accounts.user_auth_state.to_account_info()],
        &ctx.accounts.magic_context,
        &ctx.accounts.magic_program,
    )?;

    emit!(AuthStateUndelegationRequested {
        auth_state: ctx.accounts.user_auth_state.key(),
        user: user_key,
    });

    msg!("Undelegation requested for {}", user_key);
    Ok(())
}

pub(crate) fn read_auth_state(info: &AccountInfo) -> Result<UserAuthState> {
    let data = info.try_borrow_data()?;
    let mut data_slice: &[u8] = &data;
    UserAuthState::try_deserialize(&mut data_slice)
        .map_err(|_| error!(BetError::DelegationStateMismatch))
}
