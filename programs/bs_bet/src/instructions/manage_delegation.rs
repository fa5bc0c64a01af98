use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_lang::system_program;
use crate::constants::SEED_AUTH_STATE;
use crate::errors::BetError;
use crate::events::DelegationFlagChanged;
use crate::instructions::delegation::read_auth_state;
use crate::state::{AuthCustody, DelegationAction, UserAuthState};
use crate::utils::signature::{check_delegation_message, verify_preceding_ed25519};

#[derive(Accounts)]
pub struct ManageDelegation<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: Created on the first enable; custody and layout are checked in the handler.
    #[account(
        mut,
        seeds = [SEED_AUTH_STATE, user.key().as_ref()],
        bump
    )]
    pub user_auth_state: UncheckedAccount<'info>,

    /// CHECK: Address constrained to the instructions sysvar.
    #[account(address = sysvar::instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn manage_delegation(
    ctx: Context<ManageDelegation>,
    action: u8,
    signed_message: Vec<u8>,
    signature: [u8; 64],
) -> Result<()> {
    let action = DelegationAction::try_from(action)?;
    let user_key = ctx.accounts.user.key();
    let clock = Clock::get()?;

    let auth_info = ctx.accounts.user_auth_state.to_account_info();
    let is_new = AuthCustody::needs_creation(auth_info.owner, auth_info.data_is_empty(), action)?;

    let (mut auth_state, custody) = if is_new {
        (
            UserAuthState::new(user_key, ctx.bumps.user_auth_state),
            AuthCustody::Local,
        )
    } else {
        let auth_state = read_auth_state(&auth_info)?;
        require_keys_eq!(auth_state.user_authority, user_key, BetError::Unauthorized);
        let custody = AuthCustody::observe(auth_info.owner, auth_state.is_delegated)?;
        (auth_state, custody)
    };

    check_delegation_message(&signed_message, &user_key, auth_state.nonce)?;
    verify_preceding_ed25519(
        &ctx.accounts.instructions_sysvar.to_account_info(),
        &user_key,
        &signed_message,
        &signature,
    )?;

    auth_state.transition(action, custody, clock.unix_timestamp)?;

    if is_new {
        create_auth_state_account(&ctx, &user_key)?;
    }

    {
        let mut data = auth_info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        auth_state.try_serialize(&mut writer)?;
    }

    emit!(DelegationFlagChanged {
        user: user_key,
        is_delegated: auth_state.is_delegated,
        nonce: auth_state.nonce,
        timestamp: auth_state.delegation_timestamp,
    });

    msg!(
        "Delegation flag for {} set to {} (nonce {})",
        user_key,
        auth_state.is_delegated,
        auth_state.nonce
    );

    Ok(())
}

/// How the auth state PDA gets its rent. Anyone can send lamports to the address
/// before it exists, so a funded address is adopted instead of created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Funding {
    Create { lamports: u64 },
    Adopt { top_up: u64 },
}

fn funding_for(current_lamports: u64, rent_exempt: u64) -> Funding {
    if current_lamports == 0 {
        Funding::Create { lamports: rent_exempt }
    } else {
        Funding::Adopt { top_up: rent_exempt.saturating_sub(current_lamports) }
    }
}

fn create_auth_state_account(ctx: &Context<ManageDelegation>, user_key: &Pubkey) -> Result<()> {
    let bump = [ctx.bumps.user_auth_state];
    let auth_seeds = &[SEED_AUTH_STATE, user_key.as_ref(), &bump[..]];
    let signer_seeds = &[&auth_seeds[..]];

    let space = UserAuthState::LEN;
    let rent_exempt = Rent::get()?.minimum_balance(space);
    let system = ctx.accounts.system_program.to_account_info();
    let payer = ctx.accounts.user.to_account_info();
    let auth_info = ctx.accounts.user_auth_state.to_account_info();

    match funding_for(auth_info.lamports(), rent_exempt) {
        Funding::Create { lamports } => {
            system_program::create_account(
                CpiContext::new_with_signer(
                    system.clone(),
                    system_program::CreateAccount {
                        from: payer,
                        to: auth_info,
                    },
                    signer_seeds,
                ),
                lamports,
                space as u64,
                &crate::ID,
            )?;
        }
        Funding::Adopt { top_up } => {
            if top_up > 0 {
                system_program::transfer(
                    CpiContext::new(
                        system.clone(),
                        system_program::Transfer {
                            from: payer,
                            to: auth_info.clone(),
                        },
                    ),
                    top_up,
                )?;
            }
            system_program::allocate(
                CpiContext::new_with_signer(
                    system.clone(),
                    system_program::Allocate {
                        account_to_allocate: auth_info.clone(),
                    },
                    signer_seeds,
                ),
                space as u64,
            )?;
            system_program::assign(
                CpiContext::new_with_signer(
                    system,
                    system_program::Assign {
                        account_to_assign: auth_info,
                    },
                    signer_seeds,
                ),
                &crate::ID,
            )?;
        }
    }

    msg!("Auth state created for {}", user_key);
    Ok(())
}
