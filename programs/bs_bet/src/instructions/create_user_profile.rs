use anchor_lang::prelude::*;
use crate::constants::{SEED_BET_CONFIG, SEED_PROFILE};
use crate::events::ProfileCreated;
use crate::state::{BetConfig, UserProfile};

#[derive(Accounts)]
pub struct CreateUserProfile<'info> {
    #[account(
        seeds = [SEED_BET_CONFIG],
        bump = bet_config.bump
    )]
    pub bet_config: Account<'info, BetConfig>,

    #[account(
        init_if_needed,
        payer = user_authority,
        space = UserProfile::LEN,
        seeds = [SEED_PROFILE, user_authority.key().as_ref()],
        bump
    )]
    pub user_profile: Account<'info, UserProfile>,

    #[account(mut)]
    pub user_authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create_user_profile(ctx: Context<CreateUserProfile>) -> Result<()> {
    let authority = ctx.accounts.user_authority.key();
    let profile_key = ctx.accounts.user_profile.key();
    let user_profile = &mut ctx.accounts.user_profile;

    let created = user_profile.initialize_if_new(
        authority,
        ctx.accounts.bet_config.initial_points,
        ctx.bumps.user_profile,
    );

    if created {
        emit!(ProfileCreated {
            authority,
            profile: profile_key,
            points: user_profile.points,
        });
        msg!("User profile created for: {}", authority);
    } else {
        msg!("User profile already exists for: {}", authority);
    }
    msg!("Points: {}", user_profile.points);

    Ok(())
}
