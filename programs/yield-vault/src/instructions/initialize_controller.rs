use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Create the controller and make it the registry's live controller
#[derive(Accounts)]
pub struct InitializeController<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(
        init,
        payer = governance,
        space = ControllerState::LEN,
        seeds = [CONTROLLER_SEED, storage.key().as_ref()],
        bump
    )]
    pub controller: Account<'info, ControllerState>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeController>, fee_reward_forwarder: Pubkey) -> Result<()> {
    require!(
        fee_reward_forwarder != Pubkey::default(),
        VaultError::InvalidOwner
    );

    let controller = &mut ctx.accounts.controller;
    controller.storage = ctx.accounts.storage.key();
    controller.vaults = Vec::new();
    controller.hard_workers = Vec::new();
    controller.fee_reward_forwarder = fee_reward_forwarder;
    controller.hard_rewards = None;
    controller.profit_sharing_numerator = DEFAULT_PROFIT_SHARING_NUMERATOR;
    controller.profit_sharing_denominator = DEFAULT_PROFIT_SHARING_DENOMINATOR;
    controller.entered = false;
    controller.bump = ctx.bumps.controller;

    let controller_key = controller.key();
    let previous = ctx
        .accounts
        .storage
        .set_controller(&ctx.accounts.governance.key(), controller_key)?;

    let timestamp = Clock::get()?.unix_timestamp;
    emit!(ControllerInitialized {
        controller: controller_key,
        storage: ctx.accounts.storage.key(),
        fee_reward_forwarder,
        timestamp,
    });
    emit!(ControllerChanged {
        previous,
        controller: controller_key,
        timestamp,
    });

    Ok(())
}
