use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Governance-only configuration of the controller
#[derive(Accounts)]
pub struct ControllerAdmin<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(
        mut,
        seeds = [CONTROLLER_SEED, storage.key().as_ref()],
        bump = controller.bump,
        has_one = storage,
    )]
    pub controller: Account<'info, ControllerState>,
}

pub fn add_hard_worker(ctx: Context<ControllerAdmin>, worker: Pubkey) -> Result<()> {
    let controller = &mut ctx.accounts.controller;
    if controller.add_hard_worker(worker)? {
        emit!(HardWorkerUpdated {
            controller: controller.key(),
            worker,
            authorized: true,
            timestamp: Clock::get()?.unix_timestamp,
        });
    }
    Ok(())
}

pub fn remove_hard_worker(ctx: Context<ControllerAdmin>, worker: Pubkey) -> Result<()> {
    let controller = &mut ctx.accounts.controller;
    if controller.remove_hard_worker(&worker) {
        emit!(HardWorkerUpdated {
            controller: controller.key(),
            worker,
            authorized: false,
            timestamp: Clock::get()?.unix_timestamp,
        });
    }
    Ok(())
}

pub fn set_fee_reward_forwarder(ctx: Context<ControllerAdmin>, forwarder: Pubkey) -> Result<()> {
    require!(forwarder != Pubkey::default(), VaultError::InvalidOwner);

    let controller = &mut ctx.accounts.controller;
    let previous = std::mem::replace(&mut controller.fee_reward_forwarder, forwarder);

    emit!(FeeRewardForwarderChanged {
        controller: controller.key(),
        previous,
        fee_reward_forwarder: forwarder,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_hard_rewards(ctx: Context<ControllerAdmin>, hard_rewards: Option<Pubkey>) -> Result<()> {
    let controller = &mut ctx.accounts.controller;
    controller.hard_rewards = hard_rewards;

    emit!(HardRewardsChanged {
        controller: controller.key(),
        hard_rewards,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_profit_sharing(
    ctx: Context<ControllerAdmin>,
    numerator: u64,
    denominator: u64,
) -> Result<()> {
    let controller = &mut ctx.accounts.controller;
    controller.set_profit_sharing(numerator, denominator)?;

    emit!(ProfitSharingChanged {
        controller: controller.key(),
        numerator,
        denominator,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
