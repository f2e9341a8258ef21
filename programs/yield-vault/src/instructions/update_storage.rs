use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Governance-only mutation of the access registry
#[derive(Accounts)]
pub struct UpdateStorage<'info> {
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [STORAGE_SEED],
        bump = storage.bump,
    )]
    pub storage: Account<'info, Storage>,
}

pub fn set_governance(ctx: Context<UpdateStorage>, new_governance: Pubkey) -> Result<()> {
    let storage = &mut ctx.accounts.storage;
    let previous = storage.set_governance(&ctx.accounts.governance.key(), new_governance)?;

    msg!("governance handed over from {} to {}", previous, new_governance);
    emit!(GovernanceChanged {
        previous,
        governance: new_governance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn set_controller(ctx: Context<UpdateStorage>, new_controller: Pubkey) -> Result<()> {
    let storage = &mut ctx.accounts.storage;
    let previous = storage.set_controller(&ctx.accounts.governance.key(), new_controller)?;

    emit!(ControllerChanged {
        previous,
        controller: new_controller,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
