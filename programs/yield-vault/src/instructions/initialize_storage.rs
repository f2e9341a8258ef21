use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Create the access registry with the signer as governance
#[derive(Accounts)]
pub struct InitializeStorage<'info> {
    /// First governance; pays for the registry
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        init,
        payer = governance,
        space = Storage::LEN,
        seeds = [STORAGE_SEED],
        bump
    )]
    pub storage: Account<'info, Storage>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeStorage>) -> Result<()> {
    let storage = &mut ctx.accounts.storage;

    storage.governance = ctx.accounts.governance.key();
    storage.controller = Pubkey::default();
    storage.bump = ctx.bumps.storage;

    emit!(StorageInitialized {
        storage: storage.key(),
        governance: storage.governance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
