use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Register a vault with the controller and bind its first strategy
///
/// A vault without a strategy has nothing to migrate, so the first binding
/// skips the announcement timelock. A vault already bound to `strategy` is
/// only registered.
#[derive(Accounts)]
pub struct AddVaultAndStrategy<'info> {
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
        constraint = storage.is_controller(&controller.key()) @ VaultError::Unauthorized,
    )]
    pub controller: Account<'info, ControllerState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.underlying_mint.as_ref()],
        bump = vault.bump,
        has_one = storage,
    )]
    pub vault: Account<'info, VaultState>,

    #[account(
        has_one = storage,
        constraint = strategy.is_bound_to(&vault.key()) @ VaultError::StrategyMismatch,
        constraint = strategy.underlying_mint == vault.underlying_mint @ VaultError::StrategyMismatch,
    )]
    pub strategy: Account<'info, StrategyState>,
}

pub fn handler(ctx: Context<AddVaultAndStrategy>) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let strategy_key = ctx.accounts.strategy.key();

    ctx.accounts.controller.register_vault(vault_key)?;

    let now = Clock::get()?.unix_timestamp;
    let bound = ctx.accounts.vault.bind_initial_strategy(strategy_key, now)?;

    emit!(VaultRegistered {
        controller: ctx.accounts.controller.key(),
        vault: vault_key,
        strategy: strategy_key,
        timestamp: now,
    });
    if bound {
        emit!(StrategyChanged {
            vault: vault_key,
            previous: Pubkey::default(),
            strategy: strategy_key,
            recovered: 0,
            timestamp: now,
        });
    }

    Ok(())
}
