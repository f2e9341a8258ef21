use anchor_lang::{prelude::*, AccountsExit};
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*, errors::*, events::*, guard::ReentrancyGuard,
    instructions::bound_strategy::load_optional_strategy, state::*,
};

/// Governance stages or cancels a strategy migration
#[derive(Accounts)]
pub struct StageStrategy<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.underlying_mint.as_ref()],
        bump = vault.bump,
        has_one = storage,
    )]
    pub vault: Account<'info, VaultState>,
}

pub fn announce_strategy_update(ctx: Context<StageStrategy>, strategy: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault = &mut ctx.accounts.vault;
    let executable_at = vault.announce_strategy(strategy, now)?;

    emit!(StrategyAnnounced {
        vault: vault.key(),
        strategy,
        announced_at: now,
        executable_at,
    });
    Ok(())
}

pub fn clear_strategy_announcement(ctx: Context<StageStrategy>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let strategy = vault.strategy_timelock.clear();

    emit!(StrategyAnnouncementCleared {
        vault: vault.key(),
        strategy,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

/// Switch the vault to an announced strategy once its timelock has elapsed
///
/// The outgoing strategy is drained into the vault first and must return
/// everything it reported as invested; the new strategy starts empty and
/// receives funds on the next hard work.
#[derive(Accounts)]
pub struct SetStrategy<'info> {
    /// Governance
    /// Security: Must sign and match storage.governance
    pub governance: Signer<'info>,

    /// Access registry PDA
    /// Security: Validated by seeds
    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    /// Vault state PDA
    /// Security: Validated by seeds, has_one storage
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.underlying_mint.as_ref()],
        bump = vault.bump,
        has_one = storage,
    )]
    pub vault: Account<'info, VaultState>,

    /// Vault idle token account
    /// Security: Must match vault.vault_token_account
    #[account(
        mut,
        address = vault.vault_token_account @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Announced strategy
    /// Security: Must be created for this vault and its underlying
    #[account(
        has_one = storage,
        constraint = new_strategy.is_bound_to(&vault.key()) @ VaultError::StrategyMismatch,
        constraint = new_strategy.underlying_mint == vault.underlying_mint @ VaultError::StrategyMismatch,
    )]
    pub new_strategy: Account<'info, StrategyState>,

    /// Outgoing strategy, required when one is bound
    /// Security: Key checked against vault.strategy
    #[account(mut)]
    pub old_strategy: Option<Account<'info, StrategyState>>,

    /// Outgoing strategy authority PDA
    /// Security: Derivation checked against the old strategy
    /// CHECK: derivation verified against the old strategy by the handler
    pub old_strategy_authority: Option<UncheckedAccount<'info>>,

    /// Outgoing strategy's position
    /// Security: Key checked against old_strategy.position
    #[account(mut)]
    pub old_strategy_position: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn set_strategy(ctx: Context<SetStrategy>) -> Result<()> {
    let accounts = ctx.accounts;
    let vault_key = accounts.vault.key();
    let new_key = accounts.new_strategy.key();
    let now = Clock::get()?.unix_timestamp;

    // CHECKS
    accounts.vault.check_strategy_switch(&new_key, now)?;

    accounts.vault.enter()?;
    accounts.vault.exit(&crate::ID)?;

    // INTERACTIONS: drain the outgoing strategy
    let old_strategy = load_optional_strategy(
        &accounts.vault,
        accounts.old_strategy.as_mut(),
        accounts.old_strategy_authority.as_ref(),
        accounts.old_strategy_position.as_mut(),
        accounts.vault_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
    )?;

    let mut recovered = 0;
    if let Some(mut old) = old_strategy {
        let expected = old.invested_underlying_balance();
        let idle_before = accounts.vault_token_account.amount;

        old.withdraw_all_to_vault()?;
        let remaining = old.invested_underlying_balance();
        drop(old);

        accounts.vault_token_account.reload()?;
        recovered = accounts
            .vault_token_account
            .amount
            .checked_sub(idle_before)
            .ok_or(VaultError::MathOverflow)?;

        accounts.vault.check_migration(expected, recovered, remaining)?;
        if recovered != expected {
            msg!(
                "outgoing strategy returned {} of {} reported",
                recovered,
                expected
            );
        }
    }

    // EFFECTS
    let previous = accounts.vault.bind_strategy(new_key);
    accounts.vault.leave();

    emit!(StrategyChanged {
        vault: vault_key,
        previous,
        strategy: new_key,
        recovered,
        timestamp: now,
    });

    Ok(())
}
