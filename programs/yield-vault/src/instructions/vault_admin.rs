use anchor_lang::{prelude::*, AccountsExit};
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::*,
    events::*,
    guard::ReentrancyGuard,
    instructions::{bound_strategy::*, hard_work::invest_idle},
    state::*,
};

#[derive(Accounts)]
pub struct VaultAdmin<'info> {
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

pub fn set_vault_fraction_to_invest(
    ctx: Context<VaultAdmin>,
    numerator: u64,
    denominator: u64,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.set_invest_ratio(numerator, denominator)?;

    emit!(InvestRatioChanged {
        vault: vault.key(),
        numerator,
        denominator,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

/// Governance moves funds between the vault and its strategy
#[derive(Accounts)]
pub struct ManageFunds<'info> {
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

    /// Vault authority PDA
    /// Security: Validated by seeds
    /// CHECK: PDA owning the idle balance, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.underlying_mint.as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = vault.vault_token_account @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub bound: BoundStrategy<'info>,

    pub token_program: Program<'info, Token>,
}

/// Pull everything out of the strategy and leave it idle in the vault.
pub fn withdraw_all(ctx: Context<ManageFunds>) -> Result<()> {
    recall(ctx.accounts, false)
}

/// Pull everything out, then reinvest the configured fraction of idle.
pub fn rebalance(ctx: Context<ManageFunds>) -> Result<()> {
    recall(ctx.accounts, true)
}

fn recall(accounts: &mut ManageFunds, reinvest: bool) -> Result<()> {
    accounts.bound.verify(&accounts.vault)?;

    accounts.vault.enter()?;
    accounts.vault.exit(&crate::ID)?;

    let vault_key = accounts.vault.key();
    let strategy_key = accounts.bound.strategy.key();
    let position_info = accounts.bound.strategy_position.to_account_info();

    let mut strategy = accounts.bound.load(
        accounts.vault_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
        None,
        None,
    );
    let amount = strategy.withdraw_all_to_vault()?;

    let mut reinvested = 0;
    if reinvest {
        accounts.vault_token_account.reload()?;
        reinvested = accounts
            .vault
            .investable(accounts.vault_token_account.amount)?;
        invest_idle(
            &accounts.vault,
            accounts.token_program.to_account_info(),
            accounts.vault_token_account.to_account_info(),
            accounts.vault_authority.to_account_info(),
            position_info,
            &mut *strategy,
            reinvested,
        )?;
    }
    drop(strategy);

    accounts.vault.leave();

    emit!(FundsRecalled {
        vault: vault_key,
        strategy: strategy_key,
        amount,
        reinvested,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
