use anchor_lang::{prelude::*, AccountsExit};
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::{
    constants::*, errors::*, events::*, guard::ReentrancyGuard,
    instructions::bound_strategy::load_optional_strategy, state::*,
};

/// Burn shares for their pro-rata underlying
///
/// Idle balance pays first; any shortfall is pulled back from the strategy.
/// When the last shares leave, the strategy is drained entirely so no dust
/// stays stranded behind a zero supply.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Share holder
    /// Security: Must sign the share burn
    pub user: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds, guarded against reentry
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.underlying_mint.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, VaultState>,

    /// Vault share mint
    /// Security: Must match vault.share_mint; its supply prices the redemption
    #[account(
        mut,
        address = vault.share_mint @ VaultError::InvalidMint,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA
    /// Security: Validated by seeds, signs the payout
    /// CHECK: PDA owning the idle balance, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.underlying_mint.as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault idle token account
    /// Security: Must match vault.vault_token_account
    #[account(
        mut,
        address = vault.vault_token_account @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Receives the underlying
    /// Security: Must be the underlying mint and owned by user
    #[account(
        mut,
        constraint = user_underlying_account.mint == vault.underlying_mint @ VaultError::InvalidMint,
        constraint = user_underlying_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_underlying_account: Account<'info, TokenAccount>,

    /// Shares to burn
    /// Security: Must be the share mint and owned by user
    #[account(
        mut,
        constraint = user_share_account.mint == vault.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

    /// Bound strategy, required once the vault has one
    /// Security: Key checked against vault.strategy
    #[account(mut)]
    pub strategy: Option<Account<'info, StrategyState>>,

    /// Strategy authority PDA
    /// Security: Derivation checked against the strategy
    /// CHECK: derivation verified against the strategy by the handler
    pub strategy_authority: Option<UncheckedAccount<'info>>,

    /// Bound strategy's position
    /// Security: Key checked against strategy.position
    #[account(mut)]
    pub strategy_position: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.vault.enter()?;
    accounts.vault.exit(&crate::ID)?;

    let mut strategy = load_optional_strategy(
        &accounts.vault,
        accounts.strategy.as_mut(),
        accounts.strategy_authority.as_ref(),
        accounts.strategy_position.as_mut(),
        accounts.vault_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
    )?;

    // CHECKS
    accounts.vault.sync_supply(accounts.share_mint.supply);
    let idle = accounts.vault_token_account.amount;
    let invested = strategy
        .as_ref()
        .map(|s| s.invested_underlying_balance())
        .unwrap_or(0);
    let plan = accounts.vault.plan_withdraw(
        shares,
        accounts.user_share_account.amount,
        idle,
        invested,
    )?;

    // EFFECTS
    accounts.vault.record_burn(shares)?;

    // INTERACTIONS
    let burn_ctx = CpiContext::new(
        accounts.token_program.to_account_info(),
        Burn {
            mint: accounts.share_mint.to_account_info(),
            from: accounts.user_share_account.to_account_info(),
            authority: accounts.user.to_account_info(),
        },
    );
    token::burn(burn_ctx, shares)?;

    let pull = plan.strategy_pull(invested);
    let mut pulled = 0;
    if pull != StrategyPull::Nothing {
        let strategy = strategy
            .as_mut()
            .ok_or(VaultError::InsufficientLiquidity)?;
        pulled = match pull {
            StrategyPull::Drain => strategy.withdraw_all_to_vault()?,
            StrategyPull::Partial(amount) => strategy.withdraw_to_vault(amount)?,
            StrategyPull::Nothing => 0,
        };
        accounts.vault_token_account.reload()?;
    }
    drop(strategy);

    plan.confirm_liquidity(accounts.vault_token_account.amount)?;

    let underlying_mint = accounts.vault.underlying_mint;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        underlying_mint.as_ref(),
        &[accounts.vault.authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        accounts.token_program.to_account_info(),
        Transfer {
            from: accounts.vault_token_account.to_account_info(),
            to: accounts.user_underlying_account.to_account_info(),
            authority: accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, plan.amount)?;

    accounts.vault.leave();

    emit!(Withdrawn {
        vault: accounts.vault.key(),
        withdrawer: accounts.user.key(),
        shares_burned: shares,
        amount: plan.amount,
        pulled_from_strategy: pulled,
        total_shares: accounts.vault.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
