use anchor_lang::{prelude::*, AccountsExit};
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::{
    constants::*, errors::*, events::*, guard::ReentrancyGuard,
    instructions::bound_strategy::invested_balance_view, state::*,
};

/// Deposit underlying into the vault and receive shares
///
/// Shares are priced against idle plus invested underlying as they stand
/// before the transfer, so a deposit never dilutes existing holders.
/// Strategy accounts are required once the vault has a strategy bound.
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// Depositor, source of the underlying
    /// Security: Must sign the underlying transfer
    #[account(mut)]
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
    /// Security: Must match vault.share_mint
    #[account(
        mut,
        address = vault.share_mint @ VaultError::InvalidMint,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA
    /// Security: Validated by seeds, signs the share mint
    /// CHECK: PDA used as mint authority, validated by seeds
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

    /// Depositor's underlying token account
    /// Security: Must be the underlying mint and owned by user
    #[account(
        mut,
        constraint = user_underlying_account.mint == vault.underlying_mint @ VaultError::InvalidMint,
        constraint = user_underlying_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_underlying_account: Account<'info, TokenAccount>,

    /// Receives the minted shares
    /// Security: Must be the share mint; owner checked against the beneficiary
    #[account(
        mut,
        constraint = beneficiary_share_account.mint == vault.share_mint @ VaultError::InvalidMint,
    )]
    pub beneficiary_share_account: Account<'info, TokenAccount>,

    /// Bound strategy, required once the vault has one
    /// Security: Key checked against vault.strategy
    pub strategy: Option<Account<'info, StrategyState>>,

    /// Bound strategy's position
    /// Security: Key checked against strategy.position
    pub strategy_position: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let beneficiary = ctx.accounts.user.key();
    deposit_into(ctx, amount, beneficiary)
}

/// Deposit on behalf of `beneficiary`, who receives the shares.
pub fn deposit_for(ctx: Context<Deposit>, amount: u64, beneficiary: Pubkey) -> Result<()> {
    deposit_into(ctx, amount, beneficiary)
}

fn deposit_into(ctx: Context<Deposit>, amount: u64, beneficiary: Pubkey) -> Result<()> {
    // CHECKS
    require!(amount > 0, VaultError::InvalidAmount);
    require_keys_eq!(
        ctx.accounts.beneficiary_share_account.owner,
        beneficiary,
        VaultError::InvalidOwner
    );

    let accounts = ctx.accounts;
    accounts.vault.enter()?;
    accounts.vault.exit(&crate::ID)?;

    accounts.vault.sync_supply(accounts.share_mint.supply);
    let idle = accounts.vault_token_account.amount;
    let invested = invested_balance_view(
        &accounts.vault,
        accounts.strategy.as_ref(),
        accounts.strategy_position.as_ref(),
    )?;
    let total_underlying = accounts.vault.total_underlying(idle, invested)?;
    let shares = accounts.vault.calculate_shares(amount, total_underlying)?;

    // EFFECTS
    accounts.vault.record_mint(shares)?;

    // INTERACTIONS
    let transfer_ctx = CpiContext::new(
        accounts.token_program.to_account_info(),
        Transfer {
            from: accounts.user_underlying_account.to_account_info(),
            to: accounts.vault_token_account.to_account_info(),
            authority: accounts.user.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    let underlying_mint = accounts.vault.underlying_mint;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        underlying_mint.as_ref(),
        &[accounts.vault.authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let mint_ctx = CpiContext::new_with_signer(
        accounts.token_program.to_account_info(),
        MintTo {
            mint: accounts.share_mint.to_account_info(),
            to: accounts.beneficiary_share_account.to_account_info(),
            authority: accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::mint_to(mint_ctx, shares)?;

    accounts.vault.leave();

    emit!(Deposited {
        vault: accounts.vault.key(),
        depositor: accounts.user.key(),
        beneficiary,
        amount,
        shares_minted: shares,
        total_shares: accounts.vault.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
