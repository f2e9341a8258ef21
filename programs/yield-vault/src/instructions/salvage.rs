use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Recover tokens sent to the controller by mistake
///
/// The controller accounts for no balances of its own, so any token it
/// holds may be swept to governance.
#[derive(Accounts)]
pub struct Salvage<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(
        seeds = [CONTROLLER_SEED, storage.key().as_ref()],
        bump = controller.bump,
        has_one = storage,
    )]
    pub controller: Account<'info, ControllerState>,

    #[account(
        mut,
        constraint = source.owner == controller.key() @ VaultError::InvalidOwner,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient.mint == source.mint @ VaultError::InvalidMint,
        constraint = recipient.owner == governance.key() @ VaultError::InvalidOwner,
    )]
    pub recipient: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn salvage(ctx: Context<Salvage>, amount: u64) -> Result<()> {
    require!(amount > 0, VaultError::InvalidAmount);
    require!(
        amount <= ctx.accounts.source.amount,
        VaultError::InsufficientLiquidity
    );

    let storage_key = ctx.accounts.storage.key();
    let controller_seeds: &[&[u8]] = &[
        CONTROLLER_SEED,
        storage_key.as_ref(),
        &[ctx.accounts.controller.bump],
    ];
    let signer_seeds = &[&controller_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.source.to_account_info(),
            to: ctx.accounts.recipient.to_account_info(),
            authority: ctx.accounts.controller.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)?;

    emit!(Salvaged {
        source: ctx.accounts.source.key(),
        owner: ctx.accounts.controller.key(),
        mint: ctx.accounts.source.mint,
        recipient: ctx.accounts.recipient.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Recover stray tokens held by a strategy, routed through the controller
///
/// The underlying, the reward token and the strategy's own position and
/// reward accounts are never salvageable.
#[derive(Accounts)]
pub struct SalvageStrategy<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(
        seeds = [CONTROLLER_SEED, storage.key().as_ref()],
        bump = controller.bump,
        has_one = storage,
        constraint = storage.is_controller(&controller.key()) @ VaultError::Unauthorized,
    )]
    pub controller: Account<'info, ControllerState>,

    #[account(has_one = storage)]
    pub strategy: Account<'info, StrategyState>,

    /// CHECK: PDA owning the strategy token accounts, validated by seeds
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, strategy.key().as_ref()],
        bump = strategy.authority_bump,
    )]
    pub strategy_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = source.owner == strategy_authority.key() @ VaultError::InvalidOwner,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient.mint == source.mint @ VaultError::InvalidMint,
        constraint = recipient.owner == governance.key() @ VaultError::InvalidOwner,
    )]
    pub recipient: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn salvage_strategy(ctx: Context<SalvageStrategy>, amount: u64) -> Result<()> {
    let strategy = &ctx.accounts.strategy;
    let source = &ctx.accounts.source;

    strategy.check_salvage(&source.mint, &source.key())?;
    require!(amount > 0, VaultError::InvalidAmount);
    require!(amount <= source.amount, VaultError::InsufficientLiquidity);

    let strategy_key = strategy.key();
    let authority_seeds: &[&[u8]] = &[
        STRATEGY_AUTHORITY_SEED,
        strategy_key.as_ref(),
        &[strategy.authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: source.to_account_info(),
            to: ctx.accounts.recipient.to_account_info(),
            authority: ctx.accounts.strategy_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)?;

    emit!(Salvaged {
        source: source.key(),
        owner: ctx.accounts.strategy_authority.key(),
        mint: source.mint,
        recipient: ctx.accounts.recipient.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
