use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, state::*};

/// Create a strategy bound to one vault, with its position and reward
/// token accounts owned by the strategy authority PDA
#[derive(Accounts)]
#[instruction(strategy_id: u64)]
pub struct InitializeStrategy<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(has_one = storage)]
    pub vault: Account<'info, VaultState>,

    #[account(address = vault.underlying_mint @ VaultError::InvalidMint)]
    pub underlying_mint: Account<'info, Mint>,

    pub reward_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = governance,
        space = StrategyState::LEN,
        seeds = [STRATEGY_SEED, vault.key().as_ref(), strategy_id.to_le_bytes().as_ref()],
        bump
    )]
    pub strategy: Account<'info, StrategyState>,

    /// CHECK: PDA owning the strategy token accounts, validated by seeds
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, strategy.key().as_ref()],
        bump
    )]
    pub strategy_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = governance,
        seeds = [POSITION_SEED, strategy.key().as_ref()],
        bump,
        token::mint = underlying_mint,
        token::authority = strategy_authority,
    )]
    pub position: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = governance,
        seeds = [REWARDS_SEED, strategy.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = strategy_authority,
    )]
    pub rewards: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeStrategy>, strategy_id: u64, kind: StrategyKind) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;

    strategy.storage = ctx.accounts.storage.key();
    strategy.vault = ctx.accounts.vault.key();
    strategy.underlying_mint = ctx.accounts.underlying_mint.key();
    strategy.reward_mint = ctx.accounts.reward_mint.key();
    strategy.position = ctx.accounts.position.key();
    strategy.rewards = ctx.accounts.rewards.key();
    strategy.kind = kind;
    strategy.phase = StrategyPhase::Idle;
    strategy.liquidation_allowed = false;
    strategy.sell_floor = 0;
    strategy.strategy_id = strategy_id;
    strategy.bump = ctx.bumps.strategy;
    strategy.authority_bump = ctx.bumps.strategy_authority;
    strategy._reserved = [0; 64];

    emit!(StrategyInitialized {
        strategy: strategy.key(),
        vault: strategy.vault,
        kind,
        underlying_mint: strategy.underlying_mint,
        reward_mint: strategy.reward_mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
