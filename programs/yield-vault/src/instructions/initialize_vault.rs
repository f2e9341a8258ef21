use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Initialize a new vault for a given underlying token
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    /// Vault state PDA
    #[account(
        init,
        payer = governance,
        space = VaultState::LEN,
        seeds = [VAULT_SEED, underlying_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, VaultState>,

    /// Any valid mint can back a vault
    pub underlying_mint: Account<'info, Mint>,

    /// Share token mint PDA, minted by the vault authority
    #[account(
        init,
        payer = governance,
        seeds = [SHARE_MINT_SEED, underlying_mint.key().as_ref()],
        bump,
        mint::decimals = underlying_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA used as mint authority and idle-balance owner, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, underlying_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Holds the idle balance
    #[account(
        init,
        payer = governance,
        associated_token::mint = underlying_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeVault>,
    invest_numerator: u64,
    invest_denominator: u64,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;

    vault.storage = ctx.accounts.storage.key();
    vault.underlying_mint = ctx.accounts.underlying_mint.key();
    vault.share_mint = ctx.accounts.share_mint.key();
    vault.vault_token_account = ctx.accounts.vault_token_account.key();
    vault.total_shares = 0;
    vault.set_invest_ratio(invest_numerator, invest_denominator)?;
    vault.strategy = Pubkey::default();
    vault.strategy_timelock = StrategyTimelock::new(STRATEGY_SWITCH_TIMELOCK);
    vault.entered = false;
    vault.bump = ctx.bumps.vault;
    vault.share_bump = ctx.bumps.share_mint;
    vault.authority_bump = ctx.bumps.vault_authority;
    vault._reserved = [0; 64];

    emit!(VaultInitialized {
        vault: vault.key(),
        storage: vault.storage,
        underlying_mint: vault.underlying_mint,
        share_mint: vault.share_mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
