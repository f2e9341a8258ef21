use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::{
    constants::*, errors::*, instructions::bound_strategy::invested_balance_view, math,
    state::*,
};

/// Read-only accounts for vault queries; results come back as return data
#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.underlying_mint.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, VaultState>,

    /// Vault share mint
    /// Security: Must match vault.share_mint; outstanding shares are its supply
    #[account(address = vault.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Account<'info, Mint>,

    #[account(address = vault.vault_token_account @ VaultError::InvalidOwner)]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub strategy: Option<Account<'info, StrategyState>>,

    pub strategy_position: Option<Account<'info, TokenAccount>>,
}

impl<'info> VaultView<'info> {
    fn idle(&self) -> u64 {
        self.vault_token_account.amount
    }

    fn invested(&self) -> Result<u64> {
        invested_balance_view(
            &self.vault,
            self.strategy.as_ref(),
            self.strategy_position.as_ref(),
        )
    }

    fn total_underlying(&self) -> Result<u64> {
        self.vault.total_underlying(self.idle(), self.invested()?)
    }

    pub fn price_per_full_share(&self) -> Result<u64> {
        math::price_per_full_share(self.total_underlying()?, self.share_mint.supply)
    }

    fn redeemable(&self, shares: u64) -> Result<u64> {
        math::underlying_for_shares(shares, self.share_mint.supply, self.total_underlying()?)
    }
}

pub fn get_price_per_full_share(ctx: Context<VaultView>) -> Result<u64> {
    ctx.accounts.price_per_full_share()
}

pub fn underlying_balance_in_vault(ctx: Context<VaultView>) -> Result<u64> {
    Ok(ctx.accounts.idle())
}

pub fn underlying_balance_with_investment(ctx: Context<VaultView>) -> Result<u64> {
    ctx.accounts.total_underlying()
}

pub fn available_to_invest_out(ctx: Context<VaultView>) -> Result<u64> {
    let view = &ctx.accounts;
    view.vault.investable(view.idle())
}

#[derive(Accounts)]
pub struct HolderView<'info> {
    pub view: VaultView<'info>,

    #[account(
        constraint = holder_share_account.mint == view.vault.share_mint @ VaultError::InvalidMint,
    )]
    pub holder_share_account: Account<'info, TokenAccount>,
}

/// Underlying the holder's shares would redeem for right now.
pub fn underlying_balance_with_investment_for_holder(ctx: Context<HolderView>) -> Result<u64> {
    ctx.accounts
        .view
        .redeemable(ctx.accounts.holder_share_account.amount)
}

/// Controller-side price query, restricted to registered vaults
#[derive(Accounts)]
pub struct ControllerPriceView<'info> {
    pub controller: Account<'info, ControllerState>,

    pub view: VaultView<'info>,
}

pub fn controller_price_per_full_share(ctx: Context<ControllerPriceView>) -> Result<u64> {
    let view = &ctx.accounts.view;
    require!(
        ctx.accounts.controller.has_vault(&view.vault.key()),
        VaultError::VaultNotRegistered
    );
    view.price_per_full_share()
}
