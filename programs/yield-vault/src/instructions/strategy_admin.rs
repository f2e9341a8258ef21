use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct StrategyAdmin<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    #[account(mut, has_one = storage)]
    pub strategy: Account<'info, StrategyState>,
}

pub fn set_liquidation_allowed(ctx: Context<StrategyAdmin>, allowed: bool) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;
    strategy.liquidation_allowed = allowed;

    emit!(LiquidationAllowedChanged {
        strategy: strategy.key(),
        allowed,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_sell_floor(ctx: Context<StrategyAdmin>, sell_floor: u64) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;
    strategy.sell_floor = sell_floor;

    emit!(SellFloorChanged {
        strategy: strategy.key(),
        sell_floor,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
