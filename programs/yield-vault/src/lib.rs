// Yield Vault - pooled investment vaults with pluggable yield strategies on Solana
// Architecture: access registry + controller + per-asset vaults, each bound to one strategy

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod guard;
pub mod instructions;
pub mod math;
pub mod state;
pub mod strategies;

use instructions::*;
use state::StrategyKind;

declare_id!("YLDvau1tXr7mQk3dTnW8pZ9sHcE4fJ6gB2aLuN5yVqK");

#[program]
pub mod yield_vault {
    use super::*;

    // ---------------------------------------------------------------------
    // Access registry
    // ---------------------------------------------------------------------

    /// Create the access registry; the signer becomes governance
    pub fn initialize_storage(ctx: Context<InitializeStorage>) -> Result<()> {
        instructions::initialize_storage::handler(ctx)
    }

    /// Hand governance to another account (governance only)
    pub fn set_governance(ctx: Context<UpdateStorage>, new_governance: Pubkey) -> Result<()> {
        instructions::update_storage::set_governance(ctx, new_governance)
    }

    /// Point the registry at a different controller (governance only)
    pub fn set_controller(ctx: Context<UpdateStorage>, new_controller: Pubkey) -> Result<()> {
        instructions::update_storage::set_controller(ctx, new_controller)
    }

    // ---------------------------------------------------------------------
    // Controller
    // ---------------------------------------------------------------------

    /// Create the controller and register it as the live controller
    pub fn initialize_controller(
        ctx: Context<InitializeController>,
        fee_reward_forwarder: Pubkey,
    ) -> Result<()> {
        instructions::initialize_controller::handler(ctx, fee_reward_forwarder)
    }

    pub fn add_hard_worker(ctx: Context<ControllerAdmin>, worker: Pubkey) -> Result<()> {
        instructions::controller_admin::add_hard_worker(ctx, worker)
    }

    pub fn remove_hard_worker(ctx: Context<ControllerAdmin>, worker: Pubkey) -> Result<()> {
        instructions::controller_admin::remove_hard_worker(ctx, worker)
    }

    pub fn set_fee_reward_forwarder(
        ctx: Context<ControllerAdmin>,
        fee_reward_forwarder: Pubkey,
    ) -> Result<()> {
        instructions::controller_admin::set_fee_reward_forwarder(ctx, fee_reward_forwarder)
    }

    pub fn set_hard_rewards(
        ctx: Context<ControllerAdmin>,
        hard_rewards: Option<Pubkey>,
    ) -> Result<()> {
        instructions::controller_admin::set_hard_rewards(ctx, hard_rewards)
    }

    pub fn set_profit_sharing(
        ctx: Context<ControllerAdmin>,
        numerator: u64,
        denominator: u64,
    ) -> Result<()> {
        instructions::controller_admin::set_profit_sharing(ctx, numerator, denominator)
    }

    /// Register a vault and bind its first strategy without a timelock
    pub fn add_vault_and_strategy(ctx: Context<AddVaultAndStrategy>) -> Result<()> {
        instructions::add_vault_and_strategy::handler(ctx)
    }

    /// Run hard work on a registered vault
    ///
    /// Hard workers must supply a price-per-full-share hint; the call fails
    /// with `SharePriceDeviation` when the live price is outside the
    /// tolerance band around it.
    pub fn do_hard_work(
        ctx: Context<ControllerDoHardWork>,
        price_hint: u64,
        tolerance_numerator: u64,
        tolerance_denominator: u64,
    ) -> Result<()> {
        instructions::controller_hard_work::handler(
            ctx,
            price_hint,
            tolerance_numerator,
            tolerance_denominator,
        )
    }

    /// Sweep a token account owned by the controller to governance
    pub fn salvage(ctx: Context<Salvage>, amount: u64) -> Result<()> {
        instructions::salvage::salvage(ctx, amount)
    }

    /// Sweep a non-protected token account owned by a strategy to governance
    pub fn salvage_strategy(ctx: Context<SalvageStrategy>, amount: u64) -> Result<()> {
        instructions::salvage::salvage_strategy(ctx, amount)
    }

    /// Price per full share of a registered vault
    pub fn get_price_per_full_share(ctx: Context<ControllerPriceView>) -> Result<u64> {
        instructions::view::controller_price_per_full_share(ctx)
    }

    // ---------------------------------------------------------------------
    // Vault
    // ---------------------------------------------------------------------

    /// Create a vault, its share mint and its idle token account
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        invest_numerator: u64,
        invest_denominator: u64,
    ) -> Result<()> {
        instructions::initialize_vault::handler(ctx, invest_numerator, invest_denominator)
    }

    /// Deposit underlying and receive shares at the current price
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Deposit underlying, minting the shares to `beneficiary`
    pub fn deposit_for(ctx: Context<Deposit>, amount: u64, beneficiary: Pubkey) -> Result<()> {
        instructions::deposit::deposit_for(ctx, amount, beneficiary)
    }

    /// Burn shares and receive their pro-rata underlying
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, shares)
    }

    /// Governance-only hard work directly on a vault
    pub fn vault_do_hard_work(ctx: Context<DoHardWork>) -> Result<()> {
        instructions::hard_work::handler(ctx)
    }

    /// Stage a strategy migration; executable after the timelock
    pub fn announce_strategy_update(ctx: Context<StageStrategy>, strategy: Pubkey) -> Result<()> {
        instructions::strategy_update::announce_strategy_update(ctx, strategy)
    }

    pub fn clear_strategy_announcement(ctx: Context<StageStrategy>) -> Result<()> {
        instructions::strategy_update::clear_strategy_announcement(ctx)
    }

    /// Drain the old strategy and bind the announced one
    pub fn set_strategy(ctx: Context<SetStrategy>) -> Result<()> {
        instructions::strategy_update::set_strategy(ctx)
    }

    pub fn set_vault_fraction_to_invest(
        ctx: Context<VaultAdmin>,
        numerator: u64,
        denominator: u64,
    ) -> Result<()> {
        instructions::vault_admin::set_vault_fraction_to_invest(ctx, numerator, denominator)
    }

    /// Pull all funds out of the strategy
    pub fn withdraw_all(ctx: Context<ManageFunds>) -> Result<()> {
        instructions::vault_admin::withdraw_all(ctx)
    }

    /// Pull all funds out of the strategy and reinvest the configured fraction
    pub fn rebalance(ctx: Context<ManageFunds>) -> Result<()> {
        instructions::vault_admin::rebalance(ctx)
    }

    pub fn vault_price_per_full_share(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::get_price_per_full_share(ctx)
    }

    pub fn underlying_balance_in_vault(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::underlying_balance_in_vault(ctx)
    }

    pub fn underlying_balance_with_investment(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::underlying_balance_with_investment(ctx)
    }

    pub fn underlying_balance_with_investment_for_holder(
        ctx: Context<HolderView>,
    ) -> Result<u64> {
        instructions::view::underlying_balance_with_investment_for_holder(ctx)
    }

    pub fn available_to_invest_out(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::available_to_invest_out(ctx)
    }

    // ---------------------------------------------------------------------
    // Strategy
    // ---------------------------------------------------------------------

    /// Create a strategy for a vault; bind it via `add_vault_and_strategy`
    /// or an announced `set_strategy`
    pub fn initialize_strategy(
        ctx: Context<InitializeStrategy>,
        strategy_id: u64,
        kind: StrategyKind,
    ) -> Result<()> {
        instructions::initialize_strategy::handler(ctx, strategy_id, kind)
    }

    /// Allow or forbid reward liquidation during harvest
    pub fn set_liquidation_allowed(ctx: Context<StrategyAdmin>, allowed: bool) -> Result<()> {
        instructions::strategy_admin::set_liquidation_allowed(ctx, allowed)
    }

    pub fn set_sell_floor(ctx: Context<StrategyAdmin>, sell_floor: u64) -> Result<()> {
        instructions::strategy_admin::set_sell_floor(ctx, sell_floor)
    }
}
