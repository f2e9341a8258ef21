use anchor_lang::{prelude::*, AccountsExit};
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::*,
    events::*,
    guard::ReentrancyGuard,
    instructions::bound_strategy::*,
    state::*,
    strategies::Strategy,
};

/// Vault side of a hard-work cycle, shared by the controller and the
/// governance-only vault entry point.
#[derive(Accounts)]
pub struct VaultHardWork<'info> {
    /// Vault state PDA
    /// Security: Validated by seeds, guarded against reentry
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.underlying_mint.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, VaultState>,

    /// Vault share mint
    /// Security: Must match vault.share_mint; its supply prices the shares
    #[account(address = vault.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA
    /// Security: Validated by seeds, signs the invest transfer
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

    pub bound: BoundStrategy<'info>,

    /// Bound strategy's reward account
    /// Security: Key checked against strategy.rewards by the handler
    #[account(mut)]
    pub strategy_rewards: Account<'info, TokenAccount>,

    /// Fee reward forwarder's account for the reward mint
    /// Security: Owner and mint checked against the controller and strategy
    #[account(mut)]
    pub fee_destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Governance triggers hard work on a vault directly, without a price hint
#[derive(Accounts)]
pub struct DoHardWork<'info> {
    pub governance: Signer<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
        constraint = storage.is_governance(&governance.key()) @ VaultError::Unauthorized,
    )]
    pub storage: Account<'info, Storage>,

    /// Supplies the fee configuration
    #[account(
        constraint = storage.is_controller(&controller.key()) @ VaultError::Unauthorized,
    )]
    pub controller: Account<'info, ControllerState>,

    pub work: VaultHardWork<'info>,
}

pub fn handler(ctx: Context<DoHardWork>) -> Result<()> {
    let accounts = ctx.accounts;
    require_keys_eq!(
        accounts.work.vault.storage,
        accounts.storage.key(),
        VaultError::Unauthorized
    );

    let caller = accounts.governance.key();
    execute(&mut accounts.work, &accounts.controller, caller, |_| Ok(()))
}

/// Harvest through the strategy, then invest the configured fraction of
/// idle balance.
///
/// `confirm_price` sees the price per full share before anything moves and
/// may reject the cycle. A lower price afterwards is reported, not reverted.
pub fn execute<'info>(
    work: &mut VaultHardWork<'info>,
    controller: &ControllerState,
    caller: Pubkey,
    confirm_price: impl FnOnce(u64) -> Result<()>,
) -> Result<()> {
    work.bound.verify(&work.vault)?;
    require_keys_eq!(
        work.strategy_rewards.key(),
        work.bound.strategy.rewards,
        VaultError::StrategyMismatch
    );
    require_keys_eq!(
        work.fee_destination.owner,
        controller.fee_reward_forwarder,
        VaultError::InvalidOwner
    );
    require_keys_eq!(
        work.fee_destination.mint,
        work.bound.strategy.reward_mint,
        VaultError::InvalidMint
    );

    work.vault.enter()?;
    work.vault.exit(&crate::ID)?;
    work.vault.sync_supply(work.share_mint.supply);

    let share = controller.profit_share()?;
    let vault_key = work.vault.key();
    let strategy_key = work.bound.strategy.key();
    let position_info = work.bound.strategy_position.to_account_info();

    let mut strategy = work.bound.load(
        work.vault_token_account.to_account_info(),
        work.token_program.to_account_info(),
        Some(&mut work.strategy_rewards),
        Some(work.fee_destination.to_account_info()),
    );

    let price_before = work.vault.price_per_full_share(work.vault.total_underlying(
        work.vault_token_account.amount,
        strategy.invested_underlying_balance(),
    )?)?;
    confirm_price(price_before)?;

    let harvest = strategy.harvest(&share)?;

    work.vault_token_account.reload()?;
    let investable = work.vault.investable(work.vault_token_account.amount)?;
    invest_idle(
        &work.vault,
        work.token_program.to_account_info(),
        work.vault_token_account.to_account_info(),
        work.vault_authority.to_account_info(),
        position_info,
        &mut *strategy,
        investable,
    )?;

    work.vault_token_account.reload()?;
    let invested = strategy.invested_underlying_balance();
    drop(strategy);

    let price_after = work.vault.price_per_full_share(
        work.vault
            .total_underlying(work.vault_token_account.amount, invested)?,
    )?;

    work.vault.leave();

    let timestamp = Clock::get()?.unix_timestamp;
    if price_after < price_before {
        msg!(
            "share price dropped from {} to {} during hard work",
            price_before,
            price_after
        );
        emit!(StrategyLossReported {
            vault: vault_key,
            strategy: strategy_key,
            price_before,
            price_after,
            timestamp,
        });
    }

    emit!(HardWorkDone {
        vault: vault_key,
        strategy: strategy_key,
        caller,
        hard_rewards: controller.hard_rewards,
        harvested: harvest.rewards,
        invested: investable,
        price_before,
        price_after,
        timestamp,
    });

    Ok(())
}

/// Move `amount` of idle balance into the strategy's position and let the
/// strategy account for it.
pub(crate) fn invest_idle<'a, 'info: 'a>(
    vault: &VaultState,
    token_program: AccountInfo<'info>,
    vault_token_account: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    position: AccountInfo<'info>,
    strategy: &mut (dyn Strategy<'a, 'info> + 'a),
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let underlying_mint = vault.underlying_mint;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        underlying_mint.as_ref(),
        &[vault.authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        token_program,
        Transfer {
            from: vault_token_account,
            to: position,
            authority: vault_authority,
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)?;

    strategy.invest(amount)
}
