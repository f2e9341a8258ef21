use anchor_lang::{error::ErrorCode, prelude::*};
use anchor_spl::token::TokenAccount;

use crate::{
    constants::*,
    errors::*,
    state::*,
    strategies::{load_strategy, Strategy, StrategyAccounts},
};

/// Strategy accounts a vault operation hands control to.
///
/// Seeds and addresses tie the three accounts to each other; the handler
/// still checks that the strategy is the one its vault is bound to.
#[derive(Accounts)]
pub struct BoundStrategy<'info> {
    #[account(mut)]
    pub strategy: Account<'info, StrategyState>,

    /// CHECK: PDA owning the strategy token accounts, validated by seeds
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, strategy.key().as_ref()],
        bump = strategy.authority_bump,
    )]
    pub strategy_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = strategy.position @ VaultError::StrategyMismatch,
    )]
    pub strategy_position: Account<'info, TokenAccount>,
}

impl<'info> BoundStrategy<'info> {
    pub fn verify(&self, vault: &Account<'info, VaultState>) -> Result<()> {
        vault.require_strategy(&self.strategy.key())?;
        require!(
            self.strategy.is_bound_to(&vault.key()),
            VaultError::StrategyMismatch
        );
        Ok(())
    }

    pub fn load<'a>(
        &'a mut self,
        vault_token_account: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        rewards: Option<&'a mut Account<'info, TokenAccount>>,
        fee_destination: Option<AccountInfo<'info>>,
    ) -> Box<dyn Strategy<'a, 'info> + 'a>
    where
        'info: 'a,
    {
        load_strategy(StrategyAccounts {
            authority: self.strategy_authority.to_account_info(),
            state: &mut self.strategy,
            position: &mut self.strategy_position,
            rewards,
            vault_token_account,
            fee_destination,
            token_program,
        })
    }
}

/// Same binding for instructions where the vault may not have a strategy
/// yet (deposit, withdraw, migration away from the old strategy).
pub fn load_optional_strategy<'a, 'info: 'a>(
    vault: &Account<'info, VaultState>,
    strategy: Option<&'a mut Account<'info, StrategyState>>,
    strategy_authority: Option<&UncheckedAccount<'info>>,
    strategy_position: Option<&'a mut Account<'info, TokenAccount>>,
    vault_token_account: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
) -> Result<Option<Box<dyn Strategy<'a, 'info> + 'a>>> {
    if !vault.has_strategy() {
        return Ok(None);
    }

    let (Some(state), Some(authority), Some(position)) =
        (strategy, strategy_authority, strategy_position)
    else {
        return err!(ErrorCode::AccountNotEnoughKeys);
    };

    vault.require_strategy(&state.key())?;
    require!(state.is_bound_to(&vault.key()), VaultError::StrategyMismatch);
    require_keys_eq!(position.key(), state.position, VaultError::StrategyMismatch);

    let state_key = state.key();
    let expected_authority = Pubkey::create_program_address(
        &[
            STRATEGY_AUTHORITY_SEED,
            state_key.as_ref(),
            &[state.authority_bump],
        ],
        &crate::ID,
    )
    .map_err(|_| error!(VaultError::InvalidOwner))?;
    require_keys_eq!(authority.key(), expected_authority, VaultError::InvalidOwner);

    Ok(Some(load_strategy(StrategyAccounts {
        state,
        authority: authority.to_account_info(),
        position,
        rewards: None,
        vault_token_account,
        fee_destination: None,
        token_program,
    })))
}

/// Read-only invested balance for view instructions.
pub fn invested_balance_view<'info>(
    vault: &Account<'info, VaultState>,
    strategy: Option<&Account<'info, StrategyState>>,
    strategy_position: Option<&Account<'info, TokenAccount>>,
) -> Result<u64> {
    if !vault.has_strategy() {
        return Ok(0);
    }

    let (Some(state), Some(position)) = (strategy, strategy_position) else {
        return err!(ErrorCode::AccountNotEnoughKeys);
    };

    vault.require_strategy(&state.key())?;
    require_keys_eq!(position.key(), state.position, VaultError::StrategyMismatch);
    Ok(position.amount)
}
