//! Strategy capability shared by every yield-source integration.
//!
//! The vault and controller only ever talk to `dyn Strategy`. Funds enter a
//! strategy exclusively through a vault-signed transfer followed by
//! `invest`, and leave only through strategy-signed transfers back into the
//! bound vault's token account.

pub mod noop;
pub mod reward_pool;

pub use noop::*;
pub use reward_pool::*;

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::{
    constants::STRATEGY_AUTHORITY_SEED,
    errors::VaultError,
    state::{HarvestPlan, ProfitShare, StrategyKind, StrategyState},
};

/// Accounts a strategy needs to act on behalf of its vault.
pub struct StrategyAccounts<'a, 'info: 'a> {
    pub state: &'a mut Account<'info, StrategyState>,
    /// PDA owning `position` and `rewards`
    pub authority: AccountInfo<'info>,
    pub position: &'a mut Account<'info, TokenAccount>,
    /// Only required by harvesting variants
    pub rewards: Option<&'a mut Account<'info, TokenAccount>>,
    /// Bound vault's token account, the only withdrawal destination
    pub vault_token_account: AccountInfo<'info>,
    /// Fee reward forwarder's token account for the reward mint
    pub fee_destination: Option<AccountInfo<'info>>,
    pub token_program: AccountInfo<'info>,
}

impl<'a, 'info: 'a> StrategyAccounts<'a, 'info> {
    /// Move `amount` out of a strategy-owned token account, signed by the
    /// strategy authority PDA.
    pub fn transfer_signed(
        &self,
        from: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let strategy_key = self.state.key();
        let authority_seeds: &[&[u8]] = &[
            STRATEGY_AUTHORITY_SEED,
            strategy_key.as_ref(),
            &[self.state.authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from,
                to,
                authority: self.authority.clone(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, amount)
    }

    /// Return `amount` from the position to the vault.
    pub fn release_to_vault(&mut self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Ok(0);
        }
        require!(
            amount <= self.position.amount,
            VaultError::InsufficientLiquidity
        );
        self.transfer_signed(
            self.position.to_account_info(),
            self.vault_token_account.clone(),
            amount,
        )?;
        self.position.reload()?;
        self.state.settle(self.position.amount);
        Ok(amount)
    }
}

/// Capability interface of a yield strategy.
pub trait Strategy<'a, 'info: 'a> {
    fn accounts(&self) -> &StrategyAccounts<'a, 'info>;

    fn accounts_mut(&mut self) -> &mut StrategyAccounts<'a, 'info>;

    /// Value held in the yield source, in underlying units.
    fn invested_underlying_balance(&self) -> u64 {
        self.accounts().position.amount
    }

    /// Deploy `amount` the vault just handed over. Zero is a no-op.
    fn invest(&mut self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let accounts = self.accounts_mut();
        accounts.position.reload()?;
        let balance = accounts.position.amount;
        accounts.state.record_invest(amount, balance)
    }

    /// Send `amount` back to the vault; returns what was sent.
    fn withdraw_to_vault(&mut self, amount: u64) -> Result<u64> {
        self.accounts_mut().release_to_vault(amount)
    }

    /// Drain the whole position back to the vault.
    fn withdraw_all_to_vault(&mut self) -> Result<u64> {
        let accounts = self.accounts_mut();
        accounts.position.reload()?;
        let balance = accounts.position.amount;
        accounts.release_to_vault(balance)
    }

    /// Realize yield from the source and reinvest or forward it.
    fn harvest(&mut self, share: &ProfitShare) -> Result<HarvestPlan>;
}

/// Dispatch on the strategy kind stored in the account.
pub fn load_strategy<'a, 'info: 'a>(
    accounts: StrategyAccounts<'a, 'info>,
) -> Box<dyn Strategy<'a, 'info> + 'a> {
    match accounts.state.kind {
        StrategyKind::Noop => Box::new(NoopStrategy::new(accounts)),
        StrategyKind::RewardPool => Box::new(RewardPoolStrategy::new(accounts)),
    }
}
