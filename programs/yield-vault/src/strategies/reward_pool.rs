use anchor_lang::{error::ErrorCode, prelude::*};

use super::{Strategy, StrategyAccounts};
use crate::{
    events::Harvested,
    state::{HarvestPlan, ProfitShare},
};

/// Stakes the position in a reward pool whose payouts land in the
/// strategy's `rewards` account.
///
/// Harvest liquidates that balance once governance has allowed it: the
/// profit share goes to the fee reward forwarder, the rest is compounded
/// into the position when rewards are paid in the underlying, or handed to
/// the forwarder for conversion otherwise.
pub struct RewardPoolStrategy<'a, 'info: 'a> {
    accounts: StrategyAccounts<'a, 'info>,
}

impl<'a, 'info: 'a> RewardPoolStrategy<'a, 'info> {
    pub fn new(accounts: StrategyAccounts<'a, 'info>) -> Self {
        Self { accounts }
    }
}

impl<'a, 'info: 'a> Strategy<'a, 'info> for RewardPoolStrategy<'a, 'info> {
    fn accounts(&self) -> &StrategyAccounts<'a, 'info> {
        &self.accounts
    }

    fn accounts_mut(&mut self) -> &mut StrategyAccounts<'a, 'info> {
        &mut self.accounts
    }

    fn harvest(&mut self, share: &ProfitShare) -> Result<HarvestPlan> {
        let accounts = &mut self.accounts;

        let (rewards_info, reward_balance) = {
            let rewards = accounts
                .rewards
                .as_mut()
                .ok_or(ErrorCode::AccountNotEnoughKeys)?;
            rewards.reload()?;
            (rewards.to_account_info(), rewards.amount)
        };

        let plan = accounts.state.plan_harvest(reward_balance, share)?;
        if plan.is_empty() {
            // not allowed yet, or below the sell floor: rewards keep accruing
            return Ok(plan);
        }

        accounts.state.begin_liquidation()?;

        let to_forwarder = plan.to_forwarder()?;
        if to_forwarder > 0 {
            let destination = accounts
                .fee_destination
                .clone()
                .ok_or(ErrorCode::AccountNotEnoughKeys)?;
            accounts.transfer_signed(rewards_info.clone(), destination, to_forwarder)?;
        }

        if plan.compounded > 0 {
            accounts.transfer_signed(
                rewards_info,
                accounts.position.to_account_info(),
                plan.compounded,
            )?;
        }

        accounts.position.reload()?;
        let position_balance = accounts.position.amount;
        accounts.state.end_liquidation(position_balance)?;

        emit!(Harvested {
            strategy: accounts.state.key(),
            vault: accounts.state.vault,
            rewards: plan.rewards,
            fee: plan.fee,
            compounded: plan.compounded,
            forwarded: plan.forwarded,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(plan)
    }
}
