use anchor_lang::prelude::*;

use super::{Strategy, StrategyAccounts};
use crate::state::{HarvestPlan, ProfitShare};

/// Keeps the vault's funds in the position and never realizes yield.
/// Useful as a parking strategy during migrations.
pub struct NoopStrategy<'a, 'info: 'a> {
    accounts: StrategyAccounts<'a, 'info>,
}

impl<'a, 'info: 'a> NoopStrategy<'a, 'info> {
    pub fn new(accounts: StrategyAccounts<'a, 'info>) -> Self {
        Self { accounts }
    }
}

impl<'a, 'info: 'a> Strategy<'a, 'info> for NoopStrategy<'a, 'info> {
    fn accounts(&self) -> &StrategyAccounts<'a, 'info> {
        &self.accounts
    }

    fn accounts_mut(&mut self) -> &mut StrategyAccounts<'a, 'info> {
        &mut self.accounts
    }

    fn harvest(&mut self, _share: &ProfitShare) -> Result<HarvestPlan> {
        Ok(HarvestPlan::default())
    }
}
