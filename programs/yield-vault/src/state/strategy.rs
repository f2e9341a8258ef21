use anchor_lang::prelude::*;

use crate::{
    errors::VaultError,
    math,
};

/// Yield-source integration a strategy account runs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Holds the vault's funds, realizes nothing
    Noop,
    /// Stakes the position and liquidates accrued rewards on harvest
    RewardPool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyPhase {
    Idle,
    Invested,
    Liquidating,
}

/// Fee split applied to liquidated rewards, taken from the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfitShare {
    pub numerator: u64,
    pub denominator: u64,
}

impl ProfitShare {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        require!(denominator > 0, VaultError::InvalidRatio);
        require!(numerator <= denominator, VaultError::InvalidRatio);
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn fee_on(&self, amount: u64) -> Result<u64> {
        math::mul_div(amount, self.numerator, self.denominator)
    }
}

/// Where a harvest sends the reward balance. `fee + compounded + forwarded`
/// always equals `rewards`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestPlan {
    pub rewards: u64,
    pub fee: u64,
    pub compounded: u64,
    pub forwarded: u64,
}

impl HarvestPlan {
    pub fn is_empty(&self) -> bool {
        self.rewards == 0
    }

    /// Everything that leaves for the fee reward forwarder.
    pub fn to_forwarder(&self) -> Result<u64> {
        self.fee
            .checked_add(self.forwarded)
            .ok_or(error!(VaultError::MathOverflow))
    }
}

/// Strategy bound to exactly one vault.
///
/// The `position` token account stands in for the external yield source:
/// funds in it are invested. `rewards` collects what the source pays out
/// until a harvest liquidates it.
#[account]
pub struct StrategyState {
    pub storage: Pubkey,            // 32 bytes
    pub vault: Pubkey,              // 32 bytes
    pub underlying_mint: Pubkey,    // 32 bytes
    pub reward_mint: Pubkey,        // 32 bytes
    pub position: Pubkey,           // 32 bytes
    pub rewards: Pubkey,            // 32 bytes
    pub kind: StrategyKind,         // 1 byte
    pub phase: StrategyPhase,       // 1 byte

    /// Governance must opt in before rewards are ever converted
    pub liquidation_allowed: bool,  // 1 byte

    /// Reward balances at or below this are left to accrue
    pub sell_floor: u64,            // 8 bytes

    pub strategy_id: u64,           // 8 bytes
    pub bump: u8,                   // 1 byte
    pub authority_bump: u8,         // 1 byte
    pub _reserved: [u8; 64],        // 64 bytes
}

impl StrategyState {
    pub const LEN: usize = 8 + 32 * 6 + 1 + 1 + 1 + 8 + 8 + 1 + 1 + 64;

    pub fn is_bound_to(&self, vault: &Pubkey) -> bool {
        self.vault == *vault
    }

    pub fn settle(&mut self, position_balance: u64) {
        self.phase = if position_balance > 0 {
            StrategyPhase::Invested
        } else {
            StrategyPhase::Idle
        };
    }

    /// Bookkeeping after the vault moved `amount` into the position.
    pub fn record_invest(&mut self, amount: u64, position_balance: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        require!(
            self.phase != StrategyPhase::Liquidating,
            VaultError::ReentrantCall
        );
        self.settle(position_balance);
        Ok(())
    }

    pub fn begin_liquidation(&mut self) -> Result<()> {
        require!(self.liquidation_allowed, VaultError::LiquidationNotAllowed);
        require!(
            self.phase != StrategyPhase::Liquidating,
            VaultError::ReentrantCall
        );
        self.phase = StrategyPhase::Liquidating;
        Ok(())
    }

    pub fn end_liquidation(&mut self, position_balance: u64) -> Result<()> {
        require!(
            self.phase == StrategyPhase::Liquidating,
            VaultError::LiquidationNotAllowed
        );
        self.settle(position_balance);
        Ok(())
    }

    /// Split a reward balance for liquidation. Returns an empty plan when
    /// liquidation is off or the balance has not cleared the sell floor.
    pub fn plan_harvest(&self, reward_balance: u64, share: &ProfitShare) -> Result<HarvestPlan> {
        if !self.liquidation_allowed || reward_balance == 0 || reward_balance <= self.sell_floor {
            return Ok(HarvestPlan::default());
        }

        let fee = share.fee_on(reward_balance)?;
        let remainder = reward_balance
            .checked_sub(fee)
            .ok_or(VaultError::MathOverflow)?;

        // rewards in a foreign mint go to the forwarder for conversion
        let (compounded, forwarded) = if self.reward_mint == self.underlying_mint {
            (remainder, 0)
        } else {
            (0, remainder)
        };

        Ok(HarvestPlan {
            rewards: reward_balance,
            fee,
            compounded,
            forwarded,
        })
    }

    /// Salvage must not touch anything this strategy accounts for.
    pub fn check_salvage(&self, mint: &Pubkey, source: &Pubkey) -> Result<()> {
        require!(
            *mint != self.underlying_mint && *mint != self.reward_mint,
            VaultError::AssetProtected
        );
        require!(
            *source != self.position && *source != self.rewards,
            VaultError::AssetProtected
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_strategy(reward_mint_is_underlying: bool) -> StrategyState {
        let underlying = Pubkey::new_unique();
        StrategyState {
            storage: Pubkey::default(),
            vault: Pubkey::new_unique(),
            underlying_mint: underlying,
            reward_mint: if reward_mint_is_underlying {
                underlying
            } else {
                Pubkey::new_unique()
            },
            position: Pubkey::new_unique(),
            rewards: Pubkey::new_unique(),
            kind: StrategyKind::RewardPool,
            phase: StrategyPhase::Idle,
            liquidation_allowed: false,
            sell_floor: 0,
            strategy_id: 0,
            bump: 0,
            authority_bump: 0,
            _reserved: [0; 64],
        }
    }

    fn thirty_percent() -> ProfitShare {
        ProfitShare::new(30, 100).unwrap()
    }

    #[test]
    fn test_harvest_waits_for_liquidation_gate() {
        let mut strategy = mock_strategy(true);
        let plan = strategy.plan_harvest(1_000, &thirty_percent()).unwrap();
        assert!(plan.is_empty());
        assert!(strategy.begin_liquidation().is_err());

        strategy.liquidation_allowed = true;
        let plan = strategy.plan_harvest(1_000, &thirty_percent()).unwrap();
        assert_eq!(plan.fee, 300);
        assert_eq!(plan.compounded, 700);
        assert_eq!(plan.forwarded, 0);
    }

    #[test]
    fn test_foreign_reward_is_forwarded() {
        let mut strategy = mock_strategy(false);
        strategy.liquidation_allowed = true;
        let plan = strategy.plan_harvest(1_000, &thirty_percent()).unwrap();
        assert_eq!(plan.compounded, 0);
        assert_eq!(plan.to_forwarder().unwrap(), 1_000);
    }

    #[test]
    fn test_sell_floor() {
        let mut strategy = mock_strategy(true);
        strategy.liquidation_allowed = true;
        strategy.sell_floor = 500;
        assert!(strategy.plan_harvest(500, &thirty_percent()).unwrap().is_empty());
        assert!(!strategy.plan_harvest(501, &thirty_percent()).unwrap().is_empty());
    }

    #[test]
    fn test_phase_transitions() {
        let mut strategy = mock_strategy(true);
        strategy.record_invest(0, 0).unwrap();
        assert_eq!(strategy.phase, StrategyPhase::Idle);

        strategy.record_invest(100, 100).unwrap();
        assert_eq!(strategy.phase, StrategyPhase::Invested);

        strategy.liquidation_allowed = true;
        strategy.begin_liquidation().unwrap();
        assert!(strategy.begin_liquidation().is_err());
        assert!(strategy.record_invest(10, 110).is_err());
        strategy.end_liquidation(170).unwrap();
        assert_eq!(strategy.phase, StrategyPhase::Invested);

        strategy.settle(0);
        assert_eq!(strategy.phase, StrategyPhase::Idle);
    }

    #[test]
    fn test_salvage_protects_accounted_assets() {
        let strategy = mock_strategy(false);
        let stray_mint = Pubkey::new_unique();
        let stray_account = Pubkey::new_unique();

        assert!(strategy
            .check_salvage(&strategy.underlying_mint, &stray_account)
            .is_err());
        assert!(strategy
            .check_salvage(&strategy.reward_mint, &stray_account)
            .is_err());
        assert!(strategy.check_salvage(&stray_mint, &strategy.position).is_err());
        assert!(strategy.check_salvage(&stray_mint, &stray_account).is_ok());
    }
}
