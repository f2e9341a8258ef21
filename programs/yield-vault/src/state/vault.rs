use anchor_lang::prelude::*;

use crate::{
    constants::MIGRATION_ROUNDING_EPSILON,
    errors::VaultError,
    guard::ReentrancyGuard,
    math,
    state::StrategyTimelock,
};

/// Pooled vault: depositor shares against idle plus invested underlying.
///
/// `idle` is the balance of `vault_token_account`; the invested part is read
/// from the bound strategy on every call and never stored here.
#[account]
pub struct VaultState {
    /// Access registry this vault resolves permissions through
    pub storage: Pubkey,            // 32 bytes

    /// Mint of the underlying asset
    pub underlying_mint: Pubkey,    // 32 bytes

    /// Mint of the vault share token
    pub share_mint: Pubkey,         // 32 bytes

    /// Token account holding the idle balance
    pub vault_token_account: Pubkey, // 32 bytes

    /// Outstanding shares, re-synced from the share mint supply on entry
    pub total_shares: u64,          // 8 bytes

    /// Fraction of idle balance invested per hard-work cycle
    pub invest_numerator: u64,      // 8 bytes
    pub invest_denominator: u64,    // 8 bytes

    /// Active strategy, default when unset
    pub strategy: Pubkey,           // 32 bytes

    /// Staged strategy migration
    pub strategy_timelock: StrategyTimelock, // 48 bytes

    /// Reentrancy flag
    pub entered: bool,              // 1 byte

    pub bump: u8,                   // 1 byte
    pub share_bump: u8,             // 1 byte
    pub authority_bump: u8,         // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 64],        // 64 bytes
}

/// How a share redemption is going to be funded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawPlan {
    /// Underlying owed to the withdrawer
    pub amount: u64,
    /// Part of `amount` that must come back from the strategy
    pub shortfall: u64,
    /// The last shares are leaving, so the strategy is drained entirely
    pub drain_strategy: bool,
}

/// What a withdrawal asks of the strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyPull {
    /// Idle balance covers the withdrawal
    Nothing,
    /// Return this much of the position
    Partial(u64),
    /// Return the whole position
    Drain,
}

impl WithdrawPlan {
    pub fn strategy_pull(&self, invested: u64) -> StrategyPull {
        if self.shortfall == 0 {
            StrategyPull::Nothing
        } else if self.drain_strategy {
            StrategyPull::Drain
        } else {
            StrategyPull::Partial(self.shortfall.min(invested))
        }
    }

    /// Idle balance after the pull must cover the whole entitlement.
    pub fn confirm_liquidity(&self, idle: u64) -> Result<()> {
        require!(idle >= self.amount, VaultError::InsufficientLiquidity);
        Ok(())
    }
}

impl VaultState {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 32 + 8 + 8 + 8 + 32 + StrategyTimelock::LEN + 1 + 1 + 1 + 1 + 64;

    pub fn has_strategy(&self) -> bool {
        self.strategy != Pubkey::default()
    }

    /// The given account is the strategy this vault is bound to.
    pub fn require_strategy(&self, strategy: &Pubkey) -> Result<()> {
        require!(self.has_strategy(), VaultError::StrategyNotSet);
        require!(self.strategy == *strategy, VaultError::StrategyMismatch);
        Ok(())
    }

    /// Share tokens can be burned without going through the vault, so the
    /// mint supply is authoritative.
    pub fn sync_supply(&mut self, share_supply: u64) {
        self.total_shares = share_supply;
    }

    pub fn total_underlying(&self, idle: u64, invested: u64) -> Result<u64> {
        idle.checked_add(invested)
            .ok_or(error!(VaultError::MathOverflow))
    }

    /// Shares to mint for `amount`; a deposit too small to earn a share is rejected.
    pub fn calculate_shares(&self, amount: u64, total_underlying: u64) -> Result<u64> {
        require!(amount > 0, VaultError::InvalidAmount);
        let shares = math::shares_for_deposit(amount, self.total_shares, total_underlying)?;
        require!(shares > 0, VaultError::InvalidAmount);
        Ok(shares)
    }

    pub fn calculate_underlying(&self, shares: u64, total_underlying: u64) -> Result<u64> {
        math::underlying_for_shares(shares, self.total_shares, total_underlying)
    }

    pub fn price_per_full_share(&self, total_underlying: u64) -> Result<u64> {
        math::price_per_full_share(total_underlying, self.total_shares)
    }

    /// Amount of idle balance the next hard-work cycle pushes into the strategy.
    pub fn investable(&self, idle: u64) -> Result<u64> {
        math::mul_div(idle, self.invest_numerator, self.invest_denominator)
    }

    pub fn set_invest_ratio(&mut self, numerator: u64, denominator: u64) -> Result<()> {
        require!(denominator > 0, VaultError::InvalidRatio);
        require!(numerator <= denominator, VaultError::InvalidRatio);
        self.invest_numerator = numerator;
        self.invest_denominator = denominator;
        Ok(())
    }

    pub fn record_mint(&mut self, shares: u64) -> Result<()> {
        self.total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    pub fn record_burn(&mut self, shares: u64) -> Result<()> {
        self.total_shares = self
            .total_shares
            .checked_sub(shares)
            .ok_or(VaultError::InvalidAmount)?;
        Ok(())
    }

    /// Entitlement for `shares` and how much of it idle balance cannot cover.
    pub fn plan_withdraw(
        &self,
        shares: u64,
        holder_balance: u64,
        idle: u64,
        invested: u64,
    ) -> Result<WithdrawPlan> {
        require!(shares > 0, VaultError::InvalidAmount);
        require!(shares <= holder_balance, VaultError::InvalidAmount);
        require!(shares <= self.total_shares, VaultError::InvalidAmount);

        let total = self.total_underlying(idle, invested)?;
        let amount = self.calculate_underlying(shares, total)?;
        let shortfall = amount.saturating_sub(idle);

        Ok(WithdrawPlan {
            amount,
            shortfall,
            drain_strategy: shortfall > 0 && shares == self.total_shares,
        })
    }

    /// Record a strategy announcement, returning when it becomes executable.
    pub fn announce_strategy(&mut self, candidate: Pubkey, now: i64) -> Result<i64> {
        require!(candidate != self.strategy, VaultError::StrategyMismatch);
        self.strategy_timelock.announce(candidate, now)
    }

    pub fn check_strategy_switch(&self, candidate: &Pubkey, now: i64) -> Result<()> {
        require!(*candidate != Pubkey::default(), VaultError::StrategyMismatch);
        require!(*candidate != self.strategy, VaultError::StrategyMismatch);
        self.strategy_timelock
            .check_switch(&self.strategy, candidate, now)
    }

    /// First binding on registration. A vault already bound to `candidate`
    /// is accepted as is; returns whether a binding took place.
    pub fn bind_initial_strategy(&mut self, candidate: Pubkey, now: i64) -> Result<bool> {
        if self.has_strategy() {
            require!(self.strategy == candidate, VaultError::StrategyMismatch);
            return Ok(false);
        }
        self.check_strategy_switch(&candidate, now)?;
        self.bind_strategy(candidate);
        Ok(true)
    }

    /// Activate `candidate`; returns the previously bound strategy.
    pub fn bind_strategy(&mut self, candidate: Pubkey) -> Pubkey {
        self.strategy_timelock.clear();
        std::mem::replace(&mut self.strategy, candidate)
    }

    /// An outgoing strategy must hand back everything it reported as
    /// invested, up to rounding, and keep nothing.
    pub fn check_migration(&self, expected: u64, recovered: u64, remaining: u64) -> Result<()> {
        require!(remaining == 0, VaultError::StrategyWithdrawShortfall);
        let floor = expected.saturating_sub(MIGRATION_ROUNDING_EPSILON);
        require!(recovered >= floor, VaultError::StrategyWithdrawShortfall);
        Ok(())
    }
}

impl ReentrancyGuard for VaultState {
    fn entered_flag(&mut self) -> &mut bool {
        &mut self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn mock_vault(total_shares: u64) -> VaultState {
        VaultState {
            storage: Pubkey::default(),
            underlying_mint: Pubkey::default(),
            share_mint: Pubkey::default(),
            vault_token_account: Pubkey::default(),
            total_shares,
            invest_numerator: DEFAULT_INVEST_NUMERATOR,
            invest_denominator: DEFAULT_INVEST_DENOMINATOR,
            strategy: Pubkey::default(),
            strategy_timelock: StrategyTimelock::new(STRATEGY_SWITCH_TIMELOCK),
            entered: false,
            bump: 0,
            share_bump: 0,
            authority_bump: 0,
            _reserved: [0; 64],
        }
    }

    #[test]
    fn test_first_deposit() {
        let vault = mock_vault(0);
        assert_eq!(vault.calculate_shares(1000, 0).unwrap(), 1000);
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let vault = mock_vault(0);
        assert!(vault.calculate_shares(0, 0).is_err());
    }

    #[test]
    fn test_dust_deposit_rejected() {
        // 1 unit against a 3:1 price would mint zero shares
        let vault = mock_vault(1000);
        assert!(vault.calculate_shares(1, 3000).is_err());
    }

    #[test]
    fn test_investable_fraction() {
        let mut vault = mock_vault(0);
        assert_eq!(vault.investable(1000).unwrap(), 1000);
        vault.set_invest_ratio(90, 100).unwrap();
        assert_eq!(vault.investable(1000).unwrap(), 900);
        assert!(vault.set_invest_ratio(101, 100).is_err());
        assert!(vault.set_invest_ratio(1, 0).is_err());
    }

    #[test]
    fn test_withdraw_plan_uses_idle_first() {
        let vault = mock_vault(1000);
        let plan = vault.plan_withdraw(400, 1000, 500, 500).unwrap();
        assert_eq!(plan.amount, 400);
        assert_eq!(plan.shortfall, 0);
        assert!(!plan.drain_strategy);
    }

    #[test]
    fn test_withdraw_plan_shortfall() {
        let vault = mock_vault(1000);
        let plan = vault.plan_withdraw(800, 1000, 500, 500).unwrap();
        assert_eq!(plan.amount, 800);
        assert_eq!(plan.shortfall, 300);
        assert!(!plan.drain_strategy);

        let last = vault.plan_withdraw(1000, 1000, 100, 900).unwrap();
        assert_eq!(last.shortfall, 900);
        assert!(last.drain_strategy);
    }

    #[test]
    fn test_last_holder_drains_after_outside_burn() {
        // 100 of 1000 shares burned directly on the mint
        let mut vault = mock_vault(1000);
        vault.sync_supply(900);

        let plan = vault.plan_withdraw(900, 900, 0, 1000).unwrap();
        assert_eq!(plan.amount, 1000);
        assert!(plan.drain_strategy);
        assert_eq!(plan.strategy_pull(1000), StrategyPull::Drain);
    }

    #[test]
    fn test_strategy_pull() {
        let vault = mock_vault(1000);
        let covered = vault.plan_withdraw(100, 1000, 500, 500).unwrap();
        assert_eq!(covered.strategy_pull(500), StrategyPull::Nothing);

        let partial = vault.plan_withdraw(800, 1000, 500, 500).unwrap();
        assert_eq!(partial.strategy_pull(500), StrategyPull::Partial(300));
        assert_eq!(partial.strategy_pull(200), StrategyPull::Partial(200));
    }

    #[test]
    fn test_confirm_liquidity() {
        let vault = mock_vault(1000);
        let plan = vault.plan_withdraw(800, 1000, 500, 500).unwrap();
        assert!(plan.confirm_liquidity(800).is_ok());
        assert!(plan.confirm_liquidity(799).is_err());
    }

    #[test]
    fn test_withdraw_more_than_balance_rejected() {
        let vault = mock_vault(1000);
        assert!(vault.plan_withdraw(600, 500, 1000, 0).is_err());
        assert!(vault.plan_withdraw(0, 500, 1000, 0).is_err());
    }

    #[test]
    fn test_require_strategy() {
        let mut vault = mock_vault(0);
        let strategy = Pubkey::new_unique();
        assert!(vault.require_strategy(&strategy).is_err());
        vault.bind_strategy(strategy);
        assert!(vault.require_strategy(&strategy).is_ok());
        assert!(vault.require_strategy(&Pubkey::new_unique()).is_err());
    }

    #[test]
    fn test_cannot_reannounce_bound_strategy() {
        let mut vault = mock_vault(0);
        let strategy = Pubkey::new_unique();
        vault.bind_strategy(strategy);
        assert!(vault.announce_strategy(strategy, 0).is_err());
    }

    #[test]
    fn test_bind_clears_announcement() {
        let mut vault = mock_vault(0);
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        vault.bind_strategy(first);
        vault.announce_strategy(second, 10).unwrap();

        let now = 10 + STRATEGY_SWITCH_TIMELOCK;
        vault.check_strategy_switch(&second, now).unwrap();
        assert_eq!(vault.bind_strategy(second), first);
        assert!(!vault.strategy_timelock.has_pending());
    }

    #[test]
    fn test_initial_binding_accepts_same_strategy() {
        let mut vault = mock_vault(0);
        let strategy = Pubkey::new_unique();
        assert!(vault.bind_initial_strategy(strategy, 0).unwrap());
        assert!(!vault.bind_initial_strategy(strategy, 0).unwrap());
        assert!(vault.bind_initial_strategy(Pubkey::new_unique(), 0).is_err());
        assert_eq!(vault.strategy, strategy);
    }

    #[test]
    fn test_migration_shortfall() {
        let vault = mock_vault(0);
        assert!(vault.check_migration(1000, 1000, 0).is_ok());
        assert!(vault.check_migration(1000, 999, 0).is_ok());
        assert!(vault.check_migration(1000, 998, 0).is_err());
        assert!(vault.check_migration(1000, 1000, 1).is_err());
    }
}
