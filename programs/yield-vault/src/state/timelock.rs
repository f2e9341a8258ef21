use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Staged strategy migration.
///
/// `pending == Pubkey::default()` means nothing is announced. A switch is
/// free while no strategy is bound; afterwards it needs a matching
/// announcement at least `duration` seconds old.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyTimelock {
    pub pending: Pubkey,
    pub announced_at: i64,
    pub duration: i64,
}

impl StrategyTimelock {
    pub const LEN: usize = 32 + 8 + 8;

    pub fn new(duration: i64) -> Self {
        Self {
            pending: Pubkey::default(),
            announced_at: 0,
            duration,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending != Pubkey::default()
    }

    pub fn executable_at(&self) -> Result<i64> {
        self.announced_at
            .checked_add(self.duration)
            .ok_or(error!(VaultError::MathOverflow))
    }

    /// Record `candidate` as the next strategy; re-announcing restarts the clock.
    pub fn announce(&mut self, candidate: Pubkey, now: i64) -> Result<i64> {
        require!(candidate != Pubkey::default(), VaultError::StrategyMismatch);
        self.pending = candidate;
        self.announced_at = now;
        self.executable_at()
    }

    pub fn check_switch(&self, bound: &Pubkey, candidate: &Pubkey, now: i64) -> Result<()> {
        if *bound == Pubkey::default() {
            return Ok(());
        }
        require!(
            self.has_pending() && self.pending == *candidate,
            VaultError::TimelockNotElapsed
        );
        require!(now >= self.executable_at()?, VaultError::TimelockNotElapsed);
        Ok(())
    }

    pub fn clear(&mut self) -> Pubkey {
        self.announced_at = 0;
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STRATEGY_SWITCH_TIMELOCK;

    #[test]
    fn test_first_binding_needs_no_announcement() {
        let lock = StrategyTimelock::new(STRATEGY_SWITCH_TIMELOCK);
        let candidate = Pubkey::new_unique();
        assert!(lock.check_switch(&Pubkey::default(), &candidate, 0).is_ok());
    }

    #[test]
    fn test_switch_waits_for_duration() {
        let mut lock = StrategyTimelock::new(STRATEGY_SWITCH_TIMELOCK);
        let bound = Pubkey::new_unique();
        let candidate = Pubkey::new_unique();
        let t0 = 1_700_000_000;

        assert_eq!(
            lock.announce(candidate, t0).unwrap(),
            t0 + STRATEGY_SWITCH_TIMELOCK
        );
        assert!(lock
            .check_switch(&bound, &candidate, t0 + STRATEGY_SWITCH_TIMELOCK - 1)
            .is_err());
        assert!(lock
            .check_switch(&bound, &candidate, t0 + STRATEGY_SWITCH_TIMELOCK)
            .is_ok());
    }

    #[test]
    fn test_switch_requires_announced_candidate() {
        let mut lock = StrategyTimelock::new(STRATEGY_SWITCH_TIMELOCK);
        let bound = Pubkey::new_unique();
        lock.announce(Pubkey::new_unique(), 0).unwrap();

        let other = Pubkey::new_unique();
        assert!(lock
            .check_switch(&bound, &other, STRATEGY_SWITCH_TIMELOCK * 2)
            .is_err());
    }

    #[test]
    fn test_reannounce_restarts_clock() {
        let mut lock = StrategyTimelock::new(100);
        let bound = Pubkey::new_unique();
        let candidate = Pubkey::new_unique();

        lock.announce(candidate, 0).unwrap();
        lock.announce(candidate, 90).unwrap();
        assert!(lock.check_switch(&bound, &candidate, 100).is_err());
        assert!(lock.check_switch(&bound, &candidate, 190).is_ok());
    }

    #[test]
    fn test_clear() {
        let mut lock = StrategyTimelock::new(100);
        let candidate = Pubkey::new_unique();
        lock.announce(candidate, 5).unwrap();
        assert_eq!(lock.clear(), candidate);
        assert!(!lock.has_pending());
        assert_eq!(lock.announced_at, 0);
    }
}
