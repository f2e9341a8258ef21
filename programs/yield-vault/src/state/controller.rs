use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_HARD_WORKERS, MAX_VAULTS},
    errors::VaultError,
    guard::ReentrancyGuard,
    math,
    state::{ProfitShare, Storage},
};

/// Orchestrates hard work across registered vaults
///
/// Only governance mutates the registries and configuration; governance or
/// a registered hard worker may trigger hard work.
#[account]
pub struct ControllerState {
    /// Access registry this controller is bound to
    pub storage: Pubkey,                    // 32 bytes

    /// Vaults recognized as hard-work targets
    pub vaults: Vec<Pubkey>,                // 4 + MAX_VAULTS * 32

    /// Accounts allowed to trigger hard work
    pub hard_workers: Vec<Pubkey>,          // 4 + MAX_HARD_WORKERS * 32

    /// Owner of the token accounts receiving liquidated reward fees
    pub fee_reward_forwarder: Pubkey,       // 32 bytes

    /// Optional incentive module credited on hard work
    pub hard_rewards: Option<Pubkey>,       // 1 + 32 bytes

    /// Share of liquidated rewards sent to the forwarder
    pub profit_sharing_numerator: u64,      // 8 bytes
    pub profit_sharing_denominator: u64,    // 8 bytes

    /// Reentrancy flag
    pub entered: bool,                      // 1 byte

    pub bump: u8,                           // 1 byte
}

/// Role under which a hard-work call was admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardWorkCaller {
    Governance,
    HardWorker,
}

impl ControllerState {
    pub const LEN: usize = 8
        + 32
        + (4 + MAX_VAULTS * 32)
        + (4 + MAX_HARD_WORKERS * 32)
        + 32
        + (1 + 32)
        + 8
        + 8
        + 1
        + 1;

    pub fn has_vault(&self, vault: &Pubkey) -> bool {
        self.vaults.iter().any(|v| v == vault)
    }

    pub fn register_vault(&mut self, vault: Pubkey) -> Result<()> {
        require!(!self.has_vault(&vault), VaultError::VaultAlreadyRegistered);
        require!(self.vaults.len() < MAX_VAULTS, VaultError::RegistryFull);
        self.vaults.push(vault);
        Ok(())
    }

    pub fn is_hard_worker(&self, account: &Pubkey) -> bool {
        self.hard_workers.iter().any(|w| w == account)
    }

    /// Returns whether the set changed.
    pub fn add_hard_worker(&mut self, worker: Pubkey) -> Result<bool> {
        require!(worker != Pubkey::default(), VaultError::InvalidOwner);
        if self.is_hard_worker(&worker) {
            return Ok(false);
        }
        require!(
            self.hard_workers.len() < MAX_HARD_WORKERS,
            VaultError::RegistryFull
        );
        self.hard_workers.push(worker);
        Ok(true)
    }

    /// Returns whether the set changed.
    pub fn remove_hard_worker(&mut self, worker: &Pubkey) -> bool {
        let before = self.hard_workers.len();
        self.hard_workers.retain(|w| w != worker);
        self.hard_workers.len() != before
    }

    pub fn authorize_hard_work(&self, storage: &Storage, caller: &Pubkey) -> Result<HardWorkCaller> {
        if storage.is_governance(caller) {
            Ok(HardWorkCaller::Governance)
        } else if self.is_hard_worker(caller) {
            Ok(HardWorkCaller::HardWorker)
        } else {
            err!(VaultError::Unauthorized)
        }
    }

    /// Hard workers must supply a hint within tolerance of the live price;
    /// governance is trusted to call without one.
    pub fn confirm_share_price(
        &self,
        caller: HardWorkCaller,
        price: u64,
        hint: u64,
        tolerance_numerator: u64,
        tolerance_denominator: u64,
    ) -> Result<()> {
        if caller == HardWorkCaller::Governance {
            return Ok(());
        }
        require!(
            math::within_tolerance(price, hint, tolerance_numerator, tolerance_denominator)?,
            VaultError::SharePriceDeviation
        );
        Ok(())
    }

    pub fn set_profit_sharing(&mut self, numerator: u64, denominator: u64) -> Result<()> {
        ProfitShare::new(numerator, denominator)?;
        self.profit_sharing_numerator = numerator;
        self.profit_sharing_denominator = denominator;
        Ok(())
    }

    pub fn profit_share(&self) -> Result<ProfitShare> {
        ProfitShare::new(self.profit_sharing_numerator, self.profit_sharing_denominator)
    }
}

impl ReentrancyGuard for ControllerState {
    fn entered_flag(&mut self) -> &mut bool {
        &mut self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn mock_controller() -> ControllerState {
        ControllerState {
            storage: Pubkey::default(),
            vaults: vec![],
            hard_workers: vec![],
            fee_reward_forwarder: Pubkey::new_unique(),
            hard_rewards: None,
            profit_sharing_numerator: DEFAULT_PROFIT_SHARING_NUMERATOR,
            profit_sharing_denominator: DEFAULT_PROFIT_SHARING_DENOMINATOR,
            entered: false,
            bump: 0,
        }
    }

    #[test]
    fn test_hard_worker_set_is_idempotent() {
        let mut controller = mock_controller();
        let worker = Pubkey::new_unique();

        assert!(controller.add_hard_worker(worker).unwrap());
        assert!(!controller.add_hard_worker(worker).unwrap());
        assert_eq!(controller.hard_workers.len(), 1);

        assert!(controller.remove_hard_worker(&worker));
        assert!(!controller.remove_hard_worker(&worker));
        assert!(controller.hard_workers.is_empty());
    }

    #[test]
    fn test_hard_worker_capacity() {
        let mut controller = mock_controller();
        for _ in 0..MAX_HARD_WORKERS {
            controller.add_hard_worker(Pubkey::new_unique()).unwrap();
        }
        assert!(controller.add_hard_worker(Pubkey::new_unique()).is_err());
    }

    #[test]
    fn test_register_vault_once() {
        let mut controller = mock_controller();
        let vault = Pubkey::new_unique();
        controller.register_vault(vault).unwrap();
        assert!(controller.has_vault(&vault));
        assert!(controller.register_vault(vault).is_err());
    }

    #[test]
    fn test_governance_skips_price_check() {
        let controller = mock_controller();
        assert!(controller
            .confirm_share_price(HardWorkCaller::Governance, 2_000, 1_000, 1, 1)
            .is_ok());
        assert!(controller
            .confirm_share_price(HardWorkCaller::HardWorker, 2_000, 1_000, 1, 1)
            .is_err());
    }

    #[test]
    fn test_profit_sharing_bounds() {
        let mut controller = mock_controller();
        assert!(controller.set_profit_sharing(101, 100).is_err());
        assert!(controller.set_profit_sharing(1, 0).is_err());
        controller.set_profit_sharing(10, 100).unwrap();
        assert_eq!(controller.profit_share().unwrap().numerator, 10);
    }
}
