use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Access registry: who governs, and which controller is live.
///
/// Every privileged instruction loads this account and compares the caller
/// against it in the same instruction, so a governance or controller change
/// takes effect for the very next call.
#[account]
pub struct Storage {
    /// Sole account allowed to change configuration
    pub governance: Pubkey,         // 32 bytes

    /// Currently bound controller state account (default = unset)
    pub controller: Pubkey,         // 32 bytes

    /// Bump seed for PDA
    pub bump: u8,                   // 1 byte
}

impl Storage {
    pub const LEN: usize = 8 + 32 + 32 + 1;

    pub fn is_governance(&self, key: &Pubkey) -> bool {
        self.governance == *key
    }

    pub fn is_controller(&self, key: &Pubkey) -> bool {
        self.controller != Pubkey::default() && self.controller == *key
    }

    pub fn require_governance(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_governance(key), VaultError::Unauthorized);
        Ok(())
    }

    pub fn set_governance(&mut self, caller: &Pubkey, new_governance: Pubkey) -> Result<Pubkey> {
        self.require_governance(caller)?;
        require!(new_governance != Pubkey::default(), VaultError::InvalidOwner);
        Ok(std::mem::replace(&mut self.governance, new_governance))
    }

    pub fn set_controller(&mut self, caller: &Pubkey, new_controller: Pubkey) -> Result<Pubkey> {
        self.require_governance(caller)?;
        require!(new_controller != Pubkey::default(), VaultError::InvalidOwner);
        Ok(std::mem::replace(&mut self.controller, new_controller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_storage(governance: Pubkey) -> Storage {
        Storage {
            governance,
            controller: Pubkey::default(),
            bump: 0,
        }
    }

    #[test]
    fn test_governance_handover() {
        let gov = Pubkey::new_unique();
        let next = Pubkey::new_unique();
        let mut storage = mock_storage(gov);

        assert_eq!(storage.set_governance(&gov, next).unwrap(), gov);
        assert!(storage.is_governance(&next));
        // the old key lost its rights immediately
        assert!(storage.require_governance(&gov).is_err());
    }

    #[test]
    fn test_only_governance_sets_controller() {
        let gov = Pubkey::new_unique();
        let mut storage = mock_storage(gov);
        let controller = Pubkey::new_unique();

        assert!(storage
            .set_controller(&Pubkey::new_unique(), controller)
            .is_err());
        assert!(!storage.is_controller(&controller));

        storage.set_controller(&gov, controller).unwrap();
        assert!(storage.is_controller(&controller));
    }

    #[test]
    fn test_unset_controller_matches_nothing() {
        let storage = mock_storage(Pubkey::new_unique());
        assert!(!storage.is_controller(&Pubkey::default()));
    }

    #[test]
    fn test_default_key_rejected() {
        let gov = Pubkey::new_unique();
        let mut storage = mock_storage(gov);
        assert!(storage.set_governance(&gov, Pubkey::default()).is_err());
        assert!(storage.set_controller(&gov, Pubkey::default()).is_err());
    }
}
