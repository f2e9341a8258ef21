use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Per-account "in progress" flag around entry points that hand control to
/// strategy code or token CPIs.
///
/// Handlers call `enter`, persist the account (`exit`) before the first CPI
/// so that any nested invocation reads the raised flag, and `leave` once the
/// body has finished. An aborted instruction reverts the flag with
/// everything else.
pub trait ReentrancyGuard {
    fn entered_flag(&mut self) -> &mut bool;

    fn enter(&mut self) -> Result<()> {
        let entered = self.entered_flag();
        require!(!*entered, VaultError::ReentrantCall);
        *entered = true;
        Ok(())
    }

    fn leave(&mut self) {
        *self.entered_flag() = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flagged {
        entered: bool,
    }

    impl ReentrancyGuard for Flagged {
        fn entered_flag(&mut self) -> &mut bool {
            &mut self.entered
        }
    }

    #[test]
    fn test_second_entry_is_rejected() {
        let mut state = Flagged { entered: false };
        state.enter().unwrap();
        assert!(state.enter().is_err());
        state.leave();
        assert!(state.enter().is_ok());
    }
}
