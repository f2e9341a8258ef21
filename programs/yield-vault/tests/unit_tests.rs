use anchor_lang::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use yield_vault::{constants::*, math::*};

    #[test]
    fn test_share_calculation_first_deposit() {
        // Empty vault mints 1:1
        let deposit = 1_000_000_000_000u64;
        assert_eq!(shares_for_deposit(deposit, 0, 0).unwrap(), deposit);
    }

    #[test]
    fn test_share_calculation_after_profit() {
        // 1500 underlying backing 1000 shares
        let shares = shares_for_deposit(
            100_000_000_000,
            1_000_000_000_000,
            1_500_000_000_000,
        )
        .unwrap();

        // 100 * 1000 / 1500 = 66.666... floored
        assert_eq!(shares, 66_666_666_666);
    }

    #[test]
    fn test_share_calculation_handles_large_values() {
        let shares = shares_for_deposit(u64::MAX, 1_000_000_000, 1_000_000_000).unwrap();
        assert_eq!(shares, u64::MAX);

        // result that no longer fits is an error, not a wrap
        assert!(shares_for_deposit(u64::MAX, 2, 1).is_err());
    }

    #[test]
    fn test_redemption_rounds_down() {
        // 3 shares outstanding, backed by 10 units
        assert_eq!(underlying_for_shares(1, 3, 10).unwrap(), 3);
        assert_eq!(underlying_for_shares(3, 3, 10).unwrap(), 10);
        assert_eq!(underlying_for_shares(5, 0, 0).unwrap(), 0);
    }

    #[test]
    fn test_price_per_full_share() {
        assert_eq!(price_per_full_share(0, 0).unwrap(), PRICE_PRECISION);
        assert_eq!(price_per_full_share(1500, 1500).unwrap(), PRICE_PRECISION);
        assert_eq!(
            price_per_full_share(1500, 1000).unwrap(),
            PRICE_PRECISION / 2 * 3
        );
    }

    #[test]
    fn test_mul_div_rounds_down() {
        assert_eq!(mul_div(10, 1, 3).unwrap(), 3);
        assert_eq!(mul_div(9, 1, 3).unwrap(), 3);
        assert_eq!(mul_div(u64::MAX, 2, 3).unwrap(), u64::MAX / 3 * 2);
        assert!(mul_div(1, 1, 0).is_err());
    }

    #[test]
    fn test_tolerance_is_symmetric() {
        assert!(within_tolerance(105, 100, 105, 100).unwrap());
        assert!(within_tolerance(100, 105, 105, 100).unwrap());
        assert!(!within_tolerance(106, 100, 105, 100).unwrap());
        assert!(!within_tolerance(100, 106, 105, 100).unwrap());
    }

    #[test]
    fn test_pda_derivation() {
        let program_id = yield_vault::id();
        let underlying_mint = Pubkey::new_unique();

        let (vault, _) =
            Pubkey::find_program_address(&[VAULT_SEED, underlying_mint.as_ref()], &program_id);
        let (share_mint, _) = Pubkey::find_program_address(
            &[SHARE_MINT_SEED, underlying_mint.as_ref()],
            &program_id,
        );
        let (vault_authority, _) = Pubkey::find_program_address(
            &[VAULT_AUTHORITY_SEED, underlying_mint.as_ref()],
            &program_id,
        );

        assert_ne!(vault, share_mint);
        assert_ne!(vault, vault_authority);
        assert_ne!(share_mint, vault_authority);
    }

    #[test]
    fn test_strategy_pdas_unique_per_id() {
        let program_id = yield_vault::id();
        let vault = Pubkey::new_unique();

        let (first, _) = Pubkey::find_program_address(
            &[STRATEGY_SEED, vault.as_ref(), &0u64.to_le_bytes()],
            &program_id,
        );
        let (second, _) = Pubkey::find_program_address(
            &[STRATEGY_SEED, vault.as_ref(), &1u64.to_le_bytes()],
            &program_id,
        );
        assert_ne!(first, second);

        let (position, _) =
            Pubkey::find_program_address(&[POSITION_SEED, first.as_ref()], &program_id);
        let (rewards, _) =
            Pubkey::find_program_address(&[REWARDS_SEED, first.as_ref()], &program_id);
        assert_ne!(position, rewards);
    }

    #[test]
    fn test_controller_pda_bound_to_storage() {
        let program_id = yield_vault::id();
        let (storage, _) = Pubkey::find_program_address(&[STORAGE_SEED], &program_id);
        let (controller, _) =
            Pubkey::find_program_address(&[CONTROLLER_SEED, storage.as_ref()], &program_id);
        assert_ne!(storage, controller);
    }

    #[test]
    fn test_configuration_defaults() {
        assert_eq!(STRATEGY_SWITCH_TIMELOCK, 43_200);
        assert!(DEFAULT_INVEST_NUMERATOR <= DEFAULT_INVEST_DENOMINATOR);
        assert!(DEFAULT_PROFIT_SHARING_NUMERATOR <= DEFAULT_PROFIT_SHARING_DENOMINATOR);
    }
}
