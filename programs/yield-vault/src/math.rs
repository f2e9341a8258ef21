use anchor_lang::prelude::*;

use crate::{constants::PRICE_PRECISION, errors::VaultError};

/// Safe multiplication then division, rounded down.
///
/// Computes: (value × numerator) / denominator
/// Uses u128 intermediate to prevent overflow.
pub fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, VaultError::DivisionByZero);

    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(VaultError::MathOverflow)?;

    let result = product / (denominator as u128);

    u64::try_from(result).map_err(|_| error!(VaultError::MathOverflow))
}

/// Shares minted for `amount` of underlying.
///
/// Bootstrap (no shares outstanding) mints 1:1. Otherwise
/// shares = amount × total_shares / total_underlying, floored so that
/// rounding always favors existing holders.
pub fn shares_for_deposit(amount: u64, total_shares: u64, total_underlying: u64) -> Result<u64> {
    if total_shares == 0 {
        return Ok(amount);
    }
    mul_div(amount, total_shares, total_underlying)
}

/// Underlying owed for burning `shares`, floored.
pub fn underlying_for_shares(shares: u64, total_shares: u64, total_underlying: u64) -> Result<u64> {
    if total_shares == 0 {
        return Ok(0);
    }
    mul_div(shares, total_underlying, total_shares)
}

/// total_underlying × PRICE_PRECISION / total_shares, or PRICE_PRECISION
/// for an empty vault.
pub fn price_per_full_share(total_underlying: u64, total_shares: u64) -> Result<u64> {
    if total_shares == 0 {
        return Ok(PRICE_PRECISION);
    }
    mul_div(total_underlying, PRICE_PRECISION, total_shares)
}

/// Two-sided deviation check between a live price and a caller's hint.
///
/// `tolerance_numerator / tolerance_denominator` is the largest accepted
/// ratio between the larger and the smaller of the two values, so 1/1
/// demands an exact match.
pub fn within_tolerance(
    price: u64,
    hint: u64,
    tolerance_numerator: u64,
    tolerance_denominator: u64,
) -> Result<bool> {
    require!(tolerance_denominator > 0, VaultError::InvalidRatio);
    require!(
        tolerance_numerator >= tolerance_denominator,
        VaultError::InvalidRatio
    );

    let (high, low) = if price > hint { (price, hint) } else { (hint, price) };

    let scaled_high = (high as u128)
        .checked_mul(tolerance_denominator as u128)
        .ok_or(VaultError::MathOverflow)?;
    let scaled_low = (low as u128)
        .checked_mul(tolerance_numerator as u128)
        .ok_or(VaultError::MathOverflow)?;

    Ok(scaled_high <= scaled_low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor() {
        assert_eq!(mul_div(100, 3, 2).unwrap(), 150);
        assert_eq!(mul_div(100, 1, 3).unwrap(), 33);
    }

    #[test]
    fn test_mul_div_overflow() {
        assert!(mul_div(u64::MAX, u64::MAX, 1).is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert!(mul_div(100, 100, 0).is_err());
    }

    #[test]
    fn test_bootstrap_deposit_is_one_to_one() {
        assert_eq!(shares_for_deposit(1000, 0, 0).unwrap(), 1000);
        // donations before the first deposit do not change the bootstrap rate
        assert_eq!(shares_for_deposit(1000, 0, 5000).unwrap(), 1000);
    }

    #[test]
    fn test_deposit_after_yield() {
        // 1500 underlying backing 1000 shares: 300 in buys 200 shares
        assert_eq!(shares_for_deposit(300, 1000, 1500).unwrap(), 200);
        // 100 * 1000 / 1500 = 66.6 -> 66
        assert_eq!(shares_for_deposit(100, 1000, 1500).unwrap(), 66);
    }

    #[test]
    fn test_deposit_into_wiped_out_vault_fails() {
        assert!(shares_for_deposit(100, 1000, 0).is_err());
    }

    #[test]
    fn test_underlying_for_shares() {
        assert_eq!(underlying_for_shares(500, 1000, 2000).unwrap(), 1000);
        assert_eq!(underlying_for_shares(500, 0, 0).unwrap(), 0);
    }

    #[test]
    fn test_price_per_full_share() {
        assert_eq!(price_per_full_share(0, 0).unwrap(), PRICE_PRECISION);
        assert_eq!(price_per_full_share(1500, 1500).unwrap(), PRICE_PRECISION);
        assert_eq!(
            price_per_full_share(3000, 1500).unwrap(),
            2 * PRICE_PRECISION
        );
    }

    #[test]
    fn test_tolerance_exact_hint() {
        assert!(within_tolerance(1_000, 1_000, 1, 1).unwrap());
        assert!(!within_tolerance(1_001, 1_000, 1, 1).unwrap());
        assert!(!within_tolerance(999, 1_000, 1, 1).unwrap());
    }

    #[test]
    fn test_tolerance_both_directions() {
        // 1% tolerance
        assert!(within_tolerance(1_010, 1_000, 101, 100).unwrap());
        assert!(within_tolerance(1_000, 1_010, 101, 100).unwrap());
        assert!(!within_tolerance(1_011, 1_000, 101, 100).unwrap());
        assert!(!within_tolerance(1_000, 1_011, 101, 100).unwrap());
    }

    #[test]
    fn test_tolerance_rejects_bad_ratio() {
        assert!(within_tolerance(1_000, 1_000, 99, 100).is_err());
        assert!(within_tolerance(1_000, 1_000, 1, 0).is_err());
    }
}
