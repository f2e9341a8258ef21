use anchor_lang::prelude::*;

/// Custom error codes for the Yield Vault program
#[error_code]
pub enum VaultError {
    #[msg("Unauthorized - caller lacks the required role")]
    Unauthorized,

    #[msg("Amount must be greater than zero and within range")]
    InvalidAmount,

    #[msg("Idle balance plus strategy withdrawals cannot cover the request")]
    InsufficientLiquidity,

    #[msg("Strategy switch timelock has not elapsed")]
    TimelockNotElapsed,

    #[msg("Share price deviates from the hint beyond tolerance")]
    SharePriceDeviation,

    #[msg("Strategy is not bound to this vault")]
    StrategyMismatch,

    #[msg("Asset is protected and cannot be salvaged")]
    AssetProtected,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero")]
    DivisionByZero,

    #[msg("Invalid token mint")]
    InvalidMint,

    #[msg("Invalid account owner")]
    InvalidOwner,

    #[msg("Ratio denominator must be non-zero and the ratio within bounds")]
    InvalidRatio,

    #[msg("Reentrant call rejected")]
    ReentrantCall,

    #[msg("Vault has no strategy bound")]
    StrategyNotSet,

    #[msg("Vault is already registered with the controller")]
    VaultAlreadyRegistered,

    #[msg("Vault is not registered with the controller")]
    VaultNotRegistered,

    #[msg("Registry is full")]
    RegistryFull,

    #[msg("Reward liquidation is not allowed for this strategy")]
    LiquidationNotAllowed,

    #[msg("Strategy returned less than its invested balance")]
    StrategyWithdrawShortfall,
}
