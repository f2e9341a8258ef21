// Constants for the Yield Vault program

/// Seed for the access registry PDA
pub const STORAGE_SEED: &[u8] = b"storage";

/// Seed for the controller PDA
pub const CONTROLLER_SEED: &[u8] = b"controller";

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for vault token account PDA
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for strategy state PDA
pub const STRATEGY_SEED: &[u8] = b"strategy";

/// Seed for the PDA that owns a strategy's token accounts
pub const STRATEGY_AUTHORITY_SEED: &[u8] = b"strategy_authority";

/// Seed for the strategy's invested position token account
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for the strategy's unconverted reward token account
pub const REWARDS_SEED: &[u8] = b"rewards";

/// Waiting period between announcing a strategy and switching to it (12 hours)
pub const STRATEGY_SWITCH_TIMELOCK: i64 = 12 * 60 * 60;

/// Fixed-point unit for price-per-full-share, independent of mint decimals
pub const PRICE_PRECISION: u64 = 1_000_000_000_000;

/// Default fraction of idle balance invested per hard-work cycle (100/100)
pub const DEFAULT_INVEST_NUMERATOR: u64 = 100;
pub const DEFAULT_INVEST_DENOMINATOR: u64 = 100;

/// Default share of liquidated rewards forwarded as fee (30/100)
pub const DEFAULT_PROFIT_SHARING_NUMERATOR: u64 = 30;
pub const DEFAULT_PROFIT_SHARING_DENOMINATOR: u64 = 100;

/// Units a strategy may fall short by when drained for a migration
pub const MIGRATION_ROUNDING_EPSILON: u64 = 1;

/// Registry capacities for the controller account
pub const MAX_VAULTS: usize = 32;
pub const MAX_HARD_WORKERS: usize = 16;
