use anchor_lang::prelude::*;

use crate::state::StrategyKind;

#[event]
pub struct StorageInitialized {
    pub storage: Pubkey,
    pub governance: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct GovernanceChanged {
    pub previous: Pubkey,
    pub governance: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ControllerChanged {
    pub previous: Pubkey,
    pub controller: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub storage: Pubkey,
    pub underlying_mint: Pubkey,
    pub share_mint: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when underlying is deposited
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub withdrawer: Pubkey,
    pub shares_burned: u64,
    pub amount: u64,
    pub pulled_from_strategy: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted after a full harvest-then-invest cycle
#[event]
pub struct HardWorkDone {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub caller: Pubkey,
    pub hard_rewards: Option<Pubkey>,
    pub harvested: u64,
    pub invested: u64,
    pub price_before: u64,
    pub price_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct StrategyLossReported {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub price_before: u64,
    pub price_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct StrategyAnnounced {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub announced_at: i64,
    pub executable_at: i64,
}

#[event]
pub struct StrategyAnnouncementCleared {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct StrategyChanged {
    pub vault: Pubkey,
    pub previous: Pubkey,
    pub strategy: Pubkey,
    pub recovered: u64,
    pub timestamp: i64,
}

#[event]
pub struct InvestRatioChanged {
    pub vault: Pubkey,
    pub numerator: u64,
    pub denominator: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundsRecalled {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub amount: u64,
    pub reinvested: u64,
    pub timestamp: i64,
}

#[event]
pub struct ControllerInitialized {
    pub controller: Pubkey,
    pub storage: Pubkey,
    pub fee_reward_forwarder: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct HardWorkerUpdated {
    pub controller: Pubkey,
    pub worker: Pubkey,
    pub authorized: bool,
    pub timestamp: i64,
}

#[event]
pub struct VaultRegistered {
    pub controller: Pubkey,
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct FeeRewardForwarderChanged {
    pub controller: Pubkey,
    pub previous: Pubkey,
    pub fee_reward_forwarder: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct HardRewardsChanged {
    pub controller: Pubkey,
    pub hard_rewards: Option<Pubkey>,
    pub timestamp: i64,
}

#[event]
pub struct ProfitSharingChanged {
    pub controller: Pubkey,
    pub numerator: u64,
    pub denominator: u64,
    pub timestamp: i64,
}

#[event]
pub struct Salvaged {
    pub source: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct StrategyInitialized {
    pub strategy: Pubkey,
    pub vault: Pubkey,
    pub kind: StrategyKind,
    pub underlying_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct LiquidationAllowedChanged {
    pub strategy: Pubkey,
    pub allowed: bool,
    pub timestamp: i64,
}

#[event]
pub struct SellFloorChanged {
    pub strategy: Pubkey,
    pub sell_floor: u64,
    pub timestamp: i64,
}

/// Event emitted when a strategy realizes its rewards
#[event]
pub struct Harvested {
    pub strategy: Pubkey,
    pub vault: Pubkey,
    pub rewards: u64,
    pub fee: u64,
    pub compounded: u64,
    pub forwarded: u64,
    pub timestamp: i64,
}
