use anchor_lang::{prelude::*, AccountsExit};

use crate::{
    constants::*,
    errors::*,
    guard::ReentrancyGuard,
    instructions::hard_work::{self, *},
    state::*,
};

/// Hard work on a registered vault, triggered by governance or a hard worker
#[derive(Accounts)]
pub struct ControllerDoHardWork<'info> {
    /// Governance or a registered hard worker
    /// Security: Role resolved by the handler
    pub caller: Signer<'info>,

    /// Access registry PDA
    /// Security: Validated by seeds
    #[account(
        seeds = [STORAGE_SEED],
        bump = storage.bump,
    )]
    pub storage: Account<'info, Storage>,

    /// Controller PDA
    /// Security: Must be the live controller in storage
    #[account(
        mut,
        seeds = [CONTROLLER_SEED, storage.key().as_ref()],
        bump = controller.bump,
        has_one = storage,
        constraint = storage.is_controller(&controller.key()) @ VaultError::Unauthorized,
    )]
    pub controller: Account<'info, ControllerState>,

    pub work: VaultHardWork<'info>,
}

/// Hard workers pass the share price they observed off-chain; the cycle
/// aborts unless the live price is within `tolerance_numerator /
/// tolerance_denominator` of it in either direction.
pub fn handler(
    ctx: Context<ControllerDoHardWork>,
    price_hint: u64,
    tolerance_numerator: u64,
    tolerance_denominator: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    let caller = accounts.caller.key();

    let role = accounts
        .controller
        .authorize_hard_work(&accounts.storage, &caller)?;

    let vault_key = accounts.work.vault.key();
    require!(
        accounts.controller.has_vault(&vault_key),
        VaultError::VaultNotRegistered
    );
    require_keys_eq!(
        accounts.work.vault.storage,
        accounts.storage.key(),
        VaultError::VaultNotRegistered
    );

    accounts.controller.enter()?;
    accounts.controller.exit(&crate::ID)?;

    let controller: &ControllerState = &accounts.controller;
    hard_work::execute(&mut accounts.work, controller, caller, |price| {
        controller.confirm_share_price(
            role,
            price,
            price_hint,
            tolerance_numerator,
            tolerance_denominator,
        )
    })?;

    accounts.controller.leave();
    Ok(())
}
