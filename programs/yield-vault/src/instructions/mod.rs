pub mod add_vault_and_strategy;
pub mod bound_strategy;
pub mod controller_admin;
pub mod controller_hard_work;
pub mod deposit;
pub mod hard_work;
pub mod initialize_controller;
pub mod initialize_storage;
pub mod initialize_strategy;
pub mod initialize_vault;
pub mod salvage;
pub mod strategy_admin;
pub mod strategy_update;
pub mod update_storage;
pub mod vault_admin;
pub mod view;
pub mod withdraw;

pub use add_vault_and_strategy::*;
pub use bound_strategy::*;
pub use controller_admin::*;
pub use controller_hard_work::*;
pub use deposit::*;
pub use hard_work::*;
pub use initialize_controller::*;
pub use initialize_storage::*;
pub use initialize_strategy::*;
pub use initialize_vault::*;
pub use salvage::*;
pub use strategy_admin::*;
pub use strategy_update::*;
pub use update_storage::*;
pub use vault_admin::*;
pub use view::*;
pub use withdraw::*;
