pub mod controller;
pub mod storage;
pub mod strategy;
pub mod timelock;
pub mod vault;

pub use controller::*;
pub use storage::*;
pub use strategy::*;
pub use timelock::*;
pub use vault::*;
