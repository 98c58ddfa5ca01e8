pub mod contract;
mod error;
mod integration_test;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
