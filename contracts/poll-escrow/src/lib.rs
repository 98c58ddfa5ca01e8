pub mod contract;
pub mod custody;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::{ContractError, ErrorKind};
