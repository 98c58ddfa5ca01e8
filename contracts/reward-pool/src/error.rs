use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Reward token is not set, bootstrap the pool first")]
    NotBootstrapped {},

    #[error("Reward token already set to {token}")]
    AlreadyBootstrapped { token: String },

    #[error("Registration reserve too low: required {required}, provided {provided}")]
    InsufficientReserve {
        required: Uint128,
        provided: Uint128,
    },

    #[error("Pool only accepts {expected}, received {received}")]
    AssetMismatch { expected: String, received: String },

    #[error("Deposit must be greater than zero")]
    ZeroDeposit {},

    #[error("Pool holds {available} in rewards, cannot pay {required}")]
    InsufficientRewards {
        required: Uint128,
        available: Uint128,
    },
}
