use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

/// Coarse classification of a [`ContractError`], used by clients to decide
/// whether a transition can be resubmitted after fixing its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Std,
    Authorization,
    Precondition,
    NotFound,
    Conflict,
    InvariantViolation,
}

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    // custody
    #[error("Asset {asset} is not registered for custody")]
    AssetNotRegistered { asset: String },

    #[error("Asset {asset} is already registered for custody")]
    AssetAlreadyRegistered { asset: String },

    #[error("Registration reserve too low: required {required}, provided {provided}")]
    InsufficientReserve {
        required: Uint128,
        provided: Uint128,
    },

    // polls and votes
    #[error("Storage reservation too low: required {required}, available {available}")]
    InsufficientReservation {
        required: Uint128,
        available: Uint128,
    },

    #[error("No unspent storage reservation to release")]
    NothingToRelease {},

    #[error("Deposit must be greater than zero")]
    ZeroDeposit {},

    #[error("Question must be between 1 and {max} bytes")]
    InvalidQuestion { max: usize },

    #[error("Poll {poll_id} not found")]
    PollNotFound { poll_id: u64 },

    #[error("Poll {poll_id} only accepts {expected}, received {received}")]
    AssetMismatch {
        poll_id: u64,
        expected: String,
        received: String,
    },

    #[error("Poll creator cannot vote on their own poll")]
    SelfVote {},

    #[error("Address {voter} already voted on poll {poll_id}")]
    AlreadyVoted { poll_id: u64, voter: String },

    #[error("Poll {poll_id} is settled and no longer accepts votes")]
    PollSettled { poll_id: u64 },

    #[error("No vote from {voter} on poll {poll_id}")]
    VoteNotFound { poll_id: u64, voter: String },

    #[error("Share of poll {poll_id} already claimed by {voter}")]
    AlreadyClaimed { poll_id: u64, voter: String },

    // accounting invariants
    #[error("Poll id {poll_id} already in use")]
    PollIdInUse { poll_id: u64 },

    #[error("Poll {poll_id} has a vote record but an empty tally")]
    EmptyTally { poll_id: u64 },

    #[error("Payout of {share} would exceed the deposit of poll {poll_id}")]
    PayoutExceedsDeposit { poll_id: u64, share: Uint128 },

    #[error("Custody of {asset} holds {available}, cannot pay {required}")]
    CustodyShortfall {
        asset: String,
        required: Uint128,
        available: Uint128,
    },
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) => ErrorKind::Std,
            ContractError::Unauthorized {} => ErrorKind::Authorization,
            ContractError::Payment(_)
            | ContractError::AssetNotRegistered { .. }
            | ContractError::InsufficientReserve { .. }
            | ContractError::InsufficientReservation { .. }
            | ContractError::NothingToRelease {}
            | ContractError::ZeroDeposit {}
            | ContractError::InvalidQuestion { .. }
            | ContractError::AssetMismatch { .. }
            | ContractError::SelfVote {}
            | ContractError::PollSettled { .. } => ErrorKind::Precondition,
            ContractError::PollNotFound { .. } | ContractError::VoteNotFound { .. } => {
                ErrorKind::NotFound
            }
            ContractError::AssetAlreadyRegistered { .. }
            | ContractError::AlreadyVoted { .. }
            | ContractError::AlreadyClaimed { .. } => ErrorKind::Conflict,
            ContractError::PollIdInUse { .. }
            | ContractError::EmptyTally { .. }
            | ContractError::PayoutExceedsDeposit { .. }
            | ContractError::CustodyShortfall { .. } => ErrorKind::InvariantViolation,
        }
    }
}
