use cosmwasm_schema::{cw_serde, QueryResponses};

use cosmwasm_std::{Timestamp, Uint128};

use cw20::Cw20ReceiveMsg;

use crate::state::{Poll, Vote};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address
    pub owner: Option<String>,
    /// Native denom accepted for reserves and storage reservations
    pub reserve_denom: String,
    pub min_balance: Option<Uint128>,
    pub asset_registration_reserve: Option<Uint128>,
    pub record_base_cost: Option<Uint128>,
    pub byte_cost: Option<Uint128>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Registers a cw20 asset for custody. Owner only, and the attached
    /// native deposit must cover the ledger's registration reserve.
    OptinToAsset { asset: String },
    /// Prepays storage reservation with the attached native deposit
    ReserveStorage {},
    /// Returns the sender's unspent storage reservation
    ReleaseReservation {},
    /// Pays the sender's share of a poll they voted on
    WithdrawPollShare { poll_id: u64 },
    /// This accepts a properly-encoded ReceiveMsg from a cw20 contract
    Receive(Cw20ReceiveMsg),
}

/// Hooks carried by a cw20 `Send` into this contract. The sent tokens are the
/// poll or vote deposit.
#[cw_serde]
pub enum ReceiveMsg {
    CreatePoll { question: String },
    MakeVote { poll_id: u64, in_favor: bool },
}

#[cw_serde]
pub struct VoteId {
    pub poll_id: u64,
    pub voter: String,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Global poll and vote counters
    #[returns(StateResponse)]
    State {},

    /// Returns the poll with the given id, error if not created
    #[returns(PollResponse)]
    Poll { poll_id: u64 },

    #[returns(ListPollsResponse)]
    ListPolls {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Returns one address's vote on a poll, error if it never voted
    #[returns(VoteResponse)]
    Vote { vote_id: VoteId },

    #[returns(ListVotesResponse)]
    ListVotes {
        poll_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Share a voter of this poll would be paid right now
    #[returns(ShareResponse)]
    Share { poll_id: u64 },

    #[returns(CustodyResponse)]
    Custody { asset: String },

    #[returns(ReservationResponse)]
    Reservation { address: String },

    /// Reservation cost of a poll with the given question and of one vote
    #[returns(ReservationCostResponse)]
    ReservationCost { question: String },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: String,
    pub reserve_denom: String,
    pub min_balance: Uint128,
    pub asset_registration_reserve: Uint128,
    pub record_base_cost: Uint128,
    pub byte_cost: Uint128,
}

#[cw_serde]
pub struct StateResponse {
    pub total_polls: u64,
    pub total_votes: u64,
}

#[cw_serde]
pub struct PollResponse {
    pub poll_id: u64,
    pub creator: String,
    pub selected_asset: String,
    pub question: String,
    pub total_votes: u64,
    pub yes_votes: u64,
    pub deposited: Uint128,
    pub paid_out: Uint128,
    pub created_at: Timestamp,
}

impl PollResponse {
    pub fn new(poll_id: u64, poll: Poll) -> Self {
        PollResponse {
            poll_id,
            creator: poll.creator.into(),
            selected_asset: poll.selected_asset.into(),
            question: poll.question,
            total_votes: poll.total_votes,
            yes_votes: poll.yes_votes,
            deposited: poll.deposited,
            paid_out: poll.paid_out,
            created_at: poll.created_at,
        }
    }
}

#[cw_serde]
pub struct ListPollsResponse {
    pub polls: Vec<PollResponse>,
}

#[cw_serde]
pub struct VoteResponse {
    pub poll_id: u64,
    pub voter: String,
    pub in_favor: bool,
    pub claimed: bool,
}

impl VoteResponse {
    pub fn new(poll_id: u64, vote: Vote) -> Self {
        VoteResponse {
            poll_id,
            voter: vote.voter.into(),
            in_favor: vote.in_favor,
            claimed: vote.claimed,
        }
    }
}

#[cw_serde]
pub struct ListVotesResponse {
    pub votes: Vec<VoteResponse>,
}

#[cw_serde]
pub struct ShareResponse {
    pub asset: String,
    pub share: Uint128,
}

#[cw_serde]
pub struct CustodyResponse {
    pub asset: String,
    pub registered: bool,
    pub balance: Uint128,
}

#[cw_serde]
pub struct ReservationResponse {
    pub address: String,
    pub balance: Uint128,
}

#[cw_serde]
pub struct ReservationCostResponse {
    pub poll: Uint128,
    pub vote: Uint128,
}
