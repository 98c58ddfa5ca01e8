use cosmwasm_schema::{cw_serde, QueryResponses};

use cosmwasm_std::Uint128;

use cw20::Cw20ReceiveMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address
    pub owner: Option<String>,
    pub reserve_denom: String,
    pub min_balance: Option<Uint128>,
    pub asset_registration_reserve: Option<Uint128>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Sets the reward token. Owner only, once, with a native reserve deposit.
    Bootstrap { asset: String },
    /// Pays the fixed reward for `action` to `recipient`. Owner only.
    Reward {
        recipient: String,
        action: RewardAction,
    },
    /// This accepts a properly-encoded ReceiveMsg from a cw20 contract
    Receive(Cw20ReceiveMsg),
}

#[cw_serde]
pub enum ReceiveMsg {
    /// Deposits the sent tokens as rewards and opens a new cycle
    InitiateRewardCycle {},
}

/// User actions the pool rewards
#[cw_serde]
#[derive(Copy)]
pub enum RewardAction {
    CreatePost,
    ReplyPost,
    LikePost,
    CreatePoll,
    CastVote,
}

impl RewardAction {
    pub fn payout(&self) -> Uint128 {
        let amount: u128 = match self {
            RewardAction::CreatePost | RewardAction::CreatePoll => 10,
            RewardAction::ReplyPost | RewardAction::CastVote => 5,
            RewardAction::LikePost => 2,
        };
        Uint128::new(amount)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RewardAction::CreatePost => "create_post",
            RewardAction::ReplyPost => "reply_post",
            RewardAction::LikePost => "like_post",
            RewardAction::CreatePoll => "create_poll",
            RewardAction::CastVote => "cast_vote",
        }
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StateResponse)]
    State {},

    /// Total rewards ever paid to `address`
    #[returns(ClaimedResponse)]
    Claimed { address: String },

    #[returns(CycleDepositResponse)]
    CycleDeposit { cycle: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: String,
    pub reserve_denom: String,
    pub min_balance: Uint128,
    pub asset_registration_reserve: Uint128,
    pub reward_token: Option<String>,
}

#[cw_serde]
pub struct StateResponse {
    pub reward_cycle: u64,
    pub total_rewards: Uint128,
}

#[cw_serde]
pub struct ClaimedResponse {
    pub address: String,
    pub claimed: Uint128,
}

#[cw_serde]
pub struct CycleDepositResponse {
    pub cycle: u64,
    pub amount: Uint128,
}
