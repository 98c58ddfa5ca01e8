#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coin, from_binary, to_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, SubMsg, Uint128, WasmMsg,
};

use cw2::set_contract_version;
use cw20::{Cw20CoinVerified, Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_utils::must_pay;

use crate::custody;
use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, CustodyResponse, ExecuteMsg, InstantiateMsg, ListPollsResponse,
    ListVotesResponse, PollResponse, QueryMsg, ReceiveMsg, ReservationCostResponse,
    ReservationResponse, ShareResponse, StateResponse, VoteId, VoteResponse,
};
use crate::state::{
    charge_reservation, get_poll_by_id, is_valid_question, list_polls, list_votes,
    reservation_of, Config, Poll, Vote, CONFIG, MAX_QUESTION_LEN, POLLS, RESERVATIONS,
    TOTAL_POLLS, TOTAL_VOTES, VOTES,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:poll-escrow";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Default ledger economics, in the smallest unit of the reserve denom
pub const DEFAULT_MIN_BALANCE: u128 = 100_000;
pub const DEFAULT_ASSET_REGISTRATION_RESERVE: u128 = 100_000;
pub const DEFAULT_RECORD_BASE_COST: u128 = 2_500;
pub const DEFAULT_BYTE_COST: u128 = 400;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let config = Config {
        owner,
        reserve_denom: msg.reserve_denom,
        min_balance: msg
            .min_balance
            .unwrap_or_else(|| Uint128::new(DEFAULT_MIN_BALANCE)),
        asset_registration_reserve: msg
            .asset_registration_reserve
            .unwrap_or_else(|| Uint128::new(DEFAULT_ASSET_REGISTRATION_RESERVE)),
        record_base_cost: msg
            .record_base_cost
            .unwrap_or_else(|| Uint128::new(DEFAULT_RECORD_BASE_COST)),
        byte_cost: msg
            .byte_cost
            .unwrap_or_else(|| Uint128::new(DEFAULT_BYTE_COST)),
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_POLLS.save(deps.storage, &0)?;
    TOTAL_VOTES.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("reserve_denom", config.reserve_denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::OptinToAsset { asset } => execute_optin_to_asset(deps, info, asset),
        ExecuteMsg::ReserveStorage {} => execute_reserve_storage(deps, info),
        ExecuteMsg::ReleaseReservation {} => execute_release_reservation(deps, info),
        ExecuteMsg::WithdrawPollShare { poll_id } => {
            execute_withdraw_poll_share(deps, info, poll_id)
        }
        ExecuteMsg::Receive(msg) => execute_receive(deps, env, info, msg),
    }
}

pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let msg: ReceiveMsg = from_binary(&wrapper.msg)?;
    let validated_sender = deps.api.addr_validate(&wrapper.sender)?;
    // the cw20 contract calling us is the asset that was transferred
    let deposit = Cw20CoinVerified {
        address: info.sender,
        amount: wrapper.amount,
    };
    match msg {
        ReceiveMsg::CreatePoll { question } => {
            execute_create_poll(deps, env, &validated_sender, deposit, question)
        }
        ReceiveMsg::MakeVote { poll_id, in_favor } => {
            execute_make_vote(deps, &validated_sender, deposit, poll_id, in_favor)
        }
    }
}

pub fn execute_optin_to_asset(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let asset = deps.api.addr_validate(&asset)?;
    if custody::is_registered(deps.storage, &asset) {
        return Err(ContractError::AssetAlreadyRegistered {
            asset: asset.into_string(),
        });
    }

    let provided = must_pay(&info, &config.reserve_denom)?;
    let required = config.registration_reserve()?;
    if provided < required {
        return Err(ContractError::InsufficientReserve { required, provided });
    }

    custody::register(deps.storage, &asset)?;

    Ok(Response::new()
        .add_attribute("action", "optin_to_asset")
        .add_attribute("asset", asset)
        .add_attribute("reserve", provided))
}

pub fn execute_reserve_storage(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = must_pay(&info, &config.reserve_denom)?;

    let balance = RESERVATIONS.update(deps.storage, &info.sender, |held| -> StdResult<_> {
        Ok(held.unwrap_or_default().checked_add(amount)?)
    })?;

    Ok(Response::new()
        .add_attribute("action", "reserve_storage")
        .add_attribute("address", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance))
}

pub fn execute_release_reservation(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let balance = reservation_of(deps.storage, &info.sender)?;
    if balance.is_zero() {
        return Err(ContractError::NothingToRelease {});
    }
    RESERVATIONS.remove(deps.storage, &info.sender);

    let refund = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: vec![coin(balance.u128(), config.reserve_denom)],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::new(refund))
        .add_attribute("action", "release_reservation")
        .add_attribute("address", info.sender)
        .add_attribute("amount", balance))
}

pub fn execute_create_poll(
    deps: DepsMut,
    env: Env,
    creator: &Addr,
    deposit: Cw20CoinVerified,
    question: String,
) -> Result<Response, ContractError> {
    custody::assert_registered(deps.storage, &deposit.address)?;
    if deposit.amount.is_zero() {
        return Err(ContractError::ZeroDeposit {});
    }
    if !is_valid_question(&question) {
        return Err(ContractError::InvalidQuestion {
            max: MAX_QUESTION_LEN,
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let cost = config.poll_reservation_cost(&question)?;

    // the counter discipline makes a collision impossible, so one is fatal
    let poll_id = TOTAL_POLLS.load(deps.storage)? + 1;
    if POLLS.has(deps.storage, poll_id) {
        return Err(ContractError::PollIdInUse { poll_id });
    }
    charge_reservation(deps.storage, creator, cost)?;

    let poll = Poll {
        creator: creator.clone(),
        selected_asset: deposit.address.clone(),
        question,
        total_votes: 0,
        yes_votes: 0,
        deposited: deposit.amount,
        paid_out: Uint128::zero(),
        created_at: env.block.time,
    };

    POLLS.save(deps.storage, poll_id, &poll)?;
    TOTAL_POLLS.save(deps.storage, &poll_id)?;
    custody::credit(deps.storage, &deposit.address, deposit.amount)?;

    Ok(Response::new()
        .set_data(to_binary(&PollResponse::new(poll_id, poll))?)
        .add_attribute("action", "create_poll")
        .add_attribute("poll_id", poll_id.to_string())
        .add_attribute("creator", creator)
        .add_attribute("asset", deposit.address)
        .add_attribute("deposited", deposit.amount)
        .add_attribute("reservation_cost", cost))
}

pub fn execute_make_vote(
    deps: DepsMut,
    voter: &Addr,
    deposit: Cw20CoinVerified,
    poll_id: u64,
    in_favor: bool,
) -> Result<Response, ContractError> {
    let mut poll = get_poll_by_id(&deps.as_ref(), poll_id)?;
    custody::assert_registered(deps.storage, &deposit.address)?;

    if deposit.address != poll.selected_asset {
        return Err(ContractError::AssetMismatch {
            poll_id,
            expected: poll.selected_asset.into_string(),
            received: deposit.address.into_string(),
        });
    }
    if voter == &poll.creator {
        return Err(ContractError::SelfVote {});
    }
    if VOTES.has(deps.storage, (poll_id, voter)) {
        return Err(ContractError::AlreadyVoted {
            poll_id,
            voter: voter.to_string(),
        });
    }
    if poll.is_settled() {
        return Err(ContractError::PollSettled { poll_id });
    }
    if deposit.amount.is_zero() {
        return Err(ContractError::ZeroDeposit {});
    }

    let config = CONFIG.load(deps.storage)?;
    let cost = config.vote_reservation_cost()?;
    charge_reservation(deps.storage, voter, cost)?;

    let vote = Vote {
        voter: voter.clone(),
        in_favor,
        claimed: false,
    };
    VOTES.save(deps.storage, (poll_id, voter), &vote)?;

    poll.total_votes += 1;
    if in_favor {
        poll.yes_votes += 1;
    }
    poll.deposited = poll
        .deposited
        .checked_add(deposit.amount)
        .map_err(StdError::from)?;
    POLLS.save(deps.storage, poll_id, &poll)?;

    TOTAL_VOTES.update(deps.storage, |total| -> StdResult<_> { Ok(total + 1) })?;
    custody::credit(deps.storage, &deposit.address, deposit.amount)?;

    Ok(Response::new()
        .add_attribute("action", "make_vote")
        .add_attribute("poll_id", poll_id.to_string())
        .add_attribute("voter", voter)
        .add_attribute("in_favor", in_favor.to_string())
        .add_attribute("amount", deposit.amount)
        .add_attribute("deposited", poll.deposited)
        .add_attribute("reservation_cost", cost))
}

pub fn execute_withdraw_poll_share(
    deps: DepsMut,
    info: MessageInfo,
    poll_id: u64,
) -> Result<Response, ContractError> {
    let mut poll = get_poll_by_id(&deps.as_ref(), poll_id)?;
    let voter = info.sender;

    let mut vote = VOTES
        .may_load(deps.storage, (poll_id, &voter))?
        .ok_or_else(|| ContractError::VoteNotFound {
            poll_id,
            voter: voter.to_string(),
        })?;
    if vote.claimed {
        return Err(ContractError::AlreadyClaimed {
            poll_id,
            voter: voter.into_string(),
        });
    }

    let share = poll.share().ok_or(ContractError::EmptyTally { poll_id })?;
    let paid_out = poll.paid_out + share;
    if paid_out > poll.deposited {
        return Err(ContractError::PayoutExceedsDeposit { poll_id, share });
    }
    custody::debit(deps.storage, &poll.selected_asset, share)?;

    vote.claimed = true;
    VOTES.save(deps.storage, (poll_id, &voter), &vote)?;
    poll.paid_out = paid_out;
    POLLS.save(deps.storage, poll_id, &poll)?;

    let messages = send_tokens(
        &voter,
        &Cw20CoinVerified {
            address: poll.selected_asset.clone(),
            amount: share,
        },
    )?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_attribute("action", "withdraw_poll_share")
        .add_attribute("poll_id", poll_id.to_string())
        .add_attribute("voter", voter)
        .add_attribute("asset", poll.selected_asset)
        .add_attribute("share", share))
}

fn send_tokens(to: &Addr, token: &Cw20CoinVerified) -> StdResult<Vec<SubMsg>> {
    if token.amount.is_zero() {
        return Ok(vec![]);
    }
    let msg = Cw20ExecuteMsg::Transfer {
        recipient: to.into(),
        amount: token.amount,
    };
    Ok(vec![SubMsg::new(WasmMsg::Execute {
        contract_addr: token.address.to_string(),
        msg: to_binary(&msg)?,
        funds: vec![],
    })])
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::State {} => to_binary(&query_state(deps)?),
        QueryMsg::Poll { poll_id } => to_binary(&query_poll(deps, poll_id)?),
        QueryMsg::ListPolls { start_after, limit } => {
            to_binary(&query_list_polls(deps, start_after, limit)?)
        }
        QueryMsg::Vote { vote_id } => to_binary(&query_vote(deps, vote_id)?),
        QueryMsg::ListVotes {
            poll_id,
            start_after,
            limit,
        } => to_binary(&query_list_votes(deps, poll_id, start_after, limit)?),
        QueryMsg::Share { poll_id } => to_binary(&query_share(deps, poll_id)?),
        QueryMsg::Custody { asset } => to_binary(&query_custody(deps, asset)?),
        QueryMsg::Reservation { address } => to_binary(&query_reservation(deps, address)?),
        QueryMsg::ReservationCost { question } => {
            to_binary(&query_reservation_cost(deps, question)?)
        }
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner.into(),
        reserve_denom: config.reserve_denom,
        min_balance: config.min_balance,
        asset_registration_reserve: config.asset_registration_reserve,
        record_base_cost: config.record_base_cost,
        byte_cost: config.byte_cost,
    })
}

pub fn query_state(deps: Deps) -> StdResult<StateResponse> {
    Ok(StateResponse {
        total_polls: TOTAL_POLLS.load(deps.storage)?,
        total_votes: TOTAL_VOTES.load(deps.storage)?,
    })
}

pub fn query_poll(deps: Deps, poll_id: u64) -> StdResult<PollResponse> {
    let poll = POLLS.load(deps.storage, poll_id)?;
    Ok(PollResponse::new(poll_id, poll))
}

fn query_list_polls(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ListPollsResponse> {
    let polls = list_polls(deps.storage, start_after, limit)?
        .into_iter()
        .map(|(poll_id, poll)| PollResponse::new(poll_id, poll))
        .collect();
    Ok(ListPollsResponse { polls })
}

pub fn query_vote(deps: Deps, vote_id: VoteId) -> StdResult<VoteResponse> {
    let voter = deps.api.addr_validate(&vote_id.voter)?;
    let vote = VOTES.load(deps.storage, (vote_id.poll_id, &voter))?;
    Ok(VoteResponse::new(vote_id.poll_id, vote))
}

fn query_list_votes(
    deps: Deps,
    poll_id: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ListVotesResponse> {
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let votes = list_votes(deps.storage, poll_id, start_after.as_ref(), limit)?
        .into_iter()
        .map(|vote| VoteResponse::new(poll_id, vote))
        .collect();
    Ok(ListVotesResponse { votes })
}

fn query_share(deps: Deps, poll_id: u64) -> StdResult<ShareResponse> {
    let poll = POLLS.load(deps.storage, poll_id)?;
    let share = poll
        .share()
        .ok_or_else(|| StdError::generic_err(format!("Poll {} has no votes", poll_id)))?;
    Ok(ShareResponse {
        asset: poll.selected_asset.into(),
        share,
    })
}

fn query_custody(deps: Deps, asset: String) -> StdResult<CustodyResponse> {
    let validated = deps.api.addr_validate(&asset)?;
    let held = custody::custody_of(deps.storage, &validated)?;
    Ok(CustodyResponse {
        asset,
        registered: held.is_some(),
        balance: held.unwrap_or_default(),
    })
}

fn query_reservation(deps: Deps, address: String) -> StdResult<ReservationResponse> {
    let validated = deps.api.addr_validate(&address)?;
    Ok(ReservationResponse {
        balance: reservation_of(deps.storage, &validated)?,
        address,
    })
}

fn query_reservation_cost(deps: Deps, question: String) -> StdResult<ReservationCostResponse> {
    if !is_valid_question(&question) {
        return Err(StdError::generic_err(format!(
            "Question must be between 1 and {} bytes",
            MAX_QUESTION_LEN
        )));
    }
    let config = CONFIG.load(deps.storage)?;
    Ok(ReservationCostResponse {
        poll: config.poll_reservation_cost(&question)?,
        vote: config.vote_reservation_cost()?,
    })
}
