#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_binary, to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::msg::{
    ClaimedResponse, ConfigResponse, CycleDepositResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
    ReceiveMsg, StateResponse,
};
use crate::state::{Config, State, CLAIMED, CONFIG, CYCLE_DEPOSITS, STATE};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:reward-pool";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MIN_BALANCE: u128 = 100_000;
pub const DEFAULT_ASSET_REGISTRATION_RESERVE: u128 = 100_000;

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
        reward_token: None,
    };
    CONFIG.save(deps.storage, &config)?;
    STATE.save(deps.storage, &State::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Bootstrap { asset } => execute::bootstrap(deps, info, asset),
        ExecuteMsg::Reward { recipient, action } => {
            execute::reward(deps, info, recipient, action)
        }
        ExecuteMsg::Receive(msg) => execute::receive(deps, info, msg),
    }
}

pub mod execute {
    use cosmwasm_std::{Addr, StdError, SubMsg, WasmMsg};
    use cw20::Cw20ExecuteMsg;
    use cw_utils::must_pay;

    use crate::msg::RewardAction;

    use super::*;

    pub fn bootstrap(
        deps: DepsMut,
        info: MessageInfo,
        asset: String,
    ) -> Result<Response, ContractError> {
        let mut config = CONFIG.load(deps.storage)?;
        if info.sender != config.owner {
            return Err(ContractError::Unauthorized {});
        }
        if let Some(token) = config.reward_token {
            return Err(ContractError::AlreadyBootstrapped {
                token: token.into_string(),
            });
        }

        let provided = must_pay(&info, &config.reserve_denom)?;
        let required = config.min_balance + config.asset_registration_reserve;
        if provided < required {
            return Err(ContractError::InsufficientReserve { required, provided });
        }

        let token = deps.api.addr_validate(&asset)?;
        config.reward_token = Some(token.clone());
        CONFIG.save(deps.storage, &config)?;

        Ok(Response::new()
            .add_attribute("action", "bootstrap")
            .add_attribute("reward_token", token)
            .add_attribute("reserve", provided))
    }

    pub fn receive(
        deps: DepsMut,
        info: MessageInfo,
        wrapper: Cw20ReceiveMsg,
    ) -> Result<Response, ContractError> {
        let msg: ReceiveMsg = from_binary(&wrapper.msg)?;
        let sender = deps.api.addr_validate(&wrapper.sender)?;
        match msg {
            ReceiveMsg::InitiateRewardCycle {} => {
                initiate_reward_cycle(deps, sender, info.sender, wrapper.amount)
            }
        }
    }

    pub fn initiate_reward_cycle(
        deps: DepsMut,
        depositor: Addr,
        token: Addr,
        amount: Uint128,
    ) -> Result<Response, ContractError> {
        let config = CONFIG.load(deps.storage)?;
        let reward_token = config.reward_token.ok_or(ContractError::NotBootstrapped {})?;
        if token != reward_token {
            return Err(ContractError::AssetMismatch {
                expected: reward_token.into_string(),
                received: token.into_string(),
            });
        }
        if amount.is_zero() {
            return Err(ContractError::ZeroDeposit {});
        }

        let mut state = STATE.load(deps.storage)?;
        state.reward_cycle += 1;
        state.total_rewards = state
            .total_rewards
            .checked_add(amount)
            .map_err(StdError::from)?;
        STATE.save(deps.storage, &state)?;
        CYCLE_DEPOSITS.save(deps.storage, state.reward_cycle, &amount)?;

        Ok(Response::new()
            .add_attribute("action", "initiate_reward_cycle")
            .add_attribute("depositor", depositor)
            .add_attribute("reward_cycle", state.reward_cycle.to_string())
            .add_attribute("amount", amount)
            .add_attribute("total_rewards", state.total_rewards))
    }

    pub fn reward(
        deps: DepsMut,
        info: MessageInfo,
        recipient: String,
        action: RewardAction,
    ) -> Result<Response, ContractError> {
        let config = CONFIG.load(deps.storage)?;
        if info.sender != config.owner {
            return Err(ContractError::Unauthorized {});
        }
        let reward_token = config.reward_token.ok_or(ContractError::NotBootstrapped {})?;
        let recipient = deps.api.addr_validate(&recipient)?;

        let payout = action.payout();
        let mut state = STATE.load(deps.storage)?;
        if state.total_rewards < payout {
            return Err(ContractError::InsufficientRewards {
                required: payout,
                available: state.total_rewards,
            });
        }
        state.total_rewards -= payout;
        STATE.save(deps.storage, &state)?;

        let claimed = CLAIMED.update(deps.storage, &recipient, |claimed| -> StdResult<_> {
            Ok(claimed.unwrap_or_default().checked_add(payout)?)
        })?;

        let transfer = Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount: payout,
        };
        let msg = SubMsg::new(WasmMsg::Execute {
            contract_addr: reward_token.into_string(),
            msg: to_binary(&transfer)?,
            funds: vec![],
        });

        Ok(Response::new()
            .add_submessage(msg)
            .add_attribute("action", "reward")
            .add_attribute("reward_action", action.as_str())
            .add_attribute("recipient", recipient)
            .add_attribute("amount", payout)
            .add_attribute("claimed", claimed))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query::config(deps)?),
        QueryMsg::State {} => to_binary(&query::state(deps)?),
        QueryMsg::Claimed { address } => to_binary(&query::claimed(deps, address)?),
        QueryMsg::CycleDeposit { cycle } => to_binary(&query::cycle_deposit(deps, cycle)?),
    }
}

pub mod query {
    use super::*;

    pub fn config(deps: Deps) -> StdResult<ConfigResponse> {
        let config = CONFIG.load(deps.storage)?;
        Ok(ConfigResponse {
            owner: config.owner.into(),
            reserve_denom: config.reserve_denom,
            min_balance: config.min_balance,
            asset_registration_reserve: config.asset_registration_reserve,
            reward_token: config.reward_token.map(String::from),
        })
    }

    pub fn state(deps: Deps) -> StdResult<StateResponse> {
        let state = STATE.load(deps.storage)?;
        Ok(StateResponse {
            reward_cycle: state.reward_cycle,
            total_rewards: state.total_rewards,
        })
    }

    pub fn claimed(deps: Deps, address: String) -> StdResult<ClaimedResponse> {
        let validated = deps.api.addr_validate(&address)?;
        let claimed = CLAIMED
            .may_load(deps.storage, &validated)?
            .unwrap_or_default();
        Ok(ClaimedResponse { address, claimed })
    }

    pub fn cycle_deposit(deps: Deps, cycle: u64) -> StdResult<CycleDepositResponse> {
        let amount = CYCLE_DEPOSITS.load(deps.storage, cycle)?;
        Ok(CycleDepositResponse { cycle, amount })
    }
}
