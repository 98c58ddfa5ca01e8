use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub reserve_denom: String,
    pub min_balance: Uint128,
    pub asset_registration_reserve: Uint128,
    /// cw20 token paid out as rewards, set once by `Bootstrap`
    pub reward_token: Option<Addr>,
}

#[cw_serde]
#[derive(Default)]
pub struct State {
    /// Incremented on every reward deposit
    pub reward_cycle: u64,
    /// Deposited rewards not yet paid out
    pub total_rewards: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const STATE: Item<State> = Item::new("state");

/// Lifetime rewards paid to each address
pub const CLAIMED: Map<&Addr, Uint128> = Map::new("claimed");

/// Amount deposited when each reward cycle was opened
pub const CYCLE_DEPOSITS: Map<u64, Uint128> = Map::new("cycle_deposit");
