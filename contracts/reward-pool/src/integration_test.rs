#![cfg(test)]

use cosmwasm_std::{coins, to_binary, Addr, Empty, Uint128};
use cw20::{Cw20Coin, Cw20Contract, Cw20ExecuteMsg};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, ReceiveMsg, RewardAction, StateResponse};
use crate::ContractError;

const DENOM: &str = "ujuno";
const OWNER: &str = "owner";
const USER: &str = "user";

pub fn contract_reward_pool() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn create_cw20_contract(router: &mut App, owner: &Addr, balance: Uint128) -> Cw20Contract {
    let cw20_id = router.store_code(contract_cw20());
    let msg = cw20_base::msg::InstantiateMsg {
        name: "Wecoop Token".to_string(),
        symbol: "WECOOP".to_string(),
        decimals: 6,
        initial_balances: vec![Cw20Coin {
            address: owner.to_string(),
            amount: balance,
        }],
        mint: None,
        marketing: None,
    };
    let addr = router
        .instantiate_contract(cw20_id, owner.clone(), &msg, &[], "WECOOP", None)
        .unwrap();
    Cw20Contract(addr)
}

#[test]
fn reward_cycle_happy_path() {
    let owner = Addr::unchecked(OWNER);
    let user = Addr::unchecked(USER);
    let mut router = App::new(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &owner, coins(500_000, DENOM))
            .unwrap();
    });

    let cw20 = create_cw20_contract(&mut router, &owner, Uint128::new(1000));
    let pool_id = router.store_code(contract_reward_pool());
    let msg = InstantiateMsg {
        owner: None,
        reserve_denom: DENOM.to_string(),
        min_balance: None,
        asset_registration_reserve: None,
    };
    let pool = router
        .instantiate_contract(pool_id, owner.clone(), &msg, &[], "Reward Pool", None)
        .unwrap();

    let bootstrap = ExecuteMsg::Bootstrap {
        asset: cw20.addr().to_string(),
    };
    router
        .execute_contract(owner.clone(), pool.clone(), &bootstrap, &coins(200_000, DENOM))
        .unwrap();

    // fund a reward cycle through a cw20 send
    let send_msg = Cw20ExecuteMsg::Send {
        contract: pool.to_string(),
        amount: Uint128::new(15),
        msg: to_binary(&ReceiveMsg::InitiateRewardCycle {}).unwrap(),
    };
    router
        .execute_contract(owner.clone(), cw20.addr(), &send_msg, &[])
        .unwrap();
    let pool_balance = cw20.balance::<_, _, Empty>(&router, pool.clone()).unwrap();
    assert_eq!(Uint128::new(15), pool_balance);

    for action in [RewardAction::CreatePost, RewardAction::CastVote] {
        let msg = ExecuteMsg::Reward {
            recipient: USER.to_string(),
            action,
        };
        router
            .execute_contract(owner.clone(), pool.clone(), &msg, &[])
            .unwrap();
    }
    let user_balance = cw20.balance::<_, _, Empty>(&router, user).unwrap();
    assert_eq!(Uint128::new(15), user_balance);

    // the pool is drained
    let msg = ExecuteMsg::Reward {
        recipient: USER.to_string(),
        action: RewardAction::LikePost,
    };
    let err = router
        .execute_contract(owner.clone(), pool.clone(), &msg, &[])
        .unwrap_err();
    assert_eq!(
        ContractError::InsufficientRewards {
            required: Uint128::new(2),
            available: Uint128::zero(),
        }
        .to_string(),
        err.root_cause().to_string()
    );

    let state: StateResponse = router
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::State {})
        .unwrap();
    assert_eq!(1, state.reward_cycle);
    assert_eq!(Uint128::zero(), state.total_rewards);
    let pool_balance = cw20.balance::<_, _, Empty>(&router, pool).unwrap();
    assert_eq!(Uint128::zero(), pool_balance);
}
