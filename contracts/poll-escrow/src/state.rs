use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Deps, Order, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::{Bound, Item, Map};

use crate::ContractError;

pub const CONFIG: Item<Config> = Item::new("config");

pub const TOTAL_POLLS: Item<u64> = Item::new("total_polls");
pub const TOTAL_VOTES: Item<u64> = Item::new("total_votes");

pub const POLLS: Map<u64, Poll> = Map::new("poll");
pub const VOTES: Map<(u64, &Addr), Vote> = Map::new("vote");

/// Unspent storage reservation prepaid by each address, in `Config::reserve_denom`
pub const RESERVATIONS: Map<&Addr, Uint128> = Map::new("reservation");

/// Longest question accepted, in bytes
pub const MAX_QUESTION_LEN: usize = 256;

// Stable record layout used for reservation pricing. Addresses are priced as
// fixed 32 byte fields and strings carry a 2 byte length prefix.
const ADDRESS_BYTES: u64 = 32;
const STRING_PREFIX_BYTES: u64 = 2;
const POLL_KEY_BYTES: u64 = 4 + 8;
const POLL_FIXED_BYTES: u64 = ADDRESS_BYTES * 2 + 8 * 3 + 16 * 2 + STRING_PREFIX_BYTES;
const VOTE_KEY_BYTES: u64 = 4 + 8 + ADDRESS_BYTES;
const VOTE_VALUE_BYTES: u64 = ADDRESS_BYTES + 1 + 1;

#[cw_serde]
pub struct Config {
    /// Only the owner may register assets for custody
    pub owner: Addr,
    /// Native denom used for every reserve and reservation deposit
    pub reserve_denom: String,
    /// Minimum balance the ledger requires the contract account to keep
    pub min_balance: Uint128,
    /// Extra minimum balance the ledger charges per held asset
    pub asset_registration_reserve: Uint128,
    /// Flat cost of any persisted record
    pub record_base_cost: Uint128,
    /// Cost of each byte of a persisted record
    pub byte_cost: Uint128,
}

impl Config {
    /// Native deposit required to register a new asset
    pub fn registration_reserve(&self) -> StdResult<Uint128> {
        Ok(self.min_balance.checked_add(self.asset_registration_reserve)?)
    }

    pub fn reservation_cost(&self, footprint: u64) -> StdResult<Uint128> {
        let bytes = self.byte_cost.checked_mul(Uint128::from(footprint))?;
        Ok(self.record_base_cost.checked_add(bytes)?)
    }

    pub fn poll_reservation_cost(&self, question: &str) -> StdResult<Uint128> {
        self.reservation_cost(poll_footprint(question.len()))
    }

    pub fn vote_reservation_cost(&self) -> StdResult<Uint128> {
        self.reservation_cost(vote_footprint())
    }
}

/// Serialized size of a poll record holding a question of `question_len` bytes
pub fn poll_footprint(question_len: usize) -> u64 {
    POLL_KEY_BYTES + POLL_FIXED_BYTES + question_len as u64
}

pub fn vote_footprint() -> u64 {
    VOTE_KEY_BYTES + VOTE_VALUE_BYTES
}

#[cw_serde]
pub struct Poll {
    pub creator: Addr,
    /// cw20 contract whose tokens fund this poll, fixed at creation
    pub selected_asset: Addr,
    pub question: String,
    pub total_votes: u64,
    pub yes_votes: u64,
    /// Tokens escrowed for this poll: the creation deposit plus every vote deposit
    pub deposited: Uint128,
    /// Tokens already paid out to voters
    pub paid_out: Uint128,
    pub created_at: Timestamp,
}

impl Poll {
    /// A poll settles on its first payout, after which the tally is frozen
    pub fn is_settled(&self) -> bool {
        !self.paid_out.is_zero()
    }

    /// Share owed to each voter, rounding down. Dust stays in custody.
    pub fn share(&self) -> Option<Uint128> {
        if self.total_votes == 0 {
            return None;
        }
        Some(self.deposited / Uint128::from(self.total_votes))
    }
}

#[cw_serde]
pub struct Vote {
    pub voter: Addr,
    pub in_favor: bool,
    pub claimed: bool,
}

pub fn is_valid_question(question: &str) -> bool {
    !question.is_empty() && question.len() <= MAX_QUESTION_LEN
}

pub fn get_poll_by_id(deps: &Deps, poll_id: u64) -> Result<Poll, ContractError> {
    match POLLS.may_load(deps.storage, poll_id)? {
        Some(poll) => Ok(poll),
        None => Err(ContractError::PollNotFound { poll_id }),
    }
}

pub fn reservation_of(storage: &dyn Storage, address: &Addr) -> StdResult<Uint128> {
    Ok(RESERVATIONS
        .may_load(storage, address)?
        .unwrap_or_default())
}

/// Charges `cost` against the prepaid reservation of `payer`
pub fn charge_reservation(
    storage: &mut dyn Storage,
    payer: &Addr,
    cost: Uint128,
) -> Result<(), ContractError> {
    let available = reservation_of(storage, payer)?;
    if available < cost {
        return Err(ContractError::InsufficientReservation {
            required: cost,
            available,
        });
    }
    RESERVATIONS.save(storage, payer, &(available - cost))?;
    Ok(())
}

// settings for pagination
const MAX_LIMIT: u32 = 30;
const DEFAULT_LIMIT: u32 = 10;

pub fn list_polls(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, Poll)>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);
    POLLS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}

pub fn list_votes(
    storage: &dyn Storage,
    poll_id: u64,
    start_after: Option<&Addr>,
    limit: Option<u32>,
) -> StdResult<Vec<Vote>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);
    VOTES
        .prefix(poll_id)
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, vote)| vote))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use cosmwasm_std::testing::MockStorage;
    use cosmwasm_std::StdError;

    fn dummy_config() -> Config {
        Config {
            owner: Addr::unchecked("owner"),
            reserve_denom: "ujuno".to_string(),
            min_balance: Uint128::new(100_000),
            asset_registration_reserve: Uint128::new(100_000),
            record_base_cost: Uint128::new(2_500),
            byte_cost: Uint128::new(400),
        }
    }

    fn dummy_poll(total_votes: u64, deposited: u128) -> Poll {
        Poll {
            creator: Addr::unchecked("creator"),
            selected_asset: Addr::unchecked("token"),
            question: "some_question".to_string(),
            total_votes,
            yes_votes: 0,
            deposited: Uint128::new(deposited),
            paid_out: Uint128::zero(),
            created_at: Timestamp::from_seconds(0),
        }
    }

    #[test]
    fn footprints_follow_record_layout() {
        assert_eq!(134, poll_footprint(0));
        assert_eq!(184, poll_footprint(50));
        assert_eq!(78, vote_footprint());
    }

    #[test]
    fn reservation_costs() {
        let config = dummy_config();
        // 2_500 + 400 * (134 + 4)
        assert_eq!(
            Uint128::new(57_700),
            config.poll_reservation_cost("why?").unwrap()
        );
        // 2_500 + 400 * 78
        assert_eq!(Uint128::new(33_700), config.vote_reservation_cost().unwrap());
        assert_eq!(Uint128::new(200_000), config.registration_reserve().unwrap());
    }

    #[test]
    fn longer_questions_cost_more() {
        let config = dummy_config();
        let short = config.poll_reservation_cost("a").unwrap();
        let long = config
            .poll_reservation_cost(&"a".repeat(MAX_QUESTION_LEN))
            .unwrap();
        assert_eq!(
            long - short,
            Uint128::new(400 * (MAX_QUESTION_LEN as u128 - 1))
        );
    }

    #[test]
    fn oversized_costs_overflow() {
        let config = Config {
            byte_cost: Uint128::MAX,
            min_balance: Uint128::MAX,
            ..dummy_config()
        };
        let err = config.vote_reservation_cost().unwrap_err();
        assert!(matches!(err, StdError::Overflow { .. }));
        let err = config.registration_reserve().unwrap_err();
        assert!(matches!(err, StdError::Overflow { .. }));
    }

    #[test]
    fn question_bounds() {
        assert!(!is_valid_question(""));
        assert!(is_valid_question("a"));
        assert!(is_valid_question(&"q".repeat(MAX_QUESTION_LEN)));
        assert!(!is_valid_question(&"q".repeat(MAX_QUESTION_LEN + 1)));
    }

    #[test]
    fn share_rounds_down() {
        assert_eq!(Some(Uint128::new(3)), dummy_poll(2, 6).share());
        assert_eq!(Some(Uint128::new(2)), dummy_poll(3, 8).share());
        assert_eq!(None, dummy_poll(0, 8).share());
    }

    #[test]
    fn charge_reservation_checks_balance() {
        let mut storage = MockStorage::new();
        let payer = Addr::unchecked("payer");
        RESERVATIONS
            .save(&mut storage, &payer, &Uint128::new(100))
            .unwrap();

        let err = charge_reservation(&mut storage, &payer, Uint128::new(101)).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientReservation {
                required: Uint128::new(101),
                available: Uint128::new(100),
            }
        );

        charge_reservation(&mut storage, &payer, Uint128::new(60)).unwrap();
        assert_eq!(Uint128::new(40), reservation_of(&storage, &payer).unwrap());

        let stranger = Addr::unchecked("stranger");
        assert_eq!(Uint128::zero(), reservation_of(&storage, &stranger).unwrap());
    }

    #[test]
    fn list_polls_in_order() {
        let mut storage = MockStorage::new();
        for id in [3u64, 1, 2] {
            POLLS.save(&mut storage, id, &dummy_poll(0, 1)).unwrap();
        }

        let ids: Vec<u64> = list_polls(&storage, None, None)
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(vec![1, 2, 3], ids);

        let ids: Vec<u64> = list_polls(&storage, Some(1), Some(1))
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(vec![2], ids);
    }

    #[test]
    fn list_votes_scoped_to_poll() {
        let mut storage = MockStorage::new();
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");
        for (poll_id, voter) in [(1u64, &bob), (1, &alice), (2, &alice)] {
            let vote = Vote {
                voter: voter.clone(),
                in_favor: true,
                claimed: false,
            };
            VOTES.save(&mut storage, (poll_id, voter), &vote).unwrap();
        }

        let voters: Vec<Addr> = list_votes(&storage, 1, None, None)
            .unwrap()
            .into_iter()
            .map(|v| v.voter)
            .collect();
        assert_eq!(vec![alice.clone(), bob.clone()], voters);

        let voters: Vec<Addr> = list_votes(&storage, 1, Some(&alice), None)
            .unwrap()
            .into_iter()
            .map(|v| v.voter)
            .collect();
        assert_eq!(vec![bob], voters);
    }
}
