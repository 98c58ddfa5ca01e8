//! Custody guard: the set of cw20 assets this contract agreed to hold, and how
//! much of each it holds on behalf of polls.
//!
//! An asset is registered once by the owner. From then on its entry tracks the
//! escrowed balance: poll and vote deposits credit it, share payouts debit it.

use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::ContractError;

pub const CUSTODY: Map<&Addr, Uint128> = Map::new("custody");

pub fn is_registered(storage: &dyn Storage, asset: &Addr) -> bool {
    CUSTODY.has(storage, asset)
}

pub fn register(storage: &mut dyn Storage, asset: &Addr) -> Result<(), ContractError> {
    if is_registered(storage, asset) {
        return Err(ContractError::AssetAlreadyRegistered {
            asset: asset.to_string(),
        });
    }
    CUSTODY.save(storage, asset, &Uint128::zero())?;
    Ok(())
}

pub fn assert_registered(storage: &dyn Storage, asset: &Addr) -> Result<(), ContractError> {
    if !is_registered(storage, asset) {
        return Err(ContractError::AssetNotRegistered {
            asset: asset.to_string(),
        });
    }
    Ok(())
}

pub fn custody_of(storage: &dyn Storage, asset: &Addr) -> StdResult<Option<Uint128>> {
    CUSTODY.may_load(storage, asset)
}

pub fn credit(
    storage: &mut dyn Storage,
    asset: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    assert_registered(storage, asset)?;
    CUSTODY
        .update(storage, asset, |held| -> StdResult<_> {
            Ok(held.unwrap_or_default().checked_add(amount)?)
        })
        .map_err(ContractError::from)
}

pub fn debit(
    storage: &mut dyn Storage,
    asset: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let available = custody_of(storage, asset)?.ok_or_else(|| ContractError::AssetNotRegistered {
        asset: asset.to_string(),
    })?;
    if available < amount {
        return Err(ContractError::CustodyShortfall {
            asset: asset.to_string(),
            required: amount,
            available,
        });
    }
    let remaining = available - amount;
    CUSTODY.save(storage, asset, &remaining)?;
    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    use cosmwasm_std::testing::MockStorage;

    #[test]
    fn register_once() {
        let mut storage = MockStorage::new();
        let token = Addr::unchecked("token");

        assert!(!is_registered(&storage, &token));
        register(&mut storage, &token).unwrap();
        assert!(is_registered(&storage, &token));
        assert_eq!(Some(Uint128::zero()), custody_of(&storage, &token).unwrap());

        let err = register(&mut storage, &token).unwrap_err();
        assert_eq!(
            err,
            ContractError::AssetAlreadyRegistered {
                asset: "token".to_string()
            }
        );
    }

    #[test]
    fn credit_requires_registration() {
        let mut storage = MockStorage::new();
        let token = Addr::unchecked("token");

        let err = credit(&mut storage, &token, Uint128::new(5)).unwrap_err();
        assert!(matches!(err, ContractError::AssetNotRegistered { .. }));
        assert_eq!(None, custody_of(&storage, &token).unwrap());
    }

    #[test]
    fn credit_and_debit() {
        let mut storage = MockStorage::new();
        let token = Addr::unchecked("token");
        register(&mut storage, &token).unwrap();

        assert_eq!(
            Uint128::new(5),
            credit(&mut storage, &token, Uint128::new(5)).unwrap()
        );
        assert_eq!(
            Uint128::new(7),
            credit(&mut storage, &token, Uint128::new(2)).unwrap()
        );
        assert_eq!(
            Uint128::new(4),
            debit(&mut storage, &token, Uint128::new(3)).unwrap()
        );

        let err = debit(&mut storage, &token, Uint128::new(5)).unwrap_err();
        assert_eq!(
            err,
            ContractError::CustodyShortfall {
                asset: "token".to_string(),
                required: Uint128::new(5),
                available: Uint128::new(4),
            }
        );
        assert_eq!(Some(Uint128::new(4)), custody_of(&storage, &token).unwrap());
    }
}
