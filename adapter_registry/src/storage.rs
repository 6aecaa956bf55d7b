use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};
use utils::bump::{bump_instance, bump_persistent};

use crate::errors::AdapterRegistryError;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Adapter(Address),
    CollateralsList,
}

pub(crate) fn has_adapter(e: &Env, collateral: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::Adapter(collateral.clone()))
}

pub(crate) fn get_adapter(e: &Env, collateral: &Address) -> Address {
    let key = DataKey::Adapter(collateral.clone());
    match e.storage().persistent().get(&key) {
        Some(v) => {
            bump_persistent(e, &key);
            v
        }
        None => panic_with_error!(e, AdapterRegistryError::AdapterNotFound),
    }
}

pub(crate) fn put_adapter(e: &Env, collateral: &Address, engine: &Address) {
    let key = DataKey::Adapter(collateral.clone());
    e.storage().persistent().set(&key, engine);
    bump_persistent(e, &key);

    let mut collaterals = get_collaterals_list(e);
    if !collaterals.contains(collateral) {
        collaterals.push_back(collateral.clone());
        put_collaterals_list(e, &collaterals);
    }
}

pub(crate) fn remove_adapter(e: &Env, collateral: &Address) {
    let key = DataKey::Adapter(collateral.clone());
    if !e.storage().persistent().has(&key) {
        panic_with_error!(e, AdapterRegistryError::AdapterNotFound);
    }
    e.storage().persistent().remove(&key);

    let collaterals = get_collaterals_list(e);
    if let Some(index) = collaterals.first_index_of(collateral) {
        let mut updated = collaterals;
        updated.remove(index);
        put_collaterals_list(e, &updated);
    }
}

pub(crate) fn get_collaterals_list(e: &Env) -> Vec<Address> {
    bump_instance(e);
    e.storage()
        .instance()
        .get(&DataKey::CollateralsList)
        .unwrap_or(Vec::new(e))
}

fn put_collaterals_list(e: &Env, collaterals: &Vec<Address>) {
    bump_instance(e);
    e.storage()
        .instance()
        .set(&DataKey::CollateralsList, collaterals);
}
