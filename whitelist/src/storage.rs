use soroban_sdk::{contracttype, Address, Env};
use utils::bump::bump_persistent;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Caller(Address, Address),
    User(Address, Address),
}

pub(crate) fn set_caller_entry(e: &Env, vault: &Address, caller: &Address, allowed: bool) {
    let key = DataKey::Caller(vault.clone(), caller.clone());
    if allowed {
        e.storage().persistent().set(&key, &true);
        bump_persistent(e, &key);
    } else {
        e.storage().persistent().remove(&key);
    }
}

pub(crate) fn get_caller_entry(e: &Env, vault: &Address, caller: &Address) -> bool {
    let key = DataKey::Caller(vault.clone(), caller.clone());
    match e.storage().persistent().get(&key) {
        Some(v) => {
            bump_persistent(e, &key);
            v
        }
        None => false,
    }
}

pub(crate) fn set_user_entry(e: &Env, vault: &Address, user: &Address, allowed: bool) {
    let key = DataKey::User(vault.clone(), user.clone());
    if allowed {
        e.storage().persistent().set(&key, &true);
        bump_persistent(e, &key);
    } else {
        e.storage().persistent().remove(&key);
    }
}

pub(crate) fn get_user_entry(e: &Env, vault: &Address, user: &Address) -> bool {
    let key = DataKey::User(vault.clone(), user.clone());
    match e.storage().persistent().get(&key) {
        Some(v) => {
            bump_persistent(e, &key);
            v
        }
        None => false,
    }
}
