#![cfg(test)]
extern crate std;

use crate::{WhitelistContract, WhitelistContractClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

fn setup<'a>() -> (Env, WhitelistContractClient<'a>, Address) {
    let e = Env::default();
    e.mock_all_auths();
    let admin = Address::generate(&e);
    let whitelist = WhitelistContractClient::new(&e, &e.register(WhitelistContract {}, ()));
    whitelist.init_admin(&admin);
    (e, whitelist, admin)
}

#[test]
#[should_panic(expected = "Error(Contract, #401)")]
fn test_init_admin_twice() {
    let (_e, whitelist, admin) = setup();
    whitelist.init_admin(&admin);
}

#[test]
fn test_entries_default_to_denied() {
    let (e, whitelist, _admin) = setup();
    let vault = Address::generate(&e);
    let caller = Address::generate(&e);
    assert_eq!(whitelist.caller_allowed(&vault, &caller), false);
    assert_eq!(whitelist.user_allowed(&vault, &caller), false);
}

#[test]
fn test_set_and_revoke() {
    let (e, whitelist, admin) = setup();
    let vault = Address::generate(&e);
    let engine = Address::generate(&e);
    let user = Address::generate(&e);

    whitelist.set_caller_allowed(&admin, &vault, &engine, &true);
    whitelist.set_user_allowed(&admin, &vault, &user, &true);
    assert_eq!(whitelist.caller_allowed(&vault, &engine), true);
    assert_eq!(whitelist.user_allowed(&vault, &user), true);

    // entries are scoped per vault
    let other_vault = Address::generate(&e);
    assert_eq!(whitelist.caller_allowed(&other_vault, &engine), false);
    assert_eq!(whitelist.user_allowed(&other_vault, &user), false);

    whitelist.set_caller_allowed(&admin, &vault, &engine, &false);
    whitelist.set_user_allowed(&admin, &vault, &user, &false);
    assert_eq!(whitelist.caller_allowed(&vault, &engine), false);
    assert_eq!(whitelist.user_allowed(&vault, &user), false);
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_requires_privileged_role() {
    let (e, whitelist, _admin) = setup();
    let rando = Address::generate(&e);
    let vault = Address::generate(&e);
    whitelist.set_caller_allowed(&rando, &vault, &rando, &true);
}

#[test]
fn test_operations_admin_can_manage() {
    let (e, whitelist, admin) = setup();
    let operations_admin = Address::generate(&e);
    whitelist.set_operations_admin(&admin, &operations_admin);

    let vault = Address::generate(&e);
    let user = Address::generate(&e);
    whitelist.set_user_allowed(&operations_admin, &vault, &user, &true);
    assert_eq!(whitelist.user_allowed(&vault, &user), true);
}
