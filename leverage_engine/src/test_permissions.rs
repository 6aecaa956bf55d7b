#![cfg(test)]
extern crate std;

use crate::testutils::Setup;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use utils::test_utils::jump;

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_initialize_twice() {
    let setup = Setup::default();
    setup.engine.initialize(
        &setup.admin,
        &setup.collateral_token.address,
        &setup.vault,
        &setup.ledger.address,
        &setup.provider.address,
        &setup.whitelist.address,
        &setup.feed.address,
        &(8000, 9, 20, 100),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #202)")]
fn test_set_levers_zero_ltv() {
    let setup = Setup::default();
    setup.engine.set_levers(&setup.admin, &(0, 9, 20, 100));
}

#[test]
#[should_panic(expected = "Error(Contract, #202)")]
fn test_set_levers_ltv_at_full() {
    let setup = Setup::default();
    setup.engine.set_levers(&setup.admin, &(10000, 9, 20, 100));
}

#[test]
fn test_set_levers() {
    let setup = Setup::default();
    setup.engine.set_levers(&setup.admin, &(7000, 5, 10, 50));
    assert_eq!(setup.engine.get_levers(), (7000, 5, 10, 50));
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_levers_third_party() {
    let setup = Setup::default();
    let rando = Address::generate(&setup.e);
    setup.engine.set_levers(&rando, &(7000, 5, 10, 50));
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_borrow_token_third_party() {
    let setup = Setup::default();
    let rando = Address::generate(&setup.e);
    setup
        .engine
        .set_borrow_token(&rando, &setup.borrow_token.address, &false);
}

#[test]
fn test_operations_admin_manages_borrow_tokens() {
    let setup = Setup::default();
    let operations_admin = Address::generate(&setup.e);
    setup
        .engine
        .set_operations_admin(&setup.admin, &operations_admin);

    setup
        .engine
        .set_borrow_token(&operations_admin, &setup.borrow_token.address, &false);
    assert_eq!(setup.engine.list_supported_borrow_assets().len(), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_price_feed_third_party() {
    let setup = Setup::default();
    let rando = Address::generate(&setup.e);
    setup.engine.set_price_feed(&rando, &setup.feed.address);
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_loan_provider_third_party() {
    let setup = Setup::default();
    let rando = Address::generate(&setup.e);
    setup
        .engine
        .set_loan_provider(&rando, &setup.provider.address);
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_whitelist_third_party() {
    let setup = Setup::default();
    let rando = Address::generate(&setup.e);
    setup.engine.set_whitelist(&rando, &setup.whitelist.address);
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_commit_transfer_ownership_third_party() {
    let setup = Setup::default();
    let rando = Address::generate(&setup.e);
    setup.engine.commit_transfer_ownership(&rando, &rando);
}

#[test]
#[should_panic(expected = "Error(Contract, #107)")]
fn test_apply_transfer_ownership_too_early() {
    let setup = Setup::default();
    let new_admin = Address::generate(&setup.e);
    setup
        .engine
        .commit_transfer_ownership(&setup.admin, &new_admin);
    setup.engine.apply_transfer_ownership(&setup.admin);
}

#[test]
fn test_transfer_ownership() {
    let setup = Setup::default();
    let new_admin = Address::generate(&setup.e);
    setup
        .engine
        .commit_transfer_ownership(&setup.admin, &new_admin);
    jump(&setup.e, 3 * 86400 + 1);
    setup.engine.apply_transfer_ownership(&setup.admin);

    // only the new admin holds the role now
    setup.engine.set_levers(&new_admin, &(7000, 5, 10, 50));
}

#[test]
fn test_revert_transfer_ownership() {
    let setup = Setup::default();
    let new_admin = Address::generate(&setup.e);
    setup
        .engine
        .commit_transfer_ownership(&setup.admin, &new_admin);
    setup.engine.revert_transfer_ownership(&setup.admin);

    // a fresh commit is accepted after the revert
    setup
        .engine
        .commit_transfer_ownership(&setup.admin, &new_admin);
}

#[test]
fn test_version() {
    let setup = Setup::default();
    assert_eq!(setup.engine.version(), 110);
}
