#![cfg(test)]
extern crate std;

use crate::testutils::Setup;
use soroban_leverage_engine_contract::testutils::single_exchange_plan;
use soroban_leverage_engine_contract::{
    LeverageEngineClient, LeverageRequest, RoutePlan, UnwindRequest,
};

const PRINCIPAL: u128 = 1000_0000000;

// Matches the default levers (8000, 9, 20, 100) with a 10 bps venue fee.
const LOAN: u128 = 3690_6720000;
const CONVERTED: u128 = 3686_9813280;
const DEBT: u128 = LOAN + 3_3216048;
const TOTAL_COLLATERAL: u128 = PRINCIPAL + CONVERTED;

fn default_plan(setup: &Setup) -> RoutePlan {
    single_exchange_plan(
        &setup.env,
        &setup.venue.address,
        &setup.borrow_token.address,
        &setup.collateral_token.address,
        LOAN,
        CONVERTED,
    )
}

fn enter_request(setup: &Setup) -> LeverageRequest {
    LeverageRequest {
        user: setup.user.clone(),
        principal: PRINCIPAL,
        leverage_bps: 36000,
        borrow_token: setup.borrow_token.address.clone(),
        min_out_bps: 9900,
        plan: default_plan(setup),
    }
}

#[test]
fn test_registry_resolves_to_live_engine() {
    let setup = Setup::default();

    // callers discover the engine through the registry, never directly
    let resolved = setup.registry.resolve(&setup.collateral_token.address);
    assert_eq!(resolved, setup.engine.address);

    let engine = LeverageEngineClient::new(&setup.env, &resolved);
    engine.enter_position(&enter_request(&setup));

    assert_eq!(
        setup
            .ledger
            .collateral_of(&setup.user, &setup.collateral_token.address),
        TOTAL_COLLATERAL
    );
    assert_eq!(
        setup.ledger.debt_of(&setup.user, &setup.borrow_token.address),
        DEBT
    );
    let account = setup.ledger.get_user_account_data(&setup.user);
    assert!(account.health_factor > 1_0000000);
}

#[test]
fn test_full_cycle_through_registry() {
    let setup = Setup::default();
    let engine = LeverageEngineClient::new(
        &setup.env,
        &setup.registry.resolve(&setup.collateral_token.address),
    );

    engine.enter_position(&enter_request(&setup));
    engine.withdraw_position(&UnwindRequest {
        user: setup.user.clone(),
        repay_amount: DEBT,
        release_amount: TOTAL_COLLATERAL,
        slippage_bps: 30,
        repay_token: setup.borrow_token.address.clone(),
        min_out: 0,
        plan: default_plan(&setup),
    });

    assert_eq!(
        setup.ledger.debt_of(&setup.user, &setup.borrow_token.address),
        0
    );
    assert_eq!(
        setup
            .ledger
            .collateral_of(&setup.user, &setup.collateral_token.address),
        0
    );

    // round trip costs stay under 2% of the principal
    let returned = setup.collateral_token.balance(&setup.user) as u128
        + setup.borrow_token.balance(&setup.user) as u128;
    assert!(returned >= PRINCIPAL * 98 / 100);
}

#[test]
#[should_panic(expected = "Error(Contract, #301)")]
fn test_registry_unknown_collateral() {
    let setup = Setup::default();
    setup.registry.resolve(&setup.borrow_token.address);
}

#[test]
#[should_panic(expected = "Error(Contract, #2004)")]
fn test_whitelist_gates_the_whole_stack() {
    let setup = Setup::default();
    setup
        .whitelist
        .set_user_allowed(&setup.admin, &setup.vault, &setup.user, &false);

    let engine = LeverageEngineClient::new(
        &setup.env,
        &setup.registry.resolve(&setup.collateral_token.address),
    );
    engine.enter_position(&enter_request(&setup));
}

#[test]
fn test_adapter_swap_out() {
    let setup = Setup::default();

    // pointing the family at a fresh engine is a pure registry operation
    let replacement = setup
        .env
        .register(soroban_leverage_engine_contract::LeverageEngine {}, ());
    setup
        .registry
        .set_adapter(&setup.admin, &setup.collateral_token.address, &replacement);
    assert_eq!(
        setup.registry.resolve(&setup.collateral_token.address),
        replacement
    );

    setup
        .registry
        .remove_adapter(&setup.admin, &setup.collateral_token.address);
    assert_eq!(setup.registry.list_adapters().len(), 0);
}
