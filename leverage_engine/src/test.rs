#![cfg(test)]
extern crate std;

use crate::constants::{HOP_KIND_CURVE_STYLE, OP_EXCHANGE};
use crate::plan::{HopDescriptor, LeverageRequest, RoutePlan, UnwindRequest};
use crate::testutils::{exchange_hop, single_exchange_plan, Setup};
use soroban_sdk::Vec;
use utils::test_utils::assert_approx_eq_abs;

const PRINCIPAL: u128 = 1000_0000000;
const LEVERAGE_BPS: u32 = 36000;

// Derived from the default levers (8000, 9, 20, 100) and the 10 bps venue
// fee: loan = (principal * 4.6) * 0.8 * 1.0029, converted = loan * 0.999.
const LOAN: u128 = 3690_6720000;
const CONVERTED: u128 = 3686_9813280;
const PREMIUM: u128 = 3_3216048;
const DEBT: u128 = LOAN + PREMIUM;
const TOTAL_COLLATERAL: u128 = PRINCIPAL + CONVERTED;

fn default_plan(setup: &Setup) -> RoutePlan {
    single_exchange_plan(
        &setup.e,
        &setup.venue.address,
        &setup.borrow_token.address,
        &setup.collateral_token.address,
        LOAN,
        CONVERTED,
    )
}

fn default_enter_request(setup: &Setup) -> LeverageRequest {
    LeverageRequest {
        user: setup.user.clone(),
        principal: PRINCIPAL,
        leverage_bps: LEVERAGE_BPS,
        borrow_token: setup.borrow_token.address.clone(),
        min_out_bps: 9900,
        plan: default_plan(setup),
    }
}

fn unwind_request(setup: &Setup, repay_amount: u128, release_amount: u128) -> UnwindRequest {
    UnwindRequest {
        user: setup.user.clone(),
        repay_amount,
        release_amount,
        slippage_bps: 30,
        repay_token: setup.borrow_token.address.clone(),
        min_out: 0,
        plan: default_plan(setup),
    }
}

#[test]
fn test_enter_position() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));

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

    // nothing sticks to the engine or the user wallet
    assert_eq!(setup.collateral_token.balance(&setup.user), 0);
    assert_eq!(setup.collateral_token.balance(&setup.engine.address), 0);
    assert_eq!(setup.borrow_token.balance(&setup.engine.address), 0);

    let account = setup.ledger.get_user_account_data(&setup.user);
    assert!(account.health_factor > 1_0000000);
    // 4686.98 * 0.85 / 3693.99 ~ 1.078
    assert_approx_eq_abs(account.health_factor, 1_0784897, 100);
}

#[test]
fn test_enter_position_split_across_paths() {
    let setup = Setup::default();

    // same single-hop conversion duplicated, input split evenly
    let rate_forward = exchange_hop(
        &setup.e,
        &setup.venue.address,
        &setup.borrow_token.address,
        &setup.collateral_token.address,
        0,
        1,
        1_0000000,
        9990000,
    );
    let rate_reverse = exchange_hop(
        &setup.e,
        &setup.venue.address,
        &setup.collateral_token.address,
        &setup.borrow_token.address,
        1,
        0,
        0,
        0,
    );
    let mut forward_path = Vec::new(&setup.e);
    forward_path.push_back(rate_forward);
    let mut reverse_path = Vec::new(&setup.e);
    reverse_path.push_back(rate_reverse);
    let mut forward_paths = Vec::new(&setup.e);
    forward_paths.push_back(forward_path.clone());
    forward_paths.push_back(forward_path);
    let mut reverse_paths = Vec::new(&setup.e);
    reverse_paths.push_back(reverse_path.clone());
    reverse_paths.push_back(reverse_path);

    let mut request = default_enter_request(&setup);
    request.plan = RoutePlan {
        forward_paths,
        reverse_paths,
        active_path_count: 2,
    };
    request.min_out_bps = 0;
    setup.engine.enter_position(&request);

    // split rounding costs at most a stroop per path
    let total = setup
        .ledger
        .collateral_of(&setup.user, &setup.collateral_token.address);
    assert_approx_eq_abs(total, TOTAL_COLLATERAL, 2);
    assert_eq!(
        setup.ledger.debt_of(&setup.user, &setup.borrow_token.address),
        DEBT
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_enter_zero_principal() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    request.principal = 0;
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_enter_zero_leverage() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    request.leverage_bps = 0;
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2002)")]
fn test_enter_unsupported_borrow_asset() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    // the collateral asset is not enabled for flash-borrowing
    request.borrow_token = setup.collateral_token.address.clone();
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2003)")]
fn test_enter_insufficient_collateral() {
    let setup = Setup::default();
    // ledger grants less borrowing power than the engine sizes against
    setup
        .ledger
        .set_asset(&setup.collateral_token.address, &5000, &8500);
    setup.engine.enter_position(&default_enter_request(&setup));
}

#[test]
#[should_panic(expected = "Error(Contract, #2004)")]
fn test_enter_user_not_whitelisted() {
    let setup = Setup::default();
    setup
        .whitelist
        .set_user_allowed(&setup.admin, &setup.vault, &setup.user, &false);
    setup.engine.enter_position(&default_enter_request(&setup));
}

#[test]
#[should_panic(expected = "Error(Contract, #2004)")]
fn test_enter_engine_not_whitelisted_caller() {
    let setup = Setup::default();
    setup.whitelist.set_caller_allowed(
        &setup.admin,
        &setup.vault,
        &setup.engine.address,
        &false,
    );
    setup.engine.enter_position(&default_enter_request(&setup));
}

#[test]
#[should_panic(expected = "Error(Contract, #2005)")]
fn test_enter_delegation_exceeded() {
    let setup = Setup::default();
    setup.ledger.approve_delegation(
        &setup.user,
        &setup.engine.address,
        &setup.borrow_token.address,
        &1_0000000,
    );
    setup.engine.enter_position(&default_enter_request(&setup));
}

#[test]
#[should_panic(expected = "Error(Contract, #2006)")]
fn test_enter_hop_slippage_exceeded() {
    let setup = Setup::default();
    // 200 bps venue fee against a 100 bps per-hop tolerance
    let mut coins = Vec::new(&setup.e);
    coins.push_back(setup.borrow_token.address.clone());
    coins.push_back(setup.collateral_token.address.clone());
    setup.venue.set_market(
        &setup.feed.address,
        &200,
        &coins,
        &setup.collateral_token.address,
    );
    setup.engine.enter_position(&default_enter_request(&setup));
}

#[test]
#[should_panic(expected = "Error(Contract, #2006)")]
fn test_enter_route_minimum_not_met() {
    let setup = Setup::default();
    // 50 bps fee clears the per-hop tolerance but not a full-quote floor
    let mut coins = Vec::new(&setup.e);
    coins.push_back(setup.borrow_token.address.clone());
    coins.push_back(setup.collateral_token.address.clone());
    setup.venue.set_market(
        &setup.feed.address,
        &50,
        &coins,
        &setup.collateral_token.address,
    );
    let mut request = default_enter_request(&setup);
    request.min_out_bps = 10000;
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2007)")]
fn test_enter_unsafe_position() {
    let setup = Setup::default();
    // borrow capacity is fine, liquidation threshold is not
    setup
        .ledger
        .set_asset(&setup.collateral_token.address, &8000, &7000);
    setup.engine.enter_position(&default_enter_request(&setup));
}

#[test]
#[should_panic(expected = "Error(Contract, #2010)")]
fn test_enter_path_too_long() {
    let setup = Setup::default();
    let hop = exchange_hop(
        &setup.e,
        &setup.venue.address,
        &setup.borrow_token.address,
        &setup.collateral_token.address,
        0,
        1,
        0,
        0,
    );
    let mut long_path = Vec::new(&setup.e);
    for _ in 0..4 {
        long_path.push_back(hop.clone());
    }
    let mut request = default_enter_request(&setup);
    request.plan.forward_paths.set(0, long_path);
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2011)")]
fn test_enter_unknown_hop_kind() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    let mut path = request.plan.forward_paths.get(0).unwrap();
    let mut hop = path.get(0).unwrap();
    hop.kind = 7;
    path.set(0, hop);
    request.plan.forward_paths.set(0, path);
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2013)")]
fn test_enter_path_endpoint_mismatch() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    // forward path ending in the borrow asset instead of the collateral
    let wrong = exchange_hop(
        &setup.e,
        &setup.venue.address,
        &setup.borrow_token.address,
        &setup.borrow_token.address,
        0,
        0,
        0,
        0,
    );
    let mut path = Vec::new(&setup.e);
    path.push_back(wrong);
    request.plan.forward_paths.set(0, path);
    setup.engine.enter_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2009)")]
fn test_enter_no_active_paths() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    request.plan.active_path_count = 0;
    setup.engine.enter_position(&request);
}

#[test]
fn test_sequential_partial_withdrawals_return_proportional_equity() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));

    // one position closed in successive 10/20/30/40% slices of whatever
    // debt is left after the previous step
    for close_bps in [1000u128, 2000, 3000, 4000] {
        let debt_before = setup.ledger.debt_of(&setup.user, &setup.borrow_token.address);
        let collateral_before = setup
            .ledger
            .collateral_of(&setup.user, &setup.collateral_token.address);
        let wallet_before = setup.collateral_token.balance(&setup.user) as u128
            + setup.borrow_token.balance(&setup.user) as u128;

        let repay_amount = debt_before * close_bps / 10000;
        let release_amount = collateral_before * close_bps / 10000;
        setup
            .engine
            .withdraw_position(&unwind_request(&setup, repay_amount, release_amount));

        assert_eq!(
            setup.ledger.debt_of(&setup.user, &setup.borrow_token.address),
            debt_before - repay_amount
        );
        assert_eq!(
            setup
                .ledger
                .collateral_of(&setup.user, &setup.collateral_token.address),
            collateral_before - release_amount
        );

        // each slice hands its equity share back as released collateral
        // plus swept dust, both priced 1.0 in the default setup
        let returned = setup.collateral_token.balance(&setup.user) as u128
            + setup.borrow_token.balance(&setup.user) as u128
            - wallet_before;
        let equity_share = release_amount - repay_amount;
        assert!(returned >= equity_share * 99 / 100);
        assert!(returned <= equity_share);

        let account = setup.ledger.get_user_account_data(&setup.user);
        assert!(account.health_factor > 1_0000000);
    }
}

#[test]
fn test_full_round_trip_keeps_most_of_the_principal() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));
    setup
        .engine
        .withdraw_position(&unwind_request(&setup, DEBT, TOTAL_COLLATERAL));

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

    // fees and premiums cost under 2% of the principal for a round trip
    let returned = setup.collateral_token.balance(&setup.user) as u128
        + setup.borrow_token.balance(&setup.user) as u128;
    assert!(returned >= PRINCIPAL * 98 / 100);
    assert!(returned < PRINCIPAL);
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_withdraw_zero_amounts() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));
    setup.engine.withdraw_position(&unwind_request(&setup, 0, 0));
}

#[test]
#[should_panic(expected = "Error(Contract, #2004)")]
fn test_withdraw_user_not_whitelisted() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));
    setup
        .whitelist
        .set_user_allowed(&setup.admin, &setup.vault, &setup.user, &false);
    setup
        .engine
        .withdraw_position(&unwind_request(&setup, DEBT / 10, TOTAL_COLLATERAL / 10));
}

#[test]
#[should_panic(expected = "Error(Contract, #2006)")]
fn test_withdraw_min_out_not_met() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));
    let mut request = unwind_request(&setup, DEBT / 10, TOTAL_COLLATERAL / 10);
    // asks for more than the venue can possibly produce
    request.min_out = DEBT;
    setup.engine.withdraw_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2008)")]
fn test_withdraw_without_headroom_cannot_repay() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));
    let mut request = unwind_request(&setup, DEBT / 10, TOTAL_COLLATERAL / 10);
    // zero slippage headroom leaves the venue fee uncovered
    request.slippage_bps = 0;
    setup.engine.withdraw_position(&request);
}

#[test]
#[should_panic(expected = "Error(Contract, #2003)")]
fn test_enter_wallet_short_of_principal() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);
    // one stroop more than the wallet holds
    request.principal = setup.collateral_token.balance(&setup.user) as u128 + 1;
    setup.engine.enter_position(&request);
}

#[test]
fn test_loan_premium_accrues_to_provider() {
    let setup = Setup::default();
    assert_eq!(setup.provider.premium_bps(), 9);

    let before = setup.borrow_token.balance(&setup.provider.address);
    setup.engine.enter_position(&default_enter_request(&setup));

    // the draw comes back in full inside the same call, plus the premium
    assert_eq!(
        setup.borrow_token.balance(&setup.provider.address),
        before + PREMIUM as i128
    );
}

#[test]
fn test_list_supported_borrow_assets() {
    let setup = Setup::default();
    let assets = setup.engine.list_supported_borrow_assets();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets.get(0).unwrap(), setup.borrow_token.address);

    setup
        .engine
        .set_borrow_token(&setup.admin, &setup.borrow_token.address, &false);
    assert_eq!(setup.engine.list_supported_borrow_assets().len(), 0);
}

#[test]
fn test_placeholder_hops_are_skipped() {
    let setup = Setup::default();
    let mut request = default_enter_request(&setup);

    // a disabled slot in front of the real conversion
    let placeholder = HopDescriptor {
        waypoints: Vec::new(&setup.e),
        hop_params: Vec::new(&setup.e),
        kind: 0,
        hop_count: 0,
        source_asset: setup.borrow_token.address.clone(),
        dest_asset: setup.borrow_token.address.clone(),
        expected_in: 0,
        expected_out: 0,
    };
    let mut path = request.plan.forward_paths.get(0).unwrap();
    path.push_front(placeholder);
    request.plan.forward_paths.set(0, path);

    setup.engine.enter_position(&request);
    assert_eq!(
        setup
            .ledger
            .collateral_of(&setup.user, &setup.collateral_token.address),
        TOTAL_COLLATERAL
    );
}

#[test]
fn test_multi_segment_hop() {
    let setup = Setup::default();

    // borrow -> collateral -> borrow -> collateral in one three-segment hop,
    // paying the venue fee three times
    let venue = &setup.venue.address;
    let borrow = &setup.borrow_token.address;
    let collateral = &setup.collateral_token.address;
    let mut waypoints = Vec::new(&setup.e);
    for address in [borrow, venue, collateral, venue, borrow, venue, collateral] {
        waypoints.push_back((*address).clone());
    }
    let mut hop_params = Vec::new(&setup.e);
    hop_params.push_back((0u32, 1u32, OP_EXCHANGE));
    hop_params.push_back((1u32, 0u32, OP_EXCHANGE));
    hop_params.push_back((0u32, 1u32, OP_EXCHANGE));
    let hop = HopDescriptor {
        waypoints,
        hop_params,
        kind: HOP_KIND_CURVE_STYLE,
        hop_count: 3,
        source_asset: borrow.clone(),
        dest_asset: collateral.clone(),
        expected_in: 0,
        expected_out: 0,
    };
    let mut path = Vec::new(&setup.e);
    path.push_back(hop);

    let mut request = default_enter_request(&setup);
    request.min_out_bps = 0;
    request.plan.forward_paths.set(0, path);
    setup.engine.enter_position(&request);

    // 0.999^3 of the loan instead of 0.999
    let expected = LOAN * 999 * 999 * 999 / 1_000_000_000;
    assert_approx_eq_abs(
        setup
            .ledger
            .collateral_of(&setup.user, &setup.collateral_token.address),
        PRINCIPAL + expected,
        10,
    );
}

#[test]
fn test_get_levers() {
    let setup = Setup::default();
    assert_eq!(setup.engine.get_levers(), (8000, 9, 20, 100));
}

#[test]
fn test_withdraw_leaves_position_healthy() {
    let setup = Setup::default();
    setup.engine.enter_position(&default_enter_request(&setup));

    let before = setup.ledger.get_user_account_data(&setup.user);
    setup
        .engine
        .withdraw_position(&unwind_request(&setup, DEBT / 4, TOTAL_COLLATERAL / 4));
    let after = setup.ledger.get_user_account_data(&setup.user);

    // proportional close keeps the health factor roughly unchanged
    assert_approx_eq_abs(after.health_factor, before.health_factor, 10000);
}
