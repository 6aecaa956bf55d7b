use crate::constants::{
    BPS, HOP_KIND_BATCH_SWAP, HOP_KIND_CURVE_STYLE, HOP_KIND_NONE, HOP_KIND_POOL_JOIN_EXIT,
    OP_ADD_LIQUIDITY_THREE_COIN, OP_ADD_LIQUIDITY_TWO_COIN, OP_EXCHANGE, OP_EXCHANGE_UNDERLYING,
    OP_EXIT, OP_JOIN, OP_REMOVE_LIQUIDITY_ONE_COIN,
};
use crate::plan::HopDescriptor;
use collaborator_interfaces::pools::{
    BatchSwapPoolClient, CurveStylePoolClient, JoinExitPoolClient,
};
use leverage_validation_errors::LeverageValidationError;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{panic_with_error, token::Client as SorobanTokenClient, Address, Env, Vec};

// Runs a single hop with the engine's own balance. Venues follow the
// transfer-then-call convention, so every segment pushes its input to the
// venue first and the venue pays the output back to the engine.
pub(crate) fn execute(
    e: &Env,
    hop: &HopDescriptor,
    amount_in: u128,
    hop_slippage_bps: u32,
) -> u128 {
    if amount_in == 0 {
        return 0;
    }

    let amount_out = match hop.kind {
        HOP_KIND_NONE => amount_in,
        HOP_KIND_POOL_JOIN_EXIT => execute_join_exit(e, hop, amount_in),
        HOP_KIND_BATCH_SWAP => execute_batch_swap(e, hop, amount_in),
        HOP_KIND_CURVE_STYLE => execute_curve_style(e, hop, amount_in),
        _ => panic_with_error!(e, LeverageValidationError::UnknownHopKind),
    };

    enforce_hop_minimum(e, hop, amount_in, amount_out, hop_slippage_bps);
    amount_out
}

fn execute_join_exit(e: &Env, hop: &HopDescriptor, amount_in: u128) -> u128 {
    let mut amount = amount_in;
    for segment in 0..hop.hop_count {
        let token = hop.waypoints.get(2 * segment).unwrap();
        let venue = hop.waypoints.get(2 * segment + 1).unwrap();
        let (in_idx, out_idx, op) = hop.hop_params.get(segment).unwrap();

        push_to_venue(e, &token, &venue, amount);
        let venue_client = JoinExitPoolClient::new(e, &venue);
        amount = match op {
            OP_JOIN => venue_client.join(&e.current_contract_address(), &in_idx, &amount),
            OP_EXIT => venue_client.exit(&e.current_contract_address(), &out_idx, &amount),
            _ => panic_with_error!(e, LeverageValidationError::UnknownOperationCode),
        };
    }
    amount
}

fn execute_batch_swap(e: &Env, hop: &HopDescriptor, amount_in: u128) -> u128 {
    let venue = hop.waypoints.get(0).unwrap();
    let assets: Vec<Address> = hop.waypoints.slice(1..hop.waypoints.len());

    let mut legs = Vec::new(e);
    for segment in 0..hop.hop_count {
        legs.push_back(hop.hop_params.get(segment).unwrap());
    }

    push_to_venue(e, &hop.source_asset, &venue, amount_in);
    BatchSwapPoolClient::new(e, &venue).batch_swap(
        &e.current_contract_address(),
        &assets,
        &legs,
        &amount_in,
    )
}

fn execute_curve_style(e: &Env, hop: &HopDescriptor, amount_in: u128) -> u128 {
    let mut amount = amount_in;
    for segment in 0..hop.hop_count {
        let token = hop.waypoints.get(2 * segment).unwrap();
        let venue = hop.waypoints.get(2 * segment + 1).unwrap();
        let (in_idx, out_idx, op) = hop.hop_params.get(segment).unwrap();

        push_to_venue(e, &token, &venue, amount);
        let venue_client = CurveStylePoolClient::new(e, &venue);
        amount = match op {
            OP_EXCHANGE => {
                venue_client.exchange(&e.current_contract_address(), &in_idx, &out_idx, &amount)
            }
            OP_EXCHANGE_UNDERLYING => venue_client.exchange_underlying(
                &e.current_contract_address(),
                &in_idx,
                &out_idx,
                &amount,
            ),
            OP_ADD_LIQUIDITY_TWO_COIN => {
                let amounts = single_sided_amounts(e, 2, in_idx, amount);
                venue_client.add_liquidity(&e.current_contract_address(), &amounts)
            }
            OP_ADD_LIQUIDITY_THREE_COIN => {
                let amounts = single_sided_amounts(e, 3, in_idx, amount);
                venue_client.add_liquidity(&e.current_contract_address(), &amounts)
            }
            OP_REMOVE_LIQUIDITY_ONE_COIN => venue_client.remove_liquidity_one_coin(
                &e.current_contract_address(),
                &amount,
                &out_idx,
            ),
            _ => panic_with_error!(e, LeverageValidationError::UnknownOperationCode),
        };
    }
    amount
}

fn single_sided_amounts(e: &Env, n_coins: u32, in_idx: u32, amount: u128) -> Vec<u128> {
    let mut amounts = Vec::new(e);
    for idx in 0..n_coins {
        amounts.push_back(if idx == in_idx { amount } else { 0 });
    }
    amounts
}

fn push_to_venue(e: &Env, token: &Address, venue: &Address, amount: u128) {
    SorobanTokenClient::new(e, token).transfer(
        &e.current_contract_address(),
        venue,
        &(amount as i128),
    );
}

// The planner quote scaled to the actual input, less the configured
// per-hop tolerance. Unquoted hops (expected_out == 0) pass unchecked.
fn enforce_hop_minimum(
    e: &Env,
    hop: &HopDescriptor,
    amount_in: u128,
    amount_out: u128,
    hop_slippage_bps: u32,
) {
    if hop.expected_out == 0 || hop.expected_in == 0 {
        return;
    }

    let scaled_quote = hop.expected_out.fixed_mul_floor(e, &amount_in, &hop.expected_in);
    let min_out = scaled_quote.fixed_mul_floor(
        e,
        &(BPS - hop_slippage_bps as u128),
        &BPS,
    );
    if amount_out < min_out {
        panic_with_error!(e, LeverageValidationError::SlippageExceeded);
    }
}
