use crate::constants::BPS;
use collaborator_interfaces::price::PRICE_PRECISION;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

// Pure position math. Prices are 7-decimal fixed point, ratios are bps.

// Flash amount needed to lift `principal` to the requested exposure.
// The target collateral is valued at the safe loan-to-value ratio and
// padded so the conversion losses and the provider premium still leave
// enough borrow-asset to settle the loan.
pub(crate) fn required_loan(
    e: &Env,
    principal: u128,
    leverage_bps: u32,
    collateral_price: u128,
    borrow_price: u128,
    safe_ltv_bps: u32,
    loan_premium_bps: u32,
    swap_loss_bps: u32,
) -> u128 {
    let target_collateral = principal + principal.fixed_mul_floor(e, &(leverage_bps as u128), &BPS);
    let target_value = target_collateral.fixed_mul_floor(e, &collateral_price, &PRICE_PRECISION);
    let borrowable_value = target_value.fixed_mul_floor(e, &(safe_ltv_bps as u128), &BPS);
    let loan = borrowable_value.fixed_mul_floor(e, &PRICE_PRECISION, &borrow_price);
    let padding_bps = (loan_premium_bps + swap_loss_bps) as u128;
    loan.fixed_mul_ceil(e, &(BPS + padding_bps), &BPS)
}

// Collateral to liquidate so the reverse conversion covers `obligation`
// units of the borrow asset with `slippage_bps` of headroom. Rounded up:
// shortfalls abort the whole operation, excess flows back to the user.
pub(crate) fn collateral_for_obligation(
    e: &Env,
    obligation: u128,
    collateral_price: u128,
    borrow_price: u128,
    slippage_bps: u32,
) -> u128 {
    let obligation_value = obligation.fixed_mul_ceil(e, &borrow_price, &PRICE_PRECISION);
    let raw_collateral = obligation_value.fixed_mul_ceil(e, &PRICE_PRECISION, &collateral_price);
    raw_collateral.fixed_mul_ceil(e, &(BPS + slippage_bps as u128), &BPS)
}

// Value of `amount` tokens at `price`, floored.
pub(crate) fn token_value(e: &Env, amount: u128, price: u128) -> u128 {
    amount.fixed_mul_floor(e, &price, &PRICE_PRECISION)
}
