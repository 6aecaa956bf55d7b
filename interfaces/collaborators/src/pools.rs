use soroban_sdk::{contractclient, Address, Env, Vec};

// All pool conventions follow transfer-then-call: the caller pushes the
// input tokens to the venue first, the venue pays the output out to `to`
// and returns the produced amount.

// Single-sided deposit into / withdrawal from a pooled-liquidity token.
#[contractclient(name = "JoinExitPoolClient")]
pub trait JoinExitPool {
    fn join(e: Env, to: Address, coin_idx: u32, in_amount: u128) -> u128;

    fn exit(e: Env, to: Address, coin_idx: u32, in_amount: u128) -> u128;
}

// Venue settling multiple swap legs atomically in one call. `legs` entries
// are (asset_in_idx, asset_out_idx, pool_code) over the `assets` list.
#[contractclient(name = "BatchSwapPoolClient")]
pub trait BatchSwapPool {
    fn batch_swap(
        e: Env,
        to: Address,
        assets: Vec<Address>,
        legs: Vec<(u32, u32, u32)>,
        in_amount: u128,
    ) -> u128;
}

// Curve-convention pool: indexed coin exchange plus N-coin liquidity ops.
#[contractclient(name = "CurveStylePoolClient")]
pub trait CurveStylePool {
    fn exchange(e: Env, to: Address, in_idx: u32, out_idx: u32, in_amount: u128) -> u128;

    fn exchange_underlying(e: Env, to: Address, in_idx: u32, out_idx: u32, in_amount: u128)
        -> u128;

    fn add_liquidity(e: Env, to: Address, amounts: Vec<u128>) -> u128;

    fn remove_liquidity_one_coin(e: Env, to: Address, share_amount: u128, out_idx: u32) -> u128;
}
