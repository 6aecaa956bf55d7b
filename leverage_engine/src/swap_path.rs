use crate::plan::SwapPath;
use crate::swap_hop;
use soroban_sdk::{Env, Vec};

fn run_path(e: &Env, path: &SwapPath, amount_in: u128, hop_slippage_bps: u32) -> u128 {
    let mut amount = amount_in;
    for hop in path.iter() {
        amount = swap_hop::execute(e, &hop, amount, hop_slippage_bps);
    }
    amount
}

// Splits the input evenly across the active paths, remainder to the last
// one, and sums whatever the venues actually produced. The end-to-end
// output bound is the caller's responsibility.
pub(crate) fn run_paths(
    e: &Env,
    paths: &Vec<SwapPath>,
    active_path_count: u32,
    amount_in: u128,
    hop_slippage_bps: u32,
) -> u128 {
    let share = amount_in / active_path_count as u128;
    let mut total_out = 0;
    for i in 0..active_path_count {
        let path = paths.get(i).unwrap();
        let path_in = if i == active_path_count - 1 {
            amount_in - share * (active_path_count as u128 - 1)
        } else {
            share
        };
        total_out += run_path(e, &path, path_in, hop_slippage_bps);
    }
    total_out
}
