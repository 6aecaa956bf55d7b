use crate::constants::{
    HOP_KIND_BATCH_SWAP, HOP_KIND_CURVE_STYLE, HOP_KIND_NONE, HOP_KIND_POOL_JOIN_EXIT,
    MAX_HOPS_PER_PATH, MAX_HOP_PARAMS, MAX_PATHS, MAX_WAYPOINTS,
};
use leverage_validation_errors::LeverageValidationError;
use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

// One conversion step through a single venue convention. Waypoints follow
// the curve-router layout: `[asset, venue, asset, venue, asset, ...]`, so
// segment k trades waypoints[2k] -> waypoints[2k+2] on venue
// waypoints[2k+1] with params hop_params[k] = (in_idx, out_idx, op).
// For BATCH_SWAP hops waypoints[0] is the settlement contract and the rest
// is the leg asset list.
#[derive(Clone)]
#[contracttype]
pub struct HopDescriptor {
    pub waypoints: Vec<Address>,
    pub hop_params: Vec<(u32, u32, u32)>,
    pub kind: u32,
    pub hop_count: u32,
    pub source_asset: Address,
    pub dest_asset: Address,
    pub expected_in: u128,
    pub expected_out: u128,
}

pub type SwapPath = Vec<HopDescriptor>;

// Forward paths convert the borrow asset into collateral; reverse paths are
// their asset mirrors used when closing. Input is split evenly across the
// active paths, remainder to the last one.
#[derive(Clone)]
#[contracttype]
pub struct RoutePlan {
    pub forward_paths: Vec<SwapPath>,
    pub reverse_paths: Vec<SwapPath>,
    pub active_path_count: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct LeverageRequest {
    pub user: Address,
    pub principal: u128,
    pub leverage_bps: u32,
    pub borrow_token: Address,
    pub min_out_bps: u32,
    pub plan: RoutePlan,
}

#[derive(Clone)]
#[contracttype]
pub struct UnwindRequest {
    pub user: Address,
    pub repay_amount: u128,
    pub release_amount: u128,
    pub slippage_bps: u32,
    pub repay_token: Address,
    pub min_out: u128,
    pub plan: RoutePlan,
}

pub(crate) fn validate_plan(e: &Env, plan: &RoutePlan, source: &Address, dest: &Address) {
    if plan.active_path_count == 0 || plan.active_path_count > MAX_PATHS {
        panic_with_error!(e, LeverageValidationError::WrongInputVecSize);
    }
    if plan.forward_paths.len() < plan.active_path_count
        || plan.reverse_paths.len() < plan.active_path_count
    {
        panic_with_error!(e, LeverageValidationError::WrongInputVecSize);
    }

    for i in 0..plan.active_path_count {
        let forward = plan.forward_paths.get(i).unwrap();
        let reverse = plan.reverse_paths.get(i).unwrap();
        validate_path(e, &forward);
        validate_path(e, &reverse);

        // forward converts source -> dest, its mirror dest -> source
        require_endpoints(e, &forward, source, dest);
        require_endpoints(e, &reverse, dest, source);
    }
}

fn validate_path(e: &Env, path: &SwapPath) {
    if path.is_empty() {
        panic_with_error!(e, LeverageValidationError::WrongInputVecSize);
    }
    if path.len() > MAX_HOPS_PER_PATH {
        panic_with_error!(e, LeverageValidationError::PathTooLong);
    }

    let mut previous_dest: Option<Address> = None;
    for hop in path.iter() {
        validate_hop(e, &hop);
        if hop.kind == HOP_KIND_NONE {
            continue;
        }
        if let Some(expected_source) = previous_dest {
            if hop.source_asset != expected_source {
                panic_with_error!(e, LeverageValidationError::PathMismatch);
            }
        }
        previous_dest = Some(hop.dest_asset.clone());
    }
}

fn validate_hop(e: &Env, hop: &HopDescriptor) {
    match hop.kind {
        HOP_KIND_NONE => return,
        HOP_KIND_POOL_JOIN_EXIT | HOP_KIND_BATCH_SWAP | HOP_KIND_CURVE_STYLE => {}
        _ => panic_with_error!(e, LeverageValidationError::UnknownHopKind),
    }

    if hop.waypoints.len() > MAX_WAYPOINTS || hop.hop_params.len() > MAX_HOP_PARAMS {
        panic_with_error!(e, LeverageValidationError::WrongInputVecSize);
    }
    if hop.hop_count == 0 || hop.hop_count > hop.hop_params.len() {
        panic_with_error!(e, LeverageValidationError::WrongInputVecSize);
    }

    // every populated segment needs its waypoints in place
    let required_waypoints = match hop.kind {
        HOP_KIND_BATCH_SWAP => 2,
        _ => 2 * hop.hop_count + 1,
    };
    if hop.waypoints.len() < required_waypoints {
        panic_with_error!(e, LeverageValidationError::WrongInputVecSize);
    }
}

fn require_endpoints(e: &Env, path: &SwapPath, source: &Address, dest: &Address) {
    let mut first: Option<Address> = None;
    let mut last: Option<Address> = None;
    for hop in path.iter() {
        if hop.kind == HOP_KIND_NONE {
            continue;
        }
        if first.is_none() {
            first = Some(hop.source_asset.clone());
        }
        last = Some(hop.dest_asset.clone());
    }
    match (first, last) {
        (Some(first), Some(last)) => {
            if &first != source || &last != dest {
                panic_with_error!(e, LeverageValidationError::PathMismatch);
            }
        }
        // a pure-placeholder path only makes sense when no conversion is
        // needed at all, i.e. source and dest coincide
        _ => {
            if source != dest {
                panic_with_error!(e, LeverageValidationError::PathMismatch);
            }
        }
    }
}

// Planner estimate of the total output across active paths, used as the
// baseline for the end-to-end minimum-output bound.
pub(crate) fn expected_total_out(paths: &Vec<SwapPath>, active_path_count: u32) -> u128 {
    let mut total = 0;
    for i in 0..active_path_count {
        let path = paths.get(i).unwrap();
        if let Some(hop) = path.last() {
            total += hop.expected_out;
        }
    }
    total
}
