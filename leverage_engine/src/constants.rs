pub const BPS: u128 = 10_000;

pub const MAX_PATHS: u32 = 3;
pub const MAX_HOPS_PER_PATH: u32 = 3;
pub const MAX_WAYPOINTS: u32 = 9;
pub const MAX_HOP_PARAMS: u32 = 4;

// Wire codes shared with existing route planners.
pub const HOP_KIND_NONE: u32 = 0;
pub const HOP_KIND_POOL_JOIN_EXIT: u32 = 1;
pub const HOP_KIND_BATCH_SWAP: u32 = 3;
pub const HOP_KIND_CURVE_STYLE: u32 = 4;

// Pool join/exit operation sub-codes, deployment-local.
pub const OP_JOIN: u32 = 1;
pub const OP_EXIT: u32 = 2;

// Curve-convention operation sub-codes, wire-bound.
pub const OP_EXCHANGE: u32 = 1;
pub const OP_EXCHANGE_UNDERLYING: u32 = 2;
pub const OP_ADD_LIQUIDITY_TWO_COIN: u32 = 7;
pub const OP_ADD_LIQUIDITY_THREE_COIN: u32 = 8;
pub const OP_REMOVE_LIQUIDITY_ONE_COIN: u32 = 12;

pub const RATE_MODE_VARIABLE: u32 = 2;
