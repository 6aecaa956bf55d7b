#![no_std]

mod constants;
mod contract;
mod errors;
mod events;
mod interface;
mod plan;
mod sizing;
mod storage;
mod swap_hop;
mod swap_path;
pub mod testutils;

mod test;
mod test_permissions;

pub use crate::contract::{LeverageEngine, LeverageEngineClient};
pub use crate::plan::{HopDescriptor, LeverageRequest, RoutePlan, SwapPath, UnwindRequest};

pub use crate::constants::{
    HOP_KIND_BATCH_SWAP, HOP_KIND_CURVE_STYLE, HOP_KIND_NONE, HOP_KIND_POOL_JOIN_EXIT, OP_ADD_LIQUIDITY_THREE_COIN,
    OP_ADD_LIQUIDITY_TWO_COIN, OP_EXCHANGE, OP_EXCHANGE_UNDERLYING, OP_EXIT, OP_JOIN,
    OP_REMOVE_LIQUIDITY_ONE_COIN,
};
