#![no_std]

mod contract;
mod errors;
mod interface;
mod storage;
mod test;

pub use crate::contract::{WhitelistContract, WhitelistContractClient};
