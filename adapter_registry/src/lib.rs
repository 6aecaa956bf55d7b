#![no_std]

mod contract;
mod errors;
mod interface;
mod storage;

pub use crate::contract::{AdapterRegistry, AdapterRegistryClient};
