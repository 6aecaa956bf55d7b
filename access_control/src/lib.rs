#![no_std]

pub mod access;
pub mod constants;
pub mod errors;
pub mod interface;
pub mod role;
mod storage;
pub mod transfer;
pub mod utils;
