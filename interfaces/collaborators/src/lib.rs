#![no_std]

pub mod ledger;
pub mod loan;
pub mod pools;
pub mod price;
pub mod vault;
pub mod whitelist;
