use soroban_sdk::{contractclient, Address, Env};

// Prices are quoted with 7 decimals: 1_0000000 is one unit of account.
pub const PRICE_PRECISION: u128 = 1_0000000;

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn price(e: Env, token: Address) -> u128;
}
