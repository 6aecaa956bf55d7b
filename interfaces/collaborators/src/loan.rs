use soroban_sdk::{contractclient, Address, Env};

// Single-use loan provider driven straight-line by the borrower. `draw`
// transfers `amount` of `token` to `receiver`, records the obligation and
// returns the premium owed on top; `settle` panics unless `amount + premium`
// is back on the provider balance and then clears the record. Both calls
// must land inside the same invocation, so an unsettled draw can never
// outlive the transaction that opened it.
#[contractclient(name = "FlashLoanProviderClient")]
pub trait FlashLoanProvider {
    fn premium_bps(e: Env) -> u32;

    fn draw(e: Env, receiver: Address, token: Address, amount: u128) -> u128;

    fn settle(e: Env, receiver: Address, token: Address);
}
