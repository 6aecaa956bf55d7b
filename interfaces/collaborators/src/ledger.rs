use soroban_sdk::{contractclient, contracttype, Address, Env};

// Health factor and prices share 7-decimal fixed point.
pub const HEALTH_PRECISION: u128 = 1_0000000;

// Ledger-reported view of a user's aggregate position.
#[derive(Clone)]
#[contracttype]
pub struct AccountData {
    pub total_collateral_value: u128,
    pub total_debt_value: u128,
    pub available_borrow_value: u128,
    pub liquidation_threshold_bps: u32,
    pub health_factor: u128,
}

// Shared lending ledger. Deposits and repayments expect the funds to have
// been transferred to the ledger within the same invocation; borrows and
// withdrawals pay out to `to`.
#[contractclient(name = "LendingLedgerClient")]
pub trait LendingLedger {
    fn deposit(e: Env, token: Address, amount: u128, on_behalf_of: Address);

    fn withdraw(e: Env, token: Address, amount: u128, from: Address, to: Address);

    // Requires `on_behalf_of` to have delegated at least `amount` of
    // borrowing power for `token` to `to`.
    fn borrow(e: Env, token: Address, amount: u128, rate_mode: u32, on_behalf_of: Address, to: Address);

    fn repay(e: Env, token: Address, amount: u128, on_behalf_of: Address);

    fn approve_delegation(e: Env, user: Address, delegate: Address, token: Address, amount: u128);

    fn borrow_allowance(e: Env, user: Address, delegate: Address, token: Address) -> u128;

    fn get_user_account_data(e: Env, user: Address) -> AccountData;
}
