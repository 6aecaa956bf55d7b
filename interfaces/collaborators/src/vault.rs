use soroban_sdk::{contractclient, Address, Env};

// Per-collateral-family vault fronting the ledger deposit/withdrawal of the
// yield-bearing collateral. Deposits expect the collateral to have been
// transferred to the vault within the same invocation.
#[contractclient(name = "CollateralVaultClient")]
pub trait CollateralVault {
    fn deposit_collateral(e: Env, token: Address, amount: u128, on_behalf_of: Address);

    fn withdraw_collateral(
        e: Env,
        token: Address,
        amount: u128,
        slippage_bps: u32,
        on_behalf_of: Address,
        to: Address,
    );
}
