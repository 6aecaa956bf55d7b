use crate::plan::{LeverageRequest, UnwindRequest};
use soroban_sdk::{Address, BytesN, Env, Vec};

pub trait LeverageEngineTrait {
    // Set up the engine against its collaborators. `levers` is
    // (safe_ltv_bps, loan_premium_bps, swap_loss_bps, hop_slippage_bps).
    // Will panic if called twice
    fn initialize(
        e: Env,
        admin: Address,
        collateral_token: Address,
        collateral_vault: Address,
        ledger: Address,
        loan_provider: Address,
        whitelist: Address,
        price_feed: Address,
        levers: (u32, u32, u32, u32),
    );

    // Open or grow a leveraged position. Pulls `principal` collateral from
    // the user, draws the sized loan from the provider, converts it along
    // the plan's forward paths, commits collateral and debt to the ledger
    // on the user's behalf and settles the draw, all in one straight-line
    // call. Any step failing reverts the whole thing.
    fn enter_position(e: Env, request: LeverageRequest);

    // Close part or all of a position: draw the repayment from the
    // provider, settle the user's debt, pull released collateral out of
    // the vault, convert just enough of it back to the borrow asset to
    // settle the draw and return the rest to the user.
    fn withdraw_position(e: Env, request: UnwindRequest);

    fn list_supported_borrow_assets(e: Env) -> Vec<Address>;

    fn get_levers(e: Env) -> (u32, u32, u32, u32);
}

pub trait AdminInterfaceTrait {
    fn set_operations_admin(e: Env, admin: Address, account: Address);

    // Enable or disable an asset for flash-borrowing
    fn set_borrow_token(e: Env, admin: Address, token: Address, enabled: bool);

    fn set_levers(e: Env, admin: Address, levers: (u32, u32, u32, u32));

    fn set_whitelist(e: Env, admin: Address, whitelist: Address);

    fn set_price_feed(e: Env, admin: Address, price_feed: Address);

    fn set_loan_provider(e: Env, admin: Address, loan_provider: Address);
}

pub trait UpgradeableContract {
    // Get contract version
    fn version() -> u32;

    // Upgrade contract with new wasm code
    fn upgrade(e: Env, admin: Address, new_wasm_hash: BytesN<32>);
}
