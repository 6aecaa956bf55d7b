use soroban_sdk::{Address, BytesN, Env};

pub trait ManagedWhitelist {
    // Initialize admin user. Will panic if called twice
    fn init_admin(e: Env, account: Address);

    fn set_operations_admin(e: Env, admin: Address, account: Address);

    // Allow or revoke a (vault, caller) pair
    fn set_caller_allowed(e: Env, admin: Address, vault: Address, caller: Address, allowed: bool);

    // Allow or revoke a (vault, user) pair
    fn set_user_allowed(e: Env, admin: Address, vault: Address, user: Address, allowed: bool);
}

pub trait UpgradeableContract {
    // Get contract version
    fn version() -> u32;

    // Upgrade contract with new wasm code
    fn upgrade(e: Env, admin: Address, new_wasm_hash: BytesN<32>);
}
