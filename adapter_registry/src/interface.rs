use soroban_sdk::{Address, BytesN, Env, Map};

pub trait RegistryInterface {
    // Initialize admin user. Will panic if called twice
    fn init_admin(e: Env, account: Address);

    fn set_operations_admin(e: Env, admin: Address, account: Address);

    // Bind a collateral asset to its leverage engine instance
    fn set_adapter(e: Env, admin: Address, collateral: Address, engine: Address);

    fn remove_adapter(e: Env, admin: Address, collateral: Address);

    // Resolve the engine serving a collateral asset. Panics if none is bound
    fn resolve(e: Env, collateral: Address) -> Address;

    fn list_adapters(e: Env) -> Map<Address, Address>;
}

pub trait UpgradeableContract {
    // Get contract version
    fn version() -> u32;

    // Upgrade contract with new wasm code
    fn upgrade(e: Env, admin: Address, new_wasm_hash: BytesN<32>);
}
