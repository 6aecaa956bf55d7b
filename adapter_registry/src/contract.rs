use crate::errors::AdapterRegistryError;
use crate::interface::{RegistryInterface, UpgradeableContract};
use crate::storage::{
    get_adapter, get_collaterals_list, has_adapter, put_adapter, remove_adapter,
};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use access_control::utils::require_operations_admin_or_owner;
use soroban_sdk::{
    contract, contractimpl, contractmeta, panic_with_error, Address, BytesN, Env, Map, Symbol,
};

contractmeta!(
    key = "Description",
    val = "Registry mapping collateral assets to leverage engines"
);

#[contract]
pub struct AdapterRegistry;

#[contractimpl]
impl RegistryInterface for AdapterRegistry {
    fn init_admin(e: Env, account: Address) {
        let access_control = AccessControl::new(&e);
        if access_control.has_admin() {
            panic_with_error!(&e, AdapterRegistryError::AlreadyInitialized);
        }
        access_control.set_role_address(&Role::Admin, &account);
    }

    fn set_operations_admin(e: Env, admin: Address, account: Address) {
        admin.require_auth();
        let access_control = AccessControl::new(&e);
        access_control.assert_address_has_role(&admin, &Role::Admin);
        access_control.set_role_address(&Role::OperationsAdmin, &account);
    }

    fn set_adapter(e: Env, admin: Address, collateral: Address, engine: Address) {
        admin.require_auth();
        require_operations_admin_or_owner(&e, &admin);

        put_adapter(&e, &collateral, &engine);

        e.events()
            .publish((Symbol::new(&e, "set_adapter"), collateral), engine);
    }

    fn remove_adapter(e: Env, admin: Address, collateral: Address) {
        admin.require_auth();
        require_operations_admin_or_owner(&e, &admin);

        remove_adapter(&e, &collateral);

        e.events()
            .publish((Symbol::new(&e, "remove_adapter"), collateral), ());
    }

    fn resolve(e: Env, collateral: Address) -> Address {
        get_adapter(&e, &collateral)
    }

    fn list_adapters(e: Env) -> Map<Address, Address> {
        let mut adapters = Map::new(&e);
        for collateral in get_collaterals_list(&e) {
            if has_adapter(&e, &collateral) {
                adapters.set(collateral.clone(), get_adapter(&e, &collateral));
            }
        }
        adapters
    }
}

#[contractimpl]
impl UpgradeableContract for AdapterRegistry {
    fn version() -> u32 {
        100
    }

    fn upgrade(e: Env, admin: Address, new_wasm_hash: BytesN<32>) {
        admin.require_auth();
        let access_control = AccessControl::new(&e);
        access_control.assert_address_has_role(&admin, &Role::Admin);
        e.deployer().update_current_contract_wasm(new_wasm_hash);
    }
}
