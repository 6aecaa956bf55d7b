use crate::errors::WhitelistError;
use crate::interface::{ManagedWhitelist, UpgradeableContract};
use crate::storage::{get_caller_entry, get_user_entry, set_caller_entry, set_user_entry};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use access_control::utils::require_operations_admin_or_owner;
use collaborator_interfaces::whitelist::Whitelist;
use soroban_sdk::{
    contract, contractimpl, contractmeta, panic_with_error, Address, BytesN, Env, Symbol,
};

contractmeta!(
    key = "Description",
    val = "Capability table gating leverage engine access per vault"
);

#[contract]
pub struct WhitelistContract;

#[contractimpl]
impl ManagedWhitelist for WhitelistContract {
    fn init_admin(e: Env, account: Address) {
        let access_control = AccessControl::new(&e);
        if access_control.has_admin() {
            panic_with_error!(&e, WhitelistError::AlreadyInitialized);
        }
        access_control.set_role_address(&Role::Admin, &account);
    }

    fn set_operations_admin(e: Env, admin: Address, account: Address) {
        admin.require_auth();
        let access_control = AccessControl::new(&e);
        access_control.assert_address_has_role(&admin, &Role::Admin);
        access_control.set_role_address(&Role::OperationsAdmin, &account);
    }

    fn set_caller_allowed(e: Env, admin: Address, vault: Address, caller: Address, allowed: bool) {
        admin.require_auth();
        require_operations_admin_or_owner(&e, &admin);

        set_caller_entry(&e, &vault, &caller, allowed);

        e.events().publish(
            (Symbol::new(&e, "set_caller_allowed"), vault, caller),
            allowed,
        );
    }

    fn set_user_allowed(e: Env, admin: Address, vault: Address, user: Address, allowed: bool) {
        admin.require_auth();
        require_operations_admin_or_owner(&e, &admin);

        set_user_entry(&e, &vault, &user, allowed);

        e.events()
            .publish((Symbol::new(&e, "set_user_allowed"), vault, user), allowed);
    }
}

#[contractimpl]
impl Whitelist for WhitelistContract {
    fn caller_allowed(e: Env, vault: Address, caller: Address) -> bool {
        get_caller_entry(&e, &vault, &caller)
    }

    fn user_allowed(e: Env, vault: Address, user: Address) -> bool {
        get_user_entry(&e, &vault, &user)
    }
}

#[contractimpl]
impl UpgradeableContract for WhitelistContract {
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
