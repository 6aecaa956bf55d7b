use crate::access::{AccessControl, AccessControlTrait};
use crate::errors::AccessControlError;
use crate::role::Role;
use soroban_sdk::{panic_with_error, Address, Env};

pub fn require_admin(e: &Env, address: &Address) {
    let access_control = AccessControl::new(e);
    access_control.assert_address_has_role(address, &Role::Admin);
}

pub fn require_operations_admin_or_owner(e: &Env, address: &Address) {
    let access_control = AccessControl::new(e);
    let _ = access_control.address_has_role(&Role::OperationsAdmin, address)
        || access_control.address_has_role(&Role::Admin, address)
        || panic_with_error!(e, AccessControlError::Unauthorized);
}
