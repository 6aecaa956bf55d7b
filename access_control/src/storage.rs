use soroban_sdk::{contracttype, Env};
use utils::bump::bump_instance;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    FutureAdmin,
    OperationsAdmin,

    TransferOwnershipDeadline,
}

pub fn get_transfer_ownership_deadline(e: &Env) -> u64 {
    bump_instance(e);
    e.storage()
        .instance()
        .get(&DataKey::TransferOwnershipDeadline)
        .unwrap_or(0)
}

pub fn put_transfer_ownership_deadline(e: &Env, value: &u64) {
    bump_instance(e);
    e.storage()
        .instance()
        .set(&DataKey::TransferOwnershipDeadline, value);
}
