use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AccessControlError {
    Unauthorized = 102,
    RoleNotFound = 104,
    AnotherActionActive = 106,
    ActionNotReadyYet = 107,
    NoActionActive = 108,
}
