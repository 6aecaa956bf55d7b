use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AdapterRegistryError {
    AdapterNotFound = 301,
    AlreadyInitialized = 302,
}
