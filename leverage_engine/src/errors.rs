use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LeverageEngineError {
    AlreadyInitialized = 201,
    BadLeverConfig = 202,
}
