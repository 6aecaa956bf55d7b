#![no_std]

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone)]
#[repr(u32)]
pub enum LeverageValidationError {
    InvalidAmount = 2001,
    UnsupportedAsset = 2002,
    InsufficientCollateral = 2003,
    NotWhitelisted = 2004,
    DelegationExceeded = 2005,
    SlippageExceeded = 2006,
    UnsafePosition = 2007,
    LoanRepaymentFailure = 2008,
    WrongInputVecSize = 2009,
    PathTooLong = 2010,
    UnknownHopKind = 2011,
    UnknownOperationCode = 2012,
    PathMismatch = 2013,
}
