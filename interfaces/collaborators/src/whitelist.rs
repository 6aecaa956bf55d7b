use soroban_sdk::{contractclient, Address, Env};

// Capability table gating which (vault, caller) and (vault, user) pairs may
// move positions through an engine. Absent entries read as not allowed.
#[contractclient(name = "WhitelistClient")]
pub trait Whitelist {
    fn caller_allowed(e: Env, vault: Address, caller: Address) -> bool;

    fn user_allowed(e: Env, vault: Address, user: Address) -> bool;
}
