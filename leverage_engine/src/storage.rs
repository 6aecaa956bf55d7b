use paste::paste;
use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};
use utils::bump::bump_instance;
use utils::storage_errors::StorageError;
use utils::{
    generate_instance_storage_getter, generate_instance_storage_getter_and_setter,
    generate_instance_storage_setter,
};

#[derive(Clone)]
#[contracttype]
enum DataKey {
    CollateralToken,
    CollateralVault,
    Ledger,
    LoanProvider,
    Whitelist,
    PriceFeed,
    BorrowTokens,
    SafeLtvBps,
    LoanPremiumBps,
    SwapLossBps,
    HopSlippageBps,
}

generate_instance_storage_getter_and_setter!(
    collateral_token,
    DataKey::CollateralToken,
    Address
);
generate_instance_storage_getter_and_setter!(
    collateral_vault,
    DataKey::CollateralVault,
    Address
);
generate_instance_storage_getter_and_setter!(ledger, DataKey::Ledger, Address);
generate_instance_storage_getter_and_setter!(loan_provider, DataKey::LoanProvider, Address);
generate_instance_storage_getter_and_setter!(whitelist, DataKey::Whitelist, Address);
generate_instance_storage_getter_and_setter!(price_feed, DataKey::PriceFeed, Address);
generate_instance_storage_getter_and_setter!(safe_ltv_bps, DataKey::SafeLtvBps, u32);
generate_instance_storage_getter_and_setter!(loan_premium_bps, DataKey::LoanPremiumBps, u32);
generate_instance_storage_getter_and_setter!(swap_loss_bps, DataKey::SwapLossBps, u32);
generate_instance_storage_getter_and_setter!(hop_slippage_bps, DataKey::HopSlippageBps, u32);

pub fn get_borrow_tokens(e: &Env) -> Vec<Address> {
    bump_instance(e);
    e.storage()
        .instance()
        .get(&DataKey::BorrowTokens)
        .unwrap_or(Vec::new(e))
}

pub fn is_supported_borrow_token(e: &Env, token: &Address) -> bool {
    get_borrow_tokens(e).contains(token)
}

pub fn add_borrow_token(e: &Env, token: &Address) {
    let mut tokens = get_borrow_tokens(e);
    if tokens.contains(token) {
        return;
    }
    tokens.push_back(token.clone());
    bump_instance(e);
    e.storage().instance().set(&DataKey::BorrowTokens, &tokens);
}

pub fn remove_borrow_token(e: &Env, token: &Address) {
    let mut tokens = get_borrow_tokens(e);
    if let Some(index) = tokens.first_index_of(token) {
        tokens.remove(index);
        bump_instance(e);
        e.storage().instance().set(&DataKey::BorrowTokens, &tokens);
    }
}

pub fn has_collateral_token(e: &Env) -> bool {
    bump_instance(e);
    e.storage().instance().has(&DataKey::CollateralToken)
}
