use crate::constants::{BPS, RATE_MODE_VARIABLE};
use crate::errors::LeverageEngineError;
use crate::events::{Events, LeverageEngineEvents};
use crate::interface::{AdminInterfaceTrait, LeverageEngineTrait, UpgradeableContract};
use crate::plan::{self, LeverageRequest, UnwindRequest};
use crate::sizing;
use crate::storage::{
    add_borrow_token, get_collateral_token, get_collateral_vault, get_hop_slippage_bps,
    get_ledger, get_loan_premium_bps, get_loan_provider, get_price_feed,
    get_safe_ltv_bps, get_swap_loss_bps, get_whitelist, has_collateral_token,
    is_supported_borrow_token, remove_borrow_token, set_collateral_token, set_collateral_vault,
    set_hop_slippage_bps, set_ledger, set_loan_premium_bps, set_loan_provider, set_price_feed,
    set_safe_ltv_bps, set_swap_loss_bps, set_whitelist,
};
use crate::swap_path;
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::interface::TransferableContract;
use access_control::role::Role;
use access_control::transfer::TransferOwnershipTrait;
use access_control::utils::{require_admin, require_operations_admin_or_owner};
use collaborator_interfaces::ledger::{LendingLedgerClient, HEALTH_PRECISION};
use collaborator_interfaces::loan::FlashLoanProviderClient;
use collaborator_interfaces::price::PriceFeedClient;
use collaborator_interfaces::vault::CollateralVaultClient;
use collaborator_interfaces::whitelist::WhitelistClient;
use leverage_validation_errors::LeverageValidationError;
use soroban_sdk::{
    contract, contractimpl, contractmeta, panic_with_error, token::Client as SorobanTokenClient,
    Address, BytesN, Env, Vec,
};

contractmeta!(
    key = "Description",
    val = "Atomic leveraged position adjustment over a shared lending ledger"
);

#[contract]
pub struct LeverageEngine;

#[contractimpl]
impl LeverageEngineTrait for LeverageEngine {
    fn initialize(
        e: Env,
        admin: Address,
        collateral_token: Address,
        collateral_vault: Address,
        ledger: Address,
        loan_provider: Address,
        whitelist: Address,
        price_feed: Address,
        levers: (u32, u32, u32, u32),
    ) {
        let access_control = AccessControl::new(&e);
        if access_control.has_admin() || has_collateral_token(&e) {
            panic_with_error!(&e, LeverageEngineError::AlreadyInitialized);
        }
        access_control.set_role_address(&Role::Admin, &admin);

        set_collateral_token(&e, &collateral_token);
        set_collateral_vault(&e, &collateral_vault);
        set_ledger(&e, &ledger);
        set_loan_provider(&e, &loan_provider);
        set_whitelist(&e, &whitelist);
        set_price_feed(&e, &price_feed);
        put_levers(&e, levers);
    }

    fn enter_position(e: Env, request: LeverageRequest) {
        request.user.require_auth();

        if request.principal == 0 || request.leverage_bps == 0 {
            panic_with_error!(&e, LeverageValidationError::InvalidAmount);
        }
        if !is_supported_borrow_token(&e, &request.borrow_token) {
            panic_with_error!(&e, LeverageValidationError::UnsupportedAsset);
        }

        let collateral_token = get_collateral_token(&e);
        plan::validate_plan(&e, &request.plan, &request.borrow_token, &collateral_token);

        let price_feed = PriceFeedClient::new(&e, &get_price_feed(&e));
        let collateral_price = price_feed.price(&collateral_token);
        let borrow_price = price_feed.price(&request.borrow_token);
        let loan_amount = sizing::required_loan(
            &e,
            request.principal,
            request.leverage_bps,
            collateral_price,
            borrow_price,
            get_safe_ltv_bps(&e),
            get_loan_premium_bps(&e),
            get_swap_loss_bps(&e),
        );
        if loan_amount == 0 {
            panic_with_error!(&e, LeverageValidationError::InvalidAmount);
        }

        // stage the user's own collateral before the loan lands
        let collateral_client = SorobanTokenClient::new(&e, &collateral_token);
        if (collateral_client.balance(&request.user) as u128) < request.principal {
            panic_with_error!(&e, LeverageValidationError::InsufficientCollateral);
        }
        collateral_client.transfer(
            &request.user,
            &e.current_contract_address(),
            &(request.principal as i128),
        );

        let premium = FlashLoanProviderClient::new(&e, &get_loan_provider(&e)).draw(
            &e.current_contract_address(),
            &request.borrow_token,
            &loan_amount,
        );
        enter_with_loan(&e, &request.borrow_token, loan_amount, premium, &request);
    }

    fn withdraw_position(e: Env, request: UnwindRequest) {
        request.user.require_auth();

        if request.repay_amount == 0 || request.release_amount == 0 {
            panic_with_error!(&e, LeverageValidationError::InvalidAmount);
        }
        if !is_supported_borrow_token(&e, &request.repay_token) {
            panic_with_error!(&e, LeverageValidationError::UnsupportedAsset);
        }

        let collateral_token = get_collateral_token(&e);
        plan::validate_plan(&e, &request.plan, &request.repay_token, &collateral_token);

        let premium = FlashLoanProviderClient::new(&e, &get_loan_provider(&e)).draw(
            &e.current_contract_address(),
            &request.repay_token,
            &request.repay_amount,
        );
        unwind_with_loan(&e, &request.repay_token, request.repay_amount, premium, &request);
    }

    fn list_supported_borrow_assets(e: Env) -> Vec<Address> {
        crate::storage::get_borrow_tokens(&e)
    }

    fn get_levers(e: Env) -> (u32, u32, u32, u32) {
        (
            get_safe_ltv_bps(&e),
            get_loan_premium_bps(&e),
            get_swap_loss_bps(&e),
            get_hop_slippage_bps(&e),
        )
    }
}

// Post-draw half of a position entry. The engine already holds the user's
// principal and the freshly drawn borrow-asset here.
fn enter_with_loan(
    e: &Env,
    loan_token: &Address,
    loan_amount: u128,
    premium: u128,
    request: &LeverageRequest,
) {
    let collateral_token = get_collateral_token(e);
    let vault = get_collateral_vault(e);
    let self_address = e.current_contract_address();

    let converted = swap_path::run_paths(
        e,
        &request.plan.forward_paths,
        request.plan.active_path_count,
        loan_amount,
        get_hop_slippage_bps(e),
    );
    enforce_route_minimum(
        e,
        &request.plan.forward_paths,
        request.plan.active_path_count,
        converted,
        request.min_out_bps,
    );

    require_whitelisted(e, &vault, &request.user);

    // everything the user now owns goes through the vault
    let total_collateral = request.principal + converted;
    SorobanTokenClient::new(e, &collateral_token).transfer(
        &self_address,
        &vault,
        &(total_collateral as i128),
    );
    CollateralVaultClient::new(e, &vault).deposit_collateral(
        &collateral_token,
        &total_collateral,
        &request.user,
    );

    let debt = loan_amount + premium;
    let ledger = LendingLedgerClient::new(e, &get_ledger(e));
    if ledger.borrow_allowance(&request.user, &self_address, loan_token) < debt {
        panic_with_error!(e, LeverageValidationError::DelegationExceeded);
    }

    let borrow_price = PriceFeedClient::new(e, &get_price_feed(e)).price(loan_token);
    let debt_value = sizing::token_value(e, debt, borrow_price);
    if ledger
        .get_user_account_data(&request.user)
        .available_borrow_value
        < debt_value
    {
        panic_with_error!(e, LeverageValidationError::InsufficientCollateral);
    }

    ledger.borrow(
        loan_token,
        &debt,
        &RATE_MODE_VARIABLE,
        &request.user,
        &self_address,
    );

    settle_loan(e, loan_token, debt, &request.user);

    if ledger.get_user_account_data(&request.user).health_factor <= HEALTH_PRECISION {
        panic_with_error!(e, LeverageValidationError::UnsafePosition);
    }

    Events::new(e).enter_position(
        request.user.clone(),
        request.principal,
        loan_amount,
        total_collateral,
        debt,
    );
}

// Post-draw half of a position unwind. The engine holds `loan_amount` of
// the borrow asset to clear debt with before touching the collateral.
fn unwind_with_loan(
    e: &Env,
    loan_token: &Address,
    loan_amount: u128,
    premium: u128,
    request: &UnwindRequest,
) {
    let collateral_token = get_collateral_token(e);
    let vault = get_collateral_vault(e);
    let self_address = e.current_contract_address();

    require_whitelisted(e, &vault, &request.user);

    let ledger_address = get_ledger(e);
    let ledger = LendingLedgerClient::new(e, &ledger_address);
    SorobanTokenClient::new(e, loan_token).transfer(
        &self_address,
        &ledger_address,
        &(loan_amount as i128),
    );
    ledger.repay(loan_token, &loan_amount, &request.user);

    CollateralVaultClient::new(e, &vault).withdraw_collateral(
        &collateral_token,
        &request.release_amount,
        &request.slippage_bps,
        &request.user,
        &self_address,
    );

    let obligation = loan_amount + premium;
    let price_feed = PriceFeedClient::new(e, &get_price_feed(e));
    let collateral_needed = sizing::collateral_for_obligation(
        e,
        obligation,
        price_feed.price(&collateral_token),
        price_feed.price(loan_token),
        request.slippage_bps,
    );
    let to_convert = if collateral_needed < request.release_amount {
        collateral_needed
    } else {
        request.release_amount
    };

    let proceeds = swap_path::run_paths(
        e,
        &request.plan.reverse_paths,
        request.plan.active_path_count,
        to_convert,
        get_hop_slippage_bps(e),
    );
    if proceeds < request.min_out {
        panic_with_error!(e, LeverageValidationError::SlippageExceeded);
    }
    if proceeds < obligation {
        panic_with_error!(e, LeverageValidationError::LoanRepaymentFailure);
    }

    settle_loan(e, loan_token, obligation, &request.user);

    // untouched collateral goes straight back to the user
    let collateral_returned = request.release_amount - to_convert;
    if collateral_returned > 0 {
        SorobanTokenClient::new(e, &collateral_token).transfer(
            &self_address,
            &request.user,
            &(collateral_returned as i128),
        );
    }

    let account = ledger.get_user_account_data(&request.user);
    if account.total_debt_value > 0 && account.health_factor <= HEALTH_PRECISION {
        panic_with_error!(e, LeverageValidationError::UnsafePosition);
    }

    Events::new(e).withdraw_position(
        request.user.clone(),
        request.repay_amount,
        request.release_amount,
        proceeds,
        collateral_returned,
    );
}

// Pays the provider back, closes out the drawn loan and sweeps whatever
// borrow-asset dust remains to the user. The provider re-checks its own
// balance in `settle`, so a short engine balance here must abort.
fn settle_loan(e: &Env, loan_token: &Address, obligation: u128, user: &Address) {
    let self_address = e.current_contract_address();
    let token_client = SorobanTokenClient::new(e, loan_token);
    let balance = token_client.balance(&self_address) as u128;
    if balance < obligation {
        panic_with_error!(e, LeverageValidationError::LoanRepaymentFailure);
    }

    let provider = get_loan_provider(e);
    token_client.transfer(&self_address, &provider, &(obligation as i128));
    FlashLoanProviderClient::new(e, &provider).settle(&self_address, loan_token);

    let dust = balance - obligation;
    if dust > 0 {
        token_client.transfer(&self_address, user, &(dust as i128));
        Events::new(e).sweep(user.clone(), loan_token.clone(), dust);
    }
}

fn require_whitelisted(e: &Env, vault: &Address, user: &Address) {
    let whitelist = WhitelistClient::new(e, &get_whitelist(e));
    if !whitelist.caller_allowed(vault, &e.current_contract_address())
        || !whitelist.user_allowed(vault, user)
    {
        panic_with_error!(e, LeverageValidationError::NotWhitelisted);
    }
}

// The planner totals scaled down by the caller's tolerance form the
// end-to-end output floor for a multi-path conversion.
fn enforce_route_minimum(
    e: &Env,
    paths: &Vec<crate::plan::SwapPath>,
    active_path_count: u32,
    actual_out: u128,
    min_out_bps: u32,
) {
    let expected_total = plan::expected_total_out(paths, active_path_count);
    if expected_total == 0 {
        return;
    }
    let min_total = expected_total * min_out_bps as u128 / BPS;
    if actual_out < min_total {
        panic_with_error!(e, LeverageValidationError::SlippageExceeded);
    }
}

fn put_levers(e: &Env, levers: (u32, u32, u32, u32)) {
    let (safe_ltv_bps, loan_premium_bps, swap_loss_bps, hop_slippage_bps) = levers;
    if safe_ltv_bps == 0 || safe_ltv_bps as u128 >= BPS {
        panic_with_error!(e, LeverageEngineError::BadLeverConfig);
    }
    if (loan_premium_bps + swap_loss_bps) as u128 >= BPS || hop_slippage_bps as u128 >= BPS {
        panic_with_error!(e, LeverageEngineError::BadLeverConfig);
    }
    set_safe_ltv_bps(e, &safe_ltv_bps);
    set_loan_premium_bps(e, &loan_premium_bps);
    set_swap_loss_bps(e, &swap_loss_bps);
    set_hop_slippage_bps(e, &hop_slippage_bps);
}

#[contractimpl]
impl AdminInterfaceTrait for LeverageEngine {
    fn set_operations_admin(e: Env, admin: Address, account: Address) {
        admin.require_auth();
        let access_control = AccessControl::new(&e);
        access_control.assert_address_has_role(&admin, &Role::Admin);
        access_control.set_role_address(&Role::OperationsAdmin, &account);
    }

    fn set_borrow_token(e: Env, admin: Address, token: Address, enabled: bool) {
        admin.require_auth();
        require_operations_admin_or_owner(&e, &admin);

        if enabled {
            add_borrow_token(&e, &token);
        } else {
            remove_borrow_token(&e, &token);
        }
        Events::new(&e).set_borrow_token(token, enabled);
    }

    fn set_levers(e: Env, admin: Address, levers: (u32, u32, u32, u32)) {
        admin.require_auth();
        require_admin(&e, &admin);
        put_levers(&e, levers);
    }

    fn set_whitelist(e: Env, admin: Address, whitelist: Address) {
        admin.require_auth();
        require_admin(&e, &admin);
        set_whitelist(&e, &whitelist);
    }

    fn set_price_feed(e: Env, admin: Address, price_feed: Address) {
        admin.require_auth();
        require_admin(&e, &admin);
        set_price_feed(&e, &price_feed);
    }

    fn set_loan_provider(e: Env, admin: Address, loan_provider: Address) {
        admin.require_auth();
        require_admin(&e, &admin);
        set_loan_provider(&e, &loan_provider);
    }
}

#[contractimpl]
impl UpgradeableContract for LeverageEngine {
    fn version() -> u32 {
        110
    }

    fn upgrade(e: Env, admin: Address, new_wasm_hash: BytesN<32>) {
        admin.require_auth();
        require_admin(&e, &admin);
        e.deployer().update_current_contract_wasm(new_wasm_hash);
    }
}

#[contractimpl]
impl TransferableContract for LeverageEngine {
    fn commit_transfer_ownership(e: Env, admin: Address, new_admin: Address) {
        admin.require_auth();
        require_admin(&e, &admin);
        AccessControl::new(&e).commit_transfer_ownership(&new_admin);
    }

    fn apply_transfer_ownership(e: Env, admin: Address) {
        admin.require_auth();
        require_admin(&e, &admin);
        AccessControl::new(&e).apply_transfer_ownership();
    }

    fn revert_transfer_ownership(e: Env, admin: Address) {
        admin.require_auth();
        require_admin(&e, &admin);
        AccessControl::new(&e).revert_transfer_ownership();
    }
}
