#![cfg(any(test, feature = "testutils"))]
extern crate std;

use crate::constants::OP_EXCHANGE;
use crate::plan::{HopDescriptor, RoutePlan, SwapPath};
use collaborator_interfaces::ledger::{AccountData, LendingLedger, HEALTH_PRECISION};
use collaborator_interfaces::loan::FlashLoanProvider;
use collaborator_interfaces::pools::{BatchSwapPool, CurveStylePool, JoinExitPool};
use collaborator_interfaces::price::{PriceFeed, PriceFeedClient, PRICE_PRECISION};
use collaborator_interfaces::vault::CollateralVault;
use soroban_sdk::token::Client as SorobanTokenClient;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

pub const BPS: u128 = 10_000;

// ---------------------------------------------------------------------------
// price feed

#[contract]
pub struct MockPriceFeed;

#[contracttype]
enum FeedDataKey {
    Price(Address),
}

#[contractimpl]
impl MockPriceFeed {
    pub fn set_price(e: Env, token: Address, price: u128) {
        e.storage().instance().set(&FeedDataKey::Price(token), &price);
    }
}

#[contractimpl]
impl PriceFeed for MockPriceFeed {
    fn price(e: Env, token: Address) -> u128 {
        e.storage()
            .instance()
            .get(&FeedDataKey::Price(token))
            .unwrap_or(PRICE_PRECISION)
    }
}

// ---------------------------------------------------------------------------
// lending ledger

#[contract]
pub struct MockLendingLedger;

#[contracttype]
enum LedgerDataKey {
    PriceFeed,
    Assets,
    // (ltv_bps, liquidation_threshold_bps)
    AssetConfig(Address),
    // (user, token)
    Collateral(Address, Address),
    Debt(Address, Address),
    // (user, delegate, token)
    Allowance(Address, Address, Address),
}

fn ledger_balance(e: &Env, key: &LedgerDataKey) -> u128 {
    e.storage().instance().get(key).unwrap_or(0)
}

#[contractimpl]
impl MockLendingLedger {
    pub fn set_price_feed(e: Env, price_feed: Address) {
        e.storage().instance().set(&LedgerDataKey::PriceFeed, &price_feed);
    }

    pub fn set_asset(e: Env, token: Address, ltv_bps: u32, liquidation_threshold_bps: u32) {
        let mut assets: Vec<Address> = e
            .storage()
            .instance()
            .get(&LedgerDataKey::Assets)
            .unwrap_or(Vec::new(&e));
        if !assets.contains(&token) {
            assets.push_back(token.clone());
            e.storage().instance().set(&LedgerDataKey::Assets, &assets);
        }
        e.storage().instance().set(
            &LedgerDataKey::AssetConfig(token),
            &(ltv_bps, liquidation_threshold_bps),
        );
    }

    pub fn collateral_of(e: Env, user: Address, token: Address) -> u128 {
        ledger_balance(&e, &LedgerDataKey::Collateral(user, token))
    }

    pub fn debt_of(e: Env, user: Address, token: Address) -> u128 {
        ledger_balance(&e, &LedgerDataKey::Debt(user, token))
    }
}

#[contractimpl]
impl LendingLedger for MockLendingLedger {
    fn deposit(e: Env, token: Address, amount: u128, on_behalf_of: Address) {
        let key = LedgerDataKey::Collateral(on_behalf_of, token);
        let balance = ledger_balance(&e, &key);
        e.storage().instance().set(&key, &(balance + amount));
    }

    fn withdraw(e: Env, token: Address, amount: u128, from: Address, to: Address) {
        let key = LedgerDataKey::Collateral(from, token.clone());
        let balance = ledger_balance(&e, &key);
        assert!(balance >= amount, "withdraw exceeds collateral");
        e.storage().instance().set(&key, &(balance - amount));
        SorobanTokenClient::new(&e, &token).transfer(
            &e.current_contract_address(),
            &to,
            &(amount as i128),
        );
    }

    fn borrow(
        e: Env,
        token: Address,
        amount: u128,
        _rate_mode: u32,
        on_behalf_of: Address,
        to: Address,
    ) {
        let allowance_key =
            LedgerDataKey::Allowance(on_behalf_of.clone(), to.clone(), token.clone());
        let allowance = ledger_balance(&e, &allowance_key);
        assert!(allowance >= amount, "borrow exceeds delegation");
        e.storage().instance().set(&allowance_key, &(allowance - amount));

        let debt_key = LedgerDataKey::Debt(on_behalf_of, token.clone());
        let debt = ledger_balance(&e, &debt_key);
        e.storage().instance().set(&debt_key, &(debt + amount));

        SorobanTokenClient::new(&e, &token).transfer(
            &e.current_contract_address(),
            &to,
            &(amount as i128),
        );
    }

    fn repay(e: Env, token: Address, amount: u128, on_behalf_of: Address) {
        let debt_key = LedgerDataKey::Debt(on_behalf_of, token);
        let debt = ledger_balance(&e, &debt_key);
        let repaid = if amount > debt { debt } else { amount };
        e.storage().instance().set(&debt_key, &(debt - repaid));
    }

    fn approve_delegation(e: Env, user: Address, delegate: Address, token: Address, amount: u128) {
        user.require_auth();
        e.storage()
            .instance()
            .set(&LedgerDataKey::Allowance(user, delegate, token), &amount);
    }

    fn borrow_allowance(e: Env, user: Address, delegate: Address, token: Address) -> u128 {
        ledger_balance(&e, &LedgerDataKey::Allowance(user, delegate, token))
    }

    fn get_user_account_data(e: Env, user: Address) -> AccountData {
        let feed = PriceFeedClient::new(
            &e,
            &e.storage().instance().get(&LedgerDataKey::PriceFeed).unwrap(),
        );
        let assets: Vec<Address> = e
            .storage()
            .instance()
            .get(&LedgerDataKey::Assets)
            .unwrap_or(Vec::new(&e));

        let mut total_collateral_value = 0u128;
        let mut total_debt_value = 0u128;
        let mut borrow_capacity = 0u128;
        let mut weighted_threshold = 0u128;
        for token in assets.iter() {
            let (ltv_bps, threshold_bps): (u32, u32) = e
                .storage()
                .instance()
                .get(&LedgerDataKey::AssetConfig(token.clone()))
                .unwrap();
            let price = feed.price(&token);

            let collateral =
                ledger_balance(&e, &LedgerDataKey::Collateral(user.clone(), token.clone()));
            let collateral_value = collateral * price / PRICE_PRECISION;
            total_collateral_value += collateral_value;
            borrow_capacity += collateral_value * ltv_bps as u128 / BPS;
            weighted_threshold += collateral_value * threshold_bps as u128;

            let debt = ledger_balance(&e, &LedgerDataKey::Debt(user.clone(), token.clone()));
            total_debt_value += debt * price / PRICE_PRECISION;
        }

        let liquidation_threshold_bps = if total_collateral_value > 0 {
            (weighted_threshold / total_collateral_value) as u32
        } else {
            0
        };
        let health_factor = if total_debt_value > 0 {
            total_collateral_value * liquidation_threshold_bps as u128 / BPS * HEALTH_PRECISION
                / total_debt_value
        } else {
            u128::MAX
        };

        AccountData {
            total_collateral_value,
            total_debt_value,
            available_borrow_value: borrow_capacity.saturating_sub(total_debt_value),
            liquidation_threshold_bps,
            health_factor,
        }
    }
}

// ---------------------------------------------------------------------------
// flash loan provider

#[contract]
pub struct MockFlashLoanProvider;

#[contracttype]
enum ProviderDataKey {
    PremiumBps,
    // receiver -> (token, provider balance required at settlement)
    Outstanding(Address),
}

#[contractimpl]
impl MockFlashLoanProvider {
    pub fn set_premium_bps(e: Env, premium_bps: u32) {
        e.storage()
            .instance()
            .set(&ProviderDataKey::PremiumBps, &premium_bps);
    }
}

#[contractimpl]
impl FlashLoanProvider for MockFlashLoanProvider {
    fn premium_bps(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&ProviderDataKey::PremiumBps)
            .unwrap_or(0)
    }

    fn draw(e: Env, receiver: Address, token: Address, amount: u128) -> u128 {
        let premium_bps: u32 = e
            .storage()
            .instance()
            .get(&ProviderDataKey::PremiumBps)
            .unwrap_or(0);
        let premium = (amount * premium_bps as u128 + BPS - 1) / BPS;

        let token_client = SorobanTokenClient::new(&e, &token);
        let required = token_client.balance(&e.current_contract_address()) + premium as i128;
        e.storage().instance().set(
            &ProviderDataKey::Outstanding(receiver.clone()),
            &(token.clone(), required),
        );
        token_client.transfer(&e.current_contract_address(), &receiver, &(amount as i128));
        premium
    }

    fn settle(e: Env, receiver: Address, token: Address) {
        let (loan_token, required): (Address, i128) = e
            .storage()
            .instance()
            .get(&ProviderDataKey::Outstanding(receiver.clone()))
            .expect("no outstanding loan");
        assert_eq!(loan_token, token, "settling the wrong token");

        let balance = SorobanTokenClient::new(&e, &token).balance(&e.current_contract_address());
        assert!(balance >= required, "loan not repaid");
        e.storage()
            .instance()
            .remove(&ProviderDataKey::Outstanding(receiver));
    }
}

// ---------------------------------------------------------------------------
// swap venue covering all three pool conventions

#[contract]
pub struct MockSwapVenue;

#[contracttype]
enum VenueDataKey {
    FeeBps,
    PriceFeed,
    Coins,
    ShareToken,
}

fn venue_coins(e: &Env) -> Vec<Address> {
    e.storage().instance().get(&VenueDataKey::Coins).unwrap()
}

fn venue_share_token(e: &Env) -> Address {
    e.storage().instance().get(&VenueDataKey::ShareToken).unwrap()
}

// Quote at feed prices less the configured fee; payout comes from the
// venue's own inventory.
fn venue_convert(e: &Env, in_token: &Address, out_token: &Address, amount: u128) -> u128 {
    let fee_bps: u32 = e.storage().instance().get(&VenueDataKey::FeeBps).unwrap_or(0);
    let feed = PriceFeedClient::new(
        e,
        &e.storage().instance().get(&VenueDataKey::PriceFeed).unwrap(),
    );
    let in_value = amount * feed.price(in_token) / PRICE_PRECISION;
    let gross_out = in_value * PRICE_PRECISION / feed.price(out_token);
    gross_out * (BPS - fee_bps as u128) / BPS
}

fn venue_pay_out(e: &Env, token: &Address, to: &Address, amount: u128) {
    SorobanTokenClient::new(e, token).transfer(
        &e.current_contract_address(),
        to,
        &(amount as i128),
    );
}

#[contractimpl]
impl MockSwapVenue {
    pub fn set_market(
        e: Env,
        price_feed: Address,
        fee_bps: u32,
        coins: Vec<Address>,
        share_token: Address,
    ) {
        e.storage().instance().set(&VenueDataKey::PriceFeed, &price_feed);
        e.storage().instance().set(&VenueDataKey::FeeBps, &fee_bps);
        e.storage().instance().set(&VenueDataKey::Coins, &coins);
        e.storage().instance().set(&VenueDataKey::ShareToken, &share_token);
    }
}

#[contractimpl]
impl CurveStylePool for MockSwapVenue {
    fn exchange(e: Env, to: Address, in_idx: u32, out_idx: u32, in_amount: u128) -> u128 {
        let coins = venue_coins(&e);
        let out = venue_convert(
            &e,
            &coins.get(in_idx).unwrap(),
            &coins.get(out_idx).unwrap(),
            in_amount,
        );
        venue_pay_out(&e, &coins.get(out_idx).unwrap(), &to, out);
        out
    }

    fn exchange_underlying(
        e: Env,
        to: Address,
        in_idx: u32,
        out_idx: u32,
        in_amount: u128,
    ) -> u128 {
        Self::exchange(e, to, in_idx, out_idx, in_amount)
    }

    fn add_liquidity(e: Env, to: Address, amounts: Vec<u128>) -> u128 {
        let coins = venue_coins(&e);
        let share_token = venue_share_token(&e);
        let mut out = 0;
        for (idx, amount) in amounts.iter().enumerate() {
            if amount > 0 {
                out += venue_convert(&e, &coins.get(idx as u32).unwrap(), &share_token, amount);
            }
        }
        venue_pay_out(&e, &share_token, &to, out);
        out
    }

    fn remove_liquidity_one_coin(e: Env, to: Address, share_amount: u128, out_idx: u32) -> u128 {
        let coins = venue_coins(&e);
        let share_token = venue_share_token(&e);
        let out = venue_convert(&e, &share_token, &coins.get(out_idx).unwrap(), share_amount);
        venue_pay_out(&e, &coins.get(out_idx).unwrap(), &to, out);
        out
    }
}

#[contractimpl]
impl JoinExitPool for MockSwapVenue {
    fn join(e: Env, to: Address, coin_idx: u32, in_amount: u128) -> u128 {
        let coins = venue_coins(&e);
        let share_token = venue_share_token(&e);
        let out = venue_convert(&e, &coins.get(coin_idx).unwrap(), &share_token, in_amount);
        venue_pay_out(&e, &share_token, &to, out);
        out
    }

    fn exit(e: Env, to: Address, coin_idx: u32, in_amount: u128) -> u128 {
        let coins = venue_coins(&e);
        let share_token = venue_share_token(&e);
        let out = venue_convert(&e, &share_token, &coins.get(coin_idx).unwrap(), in_amount);
        venue_pay_out(&e, &coins.get(coin_idx).unwrap(), &to, out);
        out
    }
}

#[contractimpl]
impl BatchSwapPool for MockSwapVenue {
    fn batch_swap(
        e: Env,
        to: Address,
        assets: Vec<Address>,
        legs: Vec<(u32, u32, u32)>,
        in_amount: u128,
    ) -> u128 {
        let mut amount = in_amount;
        let mut out_token = assets.get(0).unwrap();
        for (in_idx, out_idx, _pool_code) in legs.iter() {
            let in_token = assets.get(in_idx).unwrap();
            out_token = assets.get(out_idx).unwrap();
            amount = venue_convert(&e, &in_token, &out_token, amount);
        }
        venue_pay_out(&e, &out_token, &to, amount);
        amount
    }
}

// ---------------------------------------------------------------------------
// collateral vault fronting the ledger

#[contract]
pub struct MockCollateralVault;

#[contracttype]
enum VaultDataKey {
    Ledger,
}

#[contractimpl]
impl MockCollateralVault {
    pub fn set_ledger(e: Env, ledger: Address) {
        e.storage().instance().set(&VaultDataKey::Ledger, &ledger);
    }
}

#[contractimpl]
impl CollateralVault for MockCollateralVault {
    fn deposit_collateral(e: Env, token: Address, amount: u128, on_behalf_of: Address) {
        let ledger: Address = e.storage().instance().get(&VaultDataKey::Ledger).unwrap();
        SorobanTokenClient::new(&e, &token).transfer(
            &e.current_contract_address(),
            &ledger,
            &(amount as i128),
        );
        crate::testutils::MockLendingLedgerClient::new(&e, &ledger)
            .deposit(&token, &amount, &on_behalf_of);
    }

    fn withdraw_collateral(
        e: Env,
        token: Address,
        amount: u128,
        _slippage_bps: u32,
        on_behalf_of: Address,
        to: Address,
    ) {
        let ledger: Address = e.storage().instance().get(&VaultDataKey::Ledger).unwrap();
        crate::testutils::MockLendingLedgerClient::new(&e, &ledger)
            .withdraw(&token, &amount, &on_behalf_of, &to);
    }
}

// ---------------------------------------------------------------------------
// plan helpers

// Single path, single curve-style exchange hop in each direction through
// `venue`, which must hold `source` at index 0 and `dest` at index 1.
pub fn single_exchange_plan(
    e: &Env,
    venue: &Address,
    source: &Address,
    dest: &Address,
    expected_in: u128,
    expected_out: u128,
) -> RoutePlan {
    let forward = exchange_hop(e, venue, source, dest, 0, 1, expected_in, expected_out);
    let reverse = exchange_hop(e, venue, dest, source, 1, 0, 0, 0);

    let mut forward_path: SwapPath = Vec::new(e);
    forward_path.push_back(forward);
    let mut reverse_path: SwapPath = Vec::new(e);
    reverse_path.push_back(reverse);

    let mut forward_paths = Vec::new(e);
    forward_paths.push_back(forward_path);
    let mut reverse_paths = Vec::new(e);
    reverse_paths.push_back(reverse_path);

    RoutePlan {
        forward_paths,
        reverse_paths,
        active_path_count: 1,
    }
}

pub fn exchange_hop(
    e: &Env,
    venue: &Address,
    source: &Address,
    dest: &Address,
    in_idx: u32,
    out_idx: u32,
    expected_in: u128,
    expected_out: u128,
) -> HopDescriptor {
    let mut waypoints = Vec::new(e);
    waypoints.push_back(source.clone());
    waypoints.push_back(venue.clone());
    waypoints.push_back(dest.clone());

    let mut hop_params = Vec::new(e);
    hop_params.push_back((in_idx, out_idx, OP_EXCHANGE));

    HopDescriptor {
        waypoints,
        hop_params,
        kind: crate::constants::HOP_KIND_CURVE_STYLE,
        hop_count: 1,
        source_asset: source.clone(),
        dest_asset: dest.clone(),
        expected_in,
        expected_out,
    }
}

// ---------------------------------------------------------------------------
// full deployment wiring for tests

#[cfg(test)]
pub(crate) use setup::Setup;
