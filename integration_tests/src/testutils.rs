#![cfg(test)]
extern crate std;

use collaborator_interfaces::price::PRICE_PRECISION;
use soroban_adapter_registry_contract::{AdapterRegistry, AdapterRegistryClient};
use soroban_leverage_engine_contract::testutils::{
    MockCollateralVault, MockCollateralVaultClient, MockFlashLoanProvider,
    MockFlashLoanProviderClient, MockLendingLedger, MockLendingLedgerClient, MockPriceFeed,
    MockPriceFeedClient, MockSwapVenue, MockSwapVenueClient,
};
use soroban_leverage_engine_contract::{LeverageEngine, LeverageEngineClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{
    StellarAssetClient as SorobanTokenAdminClient, TokenClient as SorobanTokenClient,
};
use soroban_sdk::{Address, Env, Vec};
use soroban_whitelist_contract::{WhitelistContract, WhitelistContractClient};

pub(crate) const DEFAULT_LEVERS: (u32, u32, u32, u32) = (8000, 9, 20, 100);

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) admin: Address,
    pub(crate) user: Address,
    pub(crate) registry: AdapterRegistryClient<'a>,
    pub(crate) engine: LeverageEngineClient<'a>,
    pub(crate) whitelist: WhitelistContractClient<'a>,
    pub(crate) ledger: MockLendingLedgerClient<'a>,
    pub(crate) provider: MockFlashLoanProviderClient<'a>,
    pub(crate) venue: MockSwapVenueClient<'a>,
    pub(crate) feed: MockPriceFeedClient<'a>,
    pub(crate) vault: Address,
    pub(crate) collateral_token: SorobanTokenClient<'a>,
    pub(crate) borrow_token: SorobanTokenClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        Self::setup()
    }
}

impl Setup<'_> {
    // Full deployment: registry resolving the collateral family to a live
    // engine, real whitelist, mock ledger/provider/venue/feed collaborators.
    pub(crate) fn setup() -> Self {
        let e: Env = Env::default();
        e.mock_all_auths();

        let admin = Address::generate(&e);
        let user = Address::generate(&e);

        let collateral_token = SorobanTokenClient::new(
            &e,
            &e.register_stellar_asset_contract_v2(admin.clone())
                .address(),
        );
        let borrow_token = SorobanTokenClient::new(
            &e,
            &e.register_stellar_asset_contract_v2(admin.clone())
                .address(),
        );

        let feed = MockPriceFeedClient::new(&e, &e.register(MockPriceFeed {}, ()));
        let ledger =
            MockLendingLedgerClient::new(&e, &e.register(MockLendingLedger {}, ()));
        let provider = MockFlashLoanProviderClient::new(
            &e,
            &e.register(MockFlashLoanProvider {}, ()),
        );
        let venue = MockSwapVenueClient::new(&e, &e.register(MockSwapVenue {}, ()));
        let vault_client =
            MockCollateralVaultClient::new(&e, &e.register(MockCollateralVault {}, ()));
        let whitelist =
            WhitelistContractClient::new(&e, &e.register(WhitelistContract {}, ()));
        let registry =
            AdapterRegistryClient::new(&e, &e.register(AdapterRegistry {}, ()));
        let engine = LeverageEngineClient::new(&e, &e.register(LeverageEngine {}, ()));

        feed.set_price(&collateral_token.address, &PRICE_PRECISION);
        feed.set_price(&borrow_token.address, &PRICE_PRECISION);

        ledger.set_price_feed(&feed.address);
        ledger.set_asset(&collateral_token.address, &8000, &8500);
        ledger.set_asset(&borrow_token.address, &0, &0);

        provider.set_premium_bps(&9);
        vault_client.set_ledger(&ledger.address);

        let mut coins = Vec::new(&e);
        coins.push_back(borrow_token.address.clone());
        coins.push_back(collateral_token.address.clone());
        venue.set_market(&feed.address, &10, &coins, &collateral_token.address);

        whitelist.init_admin(&admin);
        whitelist.set_caller_allowed(&admin, &vault_client.address, &engine.address, &true);
        whitelist.set_user_allowed(&admin, &vault_client.address, &user, &true);

        registry.init_admin(&admin);
        registry.set_adapter(&admin, &collateral_token.address, &engine.address);

        engine.initialize(
            &admin,
            &collateral_token.address,
            &vault_client.address,
            &ledger.address,
            &provider.address,
            &whitelist.address,
            &feed.address,
            &DEFAULT_LEVERS,
        );
        engine.set_borrow_token(&admin, &borrow_token.address, &true);

        let token_admin = SorobanTokenAdminClient::new(&e, &collateral_token.address);
        token_admin.mint(&user, &10_000_000_000);
        let borrow_admin = SorobanTokenAdminClient::new(&e, &borrow_token.address);
        borrow_admin.mint(&provider.address, &10_000_000_000_000);
        borrow_admin.mint(&ledger.address, &10_000_000_000_000);
        borrow_admin.mint(&venue.address, &10_000_000_000_000);
        token_admin.mint(&venue.address, &10_000_000_000_000);

        ledger.approve_delegation(&user, &engine.address, &borrow_token.address, &u128::MAX);

        Self {
            vault: vault_client.address.clone(),
            env: e,
            admin,
            user,
            registry,
            engine,
            whitelist,
            ledger,
            provider,
            venue,
            feed,
            collateral_token,
            borrow_token,
        }
    }
}
