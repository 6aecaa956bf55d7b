use soroban_sdk::{Address, Env, Symbol};

#[derive(Clone)]
pub(crate) struct Events(Env);

impl Events {
    #[inline(always)]
    pub(crate) fn env(&self) -> &Env {
        &self.0
    }

    #[inline(always)]
    pub(crate) fn new(env: &Env) -> Events {
        Events(env.clone())
    }
}

pub(crate) trait LeverageEngineEvents {
    fn enter_position(
        &self,
        user: Address,
        principal: u128,
        loan_amount: u128,
        collateral_added: u128,
        debt_incurred: u128,
    );

    fn withdraw_position(
        &self,
        user: Address,
        repay_amount: u128,
        release_amount: u128,
        proceeds: u128,
        collateral_returned: u128,
    );

    fn sweep(&self, user: Address, token: Address, amount: u128);

    fn set_borrow_token(&self, token: Address, enabled: bool);
}

impl LeverageEngineEvents for Events {
    fn enter_position(
        &self,
        user: Address,
        principal: u128,
        loan_amount: u128,
        collateral_added: u128,
        debt_incurred: u128,
    ) {
        self.env().events().publish(
            (Symbol::new(self.env(), "enter_position"), user),
            (principal, loan_amount, collateral_added, debt_incurred),
        );
    }

    fn withdraw_position(
        &self,
        user: Address,
        repay_amount: u128,
        release_amount: u128,
        proceeds: u128,
        collateral_returned: u128,
    ) {
        self.env().events().publish(
            (Symbol::new(self.env(), "withdraw_position"), user),
            (repay_amount, release_amount, proceeds, collateral_returned),
        );
    }

    fn sweep(&self, user: Address, token: Address, amount: u128) {
        self.env()
            .events()
            .publish((Symbol::new(self.env(), "sweep"), user, token), amount);
    }

    fn set_borrow_token(&self, token: Address, enabled: bool) {
        self.env()
            .events()
            .publish((Symbol::new(self.env(), "set_borrow_token"), token), enabled);
    }
}
