#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod logic;
pub mod model;

pub use self::dapp_token_sale::{DappTokenSale, DappTokenSaleRef};
pub use logic::CrowdSale;
pub use model::{Error, Receipt, Result, SaleEvent, SalePhase, Settlement};

#[ink::contract]
mod dapp_token_sale {
    use crate::logic::CrowdSale;
    use crate::model::{Error, Result, SaleEvent, SalePhase, DEFAULT_TOKEN_PRICE};
    use dapp_token::{DappTokenRef, LedgerEvent, TokenLedger};
    use ink::env::call::FromAccountId;
    use ink::env::DefaultEnvironment;
    use ink::prelude::vec;
    use ink::prelude::vec::Vec;

    #[ink(event)]
    pub struct Sell {
        #[ink(topic)]
        buyer: AccountId,
        amount: Balance,
    }

    #[ink(storage)]
    pub struct DappTokenSale {
        sale: CrowdSale,
        token: DappTokenRef,
    }

    /// The deployed token seen through [`TokenLedger`]. Transfers are
    /// cross-contract calls, so the ledger sees this contract as the caller
    /// and `caller_acc` is always the sale account.
    struct TokenLink<'a> {
        token: &'a mut DappTokenRef,
    }

    impl TokenLedger for TokenLink<'_> {
        fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.token.balance_of(owner_acc)
        }

        fn transfer(
            &mut self,
            caller_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> dapp_token::Result<Vec<LedgerEvent>> {
            self.token.transfer(to_acc, amount_val)?;
            Ok(vec![LedgerEvent::Transfer { from: caller_acc, to: to_acc, value: amount_val }])
        }
    }

    fn traced<T>(outcome: Result<T>) -> Result<T> {
        outcome.map_err(|err| {
            ink::env::debug_println!("dapp_token_sale: rejected: {}", err);
            err
        })
    }

    impl DappTokenSale {
        // -------- constructors --------

        /// Opens a sale of the token deployed at `token_contract`. The
        /// deployer becomes the admin; provisioning is a plain token transfer
        /// to this contract's account.
        #[ink(constructor)]
        pub fn new(token_contract: AccountId, token_price: Balance) -> Self {
            let token = <DappTokenRef as FromAccountId<DefaultEnvironment>>::from_account_id(token_contract);
            let sale = CrowdSale::new(
                Self::env().account_id(),
                token_contract,
                Self::env().caller(),
                token_price,
            );
            Self { sale, token }
        }

        #[ink(constructor)]
        pub fn with_default_price(token_contract: AccountId) -> Self {
            Self::new(token_contract, DEFAULT_TOKEN_PRICE)
        }

        // -------- read API --------

        #[ink(message)]
        pub fn token_contract(&self) -> AccountId {
            self.sale.token_contract()
        }

        #[ink(message)]
        pub fn token_price(&self) -> Balance {
            self.sale.token_price()
        }

        #[ink(message)]
        pub fn tokens_sold(&self) -> Balance {
            self.sale.tokens_sold()
        }

        #[ink(message)]
        pub fn admin(&self) -> AccountId {
            self.sale.admin()
        }

        /// Payment collected and not yet paid out to the admin.
        #[ink(message)]
        pub fn funds_held(&self) -> Balance {
            self.sale.funds_held()
        }

        #[ink(message)]
        pub fn phase(&self) -> SalePhase {
            if self.sale.is_ended() || self.sale.tokens_sold() > 0 {
                return self.sale.phase(0)
            }
            let inventory_val = self.token.balance_of(self.sale.sale_account());
            self.sale.phase(inventory_val)
        }

        // -------- write API --------

        /// Attached value must be exactly `amount_val * token_price`.
        #[ink(message, payable)]
        pub fn buy_tokens(&mut self, amount_val: Balance) -> Result<()> {
            let buyer_acc = self.env().caller();
            let payment_val = self.env().transferred_value();
            let mut link = TokenLink { token: &mut self.token };
            let receipt = traced(self.sale.buy_tokens(&mut link, buyer_acc, amount_val, payment_val))?;
            for event in receipt.events {
                match event {
                    SaleEvent::Sell { buyer, amount } => self.env().emit_event(Sell { buyer, amount }),
                }
            }
            Ok(())
        }

        /// Admin only. Reclaims unsold tokens and pays out the collected
        /// funds; a failed payout reverts the token reclaim with it.
        #[ink(message)]
        pub fn end_sale(&mut self) -> Result<()> {
            let caller_acc = self.env().caller();
            let mut link = TokenLink { token: &mut self.token };
            let settlement = traced(self.sale.end_sale(&mut link, caller_acc))?;
            if settlement.funds_released > 0 {
                let payout = self
                    .env()
                    .transfer(settlement.admin, settlement.funds_released)
                    .map_err(|_| Error::PayoutFailed);
                traced(payout)?;
            }
            Ok(())
        }
    }


}
