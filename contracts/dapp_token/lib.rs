#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod logic;
pub mod memory;
pub mod model;

pub use self::dapp_token::{DappToken, DappTokenRef};
pub use logic::{LedgerStore, TokenLedger};
pub use memory::MemoryLedger;
pub use model::{Balance, Error, LedgerEvent, Result, TokenMetadata};

#[ink::contract]
mod dapp_token {
    use crate::logic::{self, LedgerStore};
    use crate::model::{
        Error, LedgerEvent, Result, TokenMetadata, DEFAULT_INITIAL_SUPPLY,
    };
    use ink::prelude::string::String;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: AccountId,
        #[ink(topic)]
        to: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    #[ink(storage)]
    pub struct DappToken {
        // fixed at deployment
        metadata: TokenMetadata,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
    }

    impl LedgerStore for DappToken {
        fn balance(&self, owner_acc: &AccountId) -> Balance {
            self.balances.get(owner_acc).unwrap_or(0)
        }

        fn set_balance(&mut self, owner_acc: &AccountId, amount_val: Balance) {
            self.balances.insert(owner_acc, &amount_val);
        }

        fn allowance(&self, owner_acc: &AccountId, spender_acc: &AccountId) -> Balance {
            self.allowances.get(&(*owner_acc, *spender_acc)).unwrap_or(0)
        }

        fn set_allowance(&mut self, owner_acc: &AccountId, spender_acc: &AccountId, amount_val: Balance) {
            self.allowances.insert(&(*owner_acc, *spender_acc), &amount_val);
        }
    }

    impl DappToken {
        // -------- constructors --------

        /// Mints `initial_supply` to the deployer. The supply never changes afterwards.
        #[ink(constructor)]
        pub fn new(initial_supply: Balance) -> Self {
            let mut token = Self {
                metadata: TokenMetadata::default(),
                total_supply: initial_supply,
                balances: Mapping::default(),
                allowances: Mapping::default(),
            };
            logic::initialize(&mut token, Self::env().caller(), initial_supply);
            token
        }

        #[ink(constructor)]
        pub fn default() -> Self {
            Self::new(DEFAULT_INITIAL_SUPPLY)
        }

        // -------- read API --------

        #[ink(message)]
        pub fn name(&self) -> String {
            self.metadata.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.metadata.symbol.clone()
        }

        #[ink(message)]
        pub fn standard(&self) -> String {
            self.metadata.standard.clone()
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balance(&owner_acc)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            LedgerStore::allowance(self, &owner_acc, &spender_acc)
        }

        // -------- write API --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let outcome = logic::transfer(self, caller_acc, to_acc, amount_val);
            self.publish(outcome)
        }

        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            let outcome = logic::approve(self, owner_acc, spender_acc, amount_val);
            self.publish(outcome)
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> Result<()> {
            let caller_acc = self.env().caller();
            let outcome = logic::transfer_from(self, caller_acc, from_acc, to_acc, amount_val);
            self.publish(outcome)
        }

        // ---- internals ----

        fn publish(&self, outcome: Result<Vec<LedgerEvent>>) -> Result<()> {
            let events = outcome.map_err(|err: Error| {
                ink::env::debug_println!("dapp_token: rejected: {}", err);
                err
            })?;
            for event in events {
                match event {
                    LedgerEvent::Transfer { from, to, value } => {
                        self.env().emit_event(Transfer { from, to, value })
                    }
                    LedgerEvent::Approval { owner, spender, value } => {
                        self.env().emit_event(Approval { owner, spender, value })
                    }
                }
            }
            Ok(())
        }
    }


}
