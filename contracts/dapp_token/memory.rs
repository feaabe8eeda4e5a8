use ink::prelude::collections::BTreeMap;
use ink::prelude::vec::Vec;

use crate::logic::{self, LedgerStore, TokenLedger};
use crate::model::{AccountId, Balance, LedgerEvent, Result, TokenMetadata};

/// Owned, in-memory ledger with the caller passed explicitly to every
/// operation. Runs the same rules as the `DappToken` contract without an
/// execution environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLedger {
    metadata: TokenMetadata,
    total_supply: Balance,
    balances: BTreeMap<AccountId, Balance>,
    allowances: BTreeMap<(AccountId, AccountId), Balance>,
}

impl MemoryLedger {
    pub fn new(total_supply: Balance, creator_acc: AccountId) -> Self {
        let mut ledger = Self {
            metadata: TokenMetadata::default(),
            total_supply,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        };
        logic::initialize(&mut ledger, creator_acc, total_supply);
        ledger
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn total_supply(&self) -> Balance {
        self.total_supply
    }

    pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
        self.balance(&owner_acc)
    }

    pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
        LedgerStore::allowance(self, &owner_acc, &spender_acc)
    }

    /// Sum of every stored balance, `None` if it does not fit a `Balance`.
    /// Equals `Some(total_supply)` in every reachable state.
    pub fn circulating(&self) -> Option<Balance> {
        self.balances
            .values()
            .try_fold(0 as Balance, |acc, bal| acc.checked_add(*bal))
    }

    pub fn transfer(
        &mut self,
        caller_acc: AccountId,
        to_acc: AccountId,
        amount_val: Balance,
    ) -> Result<Vec<LedgerEvent>> {
        logic::transfer(self, caller_acc, to_acc, amount_val)
    }

    pub fn approve(
        &mut self,
        caller_acc: AccountId,
        spender_acc: AccountId,
        amount_val: Balance,
    ) -> Result<Vec<LedgerEvent>> {
        logic::approve(self, caller_acc, spender_acc, amount_val)
    }

    pub fn transfer_from(
        &mut self,
        caller_acc: AccountId,
        from_acc: AccountId,
        to_acc: AccountId,
        amount_val: Balance,
    ) -> Result<Vec<LedgerEvent>> {
        logic::transfer_from(self, caller_acc, from_acc, to_acc, amount_val)
    }
}

impl LedgerStore for MemoryLedger {
    fn balance(&self, owner_acc: &AccountId) -> Balance {
        self.balances.get(owner_acc).copied().unwrap_or(0)
    }

    fn set_balance(&mut self, owner_acc: &AccountId, amount_val: Balance) {
        self.balances.insert(*owner_acc, amount_val);
    }

    fn allowance(&self, owner_acc: &AccountId, spender_acc: &AccountId) -> Balance {
        self.allowances.get(&(*owner_acc, *spender_acc)).copied().unwrap_or(0)
    }

    fn set_allowance(&mut self, owner_acc: &AccountId, spender_acc: &AccountId, amount_val: Balance) {
        self.allowances.insert((*owner_acc, *spender_acc), amount_val);
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, owner_acc: AccountId) -> Balance {
        MemoryLedger::balance_of(self, owner_acc)
    }

    fn transfer(
        &mut self,
        caller_acc: AccountId,
        to_acc: AccountId,
        amount_val: Balance,
    ) -> Result<Vec<LedgerEvent>> {
        MemoryLedger::transfer(self, caller_acc, to_acc, amount_val)
    }
}
