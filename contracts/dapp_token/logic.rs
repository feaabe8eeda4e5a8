use ink::prelude::vec;
use ink::prelude::vec::Vec;

use crate::model::{AccountId, Balance, Error, LedgerEvent, Result};

/// Balance and allowance cells the ledger operations read and write.
///
/// Absent entries read as zero. Implementations only store; every rule
/// about who may move what lives in the functions of this module.
pub trait LedgerStore {
    fn balance(&self, owner_acc: &AccountId) -> Balance;
    fn set_balance(&mut self, owner_acc: &AccountId, amount_val: Balance);
    fn allowance(&self, owner_acc: &AccountId, spender_acc: &AccountId) -> Balance;
    fn set_allowance(&mut self, owner_acc: &AccountId, spender_acc: &AccountId, amount_val: Balance);
}

/// The slice of the ledger a token sale consumes.
pub trait TokenLedger {
    fn balance_of(&self, owner_acc: AccountId) -> Balance;

    /// Moves `amount_val` out of `caller_acc`, which must be the account the
    /// sale holds its inventory in.
    fn transfer(
        &mut self,
        caller_acc: AccountId,
        to_acc: AccountId,
        amount_val: Balance,
    ) -> Result<Vec<LedgerEvent>>;
}

/// A validated balance move, not yet written.
struct BalanceMove {
    from_acc: AccountId,
    to_acc: AccountId,
    new_from: Balance,
    new_to: Balance,
}

impl BalanceMove {
    fn plan<S: LedgerStore>(
        store: &S,
        from_acc: AccountId,
        to_acc: AccountId,
        amount_val: Balance,
    ) -> Result<Self> {
        let from_bal = store.balance(&from_acc);
        if from_bal < amount_val {
            return Err(Error::InsufficientBalance)
        }
        if from_acc == to_acc {
            return Ok(Self { from_acc, to_acc, new_from: from_bal, new_to: from_bal })
        }
        let new_from = from_bal.checked_sub(amount_val).ok_or(Error::Overflow)?;
        let to_bal = store.balance(&to_acc);
        let new_to = to_bal.checked_add(amount_val).ok_or(Error::Overflow)?;
        Ok(Self { from_acc, to_acc, new_from, new_to })
    }

    fn commit<S: LedgerStore>(self, store: &mut S) {
        // self-transfer: both cells are the same, nothing to write
        if self.from_acc == self.to_acc {
            return
        }
        store.set_balance(&self.from_acc, self.new_from);
        store.set_balance(&self.to_acc, self.new_to);
    }
}

/// Credits the whole supply to the creator of a fresh ledger.
pub fn initialize<S: LedgerStore>(store: &mut S, creator_acc: AccountId, total_supply: Balance) {
    store.set_balance(&creator_acc, total_supply);
}

pub fn transfer<S: LedgerStore>(
    store: &mut S,
    caller_acc: AccountId,
    to_acc: AccountId,
    amount_val: Balance,
) -> Result<Vec<LedgerEvent>> {
    BalanceMove::plan(store, caller_acc, to_acc, amount_val)?.commit(store);
    Ok(vec![LedgerEvent::Transfer { from: caller_acc, to: to_acc, value: amount_val }])
}

/// Overwrites the allowance. No balance check: the owner may approve more
/// than it currently holds, the spend is checked in [`transfer_from`].
pub fn approve<S: LedgerStore>(
    store: &mut S,
    caller_acc: AccountId,
    spender_acc: AccountId,
    amount_val: Balance,
) -> Result<Vec<LedgerEvent>> {
    store.set_allowance(&caller_acc, &spender_acc, amount_val);
    Ok(vec![LedgerEvent::Approval { owner: caller_acc, spender: spender_acc, value: amount_val }])
}

/// Delegated transfer. The balance of `from_acc` is checked before the
/// allowance granted to `caller_acc`, so an over-balance request reports
/// `InsufficientBalance` even when the allowance is also short.
pub fn transfer_from<S: LedgerStore>(
    store: &mut S,
    caller_acc: AccountId,
    from_acc: AccountId,
    to_acc: AccountId,
    amount_val: Balance,
) -> Result<Vec<LedgerEvent>> {
    let balance_move = BalanceMove::plan(store, from_acc, to_acc, amount_val)?;

    let current_allow = store.allowance(&from_acc, &caller_acc);
    if current_allow < amount_val {
        return Err(Error::InsufficientAllowance)
    }
    let new_allow = current_allow.checked_sub(amount_val).ok_or(Error::Overflow)?;

    balance_move.commit(store);
    store.set_allowance(&from_acc, &caller_acc, new_allow);
    Ok(vec![LedgerEvent::Transfer { from: from_acc, to: to_acc, value: amount_val }])
}
