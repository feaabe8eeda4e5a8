use dapp_token::TokenLedger;
use ink::prelude::vec;

use crate::model::{
    AccountId, Balance, Error, Receipt, Result, SaleEvent, SalePhase, Settlement,
};

/// Book-keeping of a fixed-price token sale.
///
/// Tokens never move here directly: the sale account's inventory lives in
/// the ledger and every movement goes through [`TokenLedger::transfer`].
/// Native payment is only counted in `funds_held`; the execution
/// environment holds the actual value.
#[derive(scale::Encode, scale::Decode, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct CrowdSale {
    sale_acc: AccountId,
    token_acc: AccountId,
    admin_acc: AccountId,
    token_price: Balance,
    tokens_sold: Balance,
    funds_held: Balance,
    ended_flag: bool,
}

impl CrowdSale {
    pub fn new(sale_acc: AccountId, token_acc: AccountId, admin_acc: AccountId, token_price: Balance) -> Self {
        Self {
            sale_acc,
            token_acc,
            admin_acc,
            token_price,
            tokens_sold: 0,
            funds_held: 0,
            ended_flag: false,
        }
    }

    // -------- read API --------

    pub fn sale_account(&self) -> AccountId {
        self.sale_acc
    }

    pub fn token_contract(&self) -> AccountId {
        self.token_acc
    }

    pub fn admin(&self) -> AccountId {
        self.admin_acc
    }

    pub fn token_price(&self) -> Balance {
        self.token_price
    }

    pub fn tokens_sold(&self) -> Balance {
        self.tokens_sold
    }

    pub fn funds_held(&self) -> Balance {
        self.funds_held
    }

    pub fn is_ended(&self) -> bool {
        self.ended_flag
    }

    /// Phase given the sale account's current token balance. A sale that
    /// has sold anything stays `Active` even once its inventory runs out.
    pub fn phase(&self, inventory_val: Balance) -> SalePhase {
        if self.ended_flag {
            SalePhase::Ended
        } else if inventory_val > 0 || self.tokens_sold > 0 {
            SalePhase::Active
        } else {
            SalePhase::Provisioning
        }
    }

    // -------- modifiers (helpers) --------

    fn only_admin(&self, caller_acc: AccountId) -> Result<()> {
        if caller_acc != self.admin_acc {
            return Err(Error::Unauthorized)
        }
        Ok(())
    }

    fn when_not_ended(&self) -> Result<()> {
        if self.ended_flag {
            return Err(Error::SaleEnded)
        }
        Ok(())
    }

    // -------- write API --------

    /// Sells `amount_val` tokens to `buyer_acc` for exactly
    /// `amount_val * token_price` of attached payment.
    pub fn buy_tokens<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        buyer_acc: AccountId,
        amount_val: Balance,
        payment_val: Balance,
    ) -> Result<Receipt> {
        self.when_not_ended()?;

        // a price product beyond u128 can never equal an attached payment
        let cost_val = amount_val
            .checked_mul(self.token_price)
            .ok_or(Error::PaymentMismatch)?;
        if payment_val != cost_val {
            return Err(Error::PaymentMismatch)
        }

        let available_val = ledger.balance_of(self.sale_acc);
        if amount_val > available_val {
            return Err(Error::InsufficientSupply)
        }

        let new_sold = self.tokens_sold.checked_add(amount_val).ok_or(Error::Overflow)?;
        let new_funds = self.funds_held.checked_add(payment_val).ok_or(Error::Overflow)?;

        let ledger_events = ledger.transfer(self.sale_acc, buyer_acc, amount_val)?;
        self.tokens_sold = new_sold;
        self.funds_held = new_funds;

        Ok(Receipt {
            events: vec![SaleEvent::Sell { buyer: buyer_acc, amount: amount_val }],
            ledger_events,
        })
    }

    /// Returns every unsold token to the admin, hands back the collected
    /// funds for payout and closes the sale for good.
    pub fn end_sale<L: TokenLedger>(&mut self, ledger: &mut L, caller_acc: AccountId) -> Result<Settlement> {
        self.only_admin(caller_acc)?;
        self.when_not_ended()?;

        let tokens_reclaimed = ledger.balance_of(self.sale_acc);
        let ledger_events = ledger.transfer(self.sale_acc, self.admin_acc, tokens_reclaimed)?;

        let funds_released = self.funds_held;
        self.funds_held = 0;
        self.ended_flag = true;

        Ok(Settlement {
            admin: self.admin_acc,
            tokens_reclaimed,
            funds_released,
            ledger_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_TOKEN_PRICE;
    use dapp_token::{LedgerEvent, MemoryLedger};

    const TOKENS_AVAILABLE: Balance = 750_000;

    fn acc(byte: u8) -> AccountId {
        AccountId::from([byte; 32])
    }

    fn admin() -> AccountId {
        acc(0xAD)
    }

    fn buyer() -> AccountId {
        acc(0xB0)
    }

    fn sale_acc() -> AccountId {
        acc(0x5A)
    }

    fn token_acc() -> AccountId {
        acc(0x70)
    }

    fn setup() -> (MemoryLedger, CrowdSale) {
        let ledger = MemoryLedger::new(1_000_000, admin());
        let sale = CrowdSale::new(sale_acc(), token_acc(), admin(), DEFAULT_TOKEN_PRICE);
        (ledger, sale)
    }

    fn provisioned() -> (MemoryLedger, CrowdSale) {
        let (mut ledger, sale) = setup();
        ledger.transfer(admin(), sale_acc(), TOKENS_AVAILABLE).unwrap();
        (ledger, sale)
    }

    #[test]
    fn new_sale_starts_in_provisioning() {
        let (ledger, sale) = setup();
        assert_eq!(sale.token_price(), 1_000_000_000_000_000);
        assert_eq!(sale.token_contract(), token_acc());
        assert_eq!(sale.admin(), admin());
        assert_eq!(sale.tokens_sold(), 0);
        assert_eq!(sale.funds_held(), 0);
        assert_eq!(sale.phase(ledger.balance_of(sale_acc())), SalePhase::Provisioning);
    }

    #[test]
    fn provisioning_activates_the_sale() {
        let (ledger, sale) = provisioned();
        assert_eq!(sale.phase(ledger.balance_of(sale_acc())), SalePhase::Active);
    }

    #[test]
    fn sold_out_sale_stays_active() {
        let (mut ledger, mut sale) = setup();
        ledger.transfer(admin(), sale_acc(), 10).unwrap();
        assert_eq!(sale.phase(ledger.balance_of(sale_acc())), SalePhase::Active);

        sale.buy_tokens(&mut ledger, buyer(), 10, 10 * DEFAULT_TOKEN_PRICE).unwrap();

        assert_eq!(ledger.balance_of(sale_acc()), 0);
        assert_eq!(sale.phase(ledger.balance_of(sale_acc())), SalePhase::Active);
        assert_eq!(
            sale.buy_tokens(&mut ledger, buyer(), 1, DEFAULT_TOKEN_PRICE),
            Err(Error::InsufficientSupply)
        );
    }

    #[test]
    fn buying_moves_tokens_and_records_sell() {
        let (mut ledger, mut sale) = provisioned();

        let receipt = sale
            .buy_tokens(&mut ledger, buyer(), 10, 10 * DEFAULT_TOKEN_PRICE)
            .unwrap();

        assert_eq!(receipt.events, vec![SaleEvent::Sell { buyer: buyer(), amount: 10 }]);
        assert_eq!(
            receipt.ledger_events,
            vec![LedgerEvent::Transfer { from: sale_acc(), to: buyer(), value: 10 }]
        );
        assert_eq!(sale.tokens_sold(), 10);
        assert_eq!(sale.funds_held(), 10 * DEFAULT_TOKEN_PRICE);
        assert_eq!(ledger.balance_of(buyer()), 10);
        assert_eq!(ledger.balance_of(sale_acc()), 749_990);
    }

    #[test]
    fn any_payment_mismatch_is_rejected() {
        let (mut ledger, mut sale) = provisioned();
        let (ledger_before, sale_before) = (ledger.clone(), sale.clone());

        for payment_val in [1, 10 * DEFAULT_TOKEN_PRICE - 1, 10 * DEFAULT_TOKEN_PRICE + 1] {
            assert_eq!(
                sale.buy_tokens(&mut ledger, buyer(), 10, payment_val),
                Err(Error::PaymentMismatch)
            );
        }
        assert_eq!(
            sale.buy_tokens(&mut ledger, buyer(), Balance::MAX, 0),
            Err(Error::PaymentMismatch)
        );
        assert_eq!(ledger, ledger_before);
        assert_eq!(sale, sale_before);
    }

    #[test]
    fn buying_more_than_available_is_rejected() {
        let (mut ledger, mut sale) = provisioned();
        let (ledger_before, sale_before) = (ledger.clone(), sale.clone());

        assert_eq!(
            sale.buy_tokens(&mut ledger, buyer(), 800_000, 800_000 * DEFAULT_TOKEN_PRICE),
            Err(Error::InsufficientSupply)
        );
        assert_eq!(ledger, ledger_before);
        assert_eq!(sale, sale_before);
    }

    #[test]
    fn buying_before_provisioning_is_rejected() {
        let (mut ledger, mut sale) = setup();
        assert_eq!(
            sale.buy_tokens(&mut ledger, buyer(), 1, DEFAULT_TOKEN_PRICE),
            Err(Error::InsufficientSupply)
        );
    }

    #[test]
    fn only_admin_can_end_the_sale() {
        let (mut ledger, mut sale) = provisioned();
        sale.buy_tokens(&mut ledger, buyer(), 10, 10 * DEFAULT_TOKEN_PRICE).unwrap();
        let (ledger_before, sale_before) = (ledger.clone(), sale.clone());

        assert_eq!(sale.end_sale(&mut ledger, buyer()), Err(Error::Unauthorized));
        assert_eq!(ledger, ledger_before);
        assert_eq!(sale, sale_before);
    }

    #[test]
    fn settlement_returns_tokens_and_funds_to_admin() {
        let (mut ledger, mut sale) = provisioned();
        sale.buy_tokens(&mut ledger, buyer(), 10, 10 * DEFAULT_TOKEN_PRICE).unwrap();

        let settlement = sale.end_sale(&mut ledger, admin()).unwrap();

        assert_eq!(settlement.admin, admin());
        assert_eq!(settlement.tokens_reclaimed, 749_990);
        assert_eq!(settlement.funds_released, 10 * DEFAULT_TOKEN_PRICE);
        assert_eq!(
            settlement.ledger_events,
            vec![LedgerEvent::Transfer { from: sale_acc(), to: admin(), value: 749_990 }]
        );
        assert_eq!(ledger.balance_of(admin()), 999_990);
        assert_eq!(ledger.balance_of(sale_acc()), 0);
        assert_eq!(sale.funds_held(), 0);
        assert_eq!(sale.tokens_sold(), 10);
        assert_eq!(sale.phase(ledger.balance_of(sale_acc())), SalePhase::Ended);
        assert_eq!(ledger.circulating(), Some(ledger.total_supply()));
    }

    #[test]
    fn ended_sale_rejects_purchases_and_second_settlement() {
        let (mut ledger, mut sale) = provisioned();
        sale.end_sale(&mut ledger, admin()).unwrap();

        // tokens sent to the sale account after settlement stay put
        ledger.transfer(admin(), sale_acc(), 5).unwrap();
        let (ledger_before, sale_before) = (ledger.clone(), sale.clone());

        assert_eq!(
            sale.buy_tokens(&mut ledger, buyer(), 1, DEFAULT_TOKEN_PRICE),
            Err(Error::SaleEnded)
        );
        assert_eq!(sale.end_sale(&mut ledger, admin()), Err(Error::SaleEnded));
        assert_eq!(sale.end_sale(&mut ledger, buyer()), Err(Error::Unauthorized));
        assert_eq!(ledger, ledger_before);
        assert_eq!(sale, sale_before);
    }

    #[test]
    fn zero_amount_purchase_needs_zero_payment() {
        let (mut ledger, mut sale) = provisioned();
        let receipt = sale.buy_tokens(&mut ledger, buyer(), 0, 0).unwrap();
        assert_eq!(receipt.events, vec![SaleEvent::Sell { buyer: buyer(), amount: 0 }]);
        assert_eq!(sale.tokens_sold(), 0);
        assert_eq!(
            sale.buy_tokens(&mut ledger, buyer(), 0, 1),
            Err(Error::PaymentMismatch)
        );
    }
}
