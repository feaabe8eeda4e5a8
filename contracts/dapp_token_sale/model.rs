use core::fmt;

pub use dapp_token::model::{AccountId, Balance};
use dapp_token::{Error as TokenError, LedgerEvent};
use ink::prelude::vec::Vec;

pub type Result<T> = core::result::Result<T, Error>;

/// Price of one token unit in the chain's smallest native unit, as used by
/// the reference deployment.
pub const DEFAULT_TOKEN_PRICE: Balance = 1_000_000_000_000_000;

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Attached payment differs from `amount * token_price`.
    PaymentMismatch,
    /// The sale account holds fewer tokens than requested.
    InsufficientSupply,
    /// Only the admin may settle the sale.
    Unauthorized,
    /// The sale was settled; it accepts no further calls that mutate it.
    SaleEnded,
    Overflow,
    /// The ledger refused a transfer.
    Token(TokenError),
    /// Native payout of the collected funds failed.
    PayoutFailed,
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::Token(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PaymentMismatch => f.write_str("payment does not match amount times price"),
            Error::InsufficientSupply => f.write_str("not enough tokens left for sale"),
            Error::Unauthorized => f.write_str("caller is not the sale admin"),
            Error::SaleEnded => f.write_str("sale has ended"),
            Error::Overflow => f.write_str("arithmetic overflow"),
            Error::Token(err) => write!(f, "ledger error: {}", err),
            Error::PayoutFailed => f.write_str("payout of collected funds failed"),
        }
    }
}

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum SalePhase {
    /// No tokens in the sale account yet.
    Provisioning,
    /// Tokens provisioned or already sold, purchases accepted.
    Active,
    Ended,
}

#[derive(scale::Encode, scale::Decode, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum SaleEvent {
    Sell { buyer: AccountId, amount: Balance },
}

/// Everything a committed sale call produced: the sale's own records and the
/// records of the ledger transfers it made, each in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Receipt {
    pub events: Vec<SaleEvent>,
    pub ledger_events: Vec<LedgerEvent>,
}

/// Outcome of settling the sale. `funds_released` has already been removed
/// from the sale's books and must be paid to `admin` by the caller's
/// environment within the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub admin: AccountId,
    pub tokens_reclaimed: Balance,
    pub funds_released: Balance,
    pub ledger_events: Vec<LedgerEvent>,
}
