use core::fmt;
use ink::prelude::string::String;

pub use ink::primitives::AccountId;

pub type Balance = u128;
pub type Result<T> = core::result::Result<T, Error>;

/// Supply minted to the deployer by the reference deployment.
pub const DEFAULT_INITIAL_SUPPLY: Balance = 1_000_000;

pub const TOKEN_NAME: &str = "Dapp Token";
pub const TOKEN_SYMBOL: &str = "DAPP";
pub const TOKEN_STANDARD: &str = "Dapp Token v1.0";

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// The debited account holds less than the requested amount.
    InsufficientBalance,
    /// The spender was approved for less than the requested amount.
    InsufficientAllowance,
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientBalance => f.write_str("insufficient balance"),
            Error::InsufficientAllowance => f.write_str("insufficient allowance"),
            Error::Overflow => f.write_str("arithmetic overflow"),
        }
    }
}

/// Record produced by a committed ledger operation, in emission order.
#[derive(scale::Encode, scale::Decode, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum LedgerEvent {
    Transfer {
        from: AccountId,
        to: AccountId,
        value: Balance,
    },
    Approval {
        owner: AccountId,
        spender: AccountId,
        value: Balance,
    },
}

#[derive(scale::Encode, scale::Decode, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub standard: String,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: String::from(TOKEN_NAME),
            symbol: String::from(TOKEN_SYMBOL),
            standard: String::from(TOKEN_STANDARD),
        }
    }
}
