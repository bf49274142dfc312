//! Wager escrow.
//!
//! The account subsystem is external; `Bank` is the interface the keeper
//! drives it through. The coordinator functions decide which transfer a
//! lifecycle point requires:
//!
//! | Lifecycle point | Transfer |
//! |-----------------|----------|
//! | black's first move (move 0) | `wager` black → escrow |
//! | red's first move (move 1) | `wager` red → escrow |
//! | win or forfeit | pot escrow → winner |
//! | expiry after one move | `wager` escrow → black |
//!
//! Zero wagers never reach the bank.

pub mod coordinator;
pub mod memory;

pub use coordinator::{collect_wager, pay_winner, refund_wager};
pub use memory::{MemoryBank, Transfer, TransferDirection};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Address;

/// An amount of one denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub amount: u64,
    pub denom: String,
}

impl Coin {
    pub fn new(amount: u64, denom: impl Into<String>) -> Self {
        Self {
            amount,
            denom: denom.into(),
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Failures reported by the account subsystem.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error("{address} has {available}{denom}, needs {needed}{denom}")]
    InsufficientFunds {
        address: Address,
        needed: u64,
        available: u64,
        denom: String,
    },

    #[error("escrow holds {available}{denom}, needs {needed}{denom}")]
    EscrowShortfall {
        needed: u64,
        available: u64,
        denom: String,
    },

    #[error("{0}")]
    Rejected(String),
}

/// Token transfers between player accounts and the games' escrow pool.
pub trait Bank {
    fn send_to_escrow(&mut self, from: &Address, coin: &Coin) -> Result<(), BankError>;

    fn send_from_escrow(&mut self, to: &Address, coin: &Coin) -> Result<(), BankError>;
}

impl<B: Bank + ?Sized> Bank for &mut B {
    fn send_to_escrow(&mut self, from: &Address, coin: &Coin) -> Result<(), BankError> {
        (**self).send_to_escrow(from, coin)
    }

    fn send_from_escrow(&mut self, to: &Address, coin: &Coin) -> Result<(), BankError> {
        (**self).send_from_escrow(to, coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_display() {
        assert_eq!(Coin::new(45, "stake").to_string(), "45stake");
        assert!(Coin::new(0, "stake").is_zero());
    }

    #[test]
    fn test_bank_error_display() {
        assert_eq!(BankError::Rejected("oops".to_string()).to_string(), "oops");
        let err = BankError::InsufficientFunds {
            address: Address::from("bob"),
            needed: 45,
            available: 10,
            denom: "stake".to_string(),
        };
        assert_eq!(err.to_string(), "bob has 10stake, needs 45stake");
    }
}
