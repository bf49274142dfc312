//! In-memory bank with failure injection.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{Bank, BankError, Coin};
use crate::core::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferDirection {
    ToEscrow,
    FromEscrow,
}

/// A completed transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub direction: TransferDirection,
    pub address: Address,
    pub coin: Coin,
}

/// `Bank` over in-memory balances.
///
/// Transfers involving an address registered with `fail_transfers_for` are
/// rejected with the given message and leave balances untouched.
#[derive(Clone, Debug, Default)]
pub struct MemoryBank {
    balances: FxHashMap<(Address, String), u64>,
    escrow: FxHashMap<String, u64>,
    transfers: Vec<Transfer>,
    failures: FxHashMap<Address, String>,
}

impl MemoryBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `deposit`.
    #[must_use]
    pub fn with_balance(mut self, address: Address, coin: Coin) -> Self {
        self.deposit(address, coin);
        self
    }

    /// Credit an account from outside the escrow flow.
    pub fn deposit(&mut self, address: Address, coin: Coin) {
        *self.balances.entry((address, coin.denom)).or_default() += coin.amount;
    }

    /// Credit the escrow pool directly.
    pub fn deposit_escrow(&mut self, coin: Coin) {
        *self.escrow.entry(coin.denom).or_default() += coin.amount;
    }

    #[must_use]
    pub fn balance(&self, address: &Address, denom: &str) -> u64 {
        self.balances
            .get(&(address.clone(), denom.to_string()))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn escrow_balance(&self, denom: &str) -> u64 {
        self.escrow.get(denom).copied().unwrap_or(0)
    }

    /// Sum of every account plus escrow. Constant under transfers.
    #[must_use]
    pub fn total_supply(&self, denom: &str) -> u64 {
        let accounts: u64 = self
            .balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .map(|(_, amount)| *amount)
            .sum();
        accounts + self.escrow_balance(denom)
    }

    /// Completed transfers in order.
    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn fail_transfers_for(&mut self, address: Address, message: impl Into<String>) {
        self.failures.insert(address, message.into());
    }

    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    fn check_failure(&self, address: &Address) -> Result<(), BankError> {
        match self.failures.get(address) {
            Some(message) => Err(BankError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

impl Bank for MemoryBank {
    fn send_to_escrow(&mut self, from: &Address, coin: &Coin) -> Result<(), BankError> {
        self.check_failure(from)?;
        let available = self.balance(from, &coin.denom);
        if available < coin.amount {
            return Err(BankError::InsufficientFunds {
                address: from.clone(),
                needed: coin.amount,
                available,
                denom: coin.denom.clone(),
            });
        }

        self.balances
            .insert((from.clone(), coin.denom.clone()), available - coin.amount);
        *self.escrow.entry(coin.denom.clone()).or_default() += coin.amount;
        self.transfers.push(Transfer {
            direction: TransferDirection::ToEscrow,
            address: from.clone(),
            coin: coin.clone(),
        });
        Ok(())
    }

    fn send_from_escrow(&mut self, to: &Address, coin: &Coin) -> Result<(), BankError> {
        self.check_failure(to)?;
        let available = self.escrow_balance(&coin.denom);
        if available < coin.amount {
            return Err(BankError::EscrowShortfall {
                needed: coin.amount,
                available,
                denom: coin.denom.clone(),
            });
        }

        self.escrow.insert(coin.denom.clone(), available - coin.amount);
        *self
            .balances
            .entry((to.clone(), coin.denom.clone()))
            .or_default() += coin.amount;
        self.transfers.push(Transfer {
            direction: TransferDirection::FromEscrow,
            address: to.clone(),
            coin: coin.clone(),
        });
        Ok(())
    }
}
