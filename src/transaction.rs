//! Defines the core data model for ledger transactions.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::Error;

/// A newtype wrapper for transaction IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a fresh, random transaction ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether money entered or left the account.
///
/// The variants serialize as the exact strings `"Deposit"` and
/// `"Withdrawal"` stored in the transactions blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money was added to the account.
    Deposit,
    /// Money was withdrawn from the account.
    Withdrawal,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// A single entry in the ledger: an event where money was added to or
/// withdrawn from the account.
///
/// Transactions are created by [crate::ledger::Ledger::add_funds] and
/// [crate::ledger::Ledger::transfer_funds] and are immutable; the only way
/// one leaves the ledger is
/// [crate::ledger::Ledger::cancel_last_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction was created, stored as RFC 3339 text.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The positive amount of money moved by this transaction.
    pub amount: f64,
    /// Whether this transaction was a deposit or a withdrawal.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction dated now (UTC).
    ///
    /// The amount should already have been validated as positive by the
    /// caller; the ledger does this before constructing a transaction.
    pub fn new(amount: f64, kind: TransactionKind) -> Self {
        Self {
            id: TransactionId::new(),
            date: OffsetDateTime::now_utc(),
            amount,
            kind,
        }
    }
}

/// Selects which transactions [crate::ledger::Ledger::filter] returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep only deposits.
    Deposit,
    /// Keep only withdrawals.
    Withdrawal,
}

impl TransactionFilter {
    /// Whether `transaction` passes this filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Deposit => transaction.kind == TransactionKind::Deposit,
            TransactionFilter::Withdrawal => transaction.kind == TransactionKind::Withdrawal,
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = Error;

    /// Parse the filter strings used by the dashboard buttons: `"all"`,
    /// `"Deposit"`, `"Withdrawal"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TransactionFilter::All),
            "Deposit" => Ok(TransactionFilter::Deposit),
            "Withdrawal" => Ok(TransactionFilter::Withdrawal),
            _ => Err(Error::SerializationError(format!(
                "\"{s}\" is not a transaction filter"
            ))),
        }
    }
}
