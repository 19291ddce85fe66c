//! The transaction ledger: the in-memory transaction list and running
//! balance, mirrored to a durable key-value store.
//!
//! The ledger is the sole owner of its state for the lifetime of the
//! session. The key-value store is a passive mirror: every mutation rewrites
//! the whole transaction list (and the balance, where it changed), and on
//! conflict the in-memory state is authoritative until the next explicit
//! [Ledger::load].

use crate::{
    Error,
    stores::KvStore,
    transaction::{Transaction, TransactionFilter, TransactionKind},
};

/// The key under which the JSON array of transactions is stored.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// The key under which the stringified balance is stored.
pub const BALANCE_KEY: &str = "userBalance";

/// A user's transaction history and running balance.
///
/// Mutations update the in-memory state first and then persist; a failed
/// persist leaves the in-memory state ahead of the stored state rather than
/// rolling back. Callers decide whether to [Ledger::load] to resynchronise.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    transactions: Vec<Transaction>,
    balance: f64,
}

impl<S: KvStore> Ledger<S> {
    /// Create an empty ledger backed by `store`.
    ///
    /// Call [Ledger::load] to pick up any previously persisted state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            transactions: Vec::new(),
            balance: 0.0,
        }
    }

    /// Replace the in-memory state with whatever the store currently holds.
    ///
    /// Keys that have never been written yield an empty transaction list and
    /// a zero balance, not an error.
    ///
    /// # Errors
    ///
    /// Returns [Error::StorageError] if a read failed or
    /// [Error::SerializationError] if the stored data is malformed.
    pub async fn load(&mut self) -> Result<(), Error> {
        self.transactions = match self.store.get(TRANSACTIONS_KEY).await? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };

        self.balance = match self.store.get(BALANCE_KEY).await? {
            Some(content) => content
                .parse()
                .map_err(|_| Error::SerializationError(format!("\"{content}\" is not a number")))?,
            None => 0.0,
        };

        tracing::debug!(
            "loaded {} transactions, balance {}",
            self.transactions.len(),
            self.balance
        );

        Ok(())
    }

    /// Deposit `amount` into the account.
    ///
    /// Appends a [TransactionKind::Deposit] transaction dated now, persists
    /// the updated list, then increases and persists the balance.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `amount` is not strictly positive,
    /// or [Error::StorageError] if a persist step failed. On a persist
    /// failure the in-memory state keeps the mutation; it is not rolled
    /// back.
    pub async fn add_funds(&mut self, amount: f64) -> Result<Transaction, Error> {
        self.record(amount, TransactionKind::Deposit).await
    }

    /// Withdraw `amount` from the account.
    ///
    /// Behaves like [Ledger::add_funds] with a [TransactionKind::Withdrawal]
    /// transaction and a decreased balance.
    ///
    /// # Errors
    ///
    /// Returns [Error::InsufficientBalance] without any mutation if `amount`
    /// exceeds the current balance; otherwise the same errors as
    /// [Ledger::add_funds].
    pub async fn transfer_funds(&mut self, amount: f64) -> Result<Transaction, Error> {
        if amount > self.balance {
            return Err(Error::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        self.record(amount, TransactionKind::Withdrawal).await
    }

    /// Remove the most recently appended transaction and persist the
    /// truncated list.
    ///
    /// The balance is intentionally left untouched: cancelling reverses the
    /// history entry but not the money movement, matching the behaviour the
    /// dashboard has always had. The removed transaction is returned.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyLedger] if there is nothing to cancel, or
    /// [Error::StorageError] if the truncated list could not be persisted
    /// (the in-memory list stays truncated).
    pub async fn cancel_last_transaction(&mut self) -> Result<Transaction, Error> {
        let cancelled = self.transactions.pop().ok_or(Error::EmptyLedger)?;

        self.persist_transactions().await?;

        tracing::info!("cancelled transaction {}", cancelled.id);

        Ok(cancelled)
    }

    /// The transactions that pass `filter`, in insertion order.
    ///
    /// A pure view; does not mutate or persist anything.
    pub fn filter(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| filter.matches(transaction))
            .collect()
    }

    /// The current balance.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// The full transaction list in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    async fn record(&mut self, amount: f64, kind: TransactionKind) -> Result<Transaction, Error> {
        if amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let transaction = Transaction::new(amount, kind);
        self.transactions.push(transaction.clone());
        self.persist_transactions().await?;

        match kind {
            TransactionKind::Deposit => self.balance += amount,
            TransactionKind::Withdrawal => self.balance -= amount,
        }
        self.persist_balance().await?;

        tracing::info!("recorded {kind} of {amount}, balance now {}", self.balance);

        Ok(transaction)
    }

    async fn persist_transactions(&self) -> Result<(), Error> {
        let content = serde_json::to_string(&self.transactions)?;

        self.store.set(TRANSACTIONS_KEY, &content).await
    }

    async fn persist_balance(&self) -> Result<(), Error> {
        self.store.set(BALANCE_KEY, &self.balance.to_string()).await
    }
}
