//! Ties the registry, ledger, and notification relay into one owned
//! session object that the presentation layer drives.

use crate::{
    Config, Error, RawPassword,
    ledger::Ledger,
    notify::{Notifier, TracingNotifier},
    registry::UserRegistry,
    stores::{DiskFileStore, DiskKvStore, FileStore, KvStore},
    transaction::{Transaction, TransactionFilter},
    user::{Registration, UserRecord},
};

/// The state of a running app session.
///
/// Owns the user registry, the transaction ledger, and the logged-in user,
/// and exposes exactly the operations the screens invoke. Every failure is
/// relayed to the [Notifier] as well as returned, and no failure is fatal:
/// the session stays usable afterwards.
pub struct Session<K, F> {
    registry: UserRegistry<F>,
    ledger: Ledger<K>,
    notifier: Box<dyn Notifier>,
    current_user: Option<UserRecord>,
}

impl Session<DiskKvStore, DiskFileStore> {
    /// Open a session over disk-backed stores rooted at the configured data
    /// directory, notifying through the log.
    ///
    /// # Errors
    ///
    /// Returns [Error::StorageError] if the storage directories could not be
    /// created.
    pub async fn open(config: &Config) -> Result<Self, Error> {
        let kv_store = DiskKvStore::open(config.kv_dir()).await?;
        let file_store = DiskFileStore::open(config.document_dir()).await?;

        Ok(Self::new(kv_store, file_store, Box::new(TracingNotifier)))
    }
}

impl<K: KvStore, F: FileStore> Session<K, F> {
    /// Create a session over the given stores and notifier.
    pub fn new(kv_store: K, file_store: F, notifier: Box<dyn Notifier>) -> Self {
        Self {
            registry: UserRegistry::new(file_store),
            ledger: Ledger::new(kv_store),
            notifier,
            current_user: None,
        }
    }

    /// Create a session whose registry hashes passwords with `hash_cost`.
    pub fn with_hash_cost(
        kv_store: K,
        file_store: F,
        notifier: Box<dyn Notifier>,
        hash_cost: u32,
    ) -> Self {
        Self {
            registry: UserRegistry::with_hash_cost(file_store, hash_cost),
            ledger: Ledger::new(kv_store),
            notifier,
            current_user: None,
        }
    }

    /// Register a new user account.
    pub async fn register(&self, registration: Registration) -> Result<UserRecord, Error> {
        match self.registry.register(registration).await {
            Ok(record) => {
                self.notifier.success("Registration successful!");
                Ok(record)
            }
            Err(error) => {
                let message = match &error {
                    Error::MissingField(_) => "All fields are required.",
                    Error::PasswordMismatch => "Passwords do not match.",
                    Error::DuplicateEmail(_) => "That email is already registered.",
                    _ => "Registration failed. Please try again.",
                };
                self.notifier.error(message);
                Err(error)
            }
        }
    }

    /// Log in with an email and password, then load the ledger state.
    ///
    /// A failure to load the persisted ledger is notified but does not undo
    /// the login; the session continues with an empty ledger until the next
    /// successful load.
    pub async fn log_in(
        &mut self,
        email: &str,
        password: &RawPassword,
    ) -> Result<UserRecord, Error> {
        let user = match self.registry.login(email, password).await {
            Ok(user) => user,
            Err(error) => {
                let message = match &error {
                    Error::InvalidCredentials => "Invalid email or password.",
                    _ => "Login failed. Please try again.",
                };
                self.notifier.error(message);
                return Err(error);
            }
        };

        self.current_user = Some(user.clone());

        if let Err(error) = self.ledger.load().await {
            tracing::error!("could not load the persisted ledger: {error}");
            self.notifier.error("Could not load your transactions.");
        }

        Ok(user)
    }

    /// Deposit `amount` into the account.
    pub async fn add_funds(&mut self, amount: f64) -> Result<Transaction, Error> {
        match self.ledger.add_funds(amount).await {
            Ok(transaction) => {
                // The dashboard reuses the transfer toast for deposits.
                self.notifier.success("Funds transferred successfully");
                Ok(transaction)
            }
            Err(error) => {
                self.notifier.error("Error adding funds");
                Err(error)
            }
        }
    }

    /// Withdraw `amount` from the account.
    pub async fn transfer_funds(&mut self, amount: f64) -> Result<Transaction, Error> {
        match self.ledger.transfer_funds(amount).await {
            Ok(transaction) => {
                self.notifier.success("Funds transferred successfully");
                Ok(transaction)
            }
            Err(error) => {
                let message = match &error {
                    Error::InsufficientBalance { .. } => "Insufficient balance",
                    _ => "Error transferring funds",
                };
                self.notifier.error(message);
                Err(error)
            }
        }
    }

    /// Cancel the most recent transaction.
    pub async fn cancel_last_transaction(&mut self) -> Result<Transaction, Error> {
        match self.ledger.cancel_last_transaction().await {
            Ok(transaction) => Ok(transaction),
            Err(error) => {
                let message = match &error {
                    Error::EmptyLedger => "There are no transactions to cancel",
                    _ => "Error canceling transaction",
                };
                self.notifier.error(message);
                Err(error)
            }
        }
    }

    /// The transactions that pass `filter`, in insertion order.
    pub fn filter(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        self.ledger.filter(filter)
    }

    /// The current ledger balance.
    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.current_user.as_ref()
    }
}

#[cfg(test)]
mod session_tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use crate::{
        Error, RawPassword,
        notify::Notifier,
        session::Session,
        stores::{MemoryFileStore, MemoryKvStore},
        transaction::TransactionFilter,
        user::Registration,
    };

    const TEST_HASH_COST: u32 = 4;

    /// Records every notification for later assertions.
    #[derive(Debug, Clone, Default)]
    struct RecordingNotifier {
        messages: Arc<Mutex<Vec<(bool, String)>>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<(bool, String)> {
            self.messages.lock().unwrap().clone()
        }

        fn last(&self) -> Option<(bool, String)> {
            self.messages.lock().unwrap().last().cloned()
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages.lock().unwrap().push((true, message.to_string()));
        }

        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push((false, message.to_string()));
        }
    }

    fn session_with_notifier() -> (Session<MemoryKvStore, MemoryFileStore>, RecordingNotifier) {
        let files = MemoryFileStore::new();
        files.insert("/device/photo.jpg", "jpeg bytes");
        let notifier = RecordingNotifier::default();

        let session = Session::with_hash_cost(
            MemoryKvStore::new(),
            files,
            Box::new(notifier.clone()),
            TEST_HASH_COST,
        );

        (session, notifier)
    }

    fn registration() -> Registration {
        Registration {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: RawPassword::new("hunter2"),
            confirm_password: RawPassword::new("hunter2"),
            address: "12 Analytical Way".to_string(),
            image_source: PathBuf::from("/device/photo.jpg"),
        }
    }

    #[tokio::test]
    async fn register_then_log_in() {
        let (mut session, notifier) = session_with_notifier();

        session.register(registration()).await.unwrap();
        assert_eq!(
            notifier.last(),
            Some((true, "Registration successful!".to_string()))
        );

        let user = session
            .log_in("ada@example.com", &RawPassword::new("hunter2"))
            .await
            .unwrap();

        assert_eq!(session.current_user(), Some(&user));
    }

    #[tokio::test]
    async fn failed_log_in_notifies_and_leaves_session_usable() {
        let (mut session, notifier) = session_with_notifier();
        session.register(registration()).await.unwrap();

        let result = session
            .log_in("ada@example.com", &RawPassword::new("wrong"))
            .await;

        assert_eq!(result, Err(Error::InvalidCredentials));
        assert_eq!(
            notifier.last(),
            Some((false, "Invalid email or password.".to_string()))
        );
        assert_eq!(session.current_user(), None);

        // The session is still usable after the failure.
        session
            .log_in("ada@example.com", &RawPassword::new("hunter2"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deposits_and_withdrawals_notify_success() {
        let (mut session, notifier) = session_with_notifier();

        session.add_funds(100.0).await.unwrap();
        session.transfer_funds(50.0).await.unwrap();

        assert_eq!(session.balance(), 50.0);
        let messages = notifier.messages();
        assert!(messages.iter().all(|(success, _)| *success));
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn overdraw_notifies_insufficient_balance() {
        let (mut session, notifier) = session_with_notifier();
        session.add_funds(100.0).await.unwrap();

        let result = session.transfer_funds(1000.0).await;

        assert!(matches!(result, Err(Error::InsufficientBalance { .. })));
        assert_eq!(
            notifier.last(),
            Some((false, "Insufficient balance".to_string()))
        );
        assert_eq!(session.balance(), 100.0);
    }

    #[tokio::test]
    async fn cancel_on_empty_ledger_notifies() {
        let (mut session, notifier) = session_with_notifier();

        let result = session.cancel_last_transaction().await;

        assert_eq!(result, Err(Error::EmptyLedger));
        assert_eq!(
            notifier.last(),
            Some((false, "There are no transactions to cancel".to_string()))
        );
    }

    #[tokio::test]
    async fn filter_exposes_ledger_views() {
        let (mut session, _notifier) = session_with_notifier();
        session.add_funds(100.0).await.unwrap();
        session.transfer_funds(25.0).await.unwrap();

        assert_eq!(session.filter(TransactionFilter::All).len(), 2);
        assert_eq!(session.filter(TransactionFilter::Deposit).len(), 1);
        assert_eq!(session.filter(TransactionFilter::Withdrawal).len(), 1);
    }
}
