//! End-to-end tests over the disk-backed stores: a session's registrations
//! and transactions must survive a restart.

use std::path::PathBuf;

use tempfile::TempDir;

use pocketbank::{
    Config, RawPassword, Registration, Session, TransactionFilter,
    notify::TracingNotifier,
    stores::{DiskFileStore, DiskKvStore},
};

const TEST_HASH_COST: u32 = 4;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

async fn open_session(config: &Config) -> Session<DiskKvStore, DiskFileStore> {
    let kv_store = DiskKvStore::open(config.kv_dir()).await.unwrap();
    let file_store = DiskFileStore::open(config.document_dir()).await.unwrap();

    Session::with_hash_cost(
        kv_store,
        file_store,
        Box::new(TracingNotifier),
        TEST_HASH_COST,
    )
}

fn registration(image_source: PathBuf) -> Registration {
    Registration {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        password: RawPassword::new("hunter2"),
        confirm_password: RawPassword::new("hunter2"),
        address: "1 Harbor Lane".to_string(),
        image_source,
    }
}

#[tokio::test]
async fn session_state_survives_restart() {
    init_tracing();

    let data_dir = TempDir::new().unwrap();
    let config = Config::new(data_dir.path());

    let photo = data_dir.path().join("picked-photo.jpg");
    std::fs::write(&photo, b"jpeg bytes").unwrap();

    {
        let mut session = open_session(&config).await;
        session.register(registration(photo.clone())).await.unwrap();
        session
            .log_in("grace@example.com", &RawPassword::new("hunter2"))
            .await
            .unwrap();

        session.add_funds(100.0).await.unwrap();
        session.transfer_funds(30.0).await.unwrap();
        assert_eq!(session.balance(), 70.0);
    }

    // "Restart": a fresh session over the same data directory.
    let mut session = open_session(&config).await;
    let user = session
        .log_in("grace@example.com", &RawPassword::new("hunter2"))
        .await
        .unwrap();

    assert_eq!(user.email, "grace@example.com");
    assert_eq!(session.balance(), 70.0);
    assert_eq!(session.filter(TransactionFilter::All).len(), 2);
    assert_eq!(session.filter(TransactionFilter::Deposit).len(), 1);
    assert_eq!(session.filter(TransactionFilter::Withdrawal).len(), 1);

    // The copied profile image exists on disk under the user's ID.
    let image_on_disk = config.document_dir().join(&user.image_path);
    assert_eq!(std::fs::read(image_on_disk).unwrap(), b"jpeg bytes");
}

#[tokio::test]
async fn cancelled_transaction_stays_gone_after_restart() {
    init_tracing();

    let data_dir = TempDir::new().unwrap();
    let config = Config::new(data_dir.path());

    {
        let mut session = open_session(&config).await;
        session.add_funds(100.0).await.unwrap();
        session.transfer_funds(50.0).await.unwrap();
        session.cancel_last_transaction().await.unwrap();
    }

    let kv_store = DiskKvStore::open(config.kv_dir()).await.unwrap();
    let mut ledger = pocketbank::Ledger::new(kv_store);
    ledger.load().await.unwrap();

    assert_eq!(ledger.transactions().len(), 1);
    // Cancel never compensates the balance; the stored balance still
    // reflects both transactions.
    assert_eq!(ledger.balance(), 50.0);
}
