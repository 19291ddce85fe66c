//! Pocketbank is the storage and bookkeeping core of a small personal
//! banking app: account registration with a profile photo, credential-based
//! login, and a per-user transaction ledger with a running balance.
//!
//! All persistence is local flat files: the user list is a JSON array in
//! `data.json`, profile images live in an image directory, and the ledger
//! mirrors its transaction list and balance into a string key-value store.
//! There is no server and no multi-user concern; a [Session] owns one
//! registry and one ledger for the lifetime of the running app.
//!
//! ```no_run
//! use pocketbank::{Config, Session};
//!
//! # async fn run() -> Result<(), pocketbank::Error> {
//! let config = Config::new("/data/pocketbank");
//! let mut session = Session::open(&config).await?;
//!
//! session.add_funds(100.0).await?;
//! session.transfer_funds(50.0).await?;
//! assert_eq!(session.balance(), 50.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod ledger;
pub mod notify;
mod password;
pub mod registry;
mod session;
pub mod stores;
pub mod transaction;
pub mod user;

pub use config::Config;
pub use error::Error;
pub use ledger::Ledger;
pub use password::{PasswordHash, RawPassword};
pub use registry::UserRegistry;
pub use session::Session;
pub use transaction::{Transaction, TransactionFilter, TransactionKind};
pub use user::{Registration, UserRecord};
