//! Defines the app level error type and conversions from the underlying storage errors.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required registration field was left empty.
    ///
    /// Holds the name of the offending field so the client can point the
    /// user at the right input.
    #[error("the field '{0}' is required")]
    MissingField(&'static str),

    /// The password and its confirmation did not match during registration.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The email used to register already belongs to another account.
    #[error("the email \"{0}\" is already in use")]
    DuplicateEmail(String),

    /// The user provided an email/password combination that does not match
    /// any registered account.
    ///
    /// The message deliberately does not say which of the two was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A deposit or withdrawal was requested with a zero or negative amount.
    #[error("{0} is not a valid amount, amounts must be positive")]
    InvalidAmount(f64),

    /// A withdrawal was requested for more money than the account holds.
    #[error("cannot withdraw {requested}, only {available} available")]
    InsufficientBalance {
        /// The amount the user asked to withdraw.
        requested: f64,
        /// The balance at the time of the request.
        available: f64,
    },

    /// Tried to cancel the last transaction of a ledger that has none.
    #[error("there are no transactions to cancel")]
    EmptyLedger,

    /// An unexpected error occurred in the underlying hashing library.
    ///
    /// The error string should only be logged for debugging. When
    /// communicating with the application client this error should be
    /// replaced with a general failure message.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The durable key-value or file store failed to read or write.
    #[error("storage operation failed: {0}")]
    StorageError(String),

    /// Stored data could not be encoded to or decoded from JSON.
    #[error("could not (de)serialize JSON: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unhandled I/O error occurred: {value}");
        Error::StorageError(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::SerializationError(value.to_string())
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(value: bcrypt::BcryptError) -> Self {
        Error::HashingError(value.to_string())
    }
}
