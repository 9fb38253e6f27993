/// Error Module
///
/// This module defines the error types used across the library, plus the
/// driver-boundary classification that decides which failures warrant a
/// reconnect-and-retry.
use thiserror::Error;

/// Error type covering every failure surface of the library:
/// - Configuration validation (missing keys, unparseable values)
/// - Connection establishment
/// - Statement assembly
/// - Query execution
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration validation errors, raised before any network I/O
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failures while establishing a connection (bad credentials,
    /// unreachable host, authentication failure)
    #[error("Connection error: {0}")]
    Connection(#[source] mysql::Error),

    /// Statement assembly errors (e.g. an INSERT with no columns)
    #[error("Statement error: {0}")]
    Statement(String),

    /// Query execution failures, with the driver diagnostic preserved
    #[error("Query error: {0}")]
    Query(#[source] mysql::Error),

    /// An operation required a live connection but none exists
    #[error("Not connected to the database")]
    NotConnected,

    /// File system and I/O errors (configuration file loading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// MySQL error codes that signal a dead connection rather than a logical
/// query failure: CR_SERVER_GONE_ERROR (2006), CR_SERVER_LOST (2013),
/// ER_CONNECTION_KILLED (1927), ER_CLIENT_INTERACTION_TIMEOUT (4031).
const CONNECTION_LOSS_CODES: &[u16] = &[1927, 2006, 2013, 4031];

/// Broad classification of a driver error, mapped once at the driver
/// boundary so retry logic never inspects raw error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The session died underneath us (idle timeout, killed connection,
    /// closed socket); eligible for a single reconnect-and-retry.
    ConnectionLost,
    /// Any other execution failure (syntax error, constraint violation,
    /// permission denial); never retried.
    Query,
}

impl ErrorKind {
    /// Classifies a driver error.
    ///
    /// I/O faults and a closed connection are treated as connection loss;
    /// server-reported errors are classified by code.
    pub fn classify(err: &mysql::Error) -> Self {
        match err {
            mysql::Error::IoError(_) => ErrorKind::ConnectionLost,
            mysql::Error::DriverError(mysql::DriverError::ConnectionClosed) => {
                ErrorKind::ConnectionLost
            }
            mysql::Error::MySqlError(e) if CONNECTION_LOSS_CODES.contains(&e.code) => {
                ErrorKind::ConnectionLost
            }
            _ => ErrorKind::Query,
        }
    }
}
