/// Connection Management Module
///
/// This module owns the single live database connection: establishing it,
/// applying the configured autocommit mode, and transparently
/// re-establishing it once when an execution fails with a recognized
/// connection-loss error.
use crate::core::db::config::ConnectionConfig;
use crate::core::db::query::QueryOutcome;
use crate::core::{Error, ErrorKind, Result};
use mysql::prelude::Queryable;
use mysql::{Conn, Params, Value};
use tracing::{debug, info, warn};

/// Connection lifecycle states.
///
/// ```text
/// Disconnected --connect ok--> Connected
/// Connected --execute hits connection loss--> Reconnecting
/// Reconnecting --connect ok + retry ok--> Connected
/// Reconnecting --connect or retry fails--> Failed
/// Connected --close--> Disconnected
/// ```
///
/// `Failed` is terminal until the caller invokes `connect()` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Reconnecting,
    Failed,
}

/// The seam between the manager and the backend driver: opening a session
/// and running statements on it. The manager's state machine and retry
/// policy live above this trait; everything driver-specific lives below
/// it.
pub trait Driver {
    type Session;

    /// Opens a new session and applies the configured autocommit mode.
    fn open(&mut self, config: &ConnectionConfig) -> Result<Self::Session>;

    /// Runs one statement with positionally bound parameters.
    fn run(
        &mut self,
        session: &mut Self::Session,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryOutcome>;

    /// Commits the current transaction.
    fn commit(&mut self, session: &mut Self::Session) -> Result<()>;

    /// Round-trip health check.
    fn ping(&mut self, session: &mut Self::Session) -> bool;
}

/// The MySQL driver backend.
#[derive(Debug, Default)]
pub struct MySqlDriver;

impl Driver for MySqlDriver {
    type Session = Conn;

    fn open(&mut self, config: &ConnectionConfig) -> Result<Conn> {
        let mut conn = Conn::new(config.to_opts()).map_err(Error::Connection)?;
        let mode = if config.autocommit { 1 } else { 0 };
        conn.query_drop(format!("SET autocommit = {mode}"))
            .map_err(Error::Connection)?;
        Ok(conn)
    }

    fn run(&mut self, conn: &mut Conn, sql: &str, params: &[Value]) -> Result<QueryOutcome> {
        // Statements without placeholders go over the text protocol, like
        // the introspection commands; everything else is prepared.
        if params.is_empty() {
            let result = conn.query_iter(sql).map_err(Error::Query)?;
            QueryOutcome::from_driver(result)
        } else {
            let result = conn
                .exec_iter(sql, Params::Positional(params.to_vec()))
                .map_err(Error::Query)?;
            QueryOutcome::from_driver(result)
        }
    }

    fn commit(&mut self, conn: &mut Conn) -> Result<()> {
        conn.query_drop("COMMIT").map_err(Error::Query)
    }

    fn ping(&mut self, conn: &mut Conn) -> bool {
        conn.ping().is_ok()
    }
}

/// Owns one live session and runs statements on it.
///
/// Single-threaded, synchronous, blocking: each call blocks until the
/// server responds or the single-retry policy exhausts. Concurrent use
/// from multiple threads requires an external mutex around the whole
/// manager. Dropping the manager releases the session.
pub struct ConnectionManager<D: Driver = MySqlDriver> {
    config: ConnectionConfig,
    driver: D,
    session: Option<D::Session>,
    state: ConnectionState,
}

impl std::fmt::Debug for ConnectionManager<MySqlDriver> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("config", &self.config)
            .field("connected", &self.session.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl ConnectionManager {
    /// Creates a manager over the MySQL driver in the `Disconnected`
    /// state. No I/O happens until [`connect`](Self::connect) is called.
    pub fn new(config: ConnectionConfig) -> Self {
        ConnectionManager::with_driver(config, MySqlDriver)
    }
}

impl<D: Driver> ConnectionManager<D> {
    /// Creates a manager over a custom driver backend.
    pub fn with_driver(config: ConnectionConfig, driver: D) -> Self {
        ConnectionManager {
            config,
            driver,
            session: None,
            state: ConnectionState::Disconnected,
        }
    }

    /// Establishes a new session using the stored configuration and
    /// applies the configured autocommit mode to it.
    ///
    /// On success any prior session is replaced. On failure the prior
    /// state is left untouched: an existing live session stays usable,
    /// and a manager that never connected stays connection-less.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] when the server is unreachable or
    /// rejects the credentials.
    pub fn connect(&mut self) -> Result<()> {
        info!(
            host = %self.config.host,
            database = %self.config.database,
            "connecting"
        );
        match self.driver.open(&self.config) {
            Ok(session) => {
                self.session = Some(session);
                self.state = ConnectionState::Connected;
                Ok(())
            }
            Err(err) => {
                if self.state == ConnectionState::Reconnecting {
                    self.state = ConnectionState::Failed;
                }
                Err(err)
            }
        }
    }

    /// Runs `sql` with positionally bound `params` on the current
    /// session.
    ///
    /// If execution fails with an error classified as connection loss, the
    /// manager performs exactly one `connect()` followed by exactly one
    /// retry of the same statement and parameters. Any other failure, or a
    /// failure of the retry itself, is surfaced unchanged with the driver
    /// diagnostic preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] when no session exists,
    /// [`Error::Connection`] when the reconnect fails, and
    /// [`Error::Query`] for execution failures.
    pub fn execute(&mut self, sql: &str, params: Vec<Value>) -> Result<QueryOutcome> {
        debug!(sql = %sql, params = params.len(), "executing statement");
        match self.run(sql, &params) {
            Err(err) if is_connection_loss(&err) => {
                warn!(sql = %sql, "connection lost; reconnecting once");
                self.state = ConnectionState::Reconnecting;
                self.connect()?;
                self.run(sql, &params).map_err(|retry_err| {
                    self.state = ConnectionState::Failed;
                    retry_err
                })
            }
            other => other,
        }
    }

    fn run(&mut self, sql: &str, params: &[Value]) -> Result<QueryOutcome> {
        let session = self.session.as_mut().ok_or(Error::NotConnected)?;
        self.driver.run(session, sql, params)
    }

    /// Commits the current transaction. Meaningful only when autocommit is
    /// disabled; calling it is the caller's responsibility.
    pub fn commit(&mut self) -> Result<()> {
        let session = self.session.as_mut().ok_or(Error::NotConnected)?;
        self.driver.commit(session)
    }

    /// Releases the session. Idempotent: closing an already-closed
    /// manager is a no-op.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!(host = %self.config.host, "connection closed");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Reports the current lifecycle state.
    ///
    /// This is a liveness hint only: an established-but-dead connection
    /// still reports `Connected`. Use [`ping`](Self::ping) for a verified
    /// round trip.
    pub fn status(&self) -> ConnectionState {
        self.state
    }

    /// Whether a session object currently exists. A hint, like
    /// [`status`](Self::status).
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Verified round-trip health check against the server.
    pub fn ping(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) => self.driver.ping(session),
            None => false,
        }
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl<D: Driver> Drop for ConnectionManager<D> {
    fn drop(&mut self) {
        self.close();
    }
}

fn is_connection_loss(err: &Error) -> bool {
    matches!(err, Error::Query(e) if ErrorKind::classify(e) == ErrorKind::ConnectionLost)
}
