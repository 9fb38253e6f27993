// Core infrastructure modules
pub mod core;

// Presentation helpers
pub mod grid;

// Re-export the public surface so callers don't have to spell out the
// module tree for everyday use.
pub use crate::core::db::builder::{Direction, Filter, Limit, OrderBy, Record, Statement};
pub use crate::core::db::config::ConnectionConfig;
pub use crate::core::db::connection::{ConnectionManager, ConnectionState, Driver, MySqlDriver};
pub use crate::core::db::query::{QueryBuilder, QueryOutcome, QueryResult};
pub use crate::core::{Error, ErrorKind, Result};
pub use crate::grid::{Grid, GridStyle};

// The driver's value type travels through filters and records; re-export it
// so downstream crates don't need a direct `mysql` dependency for plain use.
pub use mysql::Value;
