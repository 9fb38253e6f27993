/// Database Module
///
/// This module provides the database layer of the library, organized into
/// focused submodules:
/// - **Configuration** (`config.rs`): validated connection settings
/// - **Connection Management** (`connection.rs`): one live connection, its
///   state machine, and the single-retry reconnect policy
/// - **SQL Assembly** (`builder.rs`): structured CRUD intents rendered to
///   parameterized SQL
/// - **Query Execution** (`query.rs`): the builder facade and materialized
///   results
/// - **Schema Introspection** (`schema.rs`): table listing and description
///
/// All operations use the shared [`crate::core::Error`] type for
/// consistent error propagation.
pub mod builder;
pub mod config;
pub mod connection;
pub mod query;
pub mod schema;

pub use builder::*;
pub use config::*;
pub use connection::*;
pub use query::*;
pub use schema::*;
