/// Core Module
///
/// This module contains the fundamental components of the library: the
/// database layer (configuration, connection management, SQL assembly,
/// query execution, schema introspection) and the shared error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Error, ErrorKind, Result};
