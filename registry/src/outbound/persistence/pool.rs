//! Connection pool for Diesel SQLite connections.
//!
//! This module wraps Diesel's `r2d2` integration so adapters can check out a
//! connection per operation. Every connection is prepared with the pragmas
//! the registry relies on before it is handed out.
//!
//! # Design
//!
//! - Checkout blocks for at most the configured timeout
//! - Connections enable foreign keys and a busy timeout on acquisition
//! - All errors are mapped to `PoolError` variants

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use registry::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("turnos.db")
///     .with_max_size(2)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_path(), "turnos.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the SQLite file at `database_path`.
    ///
    /// Uses these defaults:
    /// - `max_size`: 4 connections
    /// - `min_idle`: 1 connection
    /// - `connection_timeout`: 30 seconds
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 4,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database file path.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }
}

#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pooled SQLite connection handed out by [`DbPool::get`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Blocking connection pool for SQLite via Diesel.
///
/// # Example
///
/// ```no_run
/// use registry::outbound::persistence::{DbPool, PoolConfig};
///
/// # fn main() -> Result<(), registry::outbound::persistence::PoolError> {
/// let pool = DbPool::new(PoolConfig::new("turnos.db"))?;
/// let _conn = pool.get()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// The SQLite file is created on first connection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed (for
    /// example when the file's directory does not exist) or when `max_size`
    /// or `connection_timeout` is zero. A `min_idle` above `max_size` is
    /// capped at `max_size`.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        if config.max_size == 0 {
            return Err(PoolError::build("max_size must be at least 1"));
        }
        if config.connection_timeout.is_zero() {
            return Err(PoolError::build("connection_timeout must be non-zero"));
        }
        let min_idle = config.min_idle.map(|idle| idle.min(config.max_size));

        let manager = ConnectionManager::<SqliteConnection>::new(config.database_path.as_str());

        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(min_idle)
            .connection_timeout(config.connection_timeout)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub fn get(&self) -> Result<DbConnection, PoolError> {
        self.inner
            .get()
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("turnos.db");

        assert_eq!(config.database_path(), "turnos.db");
        assert_eq!(config.max_size, 4);
        assert_eq!(config.min_idle, Some(1));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("turnos.db")
            .with_max_size(8)
            .with_min_idle(None)
            .with_connection_timeout(Duration::from_secs(5));

        assert_eq!(config.max_size, 8);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn pool_opens_a_file_in_a_temporary_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("registry.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy())).expect("pool builds");

        pool.get().expect("connection checks out");
        assert!(path.exists());
    }

    #[rstest]
    fn pool_build_fails_for_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("registry.db");
        let config = PoolConfig::new(path.to_string_lossy())
            .with_connection_timeout(Duration::from_millis(200));

        let err = DbPool::new(config).err().expect("build fails");
        assert!(matches!(err, PoolError::Build { .. }));
    }

    #[rstest]
    #[case::no_connections(PoolConfig::new("turnos.db").with_max_size(0), "max_size")]
    #[case::no_timeout(
        PoolConfig::new("turnos.db").with_connection_timeout(Duration::ZERO),
        "connection_timeout"
    )]
    fn pool_build_rejects_unusable_limits(#[case] config: PoolConfig, #[case] field: &str) {
        let err = DbPool::new(config).err().expect("build fails");

        assert!(matches!(err, PoolError::Build { .. }));
        assert!(err.to_string().contains(field));
    }

    #[rstest]
    fn min_idle_above_max_size_is_capped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("registry.db");
        let config = PoolConfig::new(path.to_string_lossy())
            .with_max_size(1)
            .with_min_idle(Some(5));

        let pool = DbPool::new(config).expect("pool builds");

        pool.get().expect("connection checks out");
    }

    #[rstest]
    fn pool_error_display() {
        let checkout_err = PoolError::checkout("timed out");
        let build_err = PoolError::build("unable to open database file");

        assert!(checkout_err.to_string().contains("timed out"));
        assert!(build_err.to_string().contains("unable to open database file"));
    }
}
