//! Shared SQLite helpers for integration tests.
//!
//! Each test gets its own database file inside a temporary directory, with
//! the embedded migrations applied. The directory is removed when the
//! `TestDatabase` is dropped.

use diesel::RunQueryDsl;
use diesel::sqlite::SqliteConnection;
use registry::outbound::persistence::{
    DbPool, DieselRegistryStore, PoolConfig, run_pending_migrations,
};
use tempfile::TempDir;

/// A migrated SQLite database in a temporary directory.
pub struct TestDatabase {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDatabase {
    /// Create a fresh database with every migration applied.
    pub fn migrated() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("turnos.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy())).expect("build pool");
        run_pending_migrations(&pool).expect("apply migrations");
        Self { _dir: dir, pool }
    }

    /// Store adapter sharing this database's pool.
    pub fn store(&self) -> DieselRegistryStore {
        DieselRegistryStore::new(self.pool.clone())
    }

    /// Run raw SQL, bypassing the registry.
    pub fn execute(&self, sql: &str) {
        let mut pooled = self.pool.get().expect("checkout connection");
        let conn: &mut SqliteConnection = &mut pooled;
        diesel::sql_query(sql).execute(conn).expect("execute SQL");
    }
}
