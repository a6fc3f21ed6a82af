//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the registry's
//! storage port, backed by a single SQLite file through Diesel with `r2d2`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: `DieselRegistryStore` only translates between Diesel
//!   rows and domain records. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to
//!   `RegistryStoreError` variants.
//!
//! # Example
//!
//! ```no_run
//! use registry::outbound::persistence::{
//!     DbPool, DieselRegistryStore, PoolConfig, run_pending_migrations,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("turnos.db"))?;
//! run_pending_migrations(&pool)?;
//! let store = DieselRegistryStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_registry_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_registry_store::DieselRegistryStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};
