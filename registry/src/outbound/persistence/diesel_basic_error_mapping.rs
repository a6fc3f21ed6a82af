//! Shared Diesel error mapping for the registry store.

use tracing::debug;

use crate::domain::ports::RegistryStoreError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> RegistryStoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RegistryStoreError::connection(message)
}

/// Map Diesel errors into registry store errors.
///
/// Unique constraint violations carry SQLite's message (which names the
/// offending column) so callers can tell the operator what clashed.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RegistryStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RegistryStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => RegistryStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RegistryStoreError::duplicate(info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            RegistryStoreError::query("referenced record does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RegistryStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => RegistryStoreError::query(info.message()),
        _ => RegistryStoreError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, RegistryStoreError::connection("timed out"));
    }

    #[rstest]
    fn unique_violation_becomes_duplicate() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: patients.identity_number".to_owned()),
        );

        let err = map_diesel_error(diesel_err);

        assert_eq!(
            err,
            RegistryStoreError::duplicate("UNIQUE constraint failed: patients.identity_number")
        );
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            RegistryStoreError::query("record not found")
        );
    }
}
