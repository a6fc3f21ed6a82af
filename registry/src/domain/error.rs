//! Domain-level error types.
//!
//! These errors are presentation agnostic. The command-line adapter (or any
//! future route layer) decides how to word them for a person; the registry
//! only reports what failed and why.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::patient::PatientId;
use super::ports::RegistryStoreError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// A referenced record does not exist.
    NotFound,
    /// The request clashes with stored data.
    Conflict,
    /// The store could not be reached.
    ServiceUnavailable,
    /// An unexpected storage failure.
    InternalError,
}

/// Kind of record a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A row of the `patients` table.
    Patient,
    /// A row of the `staff` table.
    StaffMember,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => f.write_str("patient"),
            Self::StaffMember => f.write_str("staff member"),
        }
    }
}

/// Failures reported by [`crate::domain::AppointmentRegistry`] operations.
///
/// Validation and reference failures are raised before any storage write;
/// storage failures wrap the adapter's error. In every case the in-memory
/// mirror is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An input field is missing or outside its allowed values.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
    /// A referenced patient or staff member is not registered.
    #[error("{entity} {id} does not exist")]
    Reference {
        /// Kind of the missing record.
        entity: EntityKind,
        /// Identifier that was looked up.
        id: i64,
    },
    /// A patient cannot be removed while appointments still point at them.
    #[error("patient {patient_id} still has {count} appointment(s)")]
    PatientHasAppointments {
        /// Patient whose removal was refused.
        patient_id: PatientId,
        /// Number of appointments referencing the patient.
        count: usize,
    },
    /// The store rejected or failed the write or read.
    #[error(transparent)]
    Storage(#[from] RegistryStoreError),
}

impl RegistryError {
    /// Helper for validation failures.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Helper for missing reference targets.
    pub fn reference(entity: EntityKind, id: i64) -> Self {
        Self::Reference { entity, id }
    }

    /// Stable category for presentation layers.
    ///
    /// # Examples
    /// ```
    /// use registry::domain::{EntityKind, ErrorCode, RegistryError};
    ///
    /// let err = RegistryError::reference(EntityKind::Patient, 99);
    /// assert_eq!(err.code(), ErrorCode::NotFound);
    /// ```
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::InvalidRequest,
            Self::Reference { .. } => ErrorCode::NotFound,
            Self::PatientHasAppointments { .. } => ErrorCode::Conflict,
            Self::Storage(RegistryStoreError::Connection { .. }) => ErrorCode::ServiceUnavailable,
            Self::Storage(RegistryStoreError::Duplicate { .. }) => ErrorCode::Conflict,
            Self::Storage(RegistryStoreError::Query { .. }) => ErrorCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RegistryError::validation("status", "unknown"), ErrorCode::InvalidRequest)]
    #[case(RegistryError::reference(EntityKind::StaffMember, 4), ErrorCode::NotFound)]
    #[case(
        RegistryError::PatientHasAppointments { patient_id: PatientId::new(1), count: 2 },
        ErrorCode::Conflict
    )]
    #[case(RegistryStoreError::connection("locked").into(), ErrorCode::ServiceUnavailable)]
    #[case(RegistryStoreError::duplicate("identity number").into(), ErrorCode::Conflict)]
    #[case(RegistryStoreError::query("syntax").into(), ErrorCode::InternalError)]
    fn codes_follow_the_failure_kind(#[case] error: RegistryError, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn reference_error_names_the_entity() {
        let err = RegistryError::reference(EntityKind::StaffMember, 42);
        assert_eq!(err.to_string(), "staff member 42 does not exist");
    }

    #[rstest]
    fn storage_error_is_transparent() {
        let err: RegistryError = RegistryStoreError::duplicate("identity number 1101122334").into();
        assert_eq!(
            err.to_string(),
            "registry store rejected a duplicate record: identity number 1101122334"
        );
    }
}
